//! Unified logging records keyed by `GC(n)`.
//!
//! With `-Xlog:gc*` one pause is spread over many lines:
//!
//! ```text
//! [0.031s][info][gc,start     ] GC(0) Pause Young (Allocation Failure)
//! [0.032s][info][gc,heap      ] GC(0) PSYoungGen: 512K->464K(1024K)
//! [0.032s][info][gc,heap      ] GC(0) ParOldGen: 0K->8K(512K)
//! [0.032s][info][gc,metaspace ] GC(0) Metaspace: 120K->120K(1056768K)
//! [0.032s][info][gc           ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.195ms
//! [0.032s][info][gc,cpu       ] GC(0) User=0.01s Sys=0.01s Real=0.00s
//! ```
//!
//! which becomes
//!
//! ```text
//! [0.031s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) PSYoungGen: 512K->464K(1024K)
//!     ParOldGen: 0K->8K(512K) Metaspace: 120K->120K(1056768K) 0M->0M(1M) 1.195ms User=0.01s Sys=0.01s Real=0.00s
//! ```
//!
//! (on one line). Phase, task and region lines between the start and the
//! summary are dropped.

use once_cell::sync::Lazy;
use regex::Regex;

use super::Continuation;
use crate::parser::patterns::{compile, decoration, DECIMAL, SIZE};
use crate::units;

static LINE: Lazy<Regex> =
    Lazy::new(|| compile(&[r"^\s*", &decoration(), r" +(?:GC\((?P<id>\d+)\) +)?(?P<message>.*)$"]));

static SUMMARY: Lazy<Regex> = Lazy::new(|| {
    compile(&[
        r"^(?P<head>Pause .*?) +(?P<tail>(?:", SIZE, r"(?:\(", SIZE, r"\))?->", SIZE, r"\(", SIZE, r"\) +)?",
        DECIMAL, r" ?ms)$",
    ])
});

static CPU: Lazy<Regex> =
    Lazy::new(|| compile(&[r"^User=", DECIMAL, r"s +Sys=", DECIMAL, r"s +Real=", DECIMAL, r"s$"]));

const HEAP_DETAILS: &[&str] = &[
    "PSYoungGen:",
    "ParOldGen:",
    "PSOldGen:",
    "DefNew:",
    "Tenured:",
    "ParNew:",
    "CMS:",
    "Metaspace:",
];

const TO_SPACE_EXHAUSTED: &str = "To-space exhausted";

/// A unified line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnifiedLine<'a> {
    pub decoration: &'a str,
    pub gc_id: Option<u64>,
    pub message: &'a str,
}

impl<'a> UnifiedLine<'a> {
    pub fn parse(line: &'a str) -> Option<Self> {
        let caps = LINE.captures(line)?;
        Some(Self {
            decoration: caps.name("decoration")?.as_str(),
            gc_id: caps.name("id").and_then(|m| m.as_str().parse().ok()),
            message: caps.name("message").map_or("", |m| m.as_str()),
        })
    }

    fn kind(&self) -> Kind<'a> {
        let message = self.message;
        if CPU.is_match(message) {
            return Kind::Cpu;
        }
        if message == TO_SPACE_EXHAUSTED {
            return Kind::Failure;
        }
        if message.contains("->") && HEAP_DETAILS.iter().any(|prefix| message.starts_with(prefix)) {
            return Kind::HeapDetail;
        }
        if let Some(caps) = SUMMARY.captures(message) {
            if let (Some(head), Some(tail)) = (caps.name("head"), caps.name("tail")) {
                return Kind::Summary {
                    head: head.as_str(),
                    tail: tail.as_str(),
                };
            }
        }
        if message.starts_with("Pause ") {
            return Kind::Start;
        }
        Kind::Other
    }

    fn is_start_tagged(&self) -> bool {
        units::decoration_time(self.decoration).start_anchored
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind<'a> {
    /// `Pause Young (Allocation Failure)` with no sizes or duration.
    Start,
    /// `Pause Young (Allocation Failure) 0M->0M(1M) 1.195ms`
    Summary { head: &'a str, tail: &'a str },
    HeapDetail,
    Failure,
    Cpu,
    Other,
}

#[derive(Debug)]
struct Summary {
    decoration: String,
    head: String,
    tail: String,
    line: String,
}

/// Lines of one `GC(n)` pause gathered so far.
#[derive(Debug)]
pub struct UnifiedRecord {
    gc_id: u64,
    start_decoration: Option<String>,
    started: bool,
    details: Vec<String>,
    failure: bool,
    summary: Option<Summary>,
    cpu: Option<String>,
    /// Every physical line, for flushing an incomplete record unchanged.
    lines: Vec<String>,
}

impl UnifiedRecord {
    /// Start a record on a pause start or pause summary line.
    pub fn open(line: &str) -> Option<Self> {
        let parsed = UnifiedLine::parse(line)?;
        let gc_id = parsed.gc_id?;
        let mut record = Self {
            gc_id,
            start_decoration: None,
            started: false,
            details: Vec::new(),
            failure: false,
            summary: None,
            cpu: None,
            lines: vec![line.to_string()],
        };

        match parsed.kind() {
            Kind::Start => {
                record.started = true;
                record.start_decoration = parsed.is_start_tagged().then(|| parsed.decoration.to_string());
            }
            Kind::Summary { head, tail } => record.summary = Some(Summary::new(&parsed, head, tail, line)),
            _ => return None,
        }
        Some(record)
    }

    pub fn accept(&mut self, line: &str) -> Continuation {
        let Some(parsed) = UnifiedLine::parse(line) else {
            return Continuation::Unrelated;
        };
        if parsed.gc_id != Some(self.gc_id) {
            return Continuation::Unrelated;
        }

        let action = match parsed.kind() {
            Kind::Cpu if self.summary.is_some() => {
                self.cpu = Some(parsed.message.to_string());
                Continuation::Complete
            }
            Kind::HeapDetail => {
                self.details.push(first_region(parsed.message).to_string());
                Continuation::Absorb
            }
            Kind::Failure => {
                self.failure = true;
                Continuation::Absorb
            }
            Kind::Summary { head, tail } if self.started && self.summary.is_none() => {
                self.summary = Some(Summary::new(&parsed, head, tail, line));
                Continuation::Absorb
            }
            // Phase, task and region lines inside the pause.
            Kind::Other if self.started && self.summary.is_none() => Continuation::Absorb,
            _ => Continuation::Unrelated,
        };

        if action != Continuation::Unrelated {
            self.lines.push(line.to_string());
        }
        action
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_merged(&self) -> bool {
        self.summary.is_some() && self.lines.len() > 1
    }

    /// Canonical line for a complete record, the original lines otherwise.
    pub fn into_lines(self) -> Vec<String> {
        let Some(summary) = self.summary else {
            return self.lines;
        };
        if self.lines.len() == 1 {
            return vec![summary.line];
        }

        let decoration = self.start_decoration.unwrap_or(summary.decoration);
        let mut canonical = format!("{} GC({}) {}", decoration, self.gc_id, summary.head);
        if self.failure {
            canonical.push(' ');
            canonical.push_str(TO_SPACE_EXHAUSTED);
        }
        for detail in &self.details {
            canonical.push(' ');
            canonical.push_str(detail);
        }
        canonical.push(' ');
        canonical.push_str(&summary.tail);
        if let Some(cpu) = &self.cpu {
            canonical.push(' ');
            canonical.push_str(cpu);
        }
        vec![canonical]
    }
}

/// `DefNew: 1023K(1024K)->127K(1024K) Eden: ... From: ...` keeps only the
/// generation total. JDK 17 appends the per-space breakdown on the same line.
fn first_region(message: &str) -> &str {
    let Some(arrow) = message.find("->") else {
        return message;
    };
    match message[arrow..].find(')') {
        Some(close) => &message[..arrow + close + 1],
        None => message,
    }
}

impl Summary {
    fn new(parsed: &UnifiedLine<'_>, head: &str, tail: &str, line: &str) -> Self {
        Self {
            decoration: parsed.decoration.to_string(),
            head: head.to_string(),
            tail: tail.to_string(),
            line: line.to_string(),
        }
    }
}
