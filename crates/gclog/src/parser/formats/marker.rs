//! Blank lines, informational blocks and the unified catch-all.

use regex::Regex;

use crate::parser::patterns::{compile, decoration, grammar, legacy, unified, unified_tagged, DECIMAL, END, SIZE};
use crate::parser::traits::{EventType, Grammar, RawFields};

/// Empty or whitespace-only line.
pub struct BlankLine;

impl Grammar for BlankLine {
    fn event_type(&self) -> EventType {
        EventType::Blank
    }

    fn matches(&self, line: &str) -> bool {
        line.trim().is_empty()
    }

    fn extract<'a>(&self, line: &'a str) -> Option<RawFields<'a>> {
        self.matches(line).then(RawFields::default)
    }
}

/// Highest-priority grammars: blank lines in both layouts.
pub(crate) fn blank() -> Vec<Box<dyn Grammar>> {
    vec![
        Box::new(BlankLine),
        grammar(EventType::UnifiedBlankLine, &["^", &decoration(), END]),
    ]
}

/// Output of diagnostic flags that ride along with GC logging.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let legacy = legacy();
    let unified = unified();

    vec![
        grammar(
            EventType::ThreadDump,
            &[
                r#"^(?:Full thread dump .*|"[^"]+" .*(?:prio|tid)=.*|\s*java\.lang\.Thread\.State: .*"#,
                r#"|\s*at \S+\(.*\)|\s*- (?:locked|waiting on|waiting to lock|parking to wait for) .*|JNI global references: \d+)"#,
                END,
            ],
        ),
        grammar(
            EventType::HeapAtGc,
            &[
                r"^(?:\{Heap (?:before|after) GC invocations=\d+ \(full \d+\):|\}|Heap",
                r"| *(?:def new generation|par new generation|PSYoungGen|ParOldGen|PSOldGen|PSPermGen",
                r"|concurrent mark-sweep generation|concurrent-mark-sweep perm gen|tenured generation",
                r"|garbage-first heap|compacting perm gen|Metaspace|class space|region size|eden space",
                r"|from space|to space|object space|the space|Shenandoah Heap|ZHeap)\b.*)",
                END,
            ],
        ),
        grammar(
            EventType::TenuringDistribution,
            &[
                r"^(?:Desired survivor size \d+ bytes, new threshold \d+ \(max(?: threshold)? \d+\)",
                r"|- age +\d+: +\d+ bytes, +\d+ total)",
                END,
            ],
        ),
        grammar(
            EventType::ClassHistogram,
            &[
                r"^(?:\s*num +#instances +#bytes +class name.*|-{10,}|\s*\d+: +\d+ +\d+ +\S+.*",
                r"|Total +\d+ +\d+)",
                END,
            ],
        ),
        grammar(EventType::ClassHistogram, &[&legacy, r"\[Class Histogram.*"]),
        grammar(
            EventType::FlsStatistics,
            &[
                r"^(?:Statistics for (?:BinaryTreeDictionary|IndexedFreeLists):|Total Free Space: -?\d+",
                r"|Max +Chunk Size: -?\d+|Number of Blocks: \d+|Av\. +Block +Size: \d+|Tree +Height: \d+",
                r"|Before GC:|After GC:|-{6,})",
                END,
            ],
        ),
        grammar(
            EventType::ClassUnloading,
            &[r"^\[(?:Unloading class|Loaded) [^\]]+\]", END],
        ),
        grammar(
            EventType::ReferenceGc,
            &[
                &legacy,
                r"\[(?:(?:Soft|Weak|Final|Phantom)Reference(?:, \d+ refs)+|JNI Weak Reference), ",
                DECIMAL,
                r" secs\].*",
            ],
        ),
        grammar(
            EventType::ApplicationConcurrentTime,
            &[&legacy, r"Application time: ", DECIMAL, r" seconds", END],
        ),
        grammar(
            EventType::ApplicationConcurrentTime,
            &[&unified, r"Application time: ", DECIMAL, r" seconds", END],
        ),
        grammar(
            EventType::GcLocker,
            &[r"^GC locker: Trying a full collection because scavenge failed", END],
        ),
        grammar(
            EventType::GcOverheadLimit,
            &[r"^\s*GC time (?:would exceed|is exceeding) GCTimeLimit of \d+%", END],
        ),
        grammar(
            EventType::G1Details,
            &[r"^\s*\[[A-Z][A-Za-z ]*(?: \(ms\))?:.*", END],
        ),
    ]
}

/// Any other unified line carrying a `gc,<subsystem>` tag: heap layout,
/// phase timings, ergonomics. Lowest priority.
///
/// A `GC(n) Pause ...` line with heap totals and a duration is a collection
/// no collector grammar understood. It is left `Unknown` instead.
pub struct GcInfo {
    tagged: Box<dyn Grammar>,
    pause: Regex,
}

impl GcInfo {
    pub fn new() -> Self {
        Self {
            tagged: grammar(EventType::GcInfo, &[&unified_tagged(r"gc,[a-z0-9,]+"), ".*"]),
            pause: compile(&[
                r"GC\(\d+\) +Pause .*", SIZE, r"(?:\(", SIZE, r"\))?->", SIZE, r"\(", SIZE, r"\).* ", DECIMAL,
                r" ?ms\b",
            ]),
        }
    }
}

impl Default for GcInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for GcInfo {
    fn event_type(&self) -> EventType {
        EventType::GcInfo
    }

    fn matches(&self, line: &str) -> bool {
        self.tagged.matches(line) && !self.pause.is_match(line)
    }

    fn extract<'a>(&self, line: &'a str) -> Option<RawFields<'a>> {
        if self.pause.is_match(line) {
            return None;
        }
        self.tagged.extract(line)
    }
}

pub(crate) fn gc_info() -> Vec<Box<dyn Grammar>> {
    vec![Box::new(GcInfo::new())]
}
