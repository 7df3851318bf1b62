//! Legacy (`-XX:+PrintGCDetails`) records that span several physical lines.
//!
//! A pause line is held until the next line shows whether it continues:
//!
//! - `, [Metaspace: ...], 0.04 secs]` trailing detail is appended verbatim
//! - `: 1228800K->...` completes a `[ParNew` / `[CMS` head that was cut by a
//!   concurrent phase line
//! - `   [Eden: ...]` G1 heap summary is appended, other indented G1 detail
//!   lines are dropped
//! - ` [Times: ...]` is appended and closes the record

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use super::Continuation;
use crate::parser::patterns::{compile, DATESTAMP, DECIMAL, UPTIME};

static PAUSE_HEAD: Lazy<Regex> = Lazy::new(|| {
    compile(&[r"^(?:", DATESTAMP, r": )?(?:", UPTIME, r": )?\[(?:GC|Full GC)\b"])
});

static CONCURRENT_SPLIT: Lazy<Regex> = Lazy::new(|| {
    compile(&[
        r"^(?P<head>.*\[(?:ParNew|CMS))(?P<concurrent>(?:", DATESTAMP, r": )?(?:", UPTIME,
        r": )?\[CMS-concurrent-.*)$",
    ])
});

static REFERENCE_GC: Lazy<Regex> = Lazy::new(|| {
    compile(&[
        r"(?:", DATESTAMP, r": )?(?:", UPTIME, r": )?\[(?:(?:Soft|Weak|Final|Phantom)Reference(?:, \d+ refs)+",
        r"|JNI Weak Reference), ", DECIMAL, r" secs\]",
    ])
});

/// Drop `[SoftReference, 0 refs, 0.0000350 secs]` style fragments embedded
/// in a pause line. A line made only of fragments is kept as is.
pub fn strip_reference_gc(line: &str) -> Cow<'_, str> {
    if !REFERENCE_GC.is_match(line) {
        return Cow::Borrowed(line);
    }
    let stripped = REFERENCE_GC.replace_all(line, "");
    if stripped.trim().is_empty() {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(stripped.into_owned())
    }
}

/// Split `[GC ... [ParNew<ts>: [CMS-concurrent-...` into the pause head and
/// the concurrent phase line written into the middle of it.
pub fn split_concurrent(line: &str) -> Option<(&str, &str)> {
    let caps = CONCURRENT_SPLIT.captures(line)?;
    Some((caps.name("head")?.as_str(), caps.name("concurrent")?.as_str()))
}

pub fn is_pause_head(line: &str) -> bool {
    PAUSE_HEAD.is_match(line)
}

/// A held legacy pause line plus whatever continued it.
#[derive(Debug)]
pub struct LegacyRecord {
    text: String,
    g1: bool,
    lines: usize,
}

impl LegacyRecord {
    pub fn open(line: &str) -> Option<Self> {
        if !is_pause_head(line) {
            return None;
        }
        Some(Self {
            text: line.to_string(),
            g1: line.contains("[GC pause"),
            lines: 1,
        })
    }

    pub fn accept(&mut self, line: &str) -> Continuation {
        let trimmed = line.trim_start();

        if line.starts_with(',') || line.starts_with(':') || line.starts_with(" (") {
            self.text.push_str(line);
        } else if trimmed.starts_with("[Times:") {
            self.push_word(trimmed);
            self.lines += 1;
            return Continuation::Complete;
        } else if trimmed.starts_with("[Eden:") {
            self.push_word(trimmed);
            self.g1 = true;
        } else if self.g1 && !trimmed.is_empty() && trimmed.len() < line.len() {
            // Indented G1 phase detail.
        } else {
            return Continuation::Unrelated;
        }

        self.lines += 1;
        Continuation::Absorb
    }

    pub fn line_count(&self) -> usize {
        self.lines
    }

    /// Physical lines were combined into one.
    pub fn is_merged(&self) -> bool {
        self.lines > 1
    }

    pub fn into_line(self) -> String {
        self.text
    }

    fn push_word(&mut self, word: &str) {
        if !self.text.ends_with(' ') {
            self.text.push(' ');
        }
        self.text.push_str(word);
    }
}
