//! Shared grammar fragments.
//!
//! Every pattern in the registry is assembled from these pieces so that the
//! named capture groups line up with [`RawFields`]:
//!
//! - `decoration`: unified logging `[...]` block
//! - `datestamp`, `uptime`: legacy line prefix
//! - `trigger`, `failure`
//! - `{young,old,combined,perm,humongous}_{begin,end,space}`
//! - `duration`, `user`, `sys`, `real`, `text`
//!
//! The regex crate rejects duplicate group names, so a dialect that has two
//! layouts for the same field gets one grammar per layout.

use regex::{Captures, Regex};

use super::traits::{EventType, Grammar, RawFields, RawRegion};

pub const DATESTAMP: &str = r"\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[.,]\d{3}[+-]\d{4}";
pub const UPTIME: &str = r"\d+[.,]\d{3}";
pub const DECIMAL: &str = r"\d+[.,]\d+";
pub const SIZE: &str = r"\d+(?:[.,]\d+)?[BKMG]";
pub const END: &str = r"\s*$";

/// Optional unified collection id: `GC(42) `.
pub const GC_ID: &str = r"(?:GC\(\d+\) +)?";

/// Unified time decorators: `[0.231s]`, `[173690ms]`, `[2020-06-24T18:13:47.695-0700]`.
fn decorators() -> String {
    [r"(?:\[(?:", DATESTAMP, r"|\d+(?:[.,]\d+)?(?:s|ms|ns))\])+"].concat()
}

const LEVEL: &str = r"(?:\[(?:trace|debug|info|warning|error) *\])?";

/// Unified decoration: one or more time decorators, optional level, optional tags.
pub fn decoration() -> String {
    join(&[r"(?P<decoration>", &decorators(), LEVEL, r"(?:\[[a-z0-9,]+ *\])?)"])
}

/// Start of a unified line up to the message text.
pub fn unified() -> String {
    join(&["^", &decoration(), " +", GC_ID])
}

/// Start of a unified line whose tag set matches `tags`, e.g. `gc,stats`.
pub fn unified_tagged(tags: &str) -> String {
    join(&[r"^(?P<decoration>", &decorators(), LEVEL, r"\[", tags, r" *\]) +", GC_ID])
}

/// Start of a legacy line: optional datestamp, optional uptime seconds.
pub fn legacy() -> String {
    [
        r"^(?:(?P<datestamp>",
        DATESTAMP,
        r"): )?(?:(?P<uptime>",
        UPTIME,
        r"): )?",
    ]
    .concat()
}

/// Nested timestamp inside a legacy line, not captured.
pub fn inner() -> String {
    [r"(?:", DATESTAMP, r": )?(?:", UPTIME, r": )?"].concat()
}

/// `(Allocation Failure)`, `(System.gc())`.
pub fn trigger() -> String {
    r"\((?P<trigger>[^()]*(?:\([^()]*\))?[^()]*)\)".to_string()
}

/// `begin->end(space)`; JDK 17 style `begin(space)->end(space)` is accepted.
pub fn region(name: &str) -> String {
    [
        r"(?P<",
        name,
        r"_begin>",
        SIZE,
        r")(?:\(",
        SIZE,
        r"\))?->(?P<",
        name,
        r"_end>",
        SIZE,
        r")\((?P<",
        name,
        r"_space>",
        SIZE,
        r")\)",
    ]
    .concat()
}

/// Occupancy snapshot `end(space)`.
pub fn occupancy(name: &str) -> String {
    [r"(?P<", name, r"_end>", SIZE, r")\((?P<", name, r"_space>", SIZE, r")\)"].concat()
}

pub fn legacy_duration() -> String {
    [r"(?P<duration>", DECIMAL, r" secs)"].concat()
}

pub fn unified_duration() -> String {
    [r"(?P<duration>", DECIMAL, r" ?ms)"].concat()
}

pub fn legacy_times() -> String {
    [
        r"(?: ?\[Times: user=(?P<user>",
        DECIMAL,
        r") sys=(?P<sys>",
        DECIMAL,
        r"), real=(?P<real>",
        DECIMAL,
        r") secs\])?",
    ]
    .concat()
}

pub fn unified_times() -> String {
    [
        r"(?: +User=(?P<user>",
        DECIMAL,
        r")s +Sys=(?P<sys>",
        DECIMAL,
        r")s +Real=(?P<real>",
        DECIMAL,
        r")s)?",
    ]
    .concat()
}

/// Merged unified `Metaspace:` detail placed before the heap totals.
pub fn unified_metaspace() -> String {
    join(&[r"(?:Metaspace: ", &region("perm"), r"(?: NonClass: \S+ Class: \S+)? +)?"])
}

/// Legacy `[Metaspace: ...]` / `[PSPermGen: ...]` / `[CMS Perm : ...]` block.
pub fn legacy_perm() -> String {
    join(&[r"\[(?:Metaspace|PSPermGen|CMS Perm|Perm) ?: ", &region("perm"), r"\]"])
}

/// Regex-backed grammar. The workhorse of the registry.
pub struct PatternGrammar {
    event_type: EventType,
    regex: Regex,
}

impl PatternGrammar {
    pub fn new(event_type: EventType, pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            event_type,
            regex: Regex::new(pattern)?,
        })
    }
}

impl Grammar for PatternGrammar {
    fn event_type(&self) -> EventType {
        self.event_type
    }

    fn matches(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    fn extract<'a>(&self, line: &'a str) -> Option<RawFields<'a>> {
        let caps = self.regex.captures(line)?;
        Some(RawFields {
            decoration: group(&caps, "decoration"),
            datestamp: group(&caps, "datestamp"),
            uptime: group(&caps, "uptime"),
            trigger: group(&caps, "trigger").map(str::trim),
            failure: group(&caps, "failure"),
            young: raw_region(&caps, ["young_begin", "young_end", "young_space"]),
            old: raw_region(&caps, ["old_begin", "old_end", "old_space"]),
            combined: raw_region(&caps, ["combined_begin", "combined_end", "combined_space"]),
            permanent: raw_region(&caps, ["perm_begin", "perm_end", "perm_space"]),
            humongous: raw_region(&caps, ["humongous_begin", "humongous_end", "humongous_space"]),
            duration: group(&caps, "duration"),
            user: group(&caps, "user"),
            sys: group(&caps, "sys"),
            real: group(&caps, "real"),
            text: group(&caps, "text").map(str::trim),
        })
    }
}

/// Compile a built-in grammar from its fragments. Patterns are fixed at build
/// time, so a failure here is a programming error caught by the registry tests.
pub(crate) fn grammar(event_type: EventType, parts: &[&str]) -> Box<dyn Grammar> {
    Box::new(PatternGrammar::new(event_type, &parts.concat()).expect("built-in grammar pattern must compile"))
}

/// Compile a fixed helper pattern, e.g. for the preprocessor's line scanners.
pub(crate) fn compile(parts: &[&str]) -> Regex {
    Regex::new(&parts.concat()).expect("built-in pattern must compile")
}

fn join(parts: &[&str]) -> String {
    parts.concat()
}

fn group<'a>(caps: &Captures<'a>, name: &str) -> Option<&'a str> {
    caps.name(name).map(|m| m.as_str())
}

fn raw_region<'a>(caps: &Captures<'a>, [begin, end, space]: [&str; 3]) -> Option<RawRegion<'a>> {
    Some(RawRegion {
        begin: group(caps, begin),
        end: group(caps, end)?,
        space: group(caps, space)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_fragment_forms() {
        let re = Regex::new(&join(&["^", &region("combined"), "$"])).unwrap();
        assert!(re.is_match("1M->1M(7M)"));
        assert!(re.is_match("24.0M(256.0M)->21.6M(256.0M)"));
        assert!(re.is_match("0.0B->0.0B(13.0M)"));
        assert!(!re.is_match("1M->1M"));
    }

    #[test]
    fn test_trigger_with_nested_parens() {
        let re = Regex::new(&join(&["^", &trigger(), "$"])).unwrap();
        let caps = re.captures("(System.gc())").unwrap();
        assert_eq!(&caps["trigger"], "System.gc()");
        let caps = re.captures("(Allocation Failure)").unwrap();
        assert_eq!(&caps["trigger"], "Allocation Failure");
    }

    #[test]
    fn test_decoration_forms() {
        let re = Regex::new(&join(&["^", &decoration(), "$"])).unwrap();
        assert!(re.is_match("[0.231s][info][gc]"));
        assert!(re.is_match("[0.031s][info][gc,start     ]"));
        assert!(re.is_match("[2020-06-24T18:13:47.695-0700][173690ms]"));
        assert!(re.is_match("[2020-10-26T14:51:41.413-0400]"));
        assert!(!re.is_match("[GC pause (young)]"));
    }

    #[test]
    fn test_pattern_grammar_extract() {
        let parts: &[&str] = &[
            &unified(),
            r"Pause Full ",
            &trigger(),
            " +",
            &region("combined"),
            " +",
            &unified_duration(),
            END,
        ];
        let pattern = parts.concat();
        let g = PatternGrammar::new(EventType::UnifiedOld, &pattern).unwrap();
        let line = "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms";
        assert!(g.matches(line));

        let raw = g.extract(line).unwrap();
        assert_eq!(raw.decoration, Some("[0.231s][info][gc]"));
        assert_eq!(raw.trigger, Some("Ergonomics"));
        let combined = raw.combined.unwrap();
        assert_eq!(combined.begin, Some("1M"));
        assert_eq!(combined.end, "1M");
        assert_eq!(combined.space, "7M");
        assert_eq!(raw.duration, Some("2.969ms"));
        assert!(raw.young.is_none());
    }
}
