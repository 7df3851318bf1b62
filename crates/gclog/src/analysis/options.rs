//! JVM options parsed from the command line banner.

use crate::units;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JvmOptions {
    raw: String,
    tokens: Vec<String>,
}

impl JvmOptions {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.trim().to_string(),
            tokens: raw.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// `-XX:+<name>` is present.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.flag(name, '+')
    }

    /// `-XX:-<name>` is present.
    pub fn is_disabled(&self, name: &str) -> bool {
        self.flag(name, '-')
    }

    /// Value of `-XX:<name>=<value>`; the last occurrence wins, as in the JVM.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.tokens.iter().rev().find_map(|token| {
            token
                .strip_prefix("-XX:")
                .and_then(|rest| rest.strip_prefix(name))
                .and_then(|rest| rest.strip_prefix('='))
        })
    }

    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.tokens.iter().any(|token| token.starts_with(prefix))
    }

    /// Some `-Xlog` selector includes `tag` (`-Xlog:gc*,safepoint:file=...`).
    pub fn logs_tag(&self, tag: &str) -> bool {
        self.tokens
            .iter()
            .filter_map(|token| token.strip_prefix("-Xlog:"))
            .filter_map(|option| option.split(':').next())
            .flat_map(|selectors| selectors.split(','))
            .map(|selector| selector.split('=').next().unwrap_or(selector).trim_end_matches('*'))
            .any(|selector| selector.split('+').any(|t| t == tag))
    }

    /// Unified logging is configured.
    pub fn is_unified(&self) -> bool {
        // `-Xloggc:` is the legacy file option.
        self.tokens.iter().any(|token| token == "-Xlog" || token.starts_with("-Xlog:"))
    }

    /// Initial heap in KB (`-Xms`, `-XX:InitialHeapSize=`).
    pub fn heap_min(&self) -> Option<u64> {
        self.size("-Xms", "InitialHeapSize")
    }

    /// Maximum heap in KB (`-Xmx`, `-XX:MaxHeapSize=`).
    pub fn heap_max(&self) -> Option<u64> {
        self.size("-Xmx", "MaxHeapSize")
    }

    /// Thread stack size in KB (`-Xss`, `-XX:ThreadStackSize=` which is
    /// already in KB).
    pub fn thread_stack_kb(&self) -> Option<u64> {
        if let Some(kb) = self.last_with_prefix("-Xss").and_then(size_kb) {
            return Some(kb);
        }
        self.value("ThreadStackSize").and_then(|v| v.parse().ok())
    }

    fn flag(&self, name: &str, sign: char) -> bool {
        // A later opposite flag overrides an earlier one.
        self.tokens
            .iter()
            .rev()
            .filter_map(|token| token.strip_prefix("-XX:"))
            .find_map(|rest| {
                let mut chars = rest.chars();
                let first = chars.next()?;
                (matches!(first, '+' | '-') && chars.as_str() == name).then_some(first)
            })
            == Some(sign)
    }

    fn size(&self, short: &str, long: &str) -> Option<u64> {
        self.last_with_prefix(short)
            .and_then(size_kb)
            .or_else(|| self.value(long).and_then(size_kb))
    }

    fn last_with_prefix(&self, prefix: &str) -> Option<&str> {
        self.tokens.iter().rev().find_map(|token| token.strip_prefix(prefix))
    }
}

/// JVM size argument to KB. A bare number is in bytes.
fn size_kb(value: &str) -> Option<u64> {
    if value.bytes().last()?.is_ascii_digit() {
        return value.parse::<u64>().ok().map(|bytes| bytes / 1024);
    }
    units::size_kb(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLAGS: &str = "-XX:InitialHeapSize=2147483648 -XX:MaxHeapSize=4294967296 -XX:+PrintGC \
                         -XX:+PrintGCDetails -XX:+UseParallelGC -XX:-UseBiasedLocking -Xss2m \
                         -XX:CMSInitiatingOccupancyFraction=70 -Xloggc:/var/log/gc.log";

    // ── Flags ───────────────────────────────────────────────────

    #[test]
    fn test_enabled_and_disabled() {
        let opts = JvmOptions::parse(FLAGS);
        assert!(opts.is_enabled("PrintGCDetails"));
        assert!(opts.is_enabled("PrintGC"));
        assert!(!opts.is_enabled("PrintGCDateStamps"));
        assert!(opts.is_disabled("UseBiasedLocking"));
        assert!(!opts.is_enabled("UseBiasedLocking"));
    }

    #[test]
    fn test_last_flag_wins() {
        let opts = JvmOptions::parse("-XX:+PrintGCCause -XX:-PrintGCCause");
        assert!(opts.is_disabled("PrintGCCause"));
        assert!(!opts.is_enabled("PrintGCCause"));
    }

    #[test]
    fn test_flag_name_is_exact() {
        let opts = JvmOptions::parse("-XX:+PrintClassHistogramBeforeFullGC");
        assert!(!opts.is_enabled("PrintClassHistogram"));
        assert!(opts.has_prefix("-XX:+PrintClassHistogram"));
    }

    #[test]
    fn test_value() {
        let opts = JvmOptions::parse(FLAGS);
        assert_eq!(opts.value("CMSInitiatingOccupancyFraction"), Some("70"));
        assert_eq!(opts.value("CMSInitiating"), None);
        assert!(opts.has_prefix("-Xloggc:"));
    }

    // ── Sizes ───────────────────────────────────────────────────

    #[test]
    fn test_heap_sizes() {
        let opts = JvmOptions::parse(FLAGS);
        assert_eq!(opts.heap_min(), Some(2_097_152));
        assert_eq!(opts.heap_max(), Some(4_194_304));

        let opts = JvmOptions::parse("-Xms1g -Xmx1024m");
        assert_eq!(opts.heap_min(), opts.heap_max());
        assert_eq!(JvmOptions::parse("-server").heap_min(), None);
    }

    #[test]
    fn test_thread_stack() {
        assert_eq!(JvmOptions::parse(FLAGS).thread_stack_kb(), Some(2048));
        assert_eq!(JvmOptions::parse("-XX:ThreadStackSize=512").thread_stack_kb(), Some(512));
        assert_eq!(JvmOptions::parse("-Xss256k").thread_stack_kb(), Some(256));
    }

    // ── Unified logging ─────────────────────────────────────────

    #[test]
    fn test_logs_tag() {
        let opts = JvmOptions::parse("-Xlog:gc*,safepoint=info:file=gc.log:uptime");
        assert!(opts.is_unified());
        assert!(opts.logs_tag("safepoint"));
        assert!(opts.logs_tag("gc"));
        assert!(!opts.logs_tag("heap"));
        assert!(JvmOptions::parse("-Xlog:gc+heap=debug").logs_tag("heap"));
        assert!(!JvmOptions::parse(FLAGS).is_unified());
    }
}
