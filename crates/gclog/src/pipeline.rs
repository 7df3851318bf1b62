//! Per-file analysis: physical lines in, one `JvmRun` out.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::conf::GcLogConfig;
use crate::error::{GcLogError, Result};
use crate::event::{Event, EventBuilder};
use crate::metrics::PipelineMetrics;
use crate::parser::EventType;
use crate::preprocess::Preprocessor;
use crate::run::{JvmRun, RunAccumulator};
use crate::units::DEFAULT_EPOCH_MILLIS;

pub use crate::conf::MalformedPolicy;

/// Reads a GC log and folds it into a [`JvmRun`].
///
/// Each call starts from a fresh preprocessor, so one analyzer can be
/// reused across files.
#[derive(Debug, Clone)]
pub struct GcAnalyzer {
    config: GcLogConfig,
    metrics: Arc<PipelineMetrics>,
}

impl GcAnalyzer {
    pub fn new(config: GcLogConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(PipelineMetrics::new()),
        }
    }

    /// Share counters with other analyzers.
    pub fn with_metrics(config: GcLogConfig, metrics: Arc<PipelineMetrics>) -> Self {
        Self { config, metrics }
    }

    pub fn config(&self) -> &GcLogConfig {
        &self.config
    }

    pub fn metrics(&self) -> &Arc<PipelineMetrics> {
        &self.metrics
    }

    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<JvmRun> {
        let path = path.as_ref();
        info!(path = %path.display(), "analyzing GC log");
        let file = File::open(path)?;
        self.analyze_reader(BufReader::new(file))
    }

    pub fn analyze_str(&self, log: &str) -> Result<JvmRun> {
        self.analyze_reader(Cursor::new(log.as_bytes()))
    }

    /// Invalid UTF-8 is replaced rather than rejected; GC logs are
    /// occasionally truncated mid-character by log rotation.
    pub fn analyze_reader(&self, mut reader: impl BufRead) -> Result<JvmRun> {
        let mut preprocessor = Preprocessor::new(&self.config.preprocess);
        let mut state = FileState::new(self.config.malformed_policy);
        let mut buf = Vec::new();

        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            self.metrics.record_line();

            let canonical = preprocessor.process(line)?;
            self.metrics.record_canonical(canonical.len() as u64);
            let epoch = preprocessor.clock().epoch_millis().unwrap_or(DEFAULT_EPOCH_MILLIS);
            for line in canonical {
                state.build(&line, epoch, &self.metrics)?;
            }
        }

        let rest = preprocessor.finish();
        self.metrics.record_canonical(rest.len() as u64);
        let epoch = preprocessor.clock().epoch_millis().unwrap_or(DEFAULT_EPOCH_MILLIS);
        for line in rest {
            state.build(&line, epoch, &self.metrics)?;
        }
        self.metrics.record_merged(preprocessor.merged_records());

        debug!(
            events = state.accumulator.len(),
            merged = preprocessor.merged_records(),
            malformed = state.malformed,
            "log read"
        );
        Ok(state.accumulator.finish(self.config.throughput_threshold))
    }
}

struct FileState {
    policy: MalformedPolicy,
    accumulator: RunAccumulator,
    builder: EventBuilder,
    epoch: i64,
    malformed: u64,
}

impl FileState {
    fn new(policy: MalformedPolicy) -> Self {
        Self {
            policy,
            accumulator: RunAccumulator::new(),
            builder: EventBuilder::with_epoch(DEFAULT_EPOCH_MILLIS),
            epoch: DEFAULT_EPOCH_MILLIS,
            malformed: 0,
        }
    }

    fn build(&mut self, line: &str, epoch: i64, metrics: &PipelineMetrics) -> Result<()> {
        if epoch != self.epoch {
            self.builder = EventBuilder::with_epoch(epoch);
            self.epoch = epoch;
        }

        let event = match self.builder.build(line) {
            Ok(event) => event,
            Err(err) => match self.policy {
                MalformedPolicy::Abort => return Err(GcLogError::Parse(err)),
                MalformedPolicy::Skip => {
                    warn!(error = %err, "malformed event, keeping as unknown");
                    metrics.record_malformed();
                    self.malformed += 1;
                    Event::unknown(line)
                }
            },
        };

        metrics.record_event(event.event_type == EventType::Unknown);
        self.accumulator.push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Finding;
    use crate::conf::PreprocessConfig;
    use crate::parser::ParseError;
    use std::io::Write;

    const UNIFIED_FULL: &str = "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms\n";

    const OVERFLOW: &str =
        "2.263: [GC (Allocation Failure)  99999999999999999999999G->1340K(125952K), 0.0014090 secs]\n";

    fn raw_config(policy: MalformedPolicy) -> GcLogConfig {
        GcLogConfig {
            malformed_policy: policy,
            preprocess: PreprocessConfig {
                enabled: false,
                ..PreprocessConfig::default()
            },
            ..GcLogConfig::default()
        }
    }

    // ── End to end ──────────────────────────────────────────────

    #[test]
    fn test_unified_pause_anchored_to_start() {
        let run = GcAnalyzer::new(GcLogConfig::default()).analyze_str(UNIFIED_FULL).unwrap();
        assert_eq!(run.events().len(), 1);
        assert_eq!(run.events()[0].event_type, EventType::UnifiedOld);
        assert_eq!(run.events()[0].timestamp, Some(228));
        assert_eq!(run.events()[0].duration, Some(2969));
        assert!(run.has_finding(Finding::ApplicationStoppedTimeMissing));
    }

    #[test]
    fn test_metaspace_split_becomes_one_event() {
        let log = "2.930: [Full GC (Ergonomics) [PSYoungGen: 2048K->0K(7168K)] [ParOldGen: 13298K->13292K(20480K)] \
                   15346K->13292K(27648K)\n\
                   , [Metaspace: 2750K->2750K(1056768K)], 0.0420980 secs] [Times: user=0.14 sys=0.00, real=0.04 secs]\n";
        let analyzer = GcAnalyzer::new(GcLogConfig::default());
        let run = analyzer.analyze_str(log).unwrap();

        assert_eq!(run.events().len(), 1);
        assert_eq!(run.event_types(), &[EventType::ParallelCompactingOld]);
        assert_eq!(run.max_perm_space(), 1_056_768);
        assert_eq!(run.unidentified_count(), 0);

        let snapshot = analyzer.metrics().snapshot();
        assert_eq!(snapshot.lines_read, 2);
        assert_eq!(snapshot.canonical_lines, 1);
        assert_eq!(snapshot.merged_records, 1);
    }

    #[test]
    fn test_crlf_and_invalid_utf8() {
        let mut bytes = b"random \xff text\r\n".to_vec();
        bytes.extend_from_slice(UNIFIED_FULL.as_bytes());
        let run = GcAnalyzer::new(GcLogConfig::default())
            .analyze_reader(Cursor::new(bytes))
            .unwrap();
        assert_eq!(run.unidentified_count(), 1);
        assert_eq!(run.count(EventType::UnifiedOld), 1);
        assert!(!run.events()[0].log_entry.ends_with('\r'));
    }

    #[test]
    fn test_empty_input() {
        let run = GcAnalyzer::new(GcLogConfig::default()).analyze_str("").unwrap();
        assert!(run.events().is_empty());
        assert!(run.has_finding(Finding::NoGcEvents));
    }

    #[test]
    fn test_analyze_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(UNIFIED_FULL.as_bytes()).unwrap();
        let run = GcAnalyzer::new(GcLogConfig::default()).analyze_file(file.path()).unwrap();
        assert_eq!(run.reportable_count(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = GcAnalyzer::new(GcLogConfig::default())
            .analyze_file("/nonexistent/gc.log")
            .unwrap_err();
        assert!(matches!(err, GcLogError::Io(_)));
    }

    // ── Malformed policy ────────────────────────────────────────

    #[test]
    fn test_skip_keeps_malformed_as_unknown() {
        let analyzer = GcAnalyzer::new(raw_config(MalformedPolicy::Skip));
        let run = analyzer.analyze_str(OVERFLOW).unwrap();
        assert_eq!(run.event_types(), &[EventType::Unknown]);
        assert!(run.has_finding(Finding::UnidentifiedLogLines));

        let snapshot = analyzer.metrics().snapshot();
        assert_eq!(snapshot.malformed_events, 1);
        assert_eq!(snapshot.unknown_events, 1);
    }

    #[test]
    fn test_abort_returns_error() {
        let err = GcAnalyzer::new(raw_config(MalformedPolicy::Abort))
            .analyze_str(OVERFLOW)
            .unwrap_err();
        assert!(matches!(
            err,
            GcLogError::Parse(ParseError::MalformedEvent {
                event_type: EventType::VerboseGcYoung,
                ..
            })
        ));
    }

    #[test]
    fn test_line_too_large() {
        let config = GcLogConfig {
            preprocess: PreprocessConfig {
                max_line_bytes: 8,
                ..PreprocessConfig::default()
            },
            ..GcLogConfig::default()
        };
        let err = GcAnalyzer::new(config).analyze_str(UNIFIED_FULL).unwrap_err();
        assert!(matches!(err, GcLogError::Parse(ParseError::LineTooLarge(_, 8))));
    }

    #[test]
    fn test_shared_metrics() {
        let metrics = Arc::new(PipelineMetrics::new());
        let a = GcAnalyzer::with_metrics(GcLogConfig::default(), Arc::clone(&metrics));
        let b = GcAnalyzer::with_metrics(GcLogConfig::default(), Arc::clone(&metrics));
        a.analyze_str(UNIFIED_FULL).unwrap();
        b.analyze_str(UNIFIED_FULL).unwrap();
        assert_eq!(metrics.snapshot().events, 2);
    }
}
