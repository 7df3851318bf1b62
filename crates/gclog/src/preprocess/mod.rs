/// Preprocessor: physical log lines in, canonical lines out
///
/// One logical GC event can be spread over several physical lines. The
/// preprocessor holds at most one open record and decides for each new line
/// whether it continues that record, closes it, or starts something new.
///
/// - `clock.rs`: timestamp normalization (uptime inserted for date-only lines)
/// - `legacy.rs`: `-XX:+PrintGCDetails` continuations
/// - `unified.rs`: `-Xlog:gc*` records keyed by `GC(n)`

pub mod clock;
pub mod legacy;
pub mod unified;

use tracing::{debug, trace};

use crate::conf::PreprocessConfig;
use crate::error::{GcLogError, Result};
use crate::parser::ParseError;

pub use clock::Clock;
pub use legacy::LegacyRecord;
pub use unified::{UnifiedLine, UnifiedRecord};

/// What an open record did with the next line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Taken into the record, which stays open.
    Absorb,
    /// Taken into the record, which is now complete.
    Complete,
    /// Not part of the record.
    Unrelated,
}

#[derive(Debug)]
enum Pending {
    Legacy(LegacyRecord),
    Unified(UnifiedRecord),
}

impl Pending {
    fn accept(&mut self, line: &str) -> Continuation {
        match self {
            Pending::Legacy(record) => record.accept(line),
            Pending::Unified(record) => record.accept(line),
        }
    }

    fn line_count(&self) -> usize {
        match self {
            Pending::Legacy(record) => record.line_count(),
            Pending::Unified(record) => record.line_count(),
        }
    }

    fn is_merged(&self) -> bool {
        match self {
            Pending::Legacy(record) => record.is_merged(),
            Pending::Unified(record) => record.is_merged(),
        }
    }

    fn into_lines(self) -> Vec<String> {
        match self {
            Pending::Legacy(record) => vec![record.into_line()],
            Pending::Unified(record) => record.into_lines(),
        }
    }
}

pub struct Preprocessor {
    enabled: bool,
    max_record_lines: usize,
    max_line_bytes: usize,
    clock: Clock,
    pending: Option<Pending>,
    merged_records: u64,
}

impl Preprocessor {
    pub fn new(config: &PreprocessConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_record_lines: config.max_record_lines,
            max_line_bytes: config.max_line_bytes,
            clock: Clock::new(),
            pending: None,
            merged_records: 0,
        }
    }

    /// Preprocessor that only trims lines.
    pub fn passthrough() -> Self {
        Self::new(&PreprocessConfig {
            enabled: false,
            ..PreprocessConfig::default()
        })
    }

    /// Feed one physical line. Returns the canonical lines that are ready,
    /// in input order.
    pub fn process(&mut self, line: &str) -> Result<Vec<String>> {
        if line.len() > self.max_line_bytes {
            return Err(ParseError::LineTooLarge(line.len(), self.max_line_bytes).into());
        }
        let line = line.trim_end();
        if !self.enabled {
            return Ok(vec![line.to_string()]);
        }

        let line = self.clock.normalize(line);
        let line = legacy::strip_reference_gc(&line);
        let mut emit = Vec::new();

        if let Some(mut pending) = self.pending.take() {
            match pending.accept(&line) {
                Continuation::Absorb => {
                    if pending.line_count() > self.max_record_lines {
                        return Err(GcLogError::RecordTooLong {
                            lines: pending.line_count(),
                            max: self.max_record_lines,
                        });
                    }
                    trace!("preprocess: line absorbed into open record");
                    self.pending = Some(pending);
                    return Ok(emit);
                }
                Continuation::Complete => {
                    self.close(pending, &mut emit);
                    return Ok(emit);
                }
                Continuation::Unrelated => self.close(pending, &mut emit),
            }
        }

        self.start(&line, &mut emit);
        Ok(emit)
    }

    /// Flush whatever is still open at end of input.
    pub fn finish(&mut self) -> Vec<String> {
        let mut emit = Vec::new();
        if let Some(pending) = self.pending.take() {
            debug!("preprocess: flushing open record at end of input");
            self.close(pending, &mut emit);
        }
        emit
    }

    /// A record is open.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records built from more than one physical line so far.
    pub fn merged_records(&self) -> u64 {
        self.merged_records
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    fn start(&mut self, line: &str, emit: &mut Vec<String>) {
        if let Some(record) = UnifiedRecord::open(line) {
            self.pending = Some(Pending::Unified(record));
            return;
        }

        if let Some((head, concurrent)) = legacy::split_concurrent(line) {
            debug!("preprocess: concurrent phase interleaved with pause, splitting");
            emit.push(concurrent.to_string());
            if let Some(record) = LegacyRecord::open(head) {
                self.pending = Some(Pending::Legacy(record));
            } else {
                emit.push(head.to_string());
            }
            return;
        }

        if let Some(record) = LegacyRecord::open(line) {
            self.pending = Some(Pending::Legacy(record));
            return;
        }

        emit.push(line.to_string());
    }

    fn close(&mut self, pending: Pending, emit: &mut Vec<String>) {
        if pending.is_merged() {
            self.merged_records += 1;
            debug!(lines = pending.line_count(), "preprocess: record merged");
        }
        emit.extend(pending.into_lines());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{build_event, Event, MemoryRegion};
    use crate::parser::EventType;

    fn run(lines: &[&str]) -> Vec<String> {
        let mut preprocessor = Preprocessor::new(&PreprocessConfig::default());
        let mut out = Vec::new();
        for line in lines {
            out.extend(preprocessor.process(line).unwrap());
        }
        out.extend(preprocessor.finish());
        out
    }

    fn events(lines: &[&str]) -> Vec<Event> {
        run(lines).iter().map(|line| build_event(line).unwrap()).collect()
    }

    // ── Pass-through ────────────────────────────────────────────

    #[test]
    fn test_single_lines_pass_through() {
        let out = run(&[
            "[0.003s][info][gc] Using Parallel   ",
            "random text",
            "",
            "251.804: [CMS-concurrent-mark-start]",
        ]);
        assert_eq!(
            out,
            vec![
                "[0.003s][info][gc] Using Parallel",
                "random text",
                "",
                "251.804: [CMS-concurrent-mark-start]",
            ]
        );
    }

    #[test]
    fn test_disabled_only_trims() {
        let mut preprocessor = Preprocessor::passthrough();
        let out = preprocessor.process("2.930: [Full GC (Ergonomics) 1K->1K(2K)  ").unwrap();
        assert_eq!(out, vec!["2.930: [Full GC (Ergonomics) 1K->1K(2K)"]);
        assert!(!preprocessor.has_pending());
    }

    #[test]
    fn test_held_pause_flushed_by_next_line() {
        let out = run(&[
            "0.117: [GC 10240K->1132K(39296K), 0.0041910 secs]",
            "0.200: [GC 10240K->1132K(39296K), 0.0041910 secs]",
            "random text",
        ]);
        assert_eq!(out.len(), 3);
        assert_eq!(out[2], "random text");
    }

    // ── Legacy ──────────────────────────────────────────────────

    #[test]
    fn test_metaspace_line_merges_into_one() {
        let out = run(&[
            "2.930: [Full GC (Ergonomics) [PSYoungGen: 2048K->0K(7168K)] [ParOldGen: 13298K->13292K(20480K)] \
             15346K->13292K(27648K)",
            ", [Metaspace: 2750K->2750K(1056768K)], 0.0420980 secs] [Times: user=0.14 sys=0.00, real=0.04 secs]",
        ]);
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("15346K->13292K(27648K), [Metaspace: 2750K->2750K(1056768K)]"));
    }

    #[test]
    fn test_par_new_interleaved_with_concurrent() {
        let mut preprocessor = Preprocessor::new(&PreprocessConfig::default());
        let first = preprocessor
            .process(
                "2.155: [GC (Allocation Failure) 2.155: [ParNew2.156: [CMS-concurrent-abortable-preclean: \
                 0.032/0.114 secs] [Times: user=0.14 sys=0.00, real=0.11 secs]",
            )
            .unwrap();
        assert_eq!(first.len(), 1);
        assert!(first[0].starts_with("2.156: [CMS-concurrent-abortable-preclean"));
        assert!(preprocessor.has_pending());

        let second = preprocessor
            .process(
                ": 1228800K->136704K(1228800K), 0.2104474 secs] 1228800K->187497K(4056064K), 0.2106070 secs] \
                 [Times: user=0.72 sys=0.06, real=0.21 secs]",
            )
            .unwrap();
        assert!(second.is_empty());
        let rest = preprocessor.finish();
        assert_eq!(
            rest,
            vec![
                "2.155: [GC (Allocation Failure) 2.155: [ParNew: 1228800K->136704K(1228800K), 0.2104474 secs] \
                 1228800K->187497K(4056064K), 0.2106070 secs] [Times: user=0.72 sys=0.06, real=0.21 secs]"
            ]
        );
        assert_eq!(preprocessor.merged_records(), 1);
    }

    #[test]
    fn test_g1_detail_block_closed_by_times() {
        let out = run(&[
            "2.847: [GC pause (G1 Evacuation Pause) (young), 0.0120460 secs]",
            "   [Parallel Time: 11.4 ms, GC Workers: 4]",
            "   [Eden: 24.0M(24.0M)->0.0B(13.0M) Survivors: 0.0B->3072.0K Heap: 24.0M(256.0M)->21.6M(256.0M)]",
            " [Times: user=0.04 sys=0.00, real=0.01 secs]",
            "3.000: [GC concurrent-root-region-scan-start]",
        ]);
        assert_eq!(out.len(), 2);
        assert!(out[0].ends_with("[Times: user=0.04 sys=0.00, real=0.01 secs]"));
        assert_eq!(out[1], "3.000: [GC concurrent-root-region-scan-start]");
    }

    // ── Unified ─────────────────────────────────────────────────

    #[test]
    fn test_unified_record_merged() {
        let out = run(&[
            "[0.029s][info][gc] Using Parallel",
            "[0.031s][info][gc,start     ] GC(0) Pause Young (Allocation Failure)",
            "[0.032s][info][gc,heap      ] GC(0) PSYoungGen: 512K->464K(1024K)",
            "[0.032s][info][gc,heap      ] GC(0) ParOldGen: 0K->8K(512K)",
            "[0.032s][info][gc,metaspace ] GC(0) Metaspace: 120K->120K(1056768K)",
            "[0.032s][info][gc           ] GC(0) Pause Young (Allocation Failure) 0M->0M(1M) 1.195ms",
            "[0.032s][info][gc,cpu       ] GC(0) User=0.01s Sys=0.01s Real=0.00s",
            "[0.040s][info][gc,heap,exit ] Heap",
        ]);
        assert_eq!(out.len(), 3);
        assert!(out[1].starts_with("[0.031s][info][gc,start     ] GC(0) Pause Young (Allocation Failure) PSYoungGen:"));
        assert_eq!(out[2], "[0.040s][info][gc,heap,exit ] Heap");
    }

    #[test]
    fn test_unified_summary_flushed_by_other_id() {
        let out = run(&[
            "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms",
            "[0.300s][info][gc] GC(7) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms",
        ]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0], "[0.231s][info][gc] GC(6) Pause Full (Ergonomics) 1M->1M(7M) 2.969ms");
    }

    #[test]
    fn test_irregular_whitespace_reaches_builder() {
        let events = events(&[
            "  [0.231s][info][gc] GC(6) Pause  Full  (Ergonomics) 1M->1M(7M) 2.969ms",
            "  [0.300s][info][gc,start     ] GC(7) Pause  Young  (Allocation Failure)",
            "  [0.301s][info][gc,heap      ] GC(7) PSYoungGen: 512K->464K(1024K)",
            "\t[0.301s][info][gc,heap      ] GC(7) ParOldGen:  0K->8K(512K)",
            "  [0.301s][info][gc           ] GC(7) Pause  Young  (Allocation Failure) 0M->0M(1M) 1.195ms",
        ]);
        assert_eq!(events.len(), 2);

        assert_eq!(events[0].event_type, EventType::UnifiedOld);
        assert_eq!(events[0].timestamp, Some(228));
        assert_eq!(events[0].duration, Some(2969));

        assert_eq!(events[1].event_type, EventType::UnifiedParallelScavenge);
        assert_eq!(events[1].timestamp, Some(300));
        assert_eq!(events[1].duration, Some(1195));
        assert_eq!(events[1].young, Some(MemoryRegion::new(512, 464, 1024)));
        assert_eq!(events[1].old, Some(MemoryRegion::new(0, 8, 512)));
    }

    #[test]
    fn test_jdk17_serial_record() {
        let events = events(&[
            "[0.100s][info][gc,start    ] GC(3) Pause Young (Allocation Failure)",
            "[0.102s][info][gc,heap     ] GC(3) DefNew: 1023K(1024K)->127K(1024K) Eden: 1023K(1024K)->0K(1024K) \
             From: 0K(0K)->127K(128K)",
            "[0.102s][info][gc,heap     ] GC(3) Tenured: 0K(2048K)->301K(2048K)",
            "[0.102s][info][gc,metaspace] GC(3) Metaspace: 120K(320K)->120K(320K) NonClass: 113K(192K)->113K(192K) \
             Class: 6K(128K)->6K(128K)",
            "[0.102s][info][gc          ] GC(3) Pause Young (Allocation Failure) 1M->0M(3M) 1.234ms",
            "[0.102s][info][gc,cpu      ] GC(3) User=0.00s Sys=0.00s Real=0.00s",
        ]);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type, EventType::UnifiedSerialNew);
        assert!(event.is_blocking());
        assert_eq!(event.timestamp, Some(100));
        assert_eq!(event.duration, Some(1234));
        assert_eq!(event.young, Some(MemoryRegion::new(1023, 127, 1024)));
        assert_eq!(event.old, Some(MemoryRegion::new(0, 301, 2048)));
        assert_eq!(event.permanent, Some(MemoryRegion::new(120, 120, 320)));
        assert_eq!(event.combined, Some(MemoryRegion::new(1024, 0, 3072)));
    }

    #[test]
    fn test_jdk17_parallel_record() {
        let events = events(&[
            "[0.050s][info][gc,start    ] GC(0) Pause Young (Allocation Failure)",
            "[0.052s][info][gc,heap     ] GC(0) PSYoungGen: 1536K(1536K)->496K(1536K) Eden: 1536K(1536K)->0K(1024K) \
             From: 0K(512K)->496K(512K)",
            "[0.052s][info][gc,heap     ] GC(0) ParOldGen: 0K(4096K)->8K(4096K)",
            "[0.052s][info][gc,metaspace] GC(0) Metaspace: 120K(320K)->120K(320K) NonClass: 113K(192K)->113K(192K) \
             Class: 6K(128K)->6K(128K)",
            "[0.052s][info][gc          ] GC(0) Pause Young (Allocation Failure) 1M->0M(5M) 1.195ms",
            "[0.052s][info][gc,cpu      ] GC(0) User=0.01s Sys=0.00s Real=0.00s",
        ]);
        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.event_type, EventType::UnifiedParallelScavenge);
        assert_eq!(event.timestamp, Some(50));
        assert_eq!(event.duration, Some(1195));
        assert_eq!(event.young, Some(MemoryRegion::new(1536, 496, 1536)));
        assert_eq!(event.old, Some(MemoryRegion::new(0, 8, 4096)));
    }

    #[test]
    fn test_full_g1_record() {
        let mut preprocessor = Preprocessor::new(&PreprocessConfig::default());
        let mut out = Vec::new();
        for line in [
            "[0.003s][info][gc          ] Using G1",
            "[0.337s][info][gc,start    ] GC(0) Pause Young (Normal) (G1 Evacuation Pause)",
            "[0.337s][info][gc,task     ] GC(0) Using 2 workers of 4 for evacuation",
            "[0.340s][info][gc,phases   ] GC(0)   Pre Evacuate Collection Set: 0.1ms",
            "[0.340s][info][gc,phases   ] GC(0)   Merge Heap Roots: 0.1ms",
            "[0.340s][info][gc,phases   ] GC(0)   Evacuate Collection Set: 2.5ms",
            "[0.340s][info][gc,phases   ] GC(0)   Post Evacuate Collection Set: 0.3ms",
            "[0.340s][info][gc,phases   ] GC(0)   Other: 0.2ms",
            "[0.340s][info][gc,heap     ] GC(0) Eden regions: 24->0(13)",
            "[0.340s][info][gc,heap     ] GC(0) Survivor regions: 0->3(3)",
            "[0.340s][info][gc,heap     ] GC(0) Old regions: 0->1",
            "[0.340s][info][gc,heap     ] GC(0) Archive regions: 0->0",
            "[0.340s][info][gc,heap     ] GC(0) Humongous regions: 0->0",
            "[0.340s][info][gc,metaspace] GC(0) Metaspace: 3771K(3968K)->3771K(3968K) NonClass: 3391K(3520K)->3391K(3520K) \
             Class: 380K(448K)->380K(448K)",
            "[0.340s][info][gc          ] GC(0) Pause Young (Normal) (G1 Evacuation Pause) 24M->4M(256M) 3.128ms",
            "[0.340s][info][gc,cpu      ] GC(0) User=0.01s Sys=0.00s Real=0.00s",
            "[0.341s][info][gc,heap,exit] Heap",
        ] {
            out.extend(preprocessor.process(line).unwrap());
        }
        out.extend(preprocessor.finish());
        assert_eq!(preprocessor.merged_records(), 1);
        assert_eq!(
            out[1],
            "[0.337s][info][gc,start    ] GC(0) Pause Young (Normal) (G1 Evacuation Pause) \
             Metaspace: 3771K(3968K)->3771K(3968K) 24M->4M(256M) 3.128ms User=0.01s Sys=0.00s Real=0.00s"
        );

        let events: Vec<Event> = out.iter().map(|line| build_event(line).unwrap()).collect();
        let types: Vec<EventType> = events.iter().map(|event| event.event_type).collect();
        assert_eq!(types, vec![EventType::UsingG1, EventType::UnifiedG1YoungPause, EventType::GcInfo]);

        let pause = &events[1];
        assert_eq!(pause.timestamp, Some(337));
        assert_eq!(pause.duration, Some(3128));
        assert_eq!(pause.combined, Some(MemoryRegion::new(24 * 1024, 4 * 1024, 256 * 1024)));
        assert_eq!(pause.permanent, Some(MemoryRegion::new(3771, 3771, 3968)));
        assert_eq!(pause.cpu.map(|cpu| cpu.user), Some(1));
    }

    #[test]
    fn test_date_only_lines_get_uptime() {
        let out = run(&["2020-08-18T14:05:42.515+0000: [Pause Init Mark, 0.327 ms]"]);
        assert_eq!(out, vec!["2020-08-18T14:05:42.515+0000: 0.000: [Pause Init Mark, 0.327 ms]"]);
    }

    // ── Limits ──────────────────────────────────────────────────

    #[test]
    fn test_line_too_large() {
        let mut preprocessor = Preprocessor::new(&PreprocessConfig {
            max_line_bytes: 16,
            ..PreprocessConfig::default()
        });
        let err = preprocessor.process("this line is longer than sixteen bytes").unwrap_err();
        assert!(matches!(err, GcLogError::Parse(ParseError::LineTooLarge(38, 16))));
    }

    #[test]
    fn test_record_too_long() {
        let mut preprocessor = Preprocessor::new(&PreprocessConfig {
            max_record_lines: 3,
            ..PreprocessConfig::default()
        });
        preprocessor
            .process("[0.031s][info][gc,start] GC(0) Pause Young (Allocation Failure)")
            .unwrap();
        preprocessor.process("[0.031s][info][gc,phases] GC(0) Phase 1").unwrap();
        preprocessor.process("[0.031s][info][gc,phases] GC(0) Phase 2").unwrap();
        let err = preprocessor.process("[0.031s][info][gc,phases] GC(0) Phase 3").unwrap_err();
        assert!(matches!(err, GcLogError::RecordTooLong { lines: 4, max: 3 }));
    }
}
