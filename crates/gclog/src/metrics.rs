use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Forces the wrapped counters onto their own cache line so that files
/// analyzed on different threads do not contend on the same line.
#[repr(align(64))]
#[derive(Debug, Default)]
pub struct CacheAligned<T>(pub T);

/// Physical and canonical line counters (updated per line)
#[derive(Debug, Default)]
pub struct LineMetrics {
    pub read: AtomicU64,
    pub canonical: AtomicU64,
    pub merged_records: AtomicU64,
}

/// Event outcomes
#[derive(Debug, Default)]
pub struct EventMetrics {
    pub built: AtomicU64,
    pub unknown: AtomicU64,
    pub malformed: AtomicU64,
}

/// Per-file outcomes
#[derive(Debug, Default)]
pub struct FileMetrics {
    pub ok: AtomicU64,
    pub failed: AtomicU64,
}

/// Counters shared by every file of a batch.
///
/// All operations use `Ordering::Relaxed`; `snapshot()` is not transactional
/// across fields.
#[derive(Debug, Default)]
pub struct PipelineMetrics {
    pub lines: CacheAligned<LineMetrics>,
    pub events: CacheAligned<EventMetrics>,
    pub files: CacheAligned<FileMetrics>,
}

impl PipelineMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_line(&self) {
        self.lines.0.read.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_canonical(&self, count: u64) {
        self.lines.0.canonical.fetch_add(count, Ordering::Relaxed);
    }

    pub fn record_merged(&self, count: u64) {
        self.lines.0.merged_records.fetch_add(count, Ordering::Relaxed);
    }

    /// Record a built event; `unknown` when no grammar recognized the line.
    #[inline]
    pub fn record_event(&self, unknown: bool) {
        self.events.0.built.fetch_add(1, Ordering::Relaxed);
        if unknown {
            self.events.0.unknown.fetch_add(1, Ordering::Relaxed);
        }
    }

    #[inline]
    pub fn record_malformed(&self) {
        self.events.0.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_file(&self, ok: bool) {
        if ok {
            self.files.0.ok.fetch_add(1, Ordering::Relaxed);
        } else {
            self.files.0.failed.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let events = self.events.0.built.load(Ordering::Relaxed);
        let unknown = self.events.0.unknown.load(Ordering::Relaxed);

        MetricsSnapshot {
            lines_read: self.lines.0.read.load(Ordering::Relaxed),
            canonical_lines: self.lines.0.canonical.load(Ordering::Relaxed),
            merged_records: self.lines.0.merged_records.load(Ordering::Relaxed),
            events,
            unknown_events: unknown,
            malformed_events: self.events.0.malformed.load(Ordering::Relaxed),
            recognized_rate: if events > 0 {
                (events - unknown) as f64 / events as f64
            } else {
                1.0
            },
            files_ok: self.files.0.ok.load(Ordering::Relaxed),
            files_failed: self.files.0.failed.load(Ordering::Relaxed),
        }
    }
}

/// A read-only snapshot of pipeline metrics.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub lines_read: u64,
    pub canonical_lines: u64,
    pub merged_records: u64,
    pub events: u64,
    pub unknown_events: u64,
    pub malformed_events: u64,
    pub recognized_rate: f64,
    pub files_ok: u64,
    pub files_failed: u64,
}
