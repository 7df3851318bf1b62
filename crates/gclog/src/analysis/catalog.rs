use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// A diagnostic conclusion about a run. Variants are declared in catalog
/// order, which is also their sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Finding {
    ApplicationStoppedTimeMissing,
    ExplicitGcUnknown,
    ExplicitGcSerial,
    ExplicitGcParallel,
    ExplicitGcSerialCms,
    ExplicitGcSerialG1,
    ExplicitGcShenandoah,
    ExplicitGcDisabled,
    UnknownCollector,
    UnknownCollectorCombination,
    CmsParNewDisabled,
    ParNewSerialOld,
    ParallelSerialOld,
    SerialGc,
    CmsSerialOld,
    CmsConcurrentModeFailure,
    CmsPromotionFailed,
    G1EvacuationFailure,
    G1FullGc,
    ShenandoahDegeneratedGc,
    ShenandoahFullGc,
    ZAllocationStall,
    GcLocker,
    GcTimeLimitExceeded,
    MetaspaceThreshold,
    MetaspaceAllocationFailure,
    HeapInspectionGc,
    HeapDumpGc,
    ParallelismInverted,
    ThroughputBottleneck,
    FirstTimestampThresholdExceeded,
    UnidentifiedLogLines,
    NoGcEvents,
    PrintGcDetailsMissing,
    HeapMinNotEqualMax,
    PrintHeapAtGc,
    PrintGcApplicationConcurrentTime,
    PrintClassHistogram,
    PrintFlsStatistics,
    TraceClassUnloading,
    PrintReferenceGc,
    BiasedLockingDisabled,
    CmsClassUnloadingDisabled,
    CmsInitOccupancyOnlyMissing,
    GcLogFileRotationNotEnabled,
    ThreadStackSizeLarge,
    PrintGcCauseDisabled,
}

impl Finding {
    pub const ALL: &'static [Finding] = &[
        Finding::ApplicationStoppedTimeMissing,
        Finding::ExplicitGcUnknown,
        Finding::ExplicitGcSerial,
        Finding::ExplicitGcParallel,
        Finding::ExplicitGcSerialCms,
        Finding::ExplicitGcSerialG1,
        Finding::ExplicitGcShenandoah,
        Finding::ExplicitGcDisabled,
        Finding::UnknownCollector,
        Finding::UnknownCollectorCombination,
        Finding::CmsParNewDisabled,
        Finding::ParNewSerialOld,
        Finding::ParallelSerialOld,
        Finding::SerialGc,
        Finding::CmsSerialOld,
        Finding::CmsConcurrentModeFailure,
        Finding::CmsPromotionFailed,
        Finding::G1EvacuationFailure,
        Finding::G1FullGc,
        Finding::ShenandoahDegeneratedGc,
        Finding::ShenandoahFullGc,
        Finding::ZAllocationStall,
        Finding::GcLocker,
        Finding::GcTimeLimitExceeded,
        Finding::MetaspaceThreshold,
        Finding::MetaspaceAllocationFailure,
        Finding::HeapInspectionGc,
        Finding::HeapDumpGc,
        Finding::ParallelismInverted,
        Finding::ThroughputBottleneck,
        Finding::FirstTimestampThresholdExceeded,
        Finding::UnidentifiedLogLines,
        Finding::NoGcEvents,
        Finding::PrintGcDetailsMissing,
        Finding::HeapMinNotEqualMax,
        Finding::PrintHeapAtGc,
        Finding::PrintGcApplicationConcurrentTime,
        Finding::PrintClassHistogram,
        Finding::PrintFlsStatistics,
        Finding::TraceClassUnloading,
        Finding::PrintReferenceGc,
        Finding::BiasedLockingDisabled,
        Finding::CmsClassUnloadingDisabled,
        Finding::CmsInitOccupancyOnlyMissing,
        Finding::GcLogFileRotationNotEnabled,
        Finding::ThreadStackSizeLarge,
        Finding::PrintGcCauseDisabled,
    ];

    /// Stable identifier.
    pub fn code(&self) -> &'static str {
        self.entry().0
    }

    pub fn severity(&self) -> Severity {
        self.entry().1
    }

    pub fn message(&self) -> &'static str {
        self.entry().2
    }

    fn entry(&self) -> (&'static str, Severity, &'static str) {
        use Severity::{Error, Info, Warn};

        match self {
            Finding::ApplicationStoppedTimeMissing => (
                "APPLICATION_STOPPED_TIME_MISSING",
                Warn,
                "Stopped time is not logged, so pauses outside of collections are invisible. Enable \
                 -XX:+PrintGCApplicationStoppedTime or -Xlog:safepoint.",
            ),
            Finding::ExplicitGcUnknown => (
                "EXPLICIT_GC_UNKNOWN",
                Warn,
                "Explicit garbage collection (System.gc()) detected; the collector could not be determined.",
            ),
            Finding::ExplicitGcSerial => (
                "EXPLICIT_GC_SERIAL",
                Error,
                "Explicit garbage collection (System.gc()) is invoking a serial full collection.",
            ),
            Finding::ExplicitGcParallel => (
                "EXPLICIT_GC_PARALLEL",
                Warn,
                "Explicit garbage collection (System.gc()) is invoking a parallel full collection.",
            ),
            Finding::ExplicitGcSerialCms => (
                "EXPLICIT_GC_SERIAL_CMS",
                Error,
                "Explicit garbage collection (System.gc()) is invoking a serial full collection with CMS. \
                 Consider -XX:+ExplicitGCInvokesConcurrent.",
            ),
            Finding::ExplicitGcSerialG1 => (
                "EXPLICIT_GC_SERIAL_G1",
                Error,
                "Explicit garbage collection (System.gc()) is invoking a full collection with G1. \
                 Consider -XX:+ExplicitGCInvokesConcurrent.",
            ),
            Finding::ExplicitGcShenandoah => (
                "EXPLICIT_GC_SHENANDOAH",
                Warn,
                "Explicit garbage collection (System.gc()) is invoking a Shenandoah full collection.",
            ),
            Finding::ExplicitGcDisabled => (
                "EXPLICIT_GC_DISABLED",
                Info,
                "Explicit garbage collection is disabled with -XX:+DisableExplicitGC.",
            ),
            Finding::UnknownCollector => (
                "UNKNOWN_COLLECTOR",
                Warn,
                "Blocking collections were logged but the collector could not be identified.",
            ),
            Finding::UnknownCollectorCombination => (
                "UNKNOWN_COLLECTOR_COMBINATION",
                Error,
                "The log mixes collectors that cannot run together. It may be a concatenation of \
                 several JVM runs.",
            ),
            Finding::CmsParNewDisabled => (
                "CMS_PAR_NEW_DISABLED",
                Warn,
                "The young generation is collected serially with CMS. Remove -XX:-UseParNewGC.",
            ),
            Finding::ParNewSerialOld => (
                "PAR_NEW_SERIAL_OLD",
                Warn,
                "ParNew is paired with the serial old collector.",
            ),
            Finding::ParallelSerialOld => (
                "PARALLEL_SERIAL_OLD",
                Warn,
                "The parallel collector is collecting the old generation single threaded. \
                 Remove -XX:-UseParallelOldGC.",
            ),
            Finding::SerialGc => ("SERIAL_GC", Info, "The serial collector is in use."),
            Finding::CmsSerialOld => (
                "CMS_SERIAL_OLD",
                Error,
                "CMS fell back to a serial full collection of the old generation.",
            ),
            Finding::CmsConcurrentModeFailure => (
                "CMS_CONCURRENT_MODE_FAILURE",
                Error,
                "CMS concurrent mode failure: the old generation filled before the concurrent \
                 collection finished.",
            ),
            Finding::CmsPromotionFailed => (
                "CMS_PROMOTION_FAILED",
                Error,
                "CMS promotion failed: no contiguous old generation space for promoted objects.",
            ),
            Finding::G1EvacuationFailure => (
                "G1_EVACUATION_FAILURE",
                Error,
                "G1 ran out of free regions to evacuate live objects into (to-space exhausted/overflow).",
            ),
            Finding::G1FullGc => (
                "G1_FULL_GC",
                Error,
                "G1 performed a full collection, which it is designed to avoid.",
            ),
            Finding::ShenandoahDegeneratedGc => (
                "SHENANDOAH_DEGENERATED_GC",
                Error,
                "Shenandoah degenerated to a stop-the-world collection.",
            ),
            Finding::ShenandoahFullGc => (
                "SHENANDOAH_FULL_GC",
                Error,
                "Shenandoah performed a full collection.",
            ),
            Finding::ZAllocationStall => (
                "Z_ALLOCATION_STALL",
                Error,
                "ZGC stalled application threads waiting for memory to be freed.",
            ),
            Finding::GcLocker => (
                "GC_LOCKER",
                Warn,
                "Collections were delayed or triggered by threads in JNI critical regions (GC locker).",
            ),
            Finding::GcTimeLimitExceeded => (
                "GC_TIME_LIMIT_EXCEEDED",
                Error,
                "The GC overhead limit was reached; an OutOfMemoryError is likely.",
            ),
            Finding::MetaspaceThreshold => (
                "METASPACE_THRESHOLD",
                Info,
                "Collections triggered by reaching the metaspace high water mark.",
            ),
            Finding::MetaspaceAllocationFailure => (
                "METASPACE_ALLOCATION_FAILURE",
                Error,
                "A last ditch collection was needed to satisfy a metaspace allocation.",
            ),
            Finding::HeapInspectionGc => (
                "HEAP_INSPECTION_GC",
                Warn,
                "Collections triggered by heap inspection (jmap -histo or class histogram).",
            ),
            Finding::HeapDumpGc => (
                "HEAP_DUMP_GC",
                Warn,
                "Collections triggered by heap dumps.",
            ),
            Finding::ParallelismInverted => (
                "PARALLELISM_INVERTED",
                Warn,
                "Parallel collections took longer in wall time than in CPU time. Check for too many \
                 GC threads or CPU starvation.",
            ),
            Finding::ThroughputBottleneck => (
                "THROUGHPUT_BOTTLENECK",
                Warn,
                "Application throughput is below the threshold: garbage collection is a bottleneck.",
            ),
            Finding::FirstTimestampThresholdExceeded => (
                "FIRST_TIMESTAMP_THRESHOLD_EXCEEDED",
                Info,
                "The first event is more than 60 seconds after JVM start; the log is partial.",
            ),
            Finding::UnidentifiedLogLines => (
                "UNIDENTIFIED_LOG_LINES",
                Info,
                "Some log lines were not recognized.",
            ),
            Finding::NoGcEvents => ("NO_GC_EVENTS", Info, "No garbage collection events were found."),
            Finding::PrintGcDetailsMissing => (
                "PRINT_GC_DETAILS_MISSING",
                Warn,
                "GC details are not logged. Add -XX:+PrintGCDetails.",
            ),
            Finding::HeapMinNotEqualMax => (
                "HEAP_MIN_NOT_EQUAL_MAX",
                Warn,
                "Initial and maximum heap sizes differ; heap resizing causes full collections. \
                 Set -Xms equal to -Xmx.",
            ),
            Finding::PrintHeapAtGc => (
                "PRINT_HEAP_AT_GC",
                Info,
                "-XX:+PrintHeapAtGC adds a heap dump before and after every collection.",
            ),
            Finding::PrintGcApplicationConcurrentTime => (
                "PRINT_GC_APPLICATION_CONCURRENT_TIME",
                Info,
                "-XX:+PrintGCApplicationConcurrentTime adds little analysis value.",
            ),
            Finding::PrintClassHistogram => (
                "PRINT_CLASS_HISTOGRAM",
                Warn,
                "Class histograms are printed, which triggers extra full collections.",
            ),
            Finding::PrintFlsStatistics => (
                "PRINT_FLS_STATISTICS",
                Info,
                "-XX:PrintFLSStatistics is for CMS fragmentation debugging.",
            ),
            Finding::TraceClassUnloading => (
                "TRACE_CLASS_UNLOADING",
                Info,
                "-XX:+TraceClassUnloading is for class unloading debugging.",
            ),
            Finding::PrintReferenceGc => (
                "PRINT_REFERENCE_GC",
                Info,
                "-XX:+PrintReferenceGC is for reference processing debugging.",
            ),
            Finding::BiasedLockingDisabled => (
                "BIASED_LOCKING_DISABLED",
                Warn,
                "Biased locking is disabled with -XX:-UseBiasedLocking.",
            ),
            Finding::CmsClassUnloadingDisabled => (
                "CMS_CLASS_UNLOADING_DISABLED",
                Warn,
                "CMS does not unload classes (-XX:-CMSClassUnloadingEnabled).",
            ),
            Finding::CmsInitOccupancyOnlyMissing => (
                "CMS_INIT_OCCUPANCY_ONLY_MISSING",
                Warn,
                "-XX:CMSInitiatingOccupancyFraction is only a hint without \
                 -XX:+UseCMSInitiatingOccupancyOnly.",
            ),
            Finding::GcLogFileRotationNotEnabled => (
                "GC_LOG_FILE_ROTATION_NOT_ENABLED",
                Info,
                "The GC log is written without rotation. Add -XX:+UseGCLogFileRotation.",
            ),
            Finding::ThreadStackSizeLarge => (
                "THREAD_STACK_SIZE_LARGE",
                Warn,
                "Thread stack size is larger than 1M.",
            ),
            Finding::PrintGcCauseDisabled => (
                "PRINT_GC_CAUSE_DISABLED",
                Warn,
                "Collection causes are not logged (-XX:-PrintGCCause).",
            ),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Finding {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Finding", 3)?;
        state.serialize_field("code", self.code())?;
        state.serialize_field("severity", &self.severity())?;
        state.serialize_field("message", self.message())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, HashSet};

    use super::*;

    #[test]
    fn test_codes_are_unique_screaming_snake() {
        let codes: HashSet<_> = Finding::ALL.iter().map(Finding::code).collect();
        assert_eq!(codes.len(), Finding::ALL.len());
        for code in codes {
            assert!(
                code.bytes().all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_'),
                "bad code: {}",
                code
            );
        }
    }

    #[test]
    fn test_all_is_in_sort_order() {
        assert!(Finding::ALL.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_catalog_entries() {
        assert_eq!(Finding::ApplicationStoppedTimeMissing.code(), "APPLICATION_STOPPED_TIME_MISSING");
        assert_eq!(Finding::ApplicationStoppedTimeMissing.severity(), Severity::Warn);
        assert_eq!(Finding::ExplicitGcSerialG1.code(), "EXPLICIT_GC_SERIAL_G1");
        assert_eq!(Finding::ExplicitGcSerialG1.severity(), Severity::Error);
        assert_eq!(Finding::NoGcEvents.severity(), Severity::Info);
        assert!(!Finding::ThroughputBottleneck.message().is_empty());
    }

    #[test]
    fn test_set_collapses_duplicates() {
        let set: BTreeSet<_> = [Finding::GcLocker, Finding::SerialGc, Finding::GcLocker].into_iter().collect();
        assert_eq!(set.into_iter().collect::<Vec<_>>(), vec![Finding::SerialGc, Finding::GcLocker]);
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_value(Finding::G1FullGc).unwrap();
        assert_eq!(json["code"], "G1_FULL_GC");
        assert_eq!(json["severity"], "error");
    }
}
