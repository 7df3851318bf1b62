use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Collector/phase combination a log line belongs to.
///
/// Every canonical line maps to exactly one tag. The capability flags
/// (`is_blocking`, `is_reportable`, `is_unified`) are fixed per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    // Markers, headers and informational lines
    Blank,
    UnifiedBlankLine,
    Unknown,
    HeaderVersion,
    HeaderCommandLineFlags,
    HeaderMemory,
    UsingSerial,
    UsingParallel,
    UsingCms,
    UsingG1,
    UsingShenandoah,
    UsingZ,
    UsingEpsilon,
    GcInfo,
    LogFile,
    VmWarning,
    ThreadDump,
    HeapAtGc,
    TenuringDistribution,
    ClassHistogram,
    FlsStatistics,
    ClassUnloading,
    ReferenceGc,
    ApplicationConcurrentTime,
    GcLocker,
    GcOverheadLimit,
    G1Details,
    ShenandoahTrigger,
    ShenandoahCancellingGc,
    ShenandoahStats,

    // Safepoint
    ApplicationStoppedTime,

    // Serial
    SerialNew,
    SerialOld,
    UnifiedSerialNew,
    UnifiedSerialOld,

    // Parallel
    ParallelScavenge,
    ParallelSerialOld,
    ParallelCompactingOld,
    UnifiedParallelScavenge,
    UnifiedParallelCompactingOld,
    UnifiedParallelSerialOld,

    // CMS
    ParNew,
    CmsInitialMark,
    CmsRemark,
    CmsConcurrent,
    CmsSerialOld,
    UnifiedParNew,
    UnifiedCmsInitialMark,

    // G1
    G1YoungPause,
    G1MixedPause,
    G1YoungInitialMark,
    G1Remark,
    G1Cleanup,
    G1FullGc,
    G1Concurrent,
    UnifiedG1YoungPause,
    UnifiedG1MixedPause,
    UnifiedG1YoungInitialMark,
    UnifiedG1YoungPrepareMixed,
    UnifiedG1Cleanup,
    UnifiedG1FullGc,

    // Shenandoah
    ShenandoahInitMark,
    ShenandoahFinalMark,
    ShenandoahInitUpdate,
    ShenandoahFinalUpdate,
    ShenandoahFinalEvac,
    ShenandoahFinalRoots,
    ShenandoahDegeneratedGcMark,
    ShenandoahDegeneratedGcOutsideOfCycle,
    ShenandoahDegeneratedGcEvacuation,
    ShenandoahDegeneratedGcUpdateRefs,
    ShenandoahFullGc,
    ShenandoahConcurrent,

    // Z
    ZMarkStart,
    ZMarkEnd,
    ZRelocateStart,
    ZGarbageCollection,
    ZConcurrent,
    ZAllocationStall,

    // Collector-agnostic
    UnifiedYoung,
    UnifiedOld,
    UnifiedRemark,
    UnifiedConcurrent,
    VerboseGcYoung,
    VerboseGcOld,
}

impl EventType {
    /// Every tag, in declaration order.
    pub const ALL: &'static [EventType] = &[
        EventType::Blank,
        EventType::UnifiedBlankLine,
        EventType::Unknown,
        EventType::HeaderVersion,
        EventType::HeaderCommandLineFlags,
        EventType::HeaderMemory,
        EventType::UsingSerial,
        EventType::UsingParallel,
        EventType::UsingCms,
        EventType::UsingG1,
        EventType::UsingShenandoah,
        EventType::UsingZ,
        EventType::UsingEpsilon,
        EventType::GcInfo,
        EventType::LogFile,
        EventType::VmWarning,
        EventType::ThreadDump,
        EventType::HeapAtGc,
        EventType::TenuringDistribution,
        EventType::ClassHistogram,
        EventType::FlsStatistics,
        EventType::ClassUnloading,
        EventType::ReferenceGc,
        EventType::ApplicationConcurrentTime,
        EventType::GcLocker,
        EventType::GcOverheadLimit,
        EventType::G1Details,
        EventType::ShenandoahTrigger,
        EventType::ShenandoahCancellingGc,
        EventType::ShenandoahStats,
        EventType::ApplicationStoppedTime,
        EventType::SerialNew,
        EventType::SerialOld,
        EventType::UnifiedSerialNew,
        EventType::UnifiedSerialOld,
        EventType::ParallelScavenge,
        EventType::ParallelSerialOld,
        EventType::ParallelCompactingOld,
        EventType::UnifiedParallelScavenge,
        EventType::UnifiedParallelCompactingOld,
        EventType::UnifiedParallelSerialOld,
        EventType::ParNew,
        EventType::CmsInitialMark,
        EventType::CmsRemark,
        EventType::CmsConcurrent,
        EventType::CmsSerialOld,
        EventType::UnifiedParNew,
        EventType::UnifiedCmsInitialMark,
        EventType::G1YoungPause,
        EventType::G1MixedPause,
        EventType::G1YoungInitialMark,
        EventType::G1Remark,
        EventType::G1Cleanup,
        EventType::G1FullGc,
        EventType::G1Concurrent,
        EventType::UnifiedG1YoungPause,
        EventType::UnifiedG1MixedPause,
        EventType::UnifiedG1YoungInitialMark,
        EventType::UnifiedG1YoungPrepareMixed,
        EventType::UnifiedG1Cleanup,
        EventType::UnifiedG1FullGc,
        EventType::ShenandoahInitMark,
        EventType::ShenandoahFinalMark,
        EventType::ShenandoahInitUpdate,
        EventType::ShenandoahFinalUpdate,
        EventType::ShenandoahFinalEvac,
        EventType::ShenandoahFinalRoots,
        EventType::ShenandoahDegeneratedGcMark,
        EventType::ShenandoahDegeneratedGcOutsideOfCycle,
        EventType::ShenandoahDegeneratedGcEvacuation,
        EventType::ShenandoahDegeneratedGcUpdateRefs,
        EventType::ShenandoahFullGc,
        EventType::ShenandoahConcurrent,
        EventType::ZMarkStart,
        EventType::ZMarkEnd,
        EventType::ZRelocateStart,
        EventType::ZGarbageCollection,
        EventType::ZConcurrent,
        EventType::ZAllocationStall,
        EventType::UnifiedYoung,
        EventType::UnifiedOld,
        EventType::UnifiedRemark,
        EventType::UnifiedConcurrent,
        EventType::VerboseGcYoung,
        EventType::VerboseGcOld,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Blank => "BLANK",
            EventType::UnifiedBlankLine => "UNIFIED_BLANK_LINE",
            EventType::Unknown => "UNKNOWN",
            EventType::HeaderVersion => "HEADER_VERSION",
            EventType::HeaderCommandLineFlags => "HEADER_COMMAND_LINE_FLAGS",
            EventType::HeaderMemory => "HEADER_MEMORY",
            EventType::UsingSerial => "USING_SERIAL",
            EventType::UsingParallel => "USING_PARALLEL",
            EventType::UsingCms => "USING_CMS",
            EventType::UsingG1 => "USING_G1",
            EventType::UsingShenandoah => "USING_SHENANDOAH",
            EventType::UsingZ => "USING_Z",
            EventType::UsingEpsilon => "USING_EPSILON",
            EventType::GcInfo => "GC_INFO",
            EventType::LogFile => "LOG_FILE",
            EventType::VmWarning => "VM_WARNING",
            EventType::ThreadDump => "THREAD_DUMP",
            EventType::HeapAtGc => "HEAP_AT_GC",
            EventType::TenuringDistribution => "TENURING_DISTRIBUTION",
            EventType::ClassHistogram => "CLASS_HISTOGRAM",
            EventType::FlsStatistics => "FLS_STATISTICS",
            EventType::ClassUnloading => "CLASS_UNLOADING",
            EventType::ReferenceGc => "REFERENCE_GC",
            EventType::ApplicationConcurrentTime => "APPLICATION_CONCURRENT_TIME",
            EventType::GcLocker => "GC_LOCKER",
            EventType::GcOverheadLimit => "GC_OVERHEAD_LIMIT",
            EventType::G1Details => "G1_DETAILS",
            EventType::ShenandoahTrigger => "SHENANDOAH_TRIGGER",
            EventType::ShenandoahCancellingGc => "SHENANDOAH_CANCELLING_GC",
            EventType::ShenandoahStats => "SHENANDOAH_STATS",
            EventType::ApplicationStoppedTime => "APPLICATION_STOPPED_TIME",
            EventType::SerialNew => "SERIAL_NEW",
            EventType::SerialOld => "SERIAL_OLD",
            EventType::UnifiedSerialNew => "UNIFIED_SERIAL_NEW",
            EventType::UnifiedSerialOld => "UNIFIED_SERIAL_OLD",
            EventType::ParallelScavenge => "PARALLEL_SCAVENGE",
            EventType::ParallelSerialOld => "PARALLEL_SERIAL_OLD",
            EventType::ParallelCompactingOld => "PARALLEL_COMPACTING_OLD",
            EventType::UnifiedParallelScavenge => "UNIFIED_PARALLEL_SCAVENGE",
            EventType::UnifiedParallelCompactingOld => "UNIFIED_PARALLEL_COMPACTING_OLD",
            EventType::UnifiedParallelSerialOld => "UNIFIED_PARALLEL_SERIAL_OLD",
            EventType::ParNew => "PAR_NEW",
            EventType::CmsInitialMark => "CMS_INITIAL_MARK",
            EventType::CmsRemark => "CMS_REMARK",
            EventType::CmsConcurrent => "CMS_CONCURRENT",
            EventType::CmsSerialOld => "CMS_SERIAL_OLD",
            EventType::UnifiedParNew => "UNIFIED_PAR_NEW",
            EventType::UnifiedCmsInitialMark => "UNIFIED_CMS_INITIAL_MARK",
            EventType::G1YoungPause => "G1_YOUNG_PAUSE",
            EventType::G1MixedPause => "G1_MIXED_PAUSE",
            EventType::G1YoungInitialMark => "G1_YOUNG_INITIAL_MARK",
            EventType::G1Remark => "G1_REMARK",
            EventType::G1Cleanup => "G1_CLEANUP",
            EventType::G1FullGc => "G1_FULL_GC",
            EventType::G1Concurrent => "G1_CONCURRENT",
            EventType::UnifiedG1YoungPause => "UNIFIED_G1_YOUNG_PAUSE",
            EventType::UnifiedG1MixedPause => "UNIFIED_G1_MIXED_PAUSE",
            EventType::UnifiedG1YoungInitialMark => "UNIFIED_G1_YOUNG_INITIAL_MARK",
            EventType::UnifiedG1YoungPrepareMixed => "UNIFIED_G1_YOUNG_PREPARE_MIXED",
            EventType::UnifiedG1Cleanup => "UNIFIED_G1_CLEANUP",
            EventType::UnifiedG1FullGc => "UNIFIED_G1_FULL_GC",
            EventType::ShenandoahInitMark => "SHENANDOAH_INIT_MARK",
            EventType::ShenandoahFinalMark => "SHENANDOAH_FINAL_MARK",
            EventType::ShenandoahInitUpdate => "SHENANDOAH_INIT_UPDATE",
            EventType::ShenandoahFinalUpdate => "SHENANDOAH_FINAL_UPDATE",
            EventType::ShenandoahFinalEvac => "SHENANDOAH_FINAL_EVAC",
            EventType::ShenandoahFinalRoots => "SHENANDOAH_FINAL_ROOTS",
            EventType::ShenandoahDegeneratedGcMark => "SHENANDOAH_DEGENERATED_GC_MARK",
            EventType::ShenandoahDegeneratedGcOutsideOfCycle => "SHENANDOAH_DEGENERATED_GC_OUTSIDE_OF_CYCLE",
            EventType::ShenandoahDegeneratedGcEvacuation => "SHENANDOAH_DEGENERATED_GC_EVACUATION",
            EventType::ShenandoahDegeneratedGcUpdateRefs => "SHENANDOAH_DEGENERATED_GC_UPDATE_REFS",
            EventType::ShenandoahFullGc => "SHENANDOAH_FULL_GC",
            EventType::ShenandoahConcurrent => "SHENANDOAH_CONCURRENT",
            EventType::ZMarkStart => "Z_MARK_START",
            EventType::ZMarkEnd => "Z_MARK_END",
            EventType::ZRelocateStart => "Z_RELOCATE_START",
            EventType::ZGarbageCollection => "Z_GARBAGE_COLLECTION",
            EventType::ZConcurrent => "Z_CONCURRENT",
            EventType::ZAllocationStall => "Z_ALLOCATION_STALL",
            EventType::UnifiedYoung => "UNIFIED_YOUNG",
            EventType::UnifiedOld => "UNIFIED_OLD",
            EventType::UnifiedRemark => "UNIFIED_REMARK",
            EventType::UnifiedConcurrent => "UNIFIED_CONCURRENT",
            EventType::VerboseGcYoung => "VERBOSE_GC_YOUNG",
            EventType::VerboseGcOld => "VERBOSE_GC_OLD",
        }
    }

    /// Stops all application threads.
    pub fn is_blocking(&self) -> bool {
        matches!(
            self,
            EventType::SerialNew
                | EventType::SerialOld
                | EventType::UnifiedSerialNew
                | EventType::UnifiedSerialOld
                | EventType::ParallelScavenge
                | EventType::ParallelSerialOld
                | EventType::ParallelCompactingOld
                | EventType::UnifiedParallelScavenge
                | EventType::UnifiedParallelCompactingOld
                | EventType::UnifiedParallelSerialOld
                | EventType::ParNew
                | EventType::CmsInitialMark
                | EventType::CmsRemark
                | EventType::CmsSerialOld
                | EventType::UnifiedParNew
                | EventType::UnifiedCmsInitialMark
                | EventType::G1YoungPause
                | EventType::G1MixedPause
                | EventType::G1YoungInitialMark
                | EventType::G1Remark
                | EventType::G1Cleanup
                | EventType::G1FullGc
                | EventType::UnifiedG1YoungPause
                | EventType::UnifiedG1MixedPause
                | EventType::UnifiedG1YoungInitialMark
                | EventType::UnifiedG1YoungPrepareMixed
                | EventType::UnifiedG1Cleanup
                | EventType::UnifiedG1FullGc
                | EventType::ShenandoahInitMark
                | EventType::ShenandoahFinalMark
                | EventType::ShenandoahInitUpdate
                | EventType::ShenandoahFinalUpdate
                | EventType::ShenandoahFinalEvac
                | EventType::ShenandoahFinalRoots
                | EventType::ShenandoahDegeneratedGcMark
                | EventType::ShenandoahDegeneratedGcOutsideOfCycle
                | EventType::ShenandoahDegeneratedGcEvacuation
                | EventType::ShenandoahDegeneratedGcUpdateRefs
                | EventType::ShenandoahFullGc
                | EventType::ZMarkStart
                | EventType::ZMarkEnd
                | EventType::ZRelocateStart
                | EventType::UnifiedYoung
                | EventType::UnifiedOld
                | EventType::UnifiedRemark
                | EventType::VerboseGcYoung
                | EventType::VerboseGcOld
        )
    }

    /// Counted toward GC-time statistics. Banners, markers, informational
    /// lines, safepoint lines and unrecognized lines are not.
    pub fn is_reportable(&self) -> bool {
        self.is_blocking()
            || matches!(
                self,
                EventType::CmsConcurrent
                    | EventType::G1Concurrent
                    | EventType::ShenandoahConcurrent
                    | EventType::ZGarbageCollection
                    | EventType::ZConcurrent
                    | EventType::ZAllocationStall
                    | EventType::UnifiedConcurrent
            )
    }

    /// Produced only by the unified logging subsystem (`-Xlog`).
    pub fn is_unified(&self) -> bool {
        matches!(
            self,
            EventType::UnifiedBlankLine
                | EventType::UsingSerial
                | EventType::UsingParallel
                | EventType::UsingCms
                | EventType::UsingG1
                | EventType::UsingShenandoah
                | EventType::UsingZ
                | EventType::UsingEpsilon
                | EventType::GcInfo
                | EventType::UnifiedSerialNew
                | EventType::UnifiedSerialOld
                | EventType::UnifiedParallelScavenge
                | EventType::UnifiedParallelCompactingOld
                | EventType::UnifiedParallelSerialOld
                | EventType::UnifiedParNew
                | EventType::UnifiedCmsInitialMark
                | EventType::UnifiedG1YoungPause
                | EventType::UnifiedG1MixedPause
                | EventType::UnifiedG1YoungInitialMark
                | EventType::UnifiedG1YoungPrepareMixed
                | EventType::UnifiedG1Cleanup
                | EventType::UnifiedG1FullGc
                | EventType::ZMarkStart
                | EventType::ZMarkEnd
                | EventType::ZRelocateStart
                | EventType::ZGarbageCollection
                | EventType::ZConcurrent
                | EventType::ZAllocationStall
                | EventType::UnifiedYoung
                | EventType::UnifiedOld
                | EventType::UnifiedRemark
                | EventType::UnifiedConcurrent
        )
    }

    /// Collector implementation that produced the event, when the tag
    /// identifies one. Collector-agnostic tags return `None`.
    pub fn collector(&self) -> Option<Collector> {
        let collector = match self {
            EventType::SerialNew | EventType::UnifiedSerialNew => Collector::SerialNew,
            EventType::SerialOld
            | EventType::UnifiedSerialOld
            | EventType::ParallelSerialOld
            | EventType::UnifiedParallelSerialOld => Collector::SerialOld,
            EventType::ParallelScavenge | EventType::UnifiedParallelScavenge => Collector::ParallelScavenge,
            EventType::ParallelCompactingOld | EventType::UnifiedParallelCompactingOld => {
                Collector::ParallelOld
            }
            EventType::ParNew | EventType::UnifiedParNew => Collector::ParNew,
            EventType::CmsInitialMark
            | EventType::CmsRemark
            | EventType::CmsConcurrent
            | EventType::CmsSerialOld
            | EventType::UnifiedCmsInitialMark => Collector::Cms,
            EventType::G1YoungPause
            | EventType::G1MixedPause
            | EventType::G1YoungInitialMark
            | EventType::G1Remark
            | EventType::G1Cleanup
            | EventType::G1FullGc
            | EventType::G1Concurrent
            | EventType::UnifiedG1YoungPause
            | EventType::UnifiedG1MixedPause
            | EventType::UnifiedG1YoungInitialMark
            | EventType::UnifiedG1YoungPrepareMixed
            | EventType::UnifiedG1Cleanup
            | EventType::UnifiedG1FullGc => Collector::G1,
            EventType::ShenandoahInitMark
            | EventType::ShenandoahFinalMark
            | EventType::ShenandoahInitUpdate
            | EventType::ShenandoahFinalUpdate
            | EventType::ShenandoahFinalEvac
            | EventType::ShenandoahFinalRoots
            | EventType::ShenandoahDegeneratedGcMark
            | EventType::ShenandoahDegeneratedGcOutsideOfCycle
            | EventType::ShenandoahDegeneratedGcEvacuation
            | EventType::ShenandoahDegeneratedGcUpdateRefs
            | EventType::ShenandoahFullGc
            | EventType::ShenandoahConcurrent => Collector::Shenandoah,
            EventType::ZMarkStart
            | EventType::ZMarkEnd
            | EventType::ZRelocateStart
            | EventType::ZGarbageCollection
            | EventType::ZConcurrent
            | EventType::ZAllocationStall => Collector::Z,
            _ => return None,
        };
        Some(collector)
    }

    pub fn is_shenandoah_degenerated(&self) -> bool {
        matches!(
            self,
            EventType::ShenandoahDegeneratedGcMark
                | EventType::ShenandoahDegeneratedGcOutsideOfCycle
                | EventType::ShenandoahDegeneratedGcEvacuation
                | EventType::ShenandoahDegeneratedGcUpdateRefs
        )
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A concrete HotSpot collector implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collector {
    /// `DefNew`
    SerialNew,
    /// `Tenured` / `PSOldGen`
    SerialOld,
    /// `PSYoungGen`
    ParallelScavenge,
    /// `ParOldGen`
    ParallelOld,
    ParNew,
    Cms,
    G1,
    Shenandoah,
    Z,
    Epsilon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Generation {
    Young,
    Old,
    /// Region-based or single-generation collector covering the whole heap.
    Whole,
}

impl Collector {
    pub fn generation(&self) -> Generation {
        match self {
            Collector::SerialNew | Collector::ParallelScavenge | Collector::ParNew => Generation::Young,
            Collector::SerialOld | Collector::ParallelOld | Collector::Cms => Generation::Old,
            Collector::G1 | Collector::Shenandoah | Collector::Z | Collector::Epsilon => Generation::Whole,
        }
    }
}

/// `begin->end(space)` tokens for one heap region, still in source units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawRegion<'a> {
    /// Absent for occupancy-only snapshots such as `[1 CMS-initial-mark: 0K(5000K)]`.
    pub begin: Option<&'a str>,
    pub end: &'a str,
    pub space: &'a str,
}

/// Raw text tokens extracted from one canonical line. Unit conversion
/// happens in the event builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFields<'a> {
    /// Unified logging decoration block, e.g. `[0.231s][info][gc]`.
    pub decoration: Option<&'a str>,
    /// Legacy `-XX:+PrintGCDateStamps` prefix.
    pub datestamp: Option<&'a str>,
    /// Legacy uptime prefix in seconds, e.g. `854868.165`.
    pub uptime: Option<&'a str>,
    pub trigger: Option<&'a str>,
    /// Secondary cause reported inside the event (`promotion failed`,
    /// `to-space exhausted`, `concurrent mode failure`).
    pub failure: Option<&'a str>,
    pub young: Option<RawRegion<'a>>,
    pub old: Option<RawRegion<'a>>,
    pub combined: Option<RawRegion<'a>>,
    pub permanent: Option<RawRegion<'a>>,
    pub humongous: Option<RawRegion<'a>>,
    pub duration: Option<&'a str>,
    pub user: Option<&'a str>,
    pub sys: Option<&'a str>,
    pub real: Option<&'a str>,
    pub text: Option<&'a str>,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Malformed {event_type} event: {line}")]
    MalformedEvent { event_type: EventType, line: String },

    #[error("Line too large: {0} bytes (max: {1} bytes)")]
    LineTooLarge(usize, usize),
}
