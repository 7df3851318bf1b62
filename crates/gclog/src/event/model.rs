use serde::{Serialize, Serializer};

use crate::parser::EventType;
use crate::units;

/// One heap region before and after a collection, in kilobytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MemoryRegion {
    pub occupancy_init: u64,
    pub occupancy_end: u64,
    pub space: u64,
}

impl MemoryRegion {
    pub fn new(occupancy_init: u64, occupancy_end: u64, space: u64) -> Self {
        Self {
            occupancy_init,
            occupancy_end,
            space,
        }
    }

    /// Kilobytes freed by the collection (zero when occupancy grew).
    pub fn reclaimed(&self) -> u64 {
        self.occupancy_init.saturating_sub(self.occupancy_end)
    }
}

/// CPU time spent by a collection, in centiseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CpuTimes {
    pub user: u64,
    pub sys: u64,
    pub real: u64,
}

impl CpuTimes {
    pub fn parallelism(&self) -> u32 {
        units::parallelism(self.user, self.sys, self.real)
    }

    /// Fewer CPUs were busy than wall time elapsed: the collection was
    /// effectively single threaded or starved.
    pub fn is_inverted(&self) -> bool {
        self.real > 0 && self.parallelism() < 100
    }
}

/// Reason a collection was started.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Trigger {
    AllocationFailure,
    Ergonomics,
    SystemGc,
    MetadataGcThreshold,
    GcLocker,
    G1EvacuationPause,
    G1HumongousAllocation,
    G1CompactionPause,
    G1PeriodicCollection,
    G1PreventiveCollection,
    CmsInitialMark,
    CmsFinalRemark,
    HeapInspection,
    HeapDump,
    LastDitchCollection,
    PromotionFailed,
    ConcurrentModeFailure,
    ToSpaceExhausted,
    ToSpaceOverflow,
    AllocationStall,
    AllocationRate,
    Proactive,
    Warmup,
    Timer,
    HighUsage,
    DiagnosticCommand,
    UpdateAllocationContextStats,
    NoGc,
    WhiteBox,
    /// Cause text outside the known vocabulary, kept verbatim.
    Other(String),
}

impl Trigger {
    pub fn from_text(text: &str) -> Self {
        let text = text.trim();
        match text {
            "Allocation Failure" => Trigger::AllocationFailure,
            "Ergonomics" => Trigger::Ergonomics,
            "System.gc()" | "System.gc" => Trigger::SystemGc,
            "Metadata GC Threshold" => Trigger::MetadataGcThreshold,
            "GCLocker Initiated GC" | "GC Locker Initiated GC" => Trigger::GcLocker,
            "G1 Evacuation Pause" => Trigger::G1EvacuationPause,
            "G1 Humongous Allocation" => Trigger::G1HumongousAllocation,
            "G1 Compaction Pause" => Trigger::G1CompactionPause,
            "G1 Periodic Collection" => Trigger::G1PeriodicCollection,
            "G1 Preventive Collection" => Trigger::G1PreventiveCollection,
            "CMS Initial Mark" => Trigger::CmsInitialMark,
            "CMS Final Remark" => Trigger::CmsFinalRemark,
            "Heap Inspection Initiated GC" => Trigger::HeapInspection,
            "Heap Dump Initiated GC" => Trigger::HeapDump,
            "Last ditch collection" => Trigger::LastDitchCollection,
            "promotion failed" => Trigger::PromotionFailed,
            "concurrent mode failure" => Trigger::ConcurrentModeFailure,
            "Allocation Stall" => Trigger::AllocationStall,
            "Allocation Rate" => Trigger::AllocationRate,
            "Proactive" => Trigger::Proactive,
            "Warmup" => Trigger::Warmup,
            "Timer" => Trigger::Timer,
            "High Usage" => Trigger::HighUsage,
            "Diagnostic Command" => Trigger::DiagnosticCommand,
            "Update Allocation Context Stats" => Trigger::UpdateAllocationContextStats,
            "No GC" => Trigger::NoGc,
            _ if text.eq_ignore_ascii_case("to-space exhausted") => Trigger::ToSpaceExhausted,
            _ if text.eq_ignore_ascii_case("to-space overflow") => Trigger::ToSpaceOverflow,
            _ if text.starts_with("WhiteBox Initiated") => Trigger::WhiteBox,
            other => Trigger::Other(other.to_string()),
        }
    }

    /// Cause as the JVM prints it.
    pub fn as_str(&self) -> &str {
        match self {
            Trigger::AllocationFailure => "Allocation Failure",
            Trigger::Ergonomics => "Ergonomics",
            Trigger::SystemGc => "System.gc()",
            Trigger::MetadataGcThreshold => "Metadata GC Threshold",
            Trigger::GcLocker => "GCLocker Initiated GC",
            Trigger::G1EvacuationPause => "G1 Evacuation Pause",
            Trigger::G1HumongousAllocation => "G1 Humongous Allocation",
            Trigger::G1CompactionPause => "G1 Compaction Pause",
            Trigger::G1PeriodicCollection => "G1 Periodic Collection",
            Trigger::G1PreventiveCollection => "G1 Preventive Collection",
            Trigger::CmsInitialMark => "CMS Initial Mark",
            Trigger::CmsFinalRemark => "CMS Final Remark",
            Trigger::HeapInspection => "Heap Inspection Initiated GC",
            Trigger::HeapDump => "Heap Dump Initiated GC",
            Trigger::LastDitchCollection => "Last ditch collection",
            Trigger::PromotionFailed => "promotion failed",
            Trigger::ConcurrentModeFailure => "concurrent mode failure",
            Trigger::ToSpaceExhausted => "to-space exhausted",
            Trigger::ToSpaceOverflow => "to-space overflow",
            Trigger::AllocationStall => "Allocation Stall",
            Trigger::AllocationRate => "Allocation Rate",
            Trigger::Proactive => "Proactive",
            Trigger::Warmup => "Warmup",
            Trigger::Timer => "Timer",
            Trigger::HighUsage => "High Usage",
            Trigger::DiagnosticCommand => "Diagnostic Command",
            Trigger::UpdateAllocationContextStats => "Update Allocation Context Stats",
            Trigger::NoGc => "No GC",
            Trigger::WhiteBox => "WhiteBox Initiated GC",
            Trigger::Other(text) => text.as_str(),
        }
    }

    pub fn is_explicit(&self) -> bool {
        matches!(self, Trigger::SystemGc)
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Trigger {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A normalized garbage collection event built from one canonical line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub event_type: EventType,

    /// Milliseconds since JVM start at which the event began.
    pub timestamp: Option<u64>,

    /// Microseconds.
    pub duration: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub young: Option<MemoryRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old: Option<MemoryRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combined: Option<MemoryRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permanent: Option<MemoryRegion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humongous: Option<MemoryRegion>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<Trigger>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<CpuTimes>,

    /// Banner payload: version string, command line flags, memory line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Canonical line the event was built from.
    pub log_entry: String,
}

impl Event {
    /// Event with only a tag and its source line.
    pub fn new(event_type: EventType, log_entry: impl Into<String>) -> Self {
        Self {
            event_type,
            timestamp: None,
            duration: None,
            young: None,
            old: None,
            combined: None,
            permanent: None,
            humongous: None,
            trigger: None,
            cpu: None,
            text: None,
            log_entry: log_entry.into(),
        }
    }

    pub fn unknown(log_entry: impl Into<String>) -> Self {
        Self::new(EventType::Unknown, log_entry)
    }

    pub fn is_blocking(&self) -> bool {
        self.event_type.is_blocking()
    }

    pub fn is_reportable(&self) -> bool {
        self.event_type.is_reportable()
    }

    /// Microseconds since JVM start at which the event ended.
    pub fn end_us(&self) -> Option<u64> {
        self.timestamp
            .map(|ts| ts.saturating_mul(1_000).saturating_add(self.duration.unwrap_or(0)))
    }

    pub fn is_explicit(&self) -> bool {
        self.trigger.as_ref().is_some_and(Trigger::is_explicit)
    }

    pub fn has_trigger(&self, trigger: &Trigger) -> bool {
        self.trigger.as_ref() == Some(trigger)
    }

    pub fn parallelism(&self) -> Option<u32> {
        self.cpu.map(|cpu| cpu.parallelism())
    }
}
