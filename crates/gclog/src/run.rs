//! Everything known about one JVM run once its log has been read.
//!
//! [`RunAccumulator`] folds events in a single pass; [`RunAccumulator::finish`]
//! computes the aggregates and evaluates the finding catalog. The resulting
//! [`JvmRun`] is read-only.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use serde::Serialize;
use tracing::info;

use crate::analysis::{self, CollectorVerdict, Finding, JvmOptions};
use crate::event::{Event, MemoryRegion, Trigger};
use crate::parser::{Collector, EventType};

/// Events whose collector runs with several GC threads.
fn is_parallel_collection(event_type: EventType) -> bool {
    match event_type {
        EventType::CmsInitialMark | EventType::CmsRemark | EventType::UnifiedCmsInitialMark => true,
        _ => {
            event_type.is_blocking()
                && matches!(
                    event_type.collector(),
                    Some(Collector::ParallelScavenge | Collector::ParallelOld | Collector::ParNew | Collector::G1)
                )
        }
    }
}

/// Causes and cause-derived facts gathered while reading events.
#[derive(Debug, Clone, Default)]
struct TriggerFacts {
    triggers: HashSet<Trigger>,
    /// Types seen with an explicit `System.gc()` cause.
    explicit_types: BTreeSet<EventType>,
    /// Types seen with any other cause, or none.
    unforced_types: BTreeSet<EventType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JvmRun {
    events: Vec<Event>,
    event_types: Vec<EventType>,
    type_counts: BTreeMap<EventType, u64>,
    jvm_options: Option<String>,
    jvm_version: Option<String>,
    collector: CollectorVerdict,

    first_timestamp: Option<u64>,
    last_timestamp: Option<u64>,
    elapsed: u64,
    blocking_time: u64,
    blocking_count: u64,
    reportable_count: u64,
    max_pause: u64,
    throughput: f64,
    throughput_threshold: u32,

    stopped_time: u64,
    max_stopped: u64,
    max_heap_occupancy: u64,
    max_heap_space: u64,
    max_perm_occupancy: u64,
    max_perm_space: u64,
    unidentified_count: u64,
    inverted_parallelism_count: u64,
    min_parallelism: Option<u32>,

    analysis: BTreeSet<Finding>,

    #[serde(skip)]
    facts: TriggerFacts,
}

/// Aggregates and findings without the event list.
#[derive(Debug, Serialize)]
pub struct RunSummary<'a> {
    pub event_count: usize,
    pub event_types: &'a [EventType],
    pub jvm_version: Option<&'a str>,
    pub jvm_options: Option<&'a str>,
    pub collector: CollectorVerdict,
    pub first_timestamp: Option<u64>,
    pub last_timestamp: Option<u64>,
    pub elapsed: u64,
    pub blocking_count: u64,
    pub blocking_time: u64,
    pub max_pause: u64,
    pub stopped_time: u64,
    pub max_stopped: u64,
    pub throughput: f64,
    pub throughput_threshold: u32,
    pub bottleneck: bool,
    pub max_heap_occupancy: u64,
    pub max_heap_space: u64,
    pub max_perm_occupancy: u64,
    pub max_perm_space: u64,
    pub unidentified_count: u64,
    pub analysis: &'a BTreeSet<Finding>,
}

impl JvmRun {
    /// Fold a complete event sequence.
    pub fn from_events(events: impl IntoIterator<Item = Event>, throughput_threshold: u32) -> Self {
        let mut acc = RunAccumulator::new();
        for event in events {
            acc.push(event);
        }
        acc.finish(throughput_threshold)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Distinct event types in first-seen order, blank lines excluded.
    pub fn event_types(&self) -> &[EventType] {
        &self.event_types
    }

    pub fn count(&self, event_type: EventType) -> u64 {
        self.type_counts.get(&event_type).copied().unwrap_or(0)
    }

    pub fn has_type(&self, event_type: EventType) -> bool {
        self.count(event_type) > 0
    }

    /// Raw command line from the flags banner.
    pub fn jvm_options(&self) -> Option<&str> {
        self.jvm_options.as_deref()
    }

    pub fn jvm_version(&self) -> Option<&str> {
        self.jvm_version.as_deref()
    }

    pub fn collector(&self) -> CollectorVerdict {
        self.collector
    }

    /// Milliseconds since JVM start of the first timed event.
    pub fn first_timestamp(&self) -> Option<u64> {
        self.first_timestamp
    }

    pub fn last_timestamp(&self) -> Option<u64> {
        self.last_timestamp
    }

    /// Microseconds between the start of the first timed event and the end
    /// of the last.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Microseconds spent in blocking events.
    pub fn blocking_time(&self) -> u64 {
        self.blocking_time
    }

    pub fn blocking_count(&self) -> u64 {
        self.blocking_count
    }

    pub fn reportable_count(&self) -> u64 {
        self.reportable_count
    }

    pub fn max_pause(&self) -> u64 {
        self.max_pause
    }

    /// Percent of elapsed time not spent in blocking events.
    pub fn throughput(&self) -> f64 {
        self.throughput
    }

    pub fn throughput_threshold(&self) -> u32 {
        self.throughput_threshold
    }

    pub fn is_bottleneck(&self) -> bool {
        self.throughput < f64::from(self.throughput_threshold)
    }

    /// Microseconds application threads were stopped at safepoints.
    pub fn stopped_time(&self) -> u64 {
        self.stopped_time
    }

    pub fn max_stopped(&self) -> u64 {
        self.max_stopped
    }

    pub fn max_heap_occupancy(&self) -> u64 {
        self.max_heap_occupancy
    }

    pub fn max_heap_space(&self) -> u64 {
        self.max_heap_space
    }

    pub fn max_perm_occupancy(&self) -> u64 {
        self.max_perm_occupancy
    }

    pub fn max_perm_space(&self) -> u64 {
        self.max_perm_space
    }

    pub fn unidentified_count(&self) -> u64 {
        self.unidentified_count
    }

    /// Parallel collections whose wall time exceeded their CPU time.
    pub fn inverted_parallelism_count(&self) -> u64 {
        self.inverted_parallelism_count
    }

    pub fn min_parallelism(&self) -> Option<u32> {
        self.min_parallelism
    }

    pub fn analysis(&self) -> &BTreeSet<Finding> {
        &self.analysis
    }

    pub fn has_finding(&self, finding: Finding) -> bool {
        self.analysis.contains(&finding)
    }

    pub fn has_trigger(&self, trigger: &Trigger) -> bool {
        self.facts.triggers.contains(trigger)
    }

    /// Some event of this type was an explicit `System.gc()`.
    pub fn is_explicit(&self, event_type: EventType) -> bool {
        self.facts.explicit_types.contains(&event_type)
    }

    /// Some event of this type was not an explicit `System.gc()`.
    pub fn is_unforced(&self, event_type: EventType) -> bool {
        self.facts.unforced_types.contains(&event_type)
    }

    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            event_count: self.events.len(),
            event_types: &self.event_types,
            jvm_version: self.jvm_version(),
            jvm_options: self.jvm_options(),
            collector: self.collector,
            first_timestamp: self.first_timestamp,
            last_timestamp: self.last_timestamp,
            elapsed: self.elapsed,
            blocking_count: self.blocking_count,
            blocking_time: self.blocking_time,
            max_pause: self.max_pause,
            stopped_time: self.stopped_time,
            max_stopped: self.max_stopped,
            throughput: self.throughput,
            throughput_threshold: self.throughput_threshold,
            bottleneck: self.is_bottleneck(),
            max_heap_occupancy: self.max_heap_occupancy,
            max_heap_space: self.max_heap_space,
            max_perm_occupancy: self.max_perm_occupancy,
            max_perm_space: self.max_perm_space,
            unidentified_count: self.unidentified_count,
            analysis: &self.analysis,
        }
    }
}

/// Single-pass fold over an event stream.
#[derive(Debug, Default)]
pub struct RunAccumulator {
    events: Vec<Event>,
    event_types: Vec<EventType>,
    type_counts: BTreeMap<EventType, u64>,
    jvm_options: Option<String>,
    jvm_version: Option<String>,
    first_timestamp: Option<u64>,
    last_timestamp: Option<u64>,
    first_start_us: Option<u64>,
    last_end_us: Option<u64>,
    blocking_time: u64,
    blocking_count: u64,
    reportable_count: u64,
    max_pause: u64,
    stopped_time: u64,
    max_stopped: u64,
    max_heap_occupancy: u64,
    max_heap_space: u64,
    max_perm_occupancy: u64,
    max_perm_space: u64,
    inverted_parallelism_count: u64,
    min_parallelism: Option<u32>,
    facts: TriggerFacts,
}

impl RunAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: Event) {
        let event_type = event.event_type;

        if !matches!(event_type, EventType::Blank | EventType::UnifiedBlankLine) {
            let count = self.type_counts.entry(event_type).or_insert(0);
            if *count == 0 {
                self.event_types.push(event_type);
            }
            *count += 1;
        }

        match event_type {
            EventType::HeaderCommandLineFlags if self.jvm_options.is_none() => {
                self.jvm_options = event.text.clone();
            }
            EventType::HeaderVersion if self.jvm_version.is_none() => {
                self.jvm_version = event.text.clone();
            }
            EventType::ApplicationStoppedTime => {
                let duration = event.duration.unwrap_or(0);
                self.stopped_time = self.stopped_time.saturating_add(duration);
                self.max_stopped = self.max_stopped.max(duration);
            }
            _ => {}
        }

        if let Some(ts) = event.timestamp {
            self.first_timestamp.get_or_insert(ts);
            self.first_start_us.get_or_insert(ts.saturating_mul(1_000));
            self.last_timestamp = Some(ts);
            self.last_end_us = event.end_us();
        }

        if event.is_blocking() {
            let duration = event.duration.unwrap_or(0);
            self.blocking_count += 1;
            self.blocking_time = self.blocking_time.saturating_add(duration);
            self.max_pause = self.max_pause.max(duration);
        }

        if event.is_reportable() {
            self.reportable_count += 1;
            self.record_trigger(&event);
            self.record_memory(&event);
            self.record_parallelism(&event);
        }

        self.events.push(event);
    }

    pub fn finish(self, throughput_threshold: u32) -> JvmRun {
        let elapsed = match (self.first_start_us, self.last_end_us) {
            (Some(first), Some(last)) => last.saturating_sub(first),
            _ => 0,
        };
        let throughput = if elapsed == 0 {
            100.0
        } else {
            (100.0 * (1.0 - self.blocking_time as f64 / elapsed as f64)).max(0.0)
        };

        let collector = analysis::detect_collector(&self.event_types);
        let unidentified_count = self.type_counts.get(&EventType::Unknown).copied().unwrap_or(0);

        let mut run = JvmRun {
            events: self.events,
            event_types: self.event_types,
            type_counts: self.type_counts,
            jvm_options: self.jvm_options,
            jvm_version: self.jvm_version,
            collector,
            first_timestamp: self.first_timestamp,
            last_timestamp: self.last_timestamp,
            elapsed,
            blocking_time: self.blocking_time,
            blocking_count: self.blocking_count,
            reportable_count: self.reportable_count,
            max_pause: self.max_pause,
            throughput,
            throughput_threshold,
            stopped_time: self.stopped_time,
            max_stopped: self.max_stopped,
            max_heap_occupancy: self.max_heap_occupancy,
            max_heap_space: self.max_heap_space,
            max_perm_occupancy: self.max_perm_occupancy,
            max_perm_space: self.max_perm_space,
            unidentified_count,
            inverted_parallelism_count: self.inverted_parallelism_count,
            min_parallelism: self.min_parallelism,
            analysis: BTreeSet::new(),
            facts: self.facts,
        };

        let options = run.jvm_options.as_deref().map(JvmOptions::parse);
        run.analysis = analysis::evaluate(&run, options.as_ref());

        info!(
            events = run.events.len(),
            blocking = run.blocking_count,
            throughput = run.throughput,
            findings = run.analysis.len(),
            "run analyzed"
        );
        run
    }

    fn record_trigger(&mut self, event: &Event) {
        if event.is_explicit() {
            self.facts.explicit_types.insert(event.event_type);
        } else {
            self.facts.unforced_types.insert(event.event_type);
        }
        if let Some(trigger) = &event.trigger {
            self.facts.triggers.insert(trigger.clone());
        }
    }

    fn record_memory(&mut self, event: &Event) {
        let heap = event.combined.or_else(|| match (event.young, event.old) {
            (Some(young), Some(old)) => Some(MemoryRegion::new(
                young.occupancy_init + old.occupancy_init,
                young.occupancy_end + old.occupancy_end,
                young.space + old.space,
            )),
            _ => None,
        });
        if let Some(heap) = heap {
            self.max_heap_occupancy = self.max_heap_occupancy.max(heap.occupancy_init);
            self.max_heap_space = self.max_heap_space.max(heap.space);
        }
        if let Some(perm) = event.permanent {
            self.max_perm_occupancy = self.max_perm_occupancy.max(perm.occupancy_init);
            self.max_perm_space = self.max_perm_space.max(perm.space);
        }
    }

    fn record_parallelism(&mut self, event: &Event) {
        if !is_parallel_collection(event.event_type) {
            return;
        }
        let Some(cpu) = event.cpu else {
            return;
        };
        if cpu.real == 0 {
            return;
        }
        let parallelism = cpu.parallelism();
        self.min_parallelism = Some(self.min_parallelism.map_or(parallelism, |min| min.min(parallelism)));
        if cpu.is_inverted() {
            self.inverted_parallelism_count += 1;
        }
    }
}
