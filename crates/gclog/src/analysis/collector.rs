//! Collector detection from the event types seen in a run.
//!
//! Event types name their collector directly. `Using ...` banners are only
//! consulted when no event does, which covers unified logs made entirely of
//! collector-agnostic lines.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::parser::{Collector, EventType, Generation};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectorVerdict {
    /// One collector per generation. Region-based collectors appear in both.
    Known {
        young: Option<Collector>,
        old: Option<Collector>,
    },
    Unknown,
    /// Collectors that cannot run in the same JVM.
    Invalid,
}

impl CollectorVerdict {
    pub fn is(&self, young: Collector, old: Collector) -> bool {
        matches!(self, CollectorVerdict::Known { young: Some(y), old: Some(o) } if *y == young && *o == old)
    }

    pub fn uses(&self, collector: Collector) -> bool {
        match self {
            CollectorVerdict::Known { young, old } => *young == Some(collector) || *old == Some(collector),
            _ => false,
        }
    }
}

pub fn detect(types: &[EventType]) -> CollectorVerdict {
    let mut collectors: BTreeSet<Collector> = types.iter().filter_map(EventType::collector).collect();
    if collectors.is_empty() {
        collectors = types.iter().flat_map(|t| banner(*t)).copied().collect();
    }
    if collectors.is_empty() {
        return CollectorVerdict::Unknown;
    }

    let mut young = BTreeSet::new();
    let mut old = BTreeSet::new();
    let mut whole = BTreeSet::new();
    for collector in collectors {
        match collector.generation() {
            Generation::Young => young.insert(collector),
            Generation::Old => old.insert(collector),
            Generation::Whole => whole.insert(collector),
        };
    }

    if let Some(&single) = whole.first() {
        if whole.len() > 1 || !young.is_empty() || !old.is_empty() {
            return CollectorVerdict::Invalid;
        }
        return CollectorVerdict::Known {
            young: Some(single),
            old: Some(single),
        };
    }

    if young.len() > 1 || old.len() > 1 {
        return CollectorVerdict::Invalid;
    }
    let young = young.first().copied();
    let old = old.first().copied();
    if let (Some(y), Some(o)) = (young, old) {
        if !compatible(y, o) {
            return CollectorVerdict::Invalid;
        }
    }
    CollectorVerdict::Known { young, old }
}

fn compatible(young: Collector, old: Collector) -> bool {
    matches!(
        (young, old),
        (Collector::SerialNew, Collector::SerialOld)
            | (Collector::SerialNew, Collector::Cms)
            | (Collector::ParNew, Collector::Cms)
            | (Collector::ParNew, Collector::SerialOld)
            | (Collector::ParallelScavenge, Collector::ParallelOld)
            | (Collector::ParallelScavenge, Collector::SerialOld)
    )
}

fn banner(event_type: EventType) -> &'static [Collector] {
    match event_type {
        EventType::UsingSerial => &[Collector::SerialNew, Collector::SerialOld],
        EventType::UsingParallel => &[Collector::ParallelScavenge, Collector::ParallelOld],
        EventType::UsingCms => &[Collector::ParNew, Collector::Cms],
        EventType::UsingG1 => &[Collector::G1],
        EventType::UsingShenandoah => &[Collector::Shenandoah],
        EventType::UsingZ => &[Collector::Z],
        EventType::UsingEpsilon => &[Collector::Epsilon],
        _ => &[],
    }
}
