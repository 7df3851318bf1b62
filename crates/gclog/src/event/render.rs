//! Canonical text for an [`Event`].
//!
//! Pause layouts are written back out from the typed fields: unified
//! `-Xlog:gc` summaries (with collector details when the event has them) and
//! legacy `-XX:+PrintGCDetails` / `-verbose:gc` pauses. Building an event
//! from the rendered line gives back the same type and fields.

use super::model::{CpuTimes, Event, MemoryRegion};
use crate::parser::EventType;

/// Line for `event`, or `None` when its type has no layout here or a field
/// the layout needs is missing.
pub fn render(event: &Event) -> Option<String> {
    match event.event_type {
        EventType::ParallelScavenge
        | EventType::ParallelCompactingOld
        | EventType::ParallelSerialOld
        | EventType::SerialNew
        | EventType::SerialOld
        | EventType::ParNew
        | EventType::VerboseGcYoung
        | EventType::VerboseGcOld => legacy(event),
        _ => unified(event),
    }
}

fn unified(event: &Event) -> Option<String> {
    let young = || event.young.as_ref().map(region);
    let old = || event.old.as_ref().map(region);
    let trigger = || event.trigger.as_ref().map(|trigger| trigger.as_str());
    // Generic layouts must not look like G1 ones.
    let generic = || trigger().filter(|text| !text.starts_with("G1 "));

    let (head, details) = match event.event_type {
        EventType::UnifiedYoung => (format!("Pause Young ({})", generic()?), String::new()),
        EventType::UnifiedOld => (format!("Pause Full ({})", generic()?), String::new()),
        EventType::UnifiedRemark => return unified_remark(event),
        EventType::UnifiedSerialNew => (
            format!("Pause Young ({})", trigger()?),
            format!("DefNew: {} Tenured: {} ", young()?, old()?),
        ),
        EventType::UnifiedSerialOld => (
            format!("Pause Full ({})", trigger()?),
            format!("DefNew: {} Tenured: {} ", young()?, old()?),
        ),
        EventType::UnifiedParallelScavenge => (
            format!("Pause Young ({})", trigger()?),
            format!("PSYoungGen: {} ParOldGen: {} ", young()?, old()?),
        ),
        EventType::UnifiedParallelCompactingOld => (
            format!("Pause Full ({})", trigger()?),
            format!("PSYoungGen: {} ParOldGen: {} ", young()?, old()?),
        ),
        EventType::UnifiedParallelSerialOld => (
            format!("Pause Full ({})", trigger()?),
            format!("PSYoungGen: {} PSOldGen: {} ", young()?, old()?),
        ),
        EventType::UnifiedParNew => (
            format!("Pause Young ({})", trigger()?),
            format!("ParNew: {} CMS: {} ", young()?, old()?),
        ),
        EventType::UnifiedG1YoungPause => (format!("Pause Young (Normal) ({})", trigger()?), String::new()),
        EventType::UnifiedG1MixedPause => (format!("Pause Young (Mixed) ({})", trigger()?), String::new()),
        EventType::UnifiedG1YoungInitialMark => {
            (format!("Pause Young (Concurrent Start) ({})", trigger()?), String::new())
        }
        EventType::UnifiedG1YoungPrepareMixed => {
            (format!("Pause Young (Prepare Mixed) ({})", trigger()?), String::new())
        }
        EventType::UnifiedG1FullGc => (
            format!("Pause Full ({})", trigger().filter(|text| text.starts_with("G1 "))?),
            String::new(),
        ),
        _ => return None,
    };

    let mut line = format!("{} GC(0) {} {}", decoration(event)?, head, details);
    if let Some(perm) = &event.permanent {
        line.push_str(&format!("Metaspace: {} ", region(perm)));
    }
    line.push_str(&format!("{} {}ms", region(event.combined.as_ref()?), millis(event.duration?)));
    line.push_str(&unified_times(event.cpu));
    Some(line)
}

fn unified_remark(event: &Event) -> Option<String> {
    let mut line = format!("{} GC(0) Pause Remark ", decoration(event)?);
    if let Some(combined) = &event.combined {
        line.push_str(&region(combined));
        line.push(' ');
    }
    line.push_str(&format!("{}ms", millis(event.duration?)));
    line.push_str(&unified_times(event.cpu));
    Some(line)
}

/// Summary lines are stamped when the pause ends. Rounding up keeps the
/// start recovered by the builder equal to `timestamp`.
fn decoration(event: &Event) -> Option<String> {
    let end_us = event.timestamp?.saturating_mul(1_000).saturating_add(event.duration?);
    Some(format!("[{}s][info][gc]", uptime(end_us.div_ceil(1_000))))
}

fn unified_times(cpu: Option<CpuTimes>) -> String {
    cpu.map(|cpu| {
        format!(
            " User={}s Sys={}s Real={}s",
            centis(cpu.user),
            centis(cpu.sys),
            centis(cpu.real)
        )
    })
    .unwrap_or_default()
}

fn legacy(event: &Event) -> Option<String> {
    let at = uptime(event.timestamp?);
    let trigger = event
        .trigger
        .as_ref()
        .map(|trigger| format!(" ({})", trigger))
        .unwrap_or_default();
    let combined = region(event.combined.as_ref()?);
    let perm = event
        .permanent
        .as_ref()
        .map(|perm| format!(", [Metaspace: {}]", region(perm)))
        .unwrap_or_default();
    let duration = format!("{} secs", seconds(event.duration?));
    let times = event
        .cpu
        .map(|cpu| {
            format!(
                " [Times: user={} sys={}, real={} secs]",
                centis(cpu.user),
                centis(cpu.sys),
                centis(cpu.real)
            )
        })
        .unwrap_or_default();
    let young = || event.young.as_ref().map(region);
    let old = || event.old.as_ref().map(region);

    let line = match event.event_type {
        EventType::ParallelScavenge => {
            format!("{at}: [GC{trigger} [PSYoungGen: {}] {combined}, {duration}]{times}", young()?)
        }
        EventType::ParallelCompactingOld => format!(
            "{at}: [Full GC{trigger} [PSYoungGen: {}] [ParOldGen: {}] {combined}{perm}, {duration}]{times}",
            young()?,
            old()?
        ),
        EventType::ParallelSerialOld => format!(
            "{at}: [Full GC{trigger} [PSYoungGen: {}] [PSOldGen: {}] {combined}{perm}, {duration}]{times}",
            young()?,
            old()?
        ),
        EventType::SerialNew => format!(
            "{at}: [GC{trigger} {at}: [DefNew: {}, {duration}] {combined}, {duration}]{times}",
            young()?
        ),
        EventType::SerialOld => format!(
            "{at}: [Full GC{trigger} {at}: [Tenured: {}, {duration}] {combined}{perm}, {duration}]{times}",
            old()?
        ),
        EventType::ParNew => format!(
            "{at}: [GC{trigger} {at}: [ParNew: {}, {duration}] {combined}, {duration}]{times}",
            young()?
        ),
        EventType::VerboseGcYoung => format!("{at}: [GC{trigger} {combined}{perm}, {duration}]{times}"),
        EventType::VerboseGcOld => format!("{at}: [Full GC{trigger} {combined}{perm}, {duration}]{times}"),
        _ => return None,
    };
    Some(line)
}

fn region(region: &MemoryRegion) -> String {
    format!("{}K->{}K({}K)", region.occupancy_init, region.occupancy_end, region.space)
}

/// Milliseconds as `seconds.millis`.
fn uptime(ms: u64) -> String {
    format!("{}.{:03}", ms / 1_000, ms % 1_000)
}

/// Microseconds as `millis.micros`.
fn millis(us: u64) -> String {
    format!("{}.{:03}", us / 1_000, us % 1_000)
}

/// Microseconds as `seconds.micros`.
fn seconds(us: u64) -> String {
    format!("{}.{:06}", us / 1_000_000, us % 1_000_000)
}

fn centis(centis: u64) -> String {
    format!("{}.{:02}", centis / 100, centis % 100)
}
