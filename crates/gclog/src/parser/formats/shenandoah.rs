//! Shenandoah. The same grammars cover the unified layout and the JDK 8
//! backport's legacy layout (`[Pause ... , 1.234 ms]`).

use crate::parser::patterns::{
    grammar, legacy, region, trigger, unified, unified_tagged, DECIMAL, END,
};
use crate::parser::traits::{EventType, Grammar};

pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let prefix = ["(?:", unified().as_str(), "|", legacy().as_str(), r"\[)"].concat();
    let combined = region("combined");
    let tail = [
        r"(?: ",
        combined.as_str(),
        r")?,? +(?P<duration>",
        DECIMAL,
        r" ?ms)\]?(?: +Metaspace: ",
        region("perm").as_str(),
        r")?",
        END,
    ]
    .concat();
    // Metaspace merged in from its own line lands before the heap totals.
    let merged_tail = [
        r" +Metaspace: ",
        region("perm").as_str(),
        r" +",
        combined.as_str(),
        r" +(?P<duration>",
        DECIMAL,
        r" ?ms)",
        END,
    ]
    .concat();

    let pauses = [
        (EventType::ShenandoahDegeneratedGcMark, r"Pause Degenerated GC \(Mark\)"),
        (EventType::ShenandoahDegeneratedGcOutsideOfCycle, r"Pause Degenerated GC \(Outside of Cycle\)"),
        (EventType::ShenandoahDegeneratedGcEvacuation, r"Pause Degenerated GC \(Evacuation\)"),
        (EventType::ShenandoahDegeneratedGcUpdateRefs, r"Pause Degenerated GC \(Update Refs\)"),
        (EventType::ShenandoahInitMark, r"Pause Init Mark(?: \([a-z ]+\))*"),
        (EventType::ShenandoahFinalMark, r"Pause Final Mark(?: \([a-z ]+\))*"),
        (EventType::ShenandoahInitUpdate, r"Pause Init Update Refs"),
        (EventType::ShenandoahFinalUpdate, r"Pause Final Update Refs"),
        (EventType::ShenandoahFinalEvac, r"Pause Final Evac"),
        (EventType::ShenandoahFinalRoots, r"Pause Final Roots"),
        // Unified full collections carry no cause; that is what separates them
        // from the generic `Pause Full (...)` layout.
        (EventType::ShenandoahFullGc, r"Pause Full"),
    ];

    let mut grammars: Vec<Box<dyn Grammar>> = pauses
        .iter()
        .flat_map(|(event_type, body)| {
            [
                grammar(*event_type, &[&prefix, body, &tail]),
                grammar(*event_type, &[&prefix, body, &merged_tail]),
            ]
        })
        .collect();

    grammars.extend([
        grammar(
            EventType::ShenandoahFullGc,
            &[
                &legacy(), r"\[Pause Full(?: ", &trigger(), r")? ", &combined, r", (?P<duration>", DECIMAL,
                r" ?ms)\]", END,
            ],
        ),
        grammar(EventType::ShenandoahConcurrent, &[&prefix, r"Concurrent [a-z][a-z ]*.*"]),
        grammar(EventType::ShenandoahTrigger, &[&unified(), r"Trigger: .*"]),
        grammar(EventType::ShenandoahTrigger, &[r"^Trigger: .*"]),
        grammar(EventType::ShenandoahCancellingGc, &[&unified(), r"Cancelling GC: .*"]),
        grammar(EventType::ShenandoahCancellingGc, &[r"^Cancelling GC: .*"]),
        grammar(EventType::ShenandoahStats, &[&unified_tagged("gc,stats"), ".*"]),
    ]);
    grammars
}
