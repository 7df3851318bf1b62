use crate::parser::patterns::{
    grammar, legacy, legacy_duration, legacy_perm, legacy_times, region, trigger, unified, unified_duration,
    unified_metaspace, unified_times, END, SIZE,
};
use crate::parser::traits::{EventType, Grammar};

const FAILURE: &str = r"(?: \((?P<failure>to-space exhausted|to-space overflow)\))?";

/// Garbage First, legacy (`-XX:+PrintGCDetails`) and unified layouts.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let mut grammars = legacy_grammars();
    grammars.extend(unified_grammars());
    grammars
}

fn legacy_grammars() -> Vec<Box<dyn Grammar>> {
    let (legacy, trigger) = (legacy(), trigger());
    let combined = region("combined");
    let (duration, times, perm) = (legacy_duration(), legacy_times(), legacy_perm());
    let details = [
        r" \[Eden: ",
        region("young").as_str(),
        r" Survivors: ",
        SIZE,
        "->",
        SIZE,
        r" Heap: ",
        combined.as_str(),
        r"\]",
    ]
    .concat();

    let mut grammars = Vec::new();
    for (event_type, kind) in [
        (EventType::G1YoungInitialMark, r"\(young\) \(initial-mark\)"),
        (EventType::G1YoungPause, r"\(young\)"),
        (EventType::G1MixedPause, r"\(mixed\)"),
    ] {
        let head = [legacy.as_str(), r"\[GC pause(?: ", trigger.as_str(), r")? ", kind, FAILURE].concat();
        // -verbose:gc only: sizes inline.
        grammars.push(grammar(
            event_type,
            &[&head, " ", &combined, r", ", &duration, r"\]", &times, END],
        ));
        // -XX:+PrintGCDetails: sizes in the merged `[Eden: ...]` block.
        grammars.push(grammar(
            event_type,
            &[&head, r", ", &duration, r"\](?:", &details, r")?(?:, ", &perm, r")?", &times, END],
        ));
    }

    grammars.push(grammar(
        EventType::G1Remark,
        &[&legacy, r"\[GC remark.*, ", &duration, r"\]", &times, END],
    ));
    grammars.push(grammar(
        EventType::G1Cleanup,
        &[&legacy, r"\[GC cleanup(?: ", &combined, r")?, ", &duration, r"\]", &times, END],
    ));
    // Without the detail block a G1 full collection is indistinguishable from
    // any other verbose full collection.
    grammars.push(grammar(
        EventType::G1FullGc,
        &[
            &legacy, r"\[Full GC(?: ", &trigger, r")? +", SIZE, "->", SIZE, r"\(", SIZE, r"\), ", &duration, r"\]",
            &details, r"(?:, ", &perm, r")?", &times, END,
        ],
    ));
    grammars.push(grammar(EventType::G1Concurrent, &[&legacy, r"\[GC concurrent-[a-z-]+.*"]));
    grammars
}

fn unified_grammars() -> Vec<Box<dyn Grammar>> {
    let (unified, trigger) = (unified(), trigger());
    let g1_trigger = r"\((?P<trigger>G1 [A-Za-z ]+)\)";
    let tail = [
        r" +(?:(?P<failure>To-space exhausted) +)?",
        unified_metaspace().as_str(),
        region("combined").as_str(),
        " +",
        unified_duration().as_str(),
        unified_times().as_str(),
        END,
    ]
    .concat();

    let heads: [(EventType, String); 9] = [
        (EventType::UnifiedG1YoungPause, [r"Pause Young \(Normal\) ", trigger.as_str()].concat()),
        (EventType::UnifiedG1YoungPause, [r"Pause Young ", g1_trigger].concat()),
        (EventType::UnifiedG1MixedPause, [r"Pause Young \(Mixed\) ", trigger.as_str()].concat()),
        (EventType::UnifiedG1MixedPause, [r"Pause Mixed ", trigger.as_str()].concat()),
        (EventType::UnifiedG1YoungInitialMark, [r"Pause Young \(Concurrent Start\) ", trigger.as_str()].concat()),
        (EventType::UnifiedG1YoungInitialMark, [r"Pause Initial Mark ", trigger.as_str()].concat()),
        (EventType::UnifiedG1YoungPrepareMixed, [r"Pause Young \(Prepare Mixed\) ", trigger.as_str()].concat()),
        (EventType::UnifiedG1FullGc, [r"Pause Full ", g1_trigger].concat()),
        (EventType::UnifiedG1Cleanup, r"Pause Cleanup".to_string()),
    ];

    heads
        .iter()
        .map(|(event_type, head)| grammar(*event_type, &[&unified, head, &tail]))
        .collect()
}
