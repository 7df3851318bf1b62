use crate::parser::patterns::{grammar, trigger, unified, unified_duration, END, SIZE};
use crate::parser::traits::{EventType, Grammar};

/// Z collector (unified logging only).
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let (unified, duration) = (unified(), unified_duration());

    vec![
        grammar(EventType::ZMarkStart, &[&unified, r"Pause Mark Start +", &duration, END]),
        grammar(EventType::ZMarkEnd, &[&unified, r"Pause Mark End +", &duration, END]),
        grammar(EventType::ZRelocateStart, &[&unified, r"Pause Relocate Start +", &duration, END]),
        // Sizes carry heap percentages rather than capacities, so no region is captured.
        grammar(
            EventType::ZGarbageCollection,
            &[
                &unified, r"Garbage Collection ", &trigger(), " ", SIZE, r"\(\d+%\)->", SIZE, r"\(\d+%\)", END,
            ],
        ),
        grammar(
            EventType::ZConcurrent,
            &[
                &unified,
                r"Concurrent (?:Mark Free|Mark Continue|Mark Roots|Process Non-Strong References",
                r"|Reset Relocation Set|Select Relocation Set|Prepare Relocation Set|Relocate|Remap Roots",
                r"|Destroy Detached Pages)\b.*",
            ],
        ),
        grammar(
            EventType::ZAllocationStall,
            &[&unified, r"Allocation Stall \([^)]+\) +", &duration, END],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use crate::parser::registry::{classify, extract};
    use crate::parser::traits::EventType;

    #[test]
    fn test_z_pauses() {
        let line = "[0.275s][info][gc,phases   ] GC(0) Pause Mark Start 0.015ms";
        assert_eq!(classify(line), EventType::ZMarkStart);
        let raw = extract(EventType::ZMarkStart, line).unwrap();
        assert_eq!(raw.duration, Some("0.015ms"));

        assert_eq!(
            classify("[0.283s][info][gc,phases   ] GC(0) Pause Mark End 0.011ms"),
            EventType::ZMarkEnd
        );
        assert_eq!(
            classify("[0.290s][info][gc,phases   ] GC(0) Pause Relocate Start 0.010ms"),
            EventType::ZRelocateStart
        );
    }

    #[test]
    fn test_z_garbage_collection_summary() {
        let line = "[0.302s][info][gc          ] GC(0) Garbage Collection (Warmup) 878M(9%)->1316M(13%)";
        assert_eq!(classify(line), EventType::ZGarbageCollection);
        let raw = extract(EventType::ZGarbageCollection, line).unwrap();
        assert_eq!(raw.trigger, Some("Warmup"));
        assert!(raw.combined.is_none());
    }

    #[test]
    fn test_z_concurrent_and_stall() {
        assert_eq!(
            classify("[0.290s][info][gc,phases   ] GC(0) Concurrent Select Relocation Set 1.380ms"),
            EventType::ZConcurrent
        );
        let stall = "[7.101s][info][gc          ] Allocation Stall (default-workqueue-1) 12.345ms";
        assert_eq!(classify(stall), EventType::ZAllocationStall);
        assert!(!EventType::ZAllocationStall.is_blocking());
    }
}
