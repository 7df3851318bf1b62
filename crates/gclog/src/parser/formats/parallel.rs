use crate::parser::patterns::{
    grammar, legacy, legacy_duration, legacy_perm, legacy_times, region, trigger, unified, unified_duration,
    unified_metaspace, unified_times, END,
};
use crate::parser::traits::{EventType, Grammar};

/// Parallel collector: `PSYoungGen` young with `ParOldGen` (compacting) or
/// `PSOldGen` (serial) old.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let (legacy, trigger) = (legacy(), trigger());
    let (young, old, combined) = (region("young"), region("old"), region("combined"));
    let (duration, times, perm) = (legacy_duration(), legacy_times(), legacy_perm());
    let full_tail = [
        r"\] ",
        combined.as_str(),
        r"(?:,? ",
        perm.as_str(),
        r")?, ",
        duration.as_str(),
        r"\]",
        times.as_str(),
        END,
    ]
    .concat();

    let unified = unified();
    let (u_meta, u_duration, u_times) = (unified_metaspace(), unified_duration(), unified_times());
    let u_tail = [" +", u_meta.as_str(), combined.as_str(), " +", u_duration.as_str(), u_times.as_str(), END].concat();

    vec![
        grammar(
            EventType::ParallelScavenge,
            &[
                &legacy, r"\[GC(?:--)?(?: ", &trigger, r")?(?:--)? \[PSYoungGen: ", &young, r"\] ", &combined,
                r", ", &duration, r"\]", &times, END,
            ],
        ),
        grammar(
            EventType::ParallelCompactingOld,
            &[
                &legacy, r"\[Full GC(?: ", &trigger, r")? \[PSYoungGen: ", &young, r"\] \[ParOldGen: ", &old,
                &full_tail,
            ],
        ),
        grammar(
            EventType::ParallelSerialOld,
            &[
                &legacy, r"\[Full GC(?: ", &trigger, r")? \[PSYoungGen: ", &young, r"\] \[PSOldGen: ", &old,
                &full_tail,
            ],
        ),
        grammar(
            EventType::UnifiedParallelScavenge,
            &[
                &unified, r"Pause Young ", &trigger, r" +PSYoungGen: ", &young, r" +(?:PSOldGen|ParOldGen): ",
                &old, &u_tail,
            ],
        ),
        grammar(
            EventType::UnifiedParallelCompactingOld,
            &[&unified, r"Pause Full ", &trigger, r" +PSYoungGen: ", &young, r" +ParOldGen: ", &old, &u_tail],
        ),
        grammar(
            EventType::UnifiedParallelSerialOld,
            &[&unified, r"Pause Full ", &trigger, r" +PSYoungGen: ", &young, r" +PSOldGen: ", &old, &u_tail],
        ),
    ]
}
