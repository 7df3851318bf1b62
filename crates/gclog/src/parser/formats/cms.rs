use crate::parser::patterns::{
    grammar, inner, legacy, legacy_duration, legacy_perm, legacy_times, occupancy, region, trigger, unified,
    unified_duration, unified_metaspace, unified_times, DECIMAL, END,
};
use crate::parser::traits::{EventType, Grammar};

/// Concurrent Mark Sweep: `ParNew` young, `CMS` old.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let (legacy, inner, trigger) = (legacy(), inner(), trigger());
    let (young, old, combined) = (region("young"), region("old"), region("combined"));
    let (duration, times, perm) = (legacy_duration(), legacy_times(), legacy_perm());
    let secs = [r", ", DECIMAL, r" secs\]"].concat();
    let serial_tail = [
        old.as_str(),
        secs.as_str(),
        " ",
        combined.as_str(),
        r"(?:, ",
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

    vec![
        grammar(
            EventType::ParNew,
            &[
                &legacy, r"\[GC(?: ", &trigger, r")? ", &inner, r"\[ParNew: ", &young, &secs, " ", &combined,
                r", ", &duration, r"\]", &times, END,
            ],
        ),
        grammar(
            EventType::CmsSerialOld,
            &[
                &legacy, r"\[GC(?: ", &trigger, r")? ", &inner, r"\[ParNew \((?P<failure>promotion failed)\): ",
                &young, &secs, " ?", &inner, r"\[CMS(?: \(concurrent mode failure\))?: ", &serial_tail,
            ],
        ),
        grammar(
            EventType::CmsSerialOld,
            &[
                &legacy, r"\[(?:Full )?GC(?: ", &trigger, r")? (?:", &inner, r"\[ParNew: ", &young, &secs, " ?)?",
                &inner, r"\[CMS(?: \((?P<failure>concurrent mode failure)\))?: ", &serial_tail,
            ],
        ),
        grammar(
            EventType::CmsInitialMark,
            &[
                &legacy, r"\[GC(?: \((?P<trigger>CMS Initial Mark)\))? \[1 CMS-initial-mark: ", &occupancy("old"),
                r"\] ", &occupancy("combined"), r", ", &duration, r"\]", &times, END,
            ],
        ),
        grammar(
            EventType::CmsRemark,
            &[
                &legacy, r"\[GC(?: \((?P<trigger>CMS Final Remark)\))? \[YG occupancy: .*\[1 CMS-remark: ",
                &occupancy("old"), r"\] ", &occupancy("combined"), r", ", &duration, r"\]", &times, END,
            ],
        ),
        grammar(EventType::CmsConcurrent, &[&legacy, r"\[CMS-concurrent-[a-z-]+.*"]),
        grammar(
            EventType::UnifiedParNew,
            &[
                &unified, r"Pause Young ", &trigger, r" +ParNew: ", &young, r" +CMS: ", &old, " +", &u_meta,
                &combined, " +", &u_duration, &u_times, END,
            ],
        ),
        grammar(
            EventType::UnifiedCmsInitialMark,
            &[&unified, r"Pause Initial Mark +(?:", &combined, " +)?", &u_duration, &u_times, END],
        ),
    ]
}
