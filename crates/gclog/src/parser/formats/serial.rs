use crate::parser::patterns::{
    grammar, inner, legacy, legacy_duration, legacy_perm, legacy_times, region, trigger, unified,
    unified_duration, unified_metaspace, unified_times, DECIMAL, END,
};
use crate::parser::traits::{EventType, Grammar};

/// Serial collector: `DefNew` young, `Tenured` old.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let (legacy, inner, trigger) = (legacy(), inner(), trigger());
    let (young, old, combined) = (region("young"), region("old"), region("combined"));
    let (duration, times, perm) = (legacy_duration(), legacy_times(), legacy_perm());
    let tenured = [r"\[Tenured: ", old.as_str(), r", ", DECIMAL, r" secs\] "].concat();
    let tail = [r"(?:, ", perm.as_str(), r")?, ", duration.as_str(), r"\]", times.as_str(), END].concat();

    let unified = unified();
    let (u_meta, u_duration, u_times) = (unified_metaspace(), unified_duration(), unified_times());

    vec![
        grammar(
            EventType::SerialNew,
            &[
                &legacy, r"\[GC(?: ", &trigger, r")? ", &inner, r"\[DefNew: ", &young, r", ", DECIMAL,
                r" secs\] ", &combined, r", ", &duration, r"\]", &times, END,
            ],
        ),
        // Young collection that failed promotion and fell through to Tenured.
        grammar(
            EventType::SerialOld,
            &[
                &legacy, r"\[GC(?: ", &trigger, r")? ", &inner,
                r"\[DefNew(?: \((?P<failure>promotion failed)\))? ?: ", &young, r", ", DECIMAL, r" secs\] ?",
                &inner, &tenured, &combined, &tail,
            ],
        ),
        grammar(
            EventType::SerialOld,
            &[&legacy, r"\[Full GC(?: ", &trigger, r")? ", &inner, &tenured, &combined, &tail],
        ),
        grammar(
            EventType::UnifiedSerialNew,
            &[
                &unified, r"Pause Young ", &trigger, r" +DefNew: ", &young, r" +Tenured: ", &old, " +",
                &u_meta, &combined, " +", &u_duration, &u_times, END,
            ],
        ),
        grammar(
            EventType::UnifiedSerialOld,
            &[
                &unified, r"Pause Full ", &trigger, r" +DefNew: ", &young, r" +Tenured: ", &old, " +",
                &u_meta, &combined, " +", &u_duration, &u_times, END,
            ],
        ),
    ]
}
