use crate::parser::patterns::{
    grammar, region, trigger, unified, unified_duration, unified_metaspace, unified_times, END,
};
use crate::parser::traits::{EventType, Grammar};

/// Collector-agnostic unified layouts, used when no collector detail was
/// logged (`-Xlog:gc` only). Must come after every collector module.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let (unified, trigger) = (unified(), trigger());
    let combined = region("combined");
    let tail = [
        " +",
        unified_metaspace().as_str(),
        combined.as_str(),
        " +",
        unified_duration().as_str(),
        unified_times().as_str(),
        END,
    ]
    .concat();

    vec![
        grammar(EventType::UnifiedYoung, &[&unified, r"Pause Young ", &trigger, &tail]),
        grammar(EventType::UnifiedOld, &[&unified, r"Pause Full ", &trigger, &tail]),
        grammar(
            EventType::UnifiedRemark,
            &[&unified, r"Pause Remark(?: +", &combined, ")? +", &unified_duration(), &unified_times(), END],
        ),
        grammar(EventType::UnifiedConcurrent, &[&unified, r"Concurrent [A-Z][A-Za-z ]*.*"]),
    ]
}
