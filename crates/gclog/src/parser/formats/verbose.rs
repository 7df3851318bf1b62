use crate::parser::patterns::{grammar, legacy, legacy_duration, legacy_perm, legacy_times, region, trigger, END};
use crate::parser::traits::{EventType, Grammar};

/// `-verbose:gc` without details: heap totals only, no collector named.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let (legacy, trigger) = (legacy(), trigger());
    let tail = [
        " +",
        region("combined").as_str(),
        r"(?:,? ",
        legacy_perm().as_str(),
        r")?, ",
        legacy_duration().as_str(),
        r"\]",
        legacy_times().as_str(),
        END,
    ]
    .concat();

    vec![
        grammar(EventType::VerboseGcYoung, &[&legacy, r"\[GC(?:--)?(?: ", &trigger, r")?(?:--)?", &tail]),
        grammar(EventType::VerboseGcOld, &[&legacy, r"\[Full GC(?: ", &trigger, r")?", &tail]),
    ]
}
