use crate::parser::patterns::{grammar, legacy, unified, DECIMAL, END};
use crate::parser::traits::{EventType, Grammar};

/// `-XX:+PrintGCApplicationStoppedTime` and `-Xlog:safepoint` output.
pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let stopped = [
        r"Total time for which application threads were stopped: (?P<duration>",
        DECIMAL,
        r" seconds)(?:, Stopping threads took: ",
        DECIMAL,
        r" seconds)?",
    ]
    .concat();

    vec![
        grammar(EventType::ApplicationStoppedTime, &[&legacy(), &stopped, END]),
        grammar(EventType::ApplicationStoppedTime, &[&unified(), &stopped, END]),
        grammar(
            EventType::ApplicationStoppedTime,
            &[
                &unified(),
                r#"Safepoint "[^"]+", Time since last: \d+ ns, Reaching safepoint: \d+ ns,"#,
                r"(?: Cleanup: \d+ ns,)? At safepoint: \d+ ns, Total: (?P<duration>\d+ ns)",
                END,
            ],
        ),
    ]
}
