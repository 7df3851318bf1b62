//! JVM banners: version, command line, memory, collector selection.

use crate::parser::patterns::{grammar, unified, END};
use crate::parser::traits::{EventType, Grammar};

pub(crate) fn grammars() -> Vec<Box<dyn Grammar>> {
    let unified = unified();
    let using = |name: &str| -> String { [unified.as_str(), "(?:Using|Initializing) ", name, END].concat() };

    vec![
        // Warnings share the version banner prefix, so they go first.
        grammar(
            EventType::VmWarning,
            &[r"^(?:OpenJDK|Java HotSpot\(TM\)) .*VM warning: (?P<text>.+)", END],
        ),
        grammar(
            EventType::HeaderVersion,
            &[r"^(?P<text>(?:OpenJDK|Java HotSpot\(TM\)) .*VM \(.+)", END],
        ),
        grammar(EventType::HeaderVersion, &[&unified, r"Version: (?P<text>.+)", END]),
        grammar(EventType::HeaderCommandLineFlags, &[r"^CommandLine flags: (?P<text>.+)", END]),
        grammar(EventType::HeaderMemory, &[r"^Memory: (?P<text>.+)", END]),
        grammar(EventType::HeaderMemory, &[&unified, r"Memory: (?P<text>.+)", END]),
        grammar(
            EventType::LogFile,
            &[
                r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} (?P<text>GC log file (?:created|has reached the maximum size).*)",
                END,
            ],
        ),
        grammar(EventType::UsingSerial, &[&using("Serial")]),
        grammar(EventType::UsingParallel, &[&using("Parallel")]),
        grammar(EventType::UsingCms, &[&using("Concurrent Mark Sweep")]),
        grammar(EventType::UsingG1, &[&using("G1")]),
        grammar(EventType::UsingShenandoah, &[&using("Shenandoah")]),
        grammar(EventType::UsingZ, &[&using("(?:The )?Z(?: Garbage Collector)?")]),
        grammar(EventType::UsingEpsilon, &[&using("Epsilon")]),
    ]
}
