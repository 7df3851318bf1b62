/// Run analysis
///
/// Turns a finished `JvmRun` into a set of findings.
///
/// # Architecture
///
/// - `catalog.rs`: `Finding` catalog with code, severity and message
/// - `collector.rs`: collector detection from event types
/// - `options.rs`: JVM command line option lookups
/// - `rules.rs`: one pure function per finding, evaluated in catalog order

pub mod catalog;
pub mod collector;
pub mod options;
pub mod rules;

pub use catalog::{Finding, Severity};
pub use collector::{detect as detect_collector, CollectorVerdict};
pub use options::JvmOptions;
pub use rules::{evaluate, Rule, RULES};
