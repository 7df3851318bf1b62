/// GC log line classification and field extraction
///
/// Turns one canonical (already preprocessed) log line into an `EventType`
/// plus the raw text tokens of its fields.
///
/// # Architecture
///
/// - `traits.rs`: `Grammar` trait implemented by every line layout
/// - `model.rs`: `EventType`, `RawFields`, `ParseError`
/// - `patterns.rs`: shared regex fragments and `PatternGrammar`
/// - `formats/`: grammar tables per collector family
/// - `registry.rs`: priority-ordered grammar table, built once
///
/// # Guarantees
///
/// - `classify` is total: blank input is `Blank`, anything unmatched is `Unknown`
/// - Surrounding whitespace and runs of inner spaces never affect matching
/// - Extraction borrows from the input line, no allocation per token

pub mod traits;
pub mod model;
pub mod patterns;
pub mod formats;
pub mod registry;

// Re-export commonly used types
pub use model::{Collector, EventType, Generation, ParseError, RawFields, RawRegion};
pub use registry::{classify, extract, normalize, registry, GrammarRegistry};
pub use traits::Grammar;

// Constants
pub const MAX_LINE_SIZE: usize = 1_048_576; // 1MB
pub const MAX_RECORD_LINES: usize = 500;
