pub use super::model::{EventType, ParseError, RawFields, RawRegion};

pub trait Grammar: Send + Sync {
    /// Tag assigned to lines this grammar accepts.
    fn event_type(&self) -> EventType;

    /// `line` has trailing whitespace already trimmed.
    fn matches(&self, line: &str) -> bool;

    /// Pull raw tokens out of a line. `None` when the line does not match.
    fn extract<'a>(&self, line: &'a str) -> Option<RawFields<'a>>;
}
