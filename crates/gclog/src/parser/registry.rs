use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use super::formats::{cms, g1, header, marker, parallel, safepoint, serial, shenandoah, unified, verbose, zgc};
use super::patterns::compile;
use super::traits::*;

static REGISTRY: Lazy<GrammarRegistry> = Lazy::new(GrammarRegistry::new);

static SPACING: Lazy<Regex> = Lazy::new(|| compile(&[r"[ \t]{2,}|\t"]));

/// Line as the grammars expect it: no surrounding whitespace, single spaces
/// between tokens. Borrows when the line is already in that shape.
pub fn normalize(line: &str) -> Cow<'_, str> {
    SPACING.replace_all(line.trim(), " ")
}

/// Priority-ordered grammar table.
///
/// 1. Blank lines
/// 2. Banners and collector selection
/// 3. Collector families, most specific layouts first (Shenandoah degenerated
///    before anything generic, G1 before generic unified, merged detail
///    layouts before heap-total-only layouts)
/// 4. Collector-agnostic unified and verbose layouts
/// 5. Safepoint and informational lines
/// 6. Unified `gc,*` catch-all
///
/// The first grammar that matches wins. Nothing matching means `Unknown`.
pub struct GrammarRegistry {
    grammars: Vec<Box<dyn Grammar>>,
}

impl GrammarRegistry {
    pub fn new() -> Self {
        let mut grammars: Vec<Box<dyn Grammar>> = Vec::new();
        // Order matters!
        grammars.extend(marker::blank());
        grammars.extend(header::grammars());
        grammars.extend(shenandoah::grammars());
        grammars.extend(zgc::grammars());
        grammars.extend(g1::grammars());
        grammars.extend(cms::grammars());
        grammars.extend(parallel::grammars());
        grammars.extend(serial::grammars());
        grammars.extend(unified::grammars());
        grammars.extend(verbose::grammars());
        grammars.extend(safepoint::grammars());
        grammars.extend(marker::grammars());
        grammars.extend(marker::gc_info()); // Fallback

        Self { grammars }
    }

    /// Tag for a line. Total: every input yields a tag.
    pub fn classify(&self, line: &str) -> EventType {
        self.identify(line)
            .map(|grammar| grammar.event_type())
            .unwrap_or(EventType::Unknown)
    }

    /// First grammar accepting the line.
    pub fn identify(&self, line: &str) -> Option<&dyn Grammar> {
        let line = normalize(line);
        let found = self.grammars.iter().find(|g| g.matches(&line)).map(|g| g.as_ref());
        if found.is_none() {
            trace!(line = %line, "no grammar matched");
        }
        found
    }

    /// Raw tokens of `line` under the grammars registered for `event_type`.
    ///
    /// `Blank` and `Unknown` carry no fields. Any other tag whose grammars
    /// all reject the line is malformed. Tokens borrow from `line`, so runs of
    /// inner spaces must already be collapsed with [`normalize`].
    pub fn extract<'a>(&self, event_type: EventType, line: &'a str) -> Result<RawFields<'a>, ParseError> {
        if matches!(event_type, EventType::Blank | EventType::Unknown) {
            return Ok(RawFields::default());
        }

        let line = line.trim();
        self.grammars
            .iter()
            .filter(|g| g.event_type() == event_type)
            .find_map(|g| g.extract(line))
            .ok_or_else(|| ParseError::MalformedEvent {
                event_type,
                line: line.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Process-wide registry, built on first use.
pub fn registry() -> &'static GrammarRegistry {
    &REGISTRY
}

pub fn classify(line: &str) -> EventType {
    REGISTRY.classify(line)
}

pub fn extract<'a>(event_type: EventType, line: &'a str) -> Result<RawFields<'a>, ParseError> {
    REGISTRY.extract(event_type, line)
}
