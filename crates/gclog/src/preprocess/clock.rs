//! Timestamp normalization.
//!
//! Uptime is authoritative. Lines that carry only a date-time get an uptime
//! inserted, measured from the file epoch: the first date-time seen, moved
//! back by that line's uptime when it has one.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::parser::patterns::{compile, DATESTAMP, UPTIME};
use crate::units;

static LEGACY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    compile(&[r"^(?P<date>", DATESTAMP, r"): (?:(?P<uptime>", UPTIME, r"): )?"])
});

static UNIFIED_PREFIX: Lazy<Regex> = Lazy::new(|| {
    compile(&[r"^\[(?P<date>", DATESTAMP, r")\](?:\[(?P<uptime>\d+(?:[.,]\d+)?(?:s|ms|ns))\])?"])
});

#[derive(Debug, Default)]
pub struct Clock {
    epoch_millis: Option<i64>,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unix milliseconds of JVM start, once known.
    pub fn epoch_millis(&self) -> Option<i64> {
        self.epoch_millis
    }

    pub fn normalize<'a>(&mut self, line: &'a str) -> Cow<'a, str> {
        if let Some(caps) = LEGACY_PREFIX.captures(line) {
            let (Some(date), uptime) = (caps.name("date"), caps.name("uptime")) else {
                return Cow::Borrowed(line);
            };
            let Some(date_ms) = self.observe(date.as_str(), uptime.map(|m| m.as_str())) else {
                return Cow::Borrowed(line);
            };
            if uptime.is_some() {
                return Cow::Borrowed(line);
            }
            let ms = self.since_epoch(date_ms);
            let at = date.end() + 2;
            return Cow::Owned(format!("{}{}.{:03}: {}", &line[..at], ms / 1000, ms % 1000, &line[at..]));
        }

        if let Some(caps) = UNIFIED_PREFIX.captures(line) {
            let (Some(date), uptime) = (caps.name("date"), caps.name("uptime")) else {
                return Cow::Borrowed(line);
            };
            let Some(date_ms) = self.observe(date.as_str(), uptime.map(|m| m.as_str())) else {
                return Cow::Borrowed(line);
            };
            if uptime.is_some() {
                return Cow::Borrowed(line);
            }
            let ms = self.since_epoch(date_ms);
            let at = date.end() + 1;
            return Cow::Owned(format!("{}[{}ms]{}", &line[..at], ms, &line[at..]));
        }

        Cow::Borrowed(line)
    }

    /// Parse the date and fix the epoch on first sight.
    fn observe(&mut self, date: &str, uptime: Option<&str>) -> Option<i64> {
        let date_ms = units::datestamp_millis(date).ok()?;
        if self.epoch_millis.is_none() {
            let offset = uptime
                .and_then(|token| units::uptime_ms(token).ok())
                .and_then(|ms| i64::try_from(ms).ok())
                .unwrap_or(0);
            let epoch = date_ms.saturating_sub(offset);
            debug!(epoch_millis = epoch, "clock: file epoch fixed");
            self.epoch_millis = Some(epoch);
        }
        Some(date_ms)
    }

    fn since_epoch(&self, date_ms: i64) -> u64 {
        units::millis_since(self.epoch_millis.unwrap_or(date_ms), date_ms)
    }
}
