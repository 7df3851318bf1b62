use tracing::trace;

use super::model::{CpuTimes, Event, MemoryRegion, Trigger};
use crate::parser::{normalize, registry, EventType, GrammarRegistry, ParseError, RawFields, RawRegion};
use crate::units::{self, UnitError, DEFAULT_EPOCH_MILLIS};

/// Turns canonical lines into [`Event`]s.
///
/// Classification and extraction go through the shared grammar registry;
/// the builder only converts units and anchors timestamps to the start of
/// the event. It keeps no state between lines.
pub struct EventBuilder {
    registry: &'static GrammarRegistry,
    /// Unix milliseconds that date-only timestamps are measured from.
    epoch_millis: i64,
}

impl EventBuilder {
    /// Date-only timestamps count from [`DEFAULT_EPOCH_MILLIS`], UTC.
    pub fn new() -> Self {
        Self {
            registry: registry(),
            epoch_millis: DEFAULT_EPOCH_MILLIS,
        }
    }

    pub fn with_epoch(epoch_millis: i64) -> Self {
        Self {
            registry: registry(),
            epoch_millis,
        }
    }

    pub fn build(&self, line: &str) -> Result<Event, ParseError> {
        let line = line.trim_end();
        let normalized = normalize(line);
        let event_type = self.registry.classify(&normalized);
        let raw = self
            .registry
            .extract(event_type, &normalized)
            .map_err(|_| ParseError::MalformedEvent {
                event_type,
                line: line.to_string(),
            })?;
        trace!(%event_type, "building event");

        self.assemble(event_type, line, &raw).map_err(|err| {
            trace!(%event_type, error = %err, "bad token");
            ParseError::MalformedEvent {
                event_type,
                line: line.to_string(),
            }
        })
    }

    fn assemble(&self, event_type: EventType, line: &str, raw: &RawFields<'_>) -> Result<Event, UnitError> {
        let mut event = Event::new(event_type, line);

        event.duration = raw.duration.map(units::duration_us).transpose()?;
        event.timestamp = self.timestamp(raw, event.duration)?;

        if event_type.is_blocking() && (event.timestamp.is_none() || event.duration.is_none()) {
            return Err(UnitError::InvalidTimestamp(line.to_string()));
        }

        event.young = region(raw.young)?;
        event.old = region(raw.old)?;
        event.combined = region(raw.combined)?;
        event.permanent = region(raw.permanent)?;
        event.humongous = region(raw.humongous)?;

        event.trigger = raw.failure.or(raw.trigger).map(Trigger::from_text);

        if let (Some(user), Some(sys), Some(real)) = (raw.user, raw.sys, raw.real) {
            event.cpu = Some(CpuTimes {
                user: units::centis(user)?,
                sys: units::centis(sys)?,
                real: units::centis(real)?,
            });
        }

        event.text = raw.text.map(str::to_string);
        Ok(event)
    }

    /// Start of the event in milliseconds since JVM start.
    ///
    /// Unified decorations record when the line was written, which for a
    /// pause summary is its end; those are moved back by the duration unless
    /// the line is tagged `gc,start`. Legacy prefixes are written at the start.
    fn timestamp(&self, raw: &RawFields<'_>, duration: Option<u64>) -> Result<Option<u64>, UnitError> {
        if let Some(decoration) = raw.decoration {
            let time = units::decoration_time(decoration);
            let at = time
                .uptime_ms
                .or_else(|| time.datestamp_millis.map(|ms| units::millis_since(self.epoch_millis, ms)));
            return Ok(match (at, duration) {
                (Some(end), Some(duration)) if !time.start_anchored => Some(units::pause_start_ms(end, duration)),
                (at, _) => at,
            });
        }

        if let Some(uptime) = raw.uptime {
            return units::uptime_ms(uptime).map(Some);
        }

        match raw.datestamp {
            Some(datestamp) => {
                let ms = units::datestamp_millis(datestamp)?;
                Ok(Some(units::millis_since(self.epoch_millis, ms)))
            }
            None => Ok(None),
        }
    }
}

impl Default for EventBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn region(raw: Option<RawRegion<'_>>) -> Result<Option<MemoryRegion>, UnitError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let occupancy_end = units::size_kb(raw.end)?;
    let occupancy_init = match raw.begin {
        Some(begin) => units::size_kb(begin)?,
        None => occupancy_end,
    };
    Ok(Some(MemoryRegion::new(occupancy_init, occupancy_end, units::size_kb(raw.space)?)))
}

/// Build one event with the default epoch.
pub fn build_event(line: &str) -> Result<Event, ParseError> {
    EventBuilder::new().build(line)
}
