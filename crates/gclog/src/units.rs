//! Normalize size, duration, uptime and CPU tokens into the canonical
//! integer units of the event model.
//!
//! - sizes → kilobytes
//! - durations → microseconds
//! - uptimes → milliseconds since JVM start
//! - CPU times → centiseconds
//!
//! Decimal tokens are handled in fixed point so that `0.0210210 secs` is
//! exactly 21021µs. A decimal comma (`0,119`) is accepted wherever a decimal
//! point is.

use chrono::DateTime;
use thiserror::Error;

/// Parallelism reported when real time is zero but user/sys time is not.
pub const PARALLELISM_SENTINEL: u32 = u32::MAX;

/// `-XX:+PrintGCDateStamps` / unified `time` decorator layout.
pub const DATESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%z";

/// Epoch used for date-only timestamps when no file epoch is known
/// (2000-01-01T00:00:00Z, in Unix milliseconds).
///
/// Always UTC midnight, whatever the host's time zone.
pub const DEFAULT_EPOCH_MILLIS: i64 = 946_684_800_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid cpu time: {0}")]
    InvalidCpuTime(String),
}

/// Split a decimal token ("0.0210210", "1,78", "512") into its digits as an
/// integer mantissa plus the number of fractional digits.
fn decimal(token: &str) -> Option<(u128, u32)> {
    let (int, frac) = match token.find(['.', ',']) {
        Some(idx) => (&token[..idx], &token[idx + 1..]),
        None => (token, ""),
    };
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let mantissa: u128 = format!("{}{}", int, frac).parse().ok()?;
    Some((mantissa, u32::try_from(frac.len()).ok()?))
}

/// `token * multiplier`, rounded half-up to an integer.
fn scale(token: &str, multiplier: u64) -> Option<u64> {
    let (mantissa, frac_digits) = decimal(token)?;
    let divisor = 10u128.checked_pow(frac_digits)?;
    let product = mantissa.checked_mul(u128::from(multiplier))?;
    u64::try_from((product + divisor / 2) / divisor).ok()
}

/// Size token to kilobytes: `512K` → 512, `1M` → 1024, `2G` → 2097152,
/// `19.7M` → 20173, `0.0B` → 0.
pub fn size_kb(token: &str) -> Result<u64, UnitError> {
    let token = token.trim();
    let invalid = || UnitError::InvalidSize(token.to_string());

    let unit = token.chars().last().ok_or_else(invalid)?;
    let number = &token[..token.len() - unit.len_utf8()];

    let kb = match unit.to_ascii_uppercase() {
        'B' => scale(number, 1).map(|bytes| (bytes + 512) / 1024),
        'K' => scale(number, 1),
        'M' => scale(number, 1024),
        'G' => scale(number, 1024 * 1024),
        'T' => scale(number, 1024 * 1024 * 1024),
        _ => None,
    };
    kb.ok_or_else(invalid)
}

/// Duration token to microseconds. Accepts the legacy `0.0210210 secs`,
/// unified `1.195ms`, Shenandoah `1285.045 ms`, safepoint
/// `0.0000660 seconds` and bare `s`/`us`/`ns` suffixes.
pub fn duration_us(token: &str) -> Result<u64, UnitError> {
    let token = token.trim();
    let invalid = || UnitError::InvalidDuration(token.to_string());

    let (number, multiplier, divisor) = if let Some(n) = token.strip_suffix("seconds") {
        (n, 1_000_000, 1)
    } else if let Some(n) = token.strip_suffix("secs") {
        (n, 1_000_000, 1)
    } else if let Some(n) = token.strip_suffix("ms") {
        (n, 1_000, 1)
    } else if let Some(n) = token.strip_suffix("us").or_else(|| token.strip_suffix("µs")) {
        (n, 1, 1)
    } else if let Some(n) = token.strip_suffix("ns") {
        (n, 1, 1_000)
    } else if let Some(n) = token.strip_suffix('s') {
        (n, 1_000_000, 1)
    } else {
        return Err(invalid());
    };

    scale(number.trim(), multiplier)
        .map(|v| v / divisor)
        .ok_or_else(invalid)
}

/// Uptime token to milliseconds: `0.231s` → 231, `173690ms` → 173690,
/// `854868.165` (legacy seconds) → 854868165, `1000000ns` → 1.
pub fn uptime_ms(token: &str) -> Result<u64, UnitError> {
    let token = token.trim();
    let invalid = || UnitError::InvalidTimestamp(token.to_string());

    let value = if let Some(n) = token.strip_suffix("ms") {
        scale(n, 1)
    } else if let Some(n) = token.strip_suffix("ns") {
        scale(n, 1).map(|ns| ns / 1_000_000)
    } else if let Some(n) = token.strip_suffix('s') {
        scale(n, 1_000)
    } else {
        scale(token, 1_000)
    };
    value.ok_or_else(invalid)
}

/// Parse a `2020-10-26T14:51:41.413-0400` datestamp into Unix milliseconds.
pub fn datestamp_millis(token: &str) -> Result<i64, UnitError> {
    DateTime::parse_from_str(token.trim(), DATESTAMP_FORMAT)
        .map(|dt| dt.timestamp_millis())
        .map_err(|_| UnitError::InvalidTimestamp(token.to_string()))
}

/// Milliseconds between an epoch and a datestamp (Unix ms), floored at zero.
pub fn millis_since(epoch_millis: i64, datestamp_millis: i64) -> u64 {
    u64::try_from(datestamp_millis.saturating_sub(epoch_millis)).unwrap_or(0)
}

/// CPU time token in seconds (`1.78`, `0.02`, `1.78s`) to centiseconds.
pub fn centis(token: &str) -> Result<u64, UnitError> {
    let token = token.trim();
    let number = token.strip_suffix('s').unwrap_or(token);
    scale(number, 100).ok_or_else(|| UnitError::InvalidCpuTime(token.to_string()))
}

/// Percentage of wall time the collector kept CPUs busy, rounded up.
///
/// `real == 0` yields 100 when no CPU time was spent either, otherwise
/// [`PARALLELISM_SENTINEL`].
pub fn parallelism(user: u64, sys: u64, real: u64) -> u32 {
    let busy = user.saturating_add(sys);
    if real == 0 {
        return if busy == 0 { 100 } else { PARALLELISM_SENTINEL };
    }
    let percent = busy.saturating_mul(100).div_ceil(real);
    u32::try_from(percent).unwrap_or(PARALLELISM_SENTINEL)
}

/// Start of a pause whose text only records when it ended.
pub fn pause_start_ms(end_ms: u64, duration_us: u64) -> u64 {
    end_ms.saturating_mul(1_000).saturating_sub(duration_us) / 1_000
}

/// Times carried by a unified logging decoration block such as
/// `[2020-06-24T18:13:47.695-0700][173690ms]` or `[0.031s][info][gc,start ]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecorationTime {
    pub uptime_ms: Option<u64>,
    pub datestamp_millis: Option<i64>,
    /// Tagged `gc,start`: the time is when the pause began.
    pub start_anchored: bool,
}

pub fn decoration_time(decoration: &str) -> DecorationTime {
    let mut time = DecorationTime::default();

    for piece in decoration.split(']') {
        let piece = piece.trim().trim_start_matches('[').trim();
        if piece.is_empty() {
            continue;
        }
        if looks_like_datestamp(piece) {
            if let Ok(ms) = datestamp_millis(piece) {
                time.datestamp_millis.get_or_insert(ms);
            }
        } else if looks_like_uptime(piece) {
            if let Ok(ms) = uptime_ms(piece) {
                time.uptime_ms.get_or_insert(ms);
            }
        } else if piece.split(',').any(|tag| tag.trim() == "start") {
            time.start_anchored = true;
        }
    }

    time
}

pub(crate) fn looks_like_datestamp(piece: &str) -> bool {
    let bytes = piece.as_bytes();
    bytes.len() >= 28 && bytes[4] == b'-' && bytes[7] == b'-' && bytes[10] == b'T'
}

fn looks_like_uptime(piece: &str) -> bool {
    let number = piece
        .strip_suffix("ms")
        .or_else(|| piece.strip_suffix("ns"))
        .or_else(|| piece.strip_suffix('s'));
    match number {
        Some(n) => !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit() || b == b'.' || b == b','),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Sizes ───────────────────────────────────────────────────

    #[test]
    fn test_size_units() {
        assert_eq!(size_kb("512K").unwrap(), 512);
        assert_eq!(size_kb("1M").unwrap(), 1024);
        assert_eq!(size_kb("2G").unwrap(), 2_097_152);
        assert_eq!(size_kb("0K").unwrap(), 0);
    }

    #[test]
    fn test_size_decimal_and_bytes() {
        assert_eq!(size_kb("19.7M").unwrap(), 20173);
        assert_eq!(size_kb("1024.0K").unwrap(), 1024);
        assert_eq!(size_kb("0.0B").unwrap(), 0);
        assert_eq!(size_kb("2048B").unwrap(), 2);
        assert_eq!(size_kb("1,5M").unwrap(), 1536);
    }

    #[test]
    fn test_size_invalid() {
        assert!(size_kb("").is_err());
        assert!(size_kb("12X").is_err());
        assert!(size_kb("K").is_err());
        assert!(size_kb("1.2.3M").is_err());
    }

    // ── Durations ───────────────────────────────────────────────

    #[test]
    fn test_duration_legacy_secs() {
        assert_eq!(duration_us("0.0210210 secs").unwrap(), 21021);
        assert_eq!(duration_us("2.4749181 secs").unwrap(), 2_474_918);
        assert_eq!(duration_us("0.0000660 seconds").unwrap(), 66);
    }

    #[test]
    fn test_duration_millis() {
        assert_eq!(duration_us("1.195ms").unwrap(), 1195);
        assert_eq!(duration_us("3460.196ms").unwrap(), 3_460_196);
        assert_eq!(duration_us("1285.045 ms").unwrap(), 1_285_045);
    }

    #[test]
    fn test_duration_other_units() {
        assert_eq!(duration_us("5s").unwrap(), 5_000_000);
        assert_eq!(duration_us("12us").unwrap(), 12);
        assert_eq!(duration_us("12000ns").unwrap(), 12);
        assert!(duration_us("12").is_err());
        assert!(duration_us("abc ms").is_err());
    }

    // ── Timestamps ──────────────────────────────────────────────

    #[test]
    fn test_uptime_forms() {
        assert_eq!(uptime_ms("0.231s").unwrap(), 231);
        assert_eq!(uptime_ms("173690ms").unwrap(), 173690);
        assert_eq!(uptime_ms("854868.165").unwrap(), 854_868_165);
        assert_eq!(uptime_ms("0,119").unwrap(), 119);
        assert_eq!(uptime_ms("5000000ns").unwrap(), 5);
    }

    #[test]
    fn test_datestamp_millis_respects_offset() {
        let a = datestamp_millis("2020-10-26T14:51:41.413-0400").unwrap();
        let b = datestamp_millis("2020-10-26T18:51:41.413+0000").unwrap();
        assert_eq!(a, b);
        assert_eq!(millis_since(DEFAULT_EPOCH_MILLIS, a), 657_053_501_413);
    }

    #[test]
    fn test_millis_since_never_negative() {
        assert_eq!(millis_since(1_000, 500), 0);
        assert_eq!(millis_since(1_000, 1_250), 250);
    }

    #[test]
    fn test_pause_start_backward_adjustment() {
        assert_eq!(pause_start_ms(231, 2969), 228);
        assert_eq!(pause_start_ms(173_690, 3_460_196), 170_229);
        assert_eq!(pause_start_ms(1, 5_000), 0);
    }

    #[test]
    fn test_default_epoch_is_utc_midnight() {
        let epoch = DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z").unwrap();
        assert_eq!(DEFAULT_EPOCH_MILLIS, epoch.timestamp_millis());
        let ms = datestamp_millis("2000-01-01T00:00:10.000+0000").unwrap();
        assert_eq!(millis_since(DEFAULT_EPOCH_MILLIS, ms), 10_000);
    }

    #[test]
    fn test_decoration_uptime_and_start_tag() {
        let t = decoration_time("[0.031s][info][gc,start     ]");
        assert_eq!(t.uptime_ms, Some(31));
        assert!(t.start_anchored);
        assert!(t.datestamp_millis.is_none());
    }

    #[test]
    fn test_decoration_datestamp_and_millis() {
        let t = decoration_time("[2020-06-24T18:13:47.695-0700][173690ms]");
        assert_eq!(t.uptime_ms, Some(173690));
        assert!(t.datestamp_millis.is_some());
        assert!(!t.start_anchored);
    }

    #[test]
    fn test_decoration_tags_ending_in_s_are_not_uptime() {
        let t = decoration_time("[69.946s][info][gc,stats     ]");
        assert_eq!(t.uptime_ms, Some(69946));
        assert!(!t.start_anchored);
    }

    // ── CPU ─────────────────────────────────────────────────────

    #[test]
    fn test_centis() {
        assert_eq!(centis("1.78").unwrap(), 178);
        assert_eq!(centis("0.01s").unwrap(), 1);
        assert_eq!(centis("3.46").unwrap(), 346);
    }

    #[test]
    fn test_parallelism() {
        assert_eq!(parallelism(178, 0, 346), 52);
        assert_eq!(parallelism(178, 1, 346), 52);
        assert_eq!(parallelism(0, 0, 0), 100);
        assert_eq!(parallelism(1, 1, 0), PARALLELISM_SENTINEL);
        assert_eq!(parallelism(10, 0, 10), 100);
        assert_eq!(parallelism(2, 0, 5), 40);
    }
}
