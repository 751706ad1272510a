//! Human-friendly duration strings ("24h", "15d", "30m", "60s").

use chrono::Duration;
use thiserror::Error;

/// Error returned when a duration string cannot be parsed.
#[derive(Debug, Error)]
#[error("invalid duration '{input}': expected a number with an optional s/m/h/d suffix")]
pub struct DurationParseError {
    pub input: String,
}

/// Parse a duration string like "24h", "7d", "30m" or "60s".
///
/// A bare number is interpreted as hours.
pub fn parse_duration(s: &str) -> Result<Duration, DurationParseError> {
    let normalized = s.trim().to_lowercase();
    let err = || DurationParseError {
        input: s.to_string(),
    };

    let (number, unit): (&str, fn(i64) -> Option<Duration>) =
        if let Some(days) = normalized.strip_suffix('d') {
            (days, Duration::try_days)
        } else if let Some(hours) = normalized.strip_suffix('h') {
            (hours, Duration::try_hours)
        } else if let Some(minutes) = normalized.strip_suffix('m') {
            (minutes, Duration::try_minutes)
        } else if let Some(seconds) = normalized.strip_suffix('s') {
            (seconds, Duration::try_seconds)
        } else {
            (normalized.as_str(), Duration::try_hours)
        };

    let value: i64 = number.trim().parse().map_err(|_| err())?;
    unit(value).ok_or_else(err)
}
