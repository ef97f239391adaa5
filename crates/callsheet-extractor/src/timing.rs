//! Call timing helpers

use chrono::{DateTime, SecondsFormat};
use serde_json::Value;

/// Join start and end with `" - "`, or return whichever side is present
pub fn join_timing(start: &str, end: &str) -> String {
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{} - {}", start, end),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

/// Unit of a raw epoch timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochUnit {
    /// Seconds since the Unix epoch
    Seconds,
    /// Milliseconds since the Unix epoch
    Milliseconds,
    /// Nanoseconds since the Unix epoch
    Nanoseconds,
}

impl EpochUnit {
    fn nanos_per_unit(self) -> f64 {
        match self {
            EpochUnit::Seconds => 1e9,
            EpochUnit::Milliseconds => 1e6,
            EpochUnit::Nanoseconds => 1.0,
        }
    }
}

/// Guess the unit of an epoch timestamp from its magnitude
pub fn detect_unit(raw: f64) -> EpochUnit {
    if raw > 1e14 {
        EpochUnit::Nanoseconds
    } else if raw > 1e11 {
        EpochUnit::Milliseconds
    } else {
        EpochUnit::Seconds
    }
}

/// Render a numeric timestamp (JSON number or all-digit string) as RFC 3339 UTC
///
/// Returns `None` for anything that is not a plain epoch number or falls
/// outside the representable date range.
///
/// # Examples
///
/// ```
/// use callsheet_extractor::format_epoch;
/// use serde_json::json;
///
/// assert_eq!(format_epoch(&json!(1700000000)).as_deref(), Some("2023-11-14T22:13:20Z"));
/// assert_eq!(format_epoch(&json!("1700000000000")).as_deref(), Some("2023-11-14T22:13:20Z"));
/// assert_eq!(format_epoch(&json!("10:00")), None);
/// ```
pub fn format_epoch(value: &Value) -> Option<String> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse::<f64>().ok()?
        }
        _ => return None,
    };

    let nanos = raw * detect_unit(raw).nanos_per_unit();
    if !nanos.is_finite() {
        return None;
    }

    let nanos = nanos as i128;
    let secs = i64::try_from(nanos.div_euclid(1_000_000_000)).ok()?;
    let subsec = nanos.rem_euclid(1_000_000_000) as u32;

    DateTime::from_timestamp(secs, subsec).map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_join_both_sides() {
        assert_eq!(join_timing("10:00", "11:00"), "10:00 - 11:00");
    }

    #[test]
    fn test_join_one_side() {
        assert_eq!(join_timing("10:00", ""), "10:00");
        assert_eq!(join_timing("", "11:00"), "11:00");
    }

    #[test]
    fn test_join_neither_side() {
        assert_eq!(join_timing("", ""), "");
    }

    #[test]
    fn test_unit_thresholds() {
        assert_eq!(detect_unit(1_700_000_000.0), EpochUnit::Seconds);
        assert_eq!(detect_unit(1e11), EpochUnit::Seconds);
        assert_eq!(detect_unit(1_700_000_000_000.0), EpochUnit::Milliseconds);
        assert_eq!(detect_unit(1e14), EpochUnit::Milliseconds);
        assert_eq!(detect_unit(1_700_000_000_000_000_000.0), EpochUnit::Nanoseconds);
    }

    #[test]
    fn test_format_each_unit() {
        let expected = Some("2023-11-14T22:13:20Z".to_string());
        assert_eq!(format_epoch(&json!(1_700_000_000u64)), expected);
        assert_eq!(format_epoch(&json!(1_700_000_000_000u64)), expected);
        assert_eq!(format_epoch(&json!(1_700_000_000_000_000_000u64)), expected);
    }

    #[test]
    fn test_format_rejects_non_numeric() {
        assert_eq!(format_epoch(&json!("2023-11-14 10:00")), None);
        assert_eq!(format_epoch(&json!("")), None);
        assert_eq!(format_epoch(&json!(null)), None);
        assert_eq!(format_epoch(&json!({"value": 1})), None);
    }
}
