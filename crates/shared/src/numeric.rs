//! Rounding and time helpers shared by simulators and aggregations.

use chrono::{DateTime, DurationRound, TimeDelta, Utc};

/// Rounds to the nearest integer, halves rounding towards positive infinity.
///
/// Sensor dashboards historically used this convention; `f64::round` rounds
/// halves away from zero, which differs for negative values.
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Rounds to a fixed number of decimal places (half up).
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    round_half_up(value * factor) / factor
}

/// Truncates a timestamp to the start of its minute.
pub fn truncate_to_minute(timestamp: DateTime<Utc>) -> DateTime<Utc> {
    timestamp
        .duration_trunc(TimeDelta::minutes(1))
        .unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(74.5), 75.0);
        assert_eq!(round_half_up(74.4), 74.0);
        assert_eq!(round_half_up(-0.5), 0.0);
        assert_eq!(round_half_up(-1.6), -2.0);
    }

    #[test]
    fn test_round_to_decimals() {
        assert_eq!(round_to(9.8765, 2), 9.88);
        assert_eq!(round_to(36.54, 1), 36.5);
        assert_eq!(round_to(0.12345, 3), 0.123);
    }

    #[test]
    fn test_truncate_to_minute() {
        let ts = Utc
            .with_ymd_and_hms(2024, 3, 1, 10, 0, 45)
            .unwrap()
            .checked_add_signed(TimeDelta::milliseconds(250))
            .unwrap();
        let truncated = truncate_to_minute(ts);
        assert_eq!(truncated, Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap());
    }
}
