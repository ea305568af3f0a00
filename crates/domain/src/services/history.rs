//! Historical heart rate aggregation.
//!
//! Raw readings are grouped into whole-minute buckets for charting.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use shared::numeric::{round_half_up, truncate_to_minute};

use crate::models::{HeartRateHistoryPoint, HeartRateReading, HistorySummary};

#[derive(Default)]
struct Bucket {
    heart_rate_sum: i64,
    signal_quality_sum: f64,
    count: usize,
}

/// Groups readings by minute and averages each bucket.
///
/// Heart rate and signal quality means are rounded to the nearest integer;
/// a reading without signal quality contributes 0 to the quality mean.
/// The result is sorted ascending by bucket start regardless of input order.
pub fn aggregate_by_minute(readings: &[HeartRateReading]) -> Vec<HeartRateHistoryPoint> {
    let mut buckets: BTreeMap<DateTime<Utc>, Bucket> = BTreeMap::new();

    for reading in readings {
        let bucket = buckets
            .entry(truncate_to_minute(reading.timestamp))
            .or_default();
        bucket.heart_rate_sum += i64::from(reading.heart_rate);
        bucket.signal_quality_sum += reading.signal_quality.unwrap_or(0.0);
        bucket.count += 1;
    }

    buckets
        .into_iter()
        .map(|(timestamp, bucket)| {
            let count = bucket.count as f64;
            HeartRateHistoryPoint {
                timestamp,
                heart_rate: round_half_up(bucket.heart_rate_sum as f64 / count) as i64,
                signal_quality: round_half_up(bucket.signal_quality_sum / count) as i64,
                count: bucket.count,
            }
        })
        .collect()
}

/// Summarizes an ascending history series. Returns `None` for an empty series.
pub fn summarize(points: &[HeartRateHistoryPoint]) -> Option<HistorySummary> {
    let first = points.first()?;
    let last = points.last()?;

    let total: i64 = points.iter().map(|p| p.heart_rate).sum();
    let min_heart_rate = points.iter().map(|p| p.heart_rate).min()?;
    let max_heart_rate = points.iter().map(|p| p.heart_rate).max()?;
    let span_ms = (last.timestamp - first.timestamp).num_milliseconds() as f64;

    Some(HistorySummary {
        average_heart_rate: round_half_up(total as f64 / points.len() as f64) as i64,
        min_heart_rate,
        max_heart_rate,
        duration_minutes: round_half_up(span_ms / 60_000.0) as i64,
        points: points.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use uuid::Uuid;

    fn reading_at(h: u32, m: u32, s: u32, heart_rate: i32, quality: Option<f64>) -> HeartRateReading {
        HeartRateReading {
            id: Uuid::new_v4(),
            patient_id: None,
            heart_rate,
            signal_quality: quality,
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, h, m, s).unwrap(),
        }
    }

    fn minute(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, h, m, 0).unwrap()
    }

    #[test]
    fn test_empty_input_yields_empty_series() {
        assert!(aggregate_by_minute(&[]).is_empty());
    }

    #[test]
    fn test_buckets_by_minute_ascending() {
        // Store order: most recent first
        let readings = vec![
            reading_at(10, 1, 10, 90, Some(95.0)),
            reading_at(10, 0, 45, 80, Some(90.0)),
            reading_at(10, 0, 5, 70, Some(88.0)),
        ];

        let points = aggregate_by_minute(&readings);

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].timestamp, minute(10, 0));
        assert_eq!(points[0].heart_rate, 75);
        assert_eq!(points[0].count, 2);
        assert_eq!(points[0].signal_quality, 89);
        assert_eq!(points[1].timestamp, minute(10, 1));
        assert_eq!(points[1].heart_rate, 90);
        assert_eq!(points[1].count, 1);
    }

    #[test]
    fn test_missing_signal_quality_counts_as_zero() {
        let readings = vec![
            reading_at(9, 30, 1, 60, Some(90.0)),
            reading_at(9, 30, 2, 62, None),
        ];
        let points = aggregate_by_minute(&readings);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].signal_quality, 45);
        assert_eq!(points[0].heart_rate, 61);
    }

    #[test]
    fn test_half_values_round_up() {
        let readings = vec![
            reading_at(8, 0, 1, 71, Some(90.0)),
            reading_at(8, 0, 2, 72, Some(91.0)),
        ];
        let points = aggregate_by_minute(&readings);
        assert_eq!(points[0].heart_rate, 72);
        assert_eq!(points[0].signal_quality, 91);
    }

    #[test]
    fn test_sub_second_timestamps_share_bucket() {
        let base = Utc.with_ymd_and_hms(2024, 3, 1, 12, 5, 59).unwrap();
        let mut late = reading_at(12, 5, 59, 100, None);
        late.timestamp = base + chrono::Duration::milliseconds(999);
        let early = reading_at(12, 5, 0, 80, None);

        let points = aggregate_by_minute(&[late, early]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].count, 2);
        assert_eq!(points[0].heart_rate, 90);
    }

    #[test]
    fn test_summarize() {
        let points = vec![
            HeartRateHistoryPoint {
                timestamp: minute(10, 0),
                heart_rate: 75,
                signal_quality: 90,
                count: 2,
            },
            HeartRateHistoryPoint {
                timestamp: minute(10, 1),
                heart_rate: 90,
                signal_quality: 95,
                count: 1,
            },
            HeartRateHistoryPoint {
                timestamp: minute(10, 12),
                heart_rate: 66,
                signal_quality: 93,
                count: 4,
            },
        ];

        let summary = summarize(&points).unwrap();
        assert_eq!(summary.average_heart_rate, 77);
        assert_eq!(summary.min_heart_rate, 66);
        assert_eq!(summary.max_heart_rate, 90);
        assert_eq!(summary.duration_minutes, 12);
        assert_eq!(summary.points, 3);
    }

    #[test]
    fn test_summarize_empty() {
        assert!(summarize(&[]).is_none());
    }
}
