//! Minute-bucketed heart rate history models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One minute of aggregated heart rate readings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateHistoryPoint {
    /// Start of the minute.
    pub timestamp: DateTime<Utc>,
    pub heart_rate: i64,
    pub signal_quality: i64,
    pub count: usize,
}

/// Statistics over a history series, as shown above the history chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub average_heart_rate: i64,
    pub min_heart_rate: i64,
    pub max_heart_rate: i64,
    pub duration_minutes: i64,
    pub points: usize,
}
