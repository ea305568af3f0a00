//! Patient vitals assessment models.

use serde::{Deserialize, Serialize};

use super::{HeartRateReading, Patient};

/// Overall heart rate status shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Unknown,
    Healthy,
    Elevated,
    Critical,
}

impl HealthStatus {
    /// Human label for the status card.
    pub fn label(&self) -> &'static str {
        match self {
            HealthStatus::Unknown => "Unknown",
            HealthStatus::Healthy => "Healthy",
            HealthStatus::Elevated => "Elevated",
            HealthStatus::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Unknown => write!(f, "unknown"),
            HealthStatus::Healthy => write!(f, "healthy"),
            HealthStatus::Elevated => write!(f, "elevated"),
            HealthStatus::Critical => write!(f, "critical"),
        }
    }
}

/// Age-adjusted heart rate zones, rendered as BPM ranges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateZones {
    pub resting: String,
    pub normal: String,
    pub elevated: String,
    pub danger: String,
}

/// Alert raised when a heart rate leaves the safe band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateAlert {
    pub heart_rate: i32,
    pub message: String,
    pub safe_range: String,
}

/// Response payload for `GET /api/patients/:id/vitals`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientVitals {
    pub patient: Patient,
    pub latest_heart_rate: Option<HeartRateReading>,
    pub status: HealthStatus,
    pub status_label: String,
    pub zones: HeartRateZones,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert: Option<HeartRateAlert>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_status_display() {
        assert_eq!(HealthStatus::Critical.to_string(), "critical");
        assert_eq!(HealthStatus::Healthy.label(), "Healthy");
    }

    #[test]
    fn test_health_status_serialization() {
        let json = serde_json::to_string(&HealthStatus::Elevated).unwrap();
        assert_eq!(json, "\"elevated\"");
    }
}
