//! Heart rate reading domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored heart rate observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeartRateReading {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub heart_rate: i32,
    pub signal_quality: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Request body for recording a heart rate reading.
///
/// The patient comes from the request path.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHeartRateReadingRequest {
    pub heart_rate: i32,
    pub signal_quality: Option<f64>,
}

impl CreateHeartRateReadingRequest {
    /// Binds the body to the patient named in the path.
    pub fn for_patient(self, patient_id: Uuid) -> NewHeartRateReading {
        NewHeartRateReading {
            patient_id: Some(patient_id),
            heart_rate: self.heart_rate,
            signal_quality: self.signal_quality,
        }
    }
}

/// Validated store input for a heart rate reading.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewHeartRateReading {
    pub patient_id: Option<Uuid>,

    #[validate(range(min = 1, max = 300, message = "Heart rate must be between 1 and 300"))]
    pub heart_rate: i32,

    #[validate(custom(function = "shared::validation::validate_signal_quality"))]
    pub signal_quality: Option<f64>,
}

impl NewHeartRateReading {
    /// Materializes the reading with a store-assigned id and timestamp.
    pub fn into_reading(self, id: Uuid, timestamp: DateTime<Utc>) -> HeartRateReading {
        HeartRateReading {
            id,
            patient_id: self.patient_id,
            heart_rate: self.heart_rate,
            signal_quality: self.signal_quality,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_reading_valid() {
        let reading = NewHeartRateReading {
            patient_id: Some(Uuid::new_v4()),
            heart_rate: 72,
            signal_quality: Some(93.0),
        };
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_new_reading_without_signal_quality() {
        let reading = NewHeartRateReading {
            patient_id: None,
            heart_rate: 72,
            signal_quality: None,
        };
        assert!(reading.validate().is_ok());
    }

    #[test]
    fn test_new_reading_invalid_heart_rate() {
        let reading = NewHeartRateReading {
            patient_id: None,
            heart_rate: 0,
            signal_quality: None,
        };
        let errors = reading.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("heart_rate"));
    }

    #[test]
    fn test_new_reading_invalid_signal_quality() {
        let reading = NewHeartRateReading {
            patient_id: None,
            heart_rate: 80,
            signal_quality: Some(140.0),
        };
        let errors = reading.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("signal_quality"));
    }

    #[test]
    fn test_request_binds_patient() {
        let patient_id = Uuid::new_v4();
        let json = r#"{"heartRate": 88, "signalQuality": 91.5}"#;
        let request: CreateHeartRateReadingRequest = serde_json::from_str(json).unwrap();
        let input = request.for_patient(patient_id);
        assert_eq!(input.patient_id, Some(patient_id));
        assert_eq!(input.heart_rate, 88);
        assert_eq!(input.signal_quality, Some(91.5));
    }

    #[test]
    fn test_request_rejects_fractional_heart_rate() {
        let json = r#"{"heartRate": 72.5}"#;
        let result: Result<CreateHeartRateReadingRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_into_reading_keeps_fields() {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let reading = NewHeartRateReading {
            patient_id: None,
            heart_rate: 64,
            signal_quality: Some(88.0),
        }
        .into_reading(id, now);
        assert_eq!(reading.id, id);
        assert_eq!(reading.timestamp, now);
        assert_eq!(reading.heart_rate, 64);
    }
}
