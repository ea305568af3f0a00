//! GPS reading domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored GPS fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GpsReading {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Request body for recording a GPS fix.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGpsReadingRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub speed: Option<f64>,
}

impl CreateGpsReadingRequest {
    pub fn for_patient(self, patient_id: Uuid) -> NewGpsReading {
        NewGpsReading {
            patient_id: Some(patient_id),
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            accuracy: self.accuracy,
            speed: self.speed,
        }
    }
}

/// Validated store input for a GPS fix.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewGpsReading {
    pub patient_id: Option<Uuid>,

    #[validate(custom(function = "shared::validation::validate_latitude"))]
    pub latitude: f64,

    #[validate(custom(function = "shared::validation::validate_longitude"))]
    pub longitude: f64,

    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub altitude: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_accuracy"))]
    pub accuracy: Option<f64>,

    #[validate(custom(function = "shared::validation::validate_speed"))]
    pub speed: Option<f64>,
}

impl NewGpsReading {
    pub fn into_reading(self, id: Uuid, timestamp: DateTime<Utc>) -> GpsReading {
        GpsReading {
            id,
            patient_id: self.patient_id,
            latitude: self.latitude,
            longitude: self.longitude,
            altitude: self.altitude,
            accuracy: self.accuracy,
            speed: self.speed,
            timestamp,
        }
    }
}
