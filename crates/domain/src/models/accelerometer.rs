//! Accelerometer/gyroscope reading domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A stored motion sensor observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccelerometerReading {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub temperature: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

/// Request body for recording a motion sensor observation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccelerometerReadingRequest {
    pub accel_x: f64,
    pub accel_y: f64,
    pub accel_z: f64,
    pub gyro_x: f64,
    pub gyro_y: f64,
    pub gyro_z: f64,
    pub temperature: Option<f64>,
}

impl CreateAccelerometerReadingRequest {
    pub fn for_patient(self, patient_id: Uuid) -> NewAccelerometerReading {
        NewAccelerometerReading {
            patient_id: Some(patient_id),
            accel_x: self.accel_x,
            accel_y: self.accel_y,
            accel_z: self.accel_z,
            gyro_x: self.gyro_x,
            gyro_y: self.gyro_y,
            gyro_z: self.gyro_z,
            temperature: self.temperature,
        }
    }
}

/// Validated store input for a motion sensor observation.
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct NewAccelerometerReading {
    pub patient_id: Option<Uuid>,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub accel_x: f64,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub accel_y: f64,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub accel_z: f64,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub gyro_x: f64,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub gyro_y: f64,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub gyro_z: f64,
    #[validate(custom(function = "shared::validation::validate_finite"))]
    pub temperature: Option<f64>,
}

impl NewAccelerometerReading {
    pub fn into_reading(self, id: Uuid, timestamp: DateTime<Utc>) -> AccelerometerReading {
        AccelerometerReading {
            id,
            patient_id: self.patient_id,
            accel_x: self.accel_x,
            accel_y: self.accel_y,
            accel_z: self.accel_z,
            gyro_x: self.gyro_x,
            gyro_y: self.gyro_y,
            gyro_z: self.gyro_z,
            temperature: self.temperature,
            timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserialize_camel_case() {
        let json = r#"{
            "accelX": 0.12, "accelY": -0.4, "accelZ": 9.79,
            "gyroX": 3.5, "gyroY": -12.0, "gyroZ": 0.0,
            "temperature": 36.6
        }"#;
        let request: CreateAccelerometerReadingRequest = serde_json::from_str(json).unwrap();
        let input = request.for_patient(Uuid::new_v4());
        assert_eq!(input.accel_z, 9.79);
        assert_eq!(input.temperature, Some(36.6));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_request_missing_axis_rejected() {
        let json = r#"{"accelX": 0.1, "accelY": 0.2}"#;
        let result: Result<CreateAccelerometerReadingRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_new_reading_rejects_nan() {
        let input = NewAccelerometerReading {
            patient_id: None,
            accel_x: f64::NAN,
            accel_y: 0.0,
            accel_z: 9.8,
            gyro_x: 0.0,
            gyro_y: 0.0,
            gyro_z: 0.0,
            temperature: None,
        };
        assert!(input.validate().is_err());
    }
}
