//! Accelerometer reading entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the accelerometer_readings table.
#[derive(Debug, Clone, FromRow)]
pub struct AccelerometerReadingEntity {
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

impl From<AccelerometerReadingEntity> for domain::models::AccelerometerReading {
    fn from(entity: AccelerometerReadingEntity) -> Self {
        Self {
            id: entity.id,
            patient_id: entity.patient_id,
            accel_x: entity.accel_x,
            accel_y: entity.accel_y,
            accel_z: entity.accel_z,
            gyro_x: entity.gyro_x,
            gyro_y: entity.gyro_y,
            gyro_z: entity.gyro_z,
            temperature: entity.temperature,
            timestamp: entity.timestamp,
        }
    }
}
