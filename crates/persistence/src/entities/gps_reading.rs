//! GPS reading entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the gps_readings table.
#[derive(Debug, Clone, FromRow)]
pub struct GpsReadingEntity {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub accuracy: Option<f64>,
    pub speed: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl From<GpsReadingEntity> for domain::models::GpsReading {
    fn from(entity: GpsReadingEntity) -> Self {
        Self {
            id: entity.id,
            patient_id: entity.patient_id,
            latitude: entity.latitude,
            longitude: entity.longitude,
            altitude: entity.altitude,
            accuracy: entity.accuracy,
            speed: entity.speed,
            timestamp: entity.timestamp,
        }
    }
}
