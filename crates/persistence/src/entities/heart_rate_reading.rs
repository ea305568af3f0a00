//! Heart rate reading entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the heart_rate_readings table.
#[derive(Debug, Clone, FromRow)]
pub struct HeartRateReadingEntity {
    pub id: Uuid,
    pub patient_id: Option<Uuid>,
    pub heart_rate: i32,
    pub signal_quality: Option<f64>,
    pub timestamp: DateTime<Utc>,
}

impl From<HeartRateReadingEntity> for domain::models::HeartRateReading {
    fn from(entity: HeartRateReadingEntity) -> Self {
        Self {
            id: entity.id,
            patient_id: entity.patient_id,
            heart_rate: entity.heart_rate,
            signal_quality: entity.signal_quality,
            timestamp: entity.timestamp,
        }
    }
}
