//! Patient entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the patients table.
#[derive(Debug, Clone, FromRow)]
pub struct PatientEntity {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PatientEntity> for domain::models::Patient {
    fn from(entity: PatientEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            age: entity.age,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}
