//! GPS reading repository for database operations.

use domain::models::NewGpsReading;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::GpsReadingEntity;
use crate::metrics::QueryTimer;

/// Repository for GPS reading database operations.
#[derive(Clone)]
pub struct GpsRepository {
    pool: PgPool,
}

impl GpsRepository {
    /// Creates a new GpsRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent fixes for a patient, newest first.
    pub async fn find_by_patient(
        &self,
        patient_id: Uuid,
        limit: i64,
    ) -> Result<Vec<GpsReadingEntity>, sqlx::Error> {
        let timer = QueryTimer::postgres("find_gps_readings");
        let result = sqlx::query_as::<_, GpsReadingEntity>(
            r#"
            SELECT id, patient_id, latitude, longitude, altitude, accuracy, speed, timestamp
            FROM gps_readings
            WHERE patient_id = $1
            ORDER BY timestamp DESC, seq DESC
            LIMIT $2
            "#,
        )
        .bind(patient_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await;
        timer.record();
        result
    }

    pub async fn insert(&self, input: &NewGpsReading) -> Result<GpsReadingEntity, sqlx::Error> {
        let timer = QueryTimer::postgres("insert_gps_reading");
        let result = sqlx::query_as::<_, GpsReadingEntity>(
            r#"
            INSERT INTO gps_readings (patient_id, latitude, longitude, altitude, accuracy, speed)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, patient_id, latitude, longitude, altitude, accuracy, speed, timestamp
            "#,
        )
        .bind(input.patient_id)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.altitude)
        .bind(input.accuracy)
        .bind(input.speed)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
