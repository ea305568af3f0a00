//! Heart rate reading repository for database operations.

use domain::models::NewHeartRateReading;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::HeartRateReadingEntity;
use crate::metrics::QueryTimer;

/// Repository for heart rate reading database operations.
#[derive(Clone)]
pub struct HeartRateRepository {
    pool: PgPool,
}

impl HeartRateRepository {
    /// Creates a new HeartRateRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Most recent readings for a patient, newest first.
    pub async fn find_by_patient(
        &self,
        patient_id: Uuid,
        limit: i64,
    ) -> Result<Vec<HeartRateReadingEntity>, sqlx::Error> {
        let timer = QueryTimer::postgres("find_heart_rate_readings");
        let result = sqlx::query_as::<_, HeartRateReadingEntity>(
            r#"
            SELECT id, patient_id, heart_rate, signal_quality, timestamp
            FROM heart_rate_readings
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

    /// Insert a reading stamped with the current time.
    pub async fn insert(
        &self,
        input: &NewHeartRateReading,
    ) -> Result<HeartRateReadingEntity, sqlx::Error> {
        let timer = QueryTimer::postgres("insert_heart_rate_reading");
        let result = sqlx::query_as::<_, HeartRateReadingEntity>(
            r#"
            INSERT INTO heart_rate_readings (patient_id, heart_rate, signal_quality)
            VALUES ($1, $2, $3)
            RETURNING id, patient_id, heart_rate, signal_quality, timestamp
            "#,
        )
        .bind(input.patient_id)
        .bind(input.heart_rate)
        .bind(input.signal_quality)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
