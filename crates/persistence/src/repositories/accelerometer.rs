//! Accelerometer reading repository for database operations.

use domain::models::NewAccelerometerReading;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::AccelerometerReadingEntity;
use crate::metrics::QueryTimer;

/// Repository for motion sensor database operations.
#[derive(Clone)]
pub struct AccelerometerRepository {
    pool: PgPool,
}

impl AccelerometerRepository {
    /// Creates a new AccelerometerRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_patient(
        &self,
        patient_id: Uuid,
        limit: i64,
    ) -> Result<Vec<AccelerometerReadingEntity>, sqlx::Error> {
        let timer = QueryTimer::postgres("find_accelerometer_readings");
        let result = sqlx::query_as::<_, AccelerometerReadingEntity>(
            r#"
            SELECT id, patient_id, accel_x, accel_y, accel_z, gyro_x, gyro_y, gyro_z,
                   temperature, timestamp
            FROM accelerometer_readings
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

    pub async fn insert(
        &self,
        input: &NewAccelerometerReading,
    ) -> Result<AccelerometerReadingEntity, sqlx::Error> {
        let timer = QueryTimer::postgres("insert_accelerometer_reading");
        let result = sqlx::query_as::<_, AccelerometerReadingEntity>(
            r#"
            INSERT INTO accelerometer_readings (
                patient_id, accel_x, accel_y, accel_z, gyro_x, gyro_y, gyro_z, temperature
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, patient_id, accel_x, accel_y, accel_z, gyro_x, gyro_y, gyro_z,
                      temperature, timestamp
            "#,
        )
        .bind(input.patient_id)
        .bind(input.accel_x)
        .bind(input.accel_y)
        .bind(input.accel_z)
        .bind(input.gyro_x)
        .bind(input.gyro_y)
        .bind(input.gyro_z)
        .bind(input.temperature)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }
}
