//! The storage abstraction shared by every backend.

use async_trait::async_trait;
use domain::models::{
    AccelerometerReading, CreatePatientRequest, GpsReading, HeartRateReading,
    NewAccelerometerReading, NewGpsReading, NewHeartRateReading, Patient, UpdatePatientRequest,
};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

/// Errors returned by a [`VitalsStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for patients and their sensor readings.
///
/// Implementations assign ids and timestamps on insert, validate inputs
/// before storing them, and return reading lists most recent first.
#[async_trait]
pub trait VitalsStore: Send + Sync {
    /// Short backend name used in logs and health output.
    fn backend(&self) -> &'static str;

    /// Verifies the backend is reachable.
    async fn ping(&self) -> StoreResult<()>;

    async fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>>;

    async fn create_patient(&self, input: CreatePatientRequest) -> StoreResult<Patient>;

    /// Applies a partial update. Returns `None` when the patient does not exist.
    async fn update_patient(
        &self,
        id: Uuid,
        update: UpdatePatientRequest,
    ) -> StoreResult<Option<Patient>>;

    async fn get_heart_rate_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<HeartRateReading>>;

    async fn create_heart_rate_reading(
        &self,
        input: NewHeartRateReading,
    ) -> StoreResult<HeartRateReading>;

    async fn get_gps_readings(&self, patient_id: Uuid, limit: usize)
        -> StoreResult<Vec<GpsReading>>;

    async fn create_gps_reading(&self, input: NewGpsReading) -> StoreResult<GpsReading>;

    async fn get_accelerometer_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<AccelerometerReading>>;

    async fn create_accelerometer_reading(
        &self,
        input: NewAccelerometerReading,
    ) -> StoreResult<AccelerometerReading>;

    async fn get_latest_heart_rate(&self, patient_id: Uuid) -> StoreResult<Option<HeartRateReading>> {
        Ok(self
            .get_heart_rate_readings(patient_id, 1)
            .await?
            .into_iter()
            .next())
    }

    async fn get_latest_gps(&self, patient_id: Uuid) -> StoreResult<Option<GpsReading>> {
        Ok(self.get_gps_readings(patient_id, 1).await?.into_iter().next())
    }

    async fn get_latest_accelerometer(
        &self,
        patient_id: Uuid,
    ) -> StoreResult<Option<AccelerometerReading>> {
        Ok(self
            .get_accelerometer_readings(patient_id, 1)
            .await?
            .into_iter()
            .next())
    }
}
