//! PostgreSQL store.

use async_trait::async_trait;
use domain::models::{
    AccelerometerReading, CreatePatientRequest, GpsReading, HeartRateReading,
    NewAccelerometerReading, NewGpsReading, NewHeartRateReading, Patient, UpdatePatientRequest,
};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::metrics::record_pool_metrics;
use crate::repositories::{
    AccelerometerRepository, GpsRepository, HeartRateRepository, PatientRepository,
};
use crate::store::{StoreResult, VitalsStore};

/// A [`VitalsStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
    patients: PatientRepository,
    heart_rate: HeartRateRepository,
    gps: GpsRepository,
    accelerometer: AccelerometerRepository,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            patients: PatientRepository::new(pool.clone()),
            heart_rate: HeartRateRepository::new(pool.clone()),
            gps: GpsRepository::new(pool.clone()),
            accelerometer: AccelerometerRepository::new(pool.clone()),
            pool,
        }
    }
}

fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

#[async_trait]
impl VitalsStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        record_pool_metrics(&self.pool);
        Ok(())
    }

    async fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>> {
        Ok(self.patients.find_by_id(id).await?.map(Into::into))
    }

    async fn create_patient(&self, input: CreatePatientRequest) -> StoreResult<Patient> {
        input.validate()?;
        Ok(self.patients.insert(&input.name, input.age).await?.into())
    }

    async fn update_patient(
        &self,
        id: Uuid,
        update: UpdatePatientRequest,
    ) -> StoreResult<Option<Patient>> {
        update.validate()?;
        Ok(self
            .patients
            .update(id, update.name.as_deref(), update.age)
            .await?
            .map(Into::into))
    }

    async fn get_heart_rate_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<HeartRateReading>> {
        let rows = self
            .heart_rate
            .find_by_patient(patient_id, sql_limit(limit))
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_heart_rate_reading(
        &self,
        input: NewHeartRateReading,
    ) -> StoreResult<HeartRateReading> {
        input.validate()?;
        Ok(self.heart_rate.insert(&input).await?.into())
    }

    async fn get_gps_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<GpsReading>> {
        let rows = self.gps.find_by_patient(patient_id, sql_limit(limit)).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_gps_reading(&self, input: NewGpsReading) -> StoreResult<GpsReading> {
        input.validate()?;
        Ok(self.gps.insert(&input).await?.into())
    }

    async fn get_accelerometer_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<AccelerometerReading>> {
        let rows = self
            .accelerometer
            .find_by_patient(patient_id, sql_limit(limit))
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_accelerometer_reading(
        &self,
        input: NewAccelerometerReading,
    ) -> StoreResult<AccelerometerReading> {
        input.validate()?;
        Ok(self.accelerometer.insert(&input).await?.into())
    }
}
