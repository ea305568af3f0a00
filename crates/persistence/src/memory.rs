//! In-memory store.
//!
//! Used for local development and tests. Data lives for the lifetime of the
//! process.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::{
    AccelerometerReading, CreatePatientRequest, GpsReading, HeartRateReading,
    NewAccelerometerReading, NewGpsReading, NewHeartRateReading, Patient, UpdatePatientRequest,
};
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

use crate::metrics::QueryTimer;
use crate::store::{StoreResult, VitalsStore};

trait Reading: Clone {
    fn patient_id(&self) -> Option<Uuid>;
    fn timestamp(&self) -> DateTime<Utc>;
}

macro_rules! impl_reading {
    ($($ty:ty),*) => {
        $(impl Reading for $ty {
            fn patient_id(&self) -> Option<Uuid> {
                self.patient_id
            }

            fn timestamp(&self) -> DateTime<Utc> {
                self.timestamp
            }
        })*
    };
}

impl_reading!(HeartRateReading, GpsReading, AccelerometerReading);

/// Most recent first; equal timestamps keep the later insertion first.
fn latest_first<T: Reading>(rows: &[T], patient_id: Uuid, limit: usize) -> Vec<T> {
    let mut matching: Vec<T> = rows
        .iter()
        .rev()
        .filter(|r| r.patient_id() == Some(patient_id))
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
    matching.truncate(limit);
    matching
}

#[derive(Default)]
struct Tables {
    patients: HashMap<Uuid, Patient>,
    heart_rate: Vec<HeartRateReading>,
    gps: Vec<GpsReading>,
    accelerometer: Vec<AccelerometerReading>,
}

/// A [`VitalsStore`] backed by process memory.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VitalsStore for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn get_patient(&self, id: Uuid) -> StoreResult<Option<Patient>> {
        Ok(self.tables.read().await.patients.get(&id).cloned())
    }

    async fn create_patient(&self, input: CreatePatientRequest) -> StoreResult<Patient> {
        input.validate()?;

        let timer = QueryTimer::memory("create_patient");
        let now = Utc::now();
        let patient = Patient {
            id: Uuid::new_v4(),
            name: input.name,
            age: input.age,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .patients
            .insert(patient.id, patient.clone());
        timer.record();

        Ok(patient)
    }

    async fn update_patient(
        &self,
        id: Uuid,
        update: UpdatePatientRequest,
    ) -> StoreResult<Option<Patient>> {
        update.validate()?;

        let mut tables = self.tables.write().await;
        Ok(tables.patients.get_mut(&id).map(|patient| {
            update.apply_to(patient, Utc::now());
            patient.clone()
        }))
    }

    async fn get_heart_rate_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<HeartRateReading>> {
        let tables = self.tables.read().await;
        Ok(latest_first(&tables.heart_rate, patient_id, limit))
    }

    async fn create_heart_rate_reading(
        &self,
        input: NewHeartRateReading,
    ) -> StoreResult<HeartRateReading> {
        input.validate()?;

        let timer = QueryTimer::memory("create_heart_rate_reading");
        let reading = input.into_reading(Uuid::new_v4(), Utc::now());
        self.tables.write().await.heart_rate.push(reading.clone());
        timer.record();

        Ok(reading)
    }

    async fn get_gps_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<GpsReading>> {
        let tables = self.tables.read().await;
        Ok(latest_first(&tables.gps, patient_id, limit))
    }

    async fn create_gps_reading(&self, input: NewGpsReading) -> StoreResult<GpsReading> {
        input.validate()?;

        let reading = input.into_reading(Uuid::new_v4(), Utc::now());
        self.tables.write().await.gps.push(reading.clone());
        Ok(reading)
    }

    async fn get_accelerometer_readings(
        &self,
        patient_id: Uuid,
        limit: usize,
    ) -> StoreResult<Vec<AccelerometerReading>> {
        let tables = self.tables.read().await;
        Ok(latest_first(&tables.accelerometer, patient_id, limit))
    }

    async fn create_accelerometer_reading(
        &self,
        input: NewAccelerometerReading,
    ) -> StoreResult<AccelerometerReading> {
        input.validate()?;

        let reading = input.into_reading(Uuid::new_v4(), Utc::now());
        self.tables.write().await.accelerometer.push(reading.clone());
        Ok(reading)
    }
}
