//! Domain models for Vital Monitor.

pub mod accelerometer;
pub mod gps;
pub mod heart_rate;
pub mod history;
pub mod patient;
pub mod query;
pub mod stream;
pub mod vitals;

pub use accelerometer::{
    AccelerometerReading, CreateAccelerometerReadingRequest, NewAccelerometerReading,
};
pub use gps::{CreateGpsReadingRequest, GpsReading, NewGpsReading};
pub use heart_rate::{CreateHeartRateReadingRequest, HeartRateReading, NewHeartRateReading};
pub use history::{HeartRateHistoryPoint, HistorySummary};
pub use patient::{CreatePatientRequest, Patient, UpdatePatientRequest};
pub use query::ReadingsQuery;
pub use stream::{
    AccelerometerSample, ClientCommand, EcgSample, GpsSample, HeartRateSample, Notice,
    StreamMessage,
};
pub use vitals::{HealthStatus, HeartRateAlert, HeartRateZones, PatientVitals};
