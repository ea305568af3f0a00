//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod accelerometer_reading;
pub mod gps_reading;
pub mod heart_rate_reading;
pub mod patient;

pub use accelerometer_reading::AccelerometerReadingEntity;
pub use gps_reading::GpsReadingEntity;
pub use heart_rate_reading::HeartRateReadingEntity;
pub use patient::PatientEntity;
