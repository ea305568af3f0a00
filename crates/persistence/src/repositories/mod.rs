//! Repository implementations for database operations.

pub mod accelerometer;
pub mod gps;
pub mod heart_rate;
pub mod patient;

pub use accelerometer::AccelerometerRepository;
pub use gps::GpsRepository;
pub use heart_rate::HeartRateRepository;
pub use patient::PatientRepository;
