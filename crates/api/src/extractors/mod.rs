//! Custom Axum extractors.

pub mod limit;
pub mod patient_id;

pub use limit::Limit;
pub use patient_id::PatientId;
