//! HTTP route handlers.

pub mod accelerometer;
pub mod gps;
pub mod health;
pub mod heart_rate;
pub mod patients;
pub mod stream;

use domain::models::Patient;
use uuid::Uuid;

use crate::app::AppState;
use crate::error::{ApiError, ValidationDetail};

/// Loads a patient, treating an unparseable id like a missing one.
pub(crate) async fn require_patient(
    state: &AppState,
    id: Option<Uuid>,
) -> Result<Patient, ApiError> {
    let id = id.ok_or_else(|| ApiError::not_found("Patient not found"))?;
    state
        .store
        .get_patient(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Patient not found"))
}

/// Resolves the patient a new reading is recorded against. An id that does
/// not parse or names no patient makes the reading invalid input.
pub(crate) async fn reading_patient(
    state: &AppState,
    id: Option<Uuid>,
    invalid_message: &str,
) -> Result<Uuid, ApiError> {
    let id = id.ok_or_else(|| ApiError::validation(invalid_message))?;
    match state.store.get_patient(id).await? {
        Some(_) => Ok(id),
        None => Err(ApiError::Validation {
            message: invalid_message.to_string(),
            details: vec![ValidationDetail {
                field: "patient_id".to_string(),
                message: "Patient not found".to_string(),
            }],
        }),
    }
}
