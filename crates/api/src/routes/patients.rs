//! Patient endpoint handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use domain::models::{CreatePatientRequest, Patient, PatientVitals, UpdatePatientRequest};
use domain::services::vitals::patient_vitals;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::PatientId;

use super::require_patient;

const INVALID_PATIENT: &str = "Invalid patient data";

/// Get a patient.
///
/// GET /api/patients/:id
pub async fn get_patient(
    State(state): State<AppState>,
    PatientId(id): PatientId,
) -> Result<Json<Patient>, ApiError> {
    Ok(Json(require_patient(&state, id).await?))
}

/// Create a patient.
///
/// POST /api/patients
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<CreatePatientRequest>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from_json_rejection(e, INVALID_PATIENT))?;

    let patient = state
        .store
        .create_patient(request)
        .await
        .map_err(|e| ApiError::from_store(e, INVALID_PATIENT))?;

    info!(patient_id = %patient.id, "Patient created");
    Ok(Json(patient))
}

/// Partially update a patient.
///
/// PATCH /api/patients/:id
pub async fn update_patient(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    payload: Result<Json<UpdatePatientRequest>, JsonRejection>,
) -> Result<Json<Patient>, ApiError> {
    let Json(update) = payload.map_err(|e| ApiError::from_json_rejection(e, INVALID_PATIENT))?;
    let id = id.ok_or_else(|| ApiError::not_found("Patient not found"))?;

    state
        .store
        .update_patient(id, update)
        .await
        .map_err(|e| ApiError::from_store(e, INVALID_PATIENT))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Patient not found"))
}

/// Age-adjusted status, zones and alert for the latest heart rate.
///
/// GET /api/patients/:id/vitals
pub async fn get_patient_vitals(
    State(state): State<AppState>,
    PatientId(id): PatientId,
) -> Result<Json<PatientVitals>, ApiError> {
    let patient = require_patient(&state, id).await?;
    let latest = state.store.get_latest_heart_rate(patient.id).await?;
    Ok(Json(patient_vitals(patient, latest)))
}
