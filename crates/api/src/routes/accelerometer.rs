//! Accelerometer endpoint handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use domain::models::{AccelerometerReading, CreateAccelerometerReadingRequest, ReadingsQuery};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Limit, PatientId};
use crate::middleware::metrics::record_reading_created;

use super::reading_patient;

const INVALID_ACCELEROMETER: &str = "Invalid accelerometer data";

/// GET /api/patients/:id/accelerometer?limit=N
pub async fn list_accelerometer_readings(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    limit: Limit,
) -> Result<Json<Vec<AccelerometerReading>>, ApiError> {
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };
    let limit = limit.resolve(ReadingsQuery::DEFAULT_LIMIT, state.config.limits.max_query_limit);
    Ok(Json(state.store.get_accelerometer_readings(id, limit).await?))
}

/// POST /api/patients/:id/accelerometer
pub async fn create_accelerometer_reading(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    payload: Result<Json<CreateAccelerometerReadingRequest>, JsonRejection>,
) -> Result<Json<AccelerometerReading>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::from_json_rejection(e, INVALID_ACCELEROMETER))?;
    let id = reading_patient(&state, id, INVALID_ACCELEROMETER).await?;

    let reading = state
        .store
        .create_accelerometer_reading(request.for_patient(id))
        .await
        .map_err(|e| ApiError::from_store(e, INVALID_ACCELEROMETER))?;

    record_reading_created("accelerometer");
    Ok(Json(reading))
}

/// GET /api/patients/:id/accelerometer/latest
pub async fn latest_accelerometer(
    State(state): State<AppState>,
    PatientId(id): PatientId,
) -> Result<Json<AccelerometerReading>, ApiError> {
    let no_readings = || ApiError::not_found("No accelerometer readings");
    let id = id.ok_or_else(no_readings)?;
    state
        .store
        .get_latest_accelerometer(id)
        .await?
        .map(Json)
        .ok_or_else(no_readings)
}
