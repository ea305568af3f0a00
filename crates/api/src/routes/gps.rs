//! GPS endpoint handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use domain::models::{CreateGpsReadingRequest, GpsReading, ReadingsQuery};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Limit, PatientId};
use crate::middleware::metrics::record_reading_created;

use super::reading_patient;

const INVALID_GPS: &str = "Invalid GPS data";

/// GET /api/patients/:id/gps?limit=N
pub async fn list_gps_readings(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    limit: Limit,
) -> Result<Json<Vec<GpsReading>>, ApiError> {
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };
    let limit = limit.resolve(ReadingsQuery::DEFAULT_LIMIT, state.config.limits.max_query_limit);
    Ok(Json(state.store.get_gps_readings(id, limit).await?))
}

/// POST /api/patients/:id/gps
pub async fn create_gps_reading(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    payload: Result<Json<CreateGpsReadingRequest>, JsonRejection>,
) -> Result<Json<GpsReading>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from_json_rejection(e, INVALID_GPS))?;
    let id = reading_patient(&state, id, INVALID_GPS).await?;

    let reading = state
        .store
        .create_gps_reading(request.for_patient(id))
        .await
        .map_err(|e| ApiError::from_store(e, INVALID_GPS))?;

    record_reading_created("gps");
    Ok(Json(reading))
}

/// GET /api/patients/:id/gps/latest
pub async fn latest_gps(
    State(state): State<AppState>,
    PatientId(id): PatientId,
) -> Result<Json<GpsReading>, ApiError> {
    let no_readings = || ApiError::not_found("No GPS readings");
    let id = id.ok_or_else(no_readings)?;
    state
        .store
        .get_latest_gps(id)
        .await?
        .map(Json)
        .ok_or_else(no_readings)
}
