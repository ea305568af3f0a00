//! Heart rate endpoint handlers.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use domain::models::{
    CreateHeartRateReadingRequest, HeartRateHistoryPoint, HeartRateReading, HistorySummary,
    ReadingsQuery,
};
use domain::services::history::{aggregate_by_minute, summarize};

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::{Limit, PatientId};
use crate::middleware::metrics::record_reading_created;

use super::reading_patient;

const INVALID_HEART_RATE: &str = "Invalid heart rate data";

/// Recent readings, newest first.
///
/// GET /api/patients/:id/heart-rate?limit=N
pub async fn list_heart_rate_readings(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    limit: Limit,
) -> Result<Json<Vec<HeartRateReading>>, ApiError> {
    let Some(id) = id else {
        return Ok(Json(Vec::new()));
    };
    let limit = limit.resolve(ReadingsQuery::DEFAULT_LIMIT, state.config.limits.max_query_limit);
    Ok(Json(state.store.get_heart_rate_readings(id, limit).await?))
}

/// Record a reading for a patient.
///
/// POST /api/patients/:id/heart-rate
pub async fn create_heart_rate_reading(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    payload: Result<Json<CreateHeartRateReadingRequest>, JsonRejection>,
) -> Result<Json<HeartRateReading>, ApiError> {
    let Json(request) =
        payload.map_err(|e| ApiError::from_json_rejection(e, INVALID_HEART_RATE))?;
    let id = reading_patient(&state, id, INVALID_HEART_RATE).await?;

    let reading = state
        .store
        .create_heart_rate_reading(request.for_patient(id))
        .await
        .map_err(|e| ApiError::from_store(e, INVALID_HEART_RATE))?;

    record_reading_created("heartRate");
    Ok(Json(reading))
}

/// Most recent reading.
///
/// GET /api/patients/:id/heart-rate/latest
pub async fn latest_heart_rate(
    State(state): State<AppState>,
    PatientId(id): PatientId,
) -> Result<Json<HeartRateReading>, ApiError> {
    let no_readings = || ApiError::not_found("No heart rate readings");
    let id = id.ok_or_else(no_readings)?;
    state
        .store
        .get_latest_heart_rate(id)
        .await?
        .map(Json)
        .ok_or_else(no_readings)
}

/// Minute-bucketed averages over the most recent readings, oldest first.
///
/// GET /api/patients/:id/heart-rate/history?limit=N
pub async fn heart_rate_history(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    limit: Limit,
) -> Result<Json<Vec<HeartRateHistoryPoint>>, ApiError> {
    Ok(Json(history_points(&state, id, limit).await?))
}

/// Average, range and span of the minute-bucketed history.
///
/// GET /api/patients/:id/heart-rate/summary?limit=N
pub async fn heart_rate_summary(
    State(state): State<AppState>,
    PatientId(id): PatientId,
    limit: Limit,
) -> Result<Json<HistorySummary>, ApiError> {
    let points = history_points(&state, id, limit).await?;
    summarize(&points)
        .map(Json)
        .ok_or_else(|| ApiError::not_found("No heart rate history"))
}

async fn history_points(
    state: &AppState,
    id: Option<uuid::Uuid>,
    limit: Limit,
) -> Result<Vec<HeartRateHistoryPoint>, ApiError> {
    let Some(id) = id else {
        return Ok(Vec::new());
    };
    let limit = limit.resolve(
        ReadingsQuery::DEFAULT_HISTORY_LIMIT,
        state.config.limits.max_query_limit,
    );
    let readings = state.store.get_heart_rate_readings(id, limit).await?;
    Ok(aggregate_by_minute(&readings))
}
