//! Patient id path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use uuid::Uuid;

use crate::error::ApiError;

/// The `:id` path segment. `None` when it is not a UUID; each handler
/// decides what an unparseable id means for it.
#[derive(Debug, Clone, Copy)]
pub struct PatientId(pub Option<Uuid>);

#[async_trait]
impl<S> FromRequestParts<S> for PatientId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::not_found("Patient not found"))?;
        Ok(PatientId(Uuid::parse_str(&raw).ok()))
    }
}
