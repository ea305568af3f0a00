//! `?limit=` query extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use domain::models::ReadingsQuery;

use crate::error::ApiError;

/// Parsed `?limit=` parameter. A non-numeric value is rejected with a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct Limit(pub ReadingsQuery);

impl Limit {
    /// See [`ReadingsQuery::effective_limit`].
    pub fn resolve(&self, default: usize, max: usize) -> usize {
        self.0.effective_limit(default, max)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Limit
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<ReadingsQuery>::from_request_parts(parts, state)
            .await
            .map_err(|_| ApiError::validation("limit must be an integer"))?;
        Ok(Limit(query))
    }
}
