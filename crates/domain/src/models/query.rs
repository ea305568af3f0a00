//! Query parameters shared by the reading list endpoints.

use serde::Deserialize;

/// `?limit=N` for reading and history queries.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ReadingsQuery {
    pub limit: Option<i64>,
}

impl ReadingsQuery {
    /// Default limit for raw reading lists.
    pub const DEFAULT_LIMIT: usize = 100;
    /// Default limit for minute-bucketed history.
    pub const DEFAULT_HISTORY_LIMIT: usize = 500;

    /// Returns the effective limit: `default` when absent, negatives as zero,
    /// and never more than `max`.
    pub fn effective_limit(&self, default: usize, max: usize) -> usize {
        match self.limit {
            None => default.min(max),
            Some(limit) if limit <= 0 => 0,
            Some(limit) => usize::try_from(limit).unwrap_or(max).min(max),
        }
    }
}
