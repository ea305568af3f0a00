//! Store metrics collection.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Record how long a store operation took, labelled by backend and query.
pub fn record_query_duration(backend: &'static str, query_name: &'static str, duration_secs: f64) {
    histogram!(
        "store_query_duration_seconds",
        "backend" => backend,
        "query" => query_name
    )
    .record(duration_secs);
}

/// Record connection pool gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("database_connections_active").set(active as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_total").set(size as f64);
}

/// Times a store operation and records it when finished.
///
/// ```ignore
/// let timer = QueryTimer::postgres("insert_heart_rate_reading");
/// let result = sqlx::query_as::<_, HeartRateReadingEntity>(...).fetch_one(&pool).await;
/// timer.record();
/// ```
pub struct QueryTimer {
    backend: &'static str,
    query_name: &'static str,
    start: Instant,
}

impl QueryTimer {
    pub fn new(backend: &'static str, query_name: &'static str) -> Self {
        Self {
            backend,
            query_name,
            start: Instant::now(),
        }
    }

    pub fn postgres(query_name: &'static str) -> Self {
        Self::new("postgres", query_name)
    }

    pub fn memory(query_name: &'static str) -> Self {
        Self::new("memory", query_name)
    }

    /// Record the elapsed duration.
    pub fn record(self) {
        let duration = self.start.elapsed().as_secs_f64();
        record_query_duration(self.backend, self.query_name, duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_labels() {
        let timer = QueryTimer::postgres("find_patient");
        assert_eq!(timer.backend, "postgres");
        assert_eq!(timer.query_name, "find_patient");

        let timer = QueryTimer::memory("find_patient");
        assert_eq!(timer.backend, "memory");
    }

    #[test]
    fn test_record_without_recorder_is_noop() {
        QueryTimer::memory("noop").record();
    }
}
