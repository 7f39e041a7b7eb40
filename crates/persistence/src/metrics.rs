//! Database metrics collection.

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::future::Future;
use std::time::Instant;

/// Runs a storage operation and records its duration under `query`.
///
/// Usage:
/// ```ignore
/// timed("find_convention_by_id", async {
///     sqlx::query_as::<_, ConventionEntity>(...).fetch_optional(&pool).await
/// })
/// .await
/// ```
pub async fn timed<T, F>(query: &'static str, operation: F) -> T
where
    F: Future<Output = T>,
{
    let start = Instant::now();
    let result = operation.await;
    histogram!("db_query_duration_seconds", "query" => query)
        .record(start.elapsed().as_secs_f64());
    result
}

/// Publishes connection pool gauges. Call periodically to track pool health.
pub fn record_pool_gauges(pool: &PgPool) {
    let size = pool.size() as usize;
    let idle = pool.num_idle();
    let active = size.saturating_sub(idle);

    gauge!("db_connections_active").set(active as f64);
    gauge!("db_connections_idle").set(idle as f64);
    gauge!("db_connections_total").set(size as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timed_passes_result_through() {
        let value = tokio_test::block_on(timed("test_query", async { 41 + 1 }));
        assert_eq!(value, 42);
    }

    #[test]
    fn test_timed_passes_errors_through() {
        let result: Result<(), &str> =
            tokio_test::block_on(timed("test_query", async { Err("boom") }));
        assert_eq!(result, Err("boom"));
    }
}
