//! 聚合调用的整体超时与耗时统计。

use crate::AppState;
use crate::utils::response::timeout_error;
use axum::response::Response;
use shipnet_telemetry::{record_aggregation_latency_ms, record_aggregation_timeout};
use std::future::Future;
use std::time::Instant;
use tracing::warn;

/// 在请求超时内执行聚合调用；超时返回 504 响应。
pub async fn within_deadline<T>(
    state: &AppState,
    operation: &'static str,
    future: impl Future<Output = T>,
) -> Result<T, Response> {
    let started = Instant::now();
    let result = tokio::time::timeout(state.request_timeout, future).await;
    let elapsed_ms = started.elapsed().as_millis() as u64;
    record_aggregation_latency_ms(elapsed_ms);
    match result {
        Ok(value) => Ok(value),
        Err(_) => {
            record_aggregation_timeout();
            warn!(operation, elapsed_ms, "aggregation timed out");
            Err(timeout_error(operation))
        }
    }
}
