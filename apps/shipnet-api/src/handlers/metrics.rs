//! 聚合指标快照。
//!
//! - GET /metrics

use api_contract::{ApiResponse, MetricsSnapshotDto};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use shipnet_telemetry::metrics;

pub async fn get_metrics() -> Response {
    let snapshot = metrics().snapshot();
    (
        StatusCode::OK,
        Json(ApiResponse::success(MetricsSnapshotDto {
            pages_fetched: snapshot.pages_fetched,
            page_failures: snapshot.page_failures,
            fetches_truncated: snapshot.fetches_truncated,
            count_queries: snapshot.count_queries,
            count_failures: snapshot.count_failures,
            probes_unknown: snapshot.probes_unknown,
            records_normalized: snapshot.records_normalized,
            aggregation_timeouts: snapshot.aggregation_timeouts,
            aggregation_latency_ms_total: snapshot.aggregation_latency_ms_total,
            aggregation_latency_ms_count: snapshot.aggregation_latency_ms_count,
        })),
    )
        .into_response()
}
