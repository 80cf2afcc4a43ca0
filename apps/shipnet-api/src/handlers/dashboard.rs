//! 仪表盘 handler
//!
//! - GET /api/dashboard/summary - 全部系统的在线状态、全船汇总与最近更新时间
//!
//! 上游表不可用时对应系统记为 0，不影响其它系统；只有整体超时才返回错误。

use crate::AppState;
use crate::utils::response::status_to_dto;
use crate::utils::within_deadline;
use api_contract::{ApiResponse, DashboardSummaryDto};
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

pub async fn dashboard_summary(State(state): State<AppState>) -> Response {
    let summary = match within_deadline(&state, "dashboard", state.aggregator.dashboard()).await {
        Ok(summary) => summary,
        Err(response) => return response,
    };
    info!(
        total = summary.totals.total,
        online = summary.totals.online,
        unique_cabins = summary.totals.unique_cabins,
        "dashboard summary"
    );
    let dto = DashboardSummaryDto {
        systems: summary
            .systems
            .into_iter()
            .map(|(system, status)| status_to_dto(system, status))
            .collect(),
        totals: summary.totals,
        last_updated: summary.last_updated.map(|ts| ts.to_rfc3339()),
    };
    (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
}
