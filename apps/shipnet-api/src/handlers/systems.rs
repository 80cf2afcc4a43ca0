//! 单系统 handlers
//!
//! - GET /api/systems/{system}/status - 在线/离线统计（船员/乘客 × 舱内/公共区）
//! - GET /api/systems/{system}/cabins - 舱室设备分布与分桶用户构成

use crate::AppState;
use crate::utils::response::{composition_to_dto, status_to_dto};
use crate::utils::{parse_system, within_deadline};
use api_contract::{ApiResponse, CabinReportDto};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::CabinBucket;
use shipnet_analysis::{cabin_composition, cabin_distribution};

/// 单系统在线状态
///
/// 计数失败按 0 处理，因此这里只会因超时或系统名非法而失败。
pub async fn system_status(
    State(state): State<AppState>,
    Path(system): Path<String>,
) -> Response {
    let system = match parse_system(&system) {
        Ok(system) => system,
        Err(response) => return response,
    };
    let status = match within_deadline(&state, "system_status", state.aggregator.status(system)).await
    {
        Ok(status) => status,
        Err(response) => return response,
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(status_to_dto(system, status))),
    )
        .into_response()
}

/// 单系统舱室分布
pub async fn system_cabins(
    State(state): State<AppState>,
    Path(system): Path<String>,
) -> Response {
    let system = match parse_system(&system) {
        Ok(system) => system,
        Err(response) => return response,
    };
    let records = match within_deadline(&state, "system_cabins", state.aggregator.load(system)).await
    {
        Ok(records) => records,
        Err(response) => return response,
    };
    let distribution = cabin_distribution(Some(system), &records);
    let composition = [
        CabinBucket::One,
        CabinBucket::Two,
        CabinBucket::Three,
        CabinBucket::FourPlus,
    ]
    .into_iter()
    .map(|bucket| (bucket, cabin_composition(&records, bucket)))
    .collect();
    let dto = CabinReportDto {
        distribution,
        composition: composition_to_dto(composition),
    };
    (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
}
