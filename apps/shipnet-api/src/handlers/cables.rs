//! 线缆清单 handlers
//!
//! - GET /api/cables/cabin?systems= - 舱内线缆
//! - GET /api/cables/public?systems= - 公共区线缆
//!
//! `systems` 为逗号分隔的系统名，缺省为全部系统。

use crate::AppState;
use crate::utils::response::cable_row_to_dto;
use crate::utils::{parse_system_list, within_deadline};
use api_contract::{ApiResponse, CableListDto, CableListQuery};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::Area;

pub async fn cabin_cables(
    State(state): State<AppState>,
    Query(query): Query<CableListQuery>,
) -> Response {
    cable_list(state, query, Area::Cabin).await
}

pub async fn public_cables(
    State(state): State<AppState>,
    Query(query): Query<CableListQuery>,
) -> Response {
    cable_list(state, query, Area::Public).await
}

async fn cable_list(state: AppState, query: CableListQuery, area: Area) -> Response {
    let systems = match parse_system_list(query.systems.as_deref()) {
        Ok(systems) => systems,
        Err(response) => return response,
    };
    let rows = match within_deadline(
        &state,
        "cable_list",
        state.aggregator.cable_list(&systems, area),
    )
    .await
    {
        Ok(rows) => rows,
        Err(response) => return response,
    };
    let offline = rows.iter().filter(|row| row.offline).count();
    let dto = CableListDto {
        area: match area {
            Area::Cabin => "cabin".to_string(),
            Area::Public => "public".to_string(),
        },
        systems: systems
            .iter()
            .map(|system| system.table_name().to_string())
            .collect(),
        total: rows.len(),
        offline,
        rows: rows.into_iter().map(cable_row_to_dto).collect(),
    };
    (StatusCode::OK, Json(ApiResponse::success(dto))).into_response()
}
