//! 表概览 handler
//!
//! - GET /api/tables?table=&sampleSize= - 总行数、字段列表与样本行
//!
//! 未指定 table 时返回全部表的概览。

use crate::AppState;
use crate::utils::response::overview_to_dto;
use crate::utils::{parse_optional_system, within_deadline};
use api_contract::{ApiResponse, TableOverviewDto, TableOverviewQuery};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::SourceTable;
use shipnet_aggregate::DEFAULT_SAMPLE_ROWS;

pub async fn table_overview(
    State(state): State<AppState>,
    Query(query): Query<TableOverviewQuery>,
) -> Response {
    let table = match parse_optional_system(query.table.as_deref()) {
        Ok(table) => table,
        Err(response) => return response,
    };
    let tables: Vec<SourceTable> = match table {
        Some(table) => vec![table],
        None => SourceTable::ALL.to_vec(),
    };
    let sample_size = query.sample_size.unwrap_or(DEFAULT_SAMPLE_ROWS);
    let overviews = match within_deadline(
        &state,
        "table_overview",
        state.aggregator.overviews(&tables, sample_size),
    )
    .await
    {
        Ok(overviews) => overviews,
        Err(response) => return response,
    };
    let dtos: Vec<TableOverviewDto> = overviews.into_iter().map(overview_to_dto).collect();
    (StatusCode::OK, Json(ApiResponse::success(dtos))).into_response()
}
