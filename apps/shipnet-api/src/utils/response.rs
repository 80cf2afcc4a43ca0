//! HTTP 响应辅助函数和 DTO 转换
//!
//! 错误响应：bad_request_error, not_found_error, timeout_error
//! DTO 转换：status_to_dto, overview_to_dto, cable_row_to_dto, composition_to_dto,
//! chat_answer_to_dto

use api_contract::{
    ApiResponse, BucketCompositionDto, CabinAnswerDto, CabinCountDto, CableRowDto,
    ChatResponseDto, FieldAnswerDto, SystemCabinAnswerDto, SystemStatusDto, TableOverviewDto,
};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use domain::{CabinBucket, CabinComposition, ServiceStatus, SourceTable};
use shipnet_aggregate::{CableRow, TableOverview};
use shipnet_analysis::{CabinAnswer, ChatAnswer, FieldAnswer};

/// 错误请求响应
pub fn bad_request_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<()>::error("INVALID.REQUEST", message.into())),
    )
        .into_response()
}

/// 资源未找到错误响应
pub fn not_found_error() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ApiResponse::<()>::error("RESOURCE.NOT_FOUND", "not found")),
    )
        .into_response()
}

/// 聚合超时响应
pub fn timeout_error(operation: &str) -> Response {
    (
        StatusCode::GATEWAY_TIMEOUT,
        Json(ApiResponse::<()>::error(
            "INTERNAL.TIMEOUT",
            format!("{operation} timed out"),
        )),
    )
        .into_response()
}

/// ServiceStatus 转 SystemStatusDto
pub fn status_to_dto(system: SourceTable, status: ServiceStatus) -> SystemStatusDto {
    SystemStatusDto {
        system: system.table_name().to_string(),
        display_name: system.display_name().to_string(),
        online: status.online,
        offline: status.offline,
        total: status.total,
        records: status.records,
    }
}

/// TableOverview 转 TableOverviewDto
pub fn overview_to_dto(overview: TableOverview) -> TableOverviewDto {
    TableOverviewDto {
        table: overview.table.table_name().to_string(),
        display_name: overview.table.display_name().to_string(),
        total_count: overview.total_count,
        fields: overview.fields,
        sample_rows: overview.sample_rows,
    }
}

/// CableRow 转 CableRowDto
pub fn cable_row_to_dto(row: CableRow) -> CableRowDto {
    let record = row.record;
    CableRowDto {
        system: record.source.table_name().to_string(),
        cable_id: record.cable_id,
        deck: record.deck,
        fire_zone: record.fire_zone,
        cabin: record.cabin,
        device_name: record.device_name,
        device_type: record.device_type,
        mac_address: record.mac_address,
        inside_cabin: record.inside_cabin,
        user_class: record.user_class,
        remarks: record.remarks,
        cabin_type: record.cabin_type,
        origin_switch: record.origin_switch,
        offline: row.offline,
    }
}

/// 分桶构成转 DTO
pub fn composition_to_dto(
    composition: Vec<(CabinBucket, CabinComposition)>,
) -> Vec<BucketCompositionDto> {
    composition
        .into_iter()
        .map(|(bucket, composition)| BucketCompositionDto {
            bucket,
            composition,
        })
        .collect()
}

fn system_names(systems: &[SourceTable]) -> Vec<String> {
    systems
        .iter()
        .map(|system| system.table_name().to_string())
        .collect()
}

fn cabin_answer_to_dto(answer: CabinAnswer) -> CabinAnswerDto {
    match answer {
        CabinAnswer::CabinCount { cabins, devices } => CabinAnswerDto::CabinCount { cabins, devices },
        CabinAnswer::Cabins { cabins } => CabinAnswerDto::Cabins { cabins },
        CabinAnswer::Threshold { op, value, cabins } => CabinAnswerDto::Threshold {
            op: op.symbol().to_string(),
            value,
            cabins,
        },
        CabinAnswer::Distribution {
            distribution,
            composition,
        } => CabinAnswerDto::Distribution {
            distribution,
            composition: composition_to_dto(composition),
        },
        CabinAnswer::Top { cabins } => CabinAnswerDto::Top {
            cabins: cabins
                .into_iter()
                .map(|(cabin, count)| CabinCountDto { cabin, count })
                .collect(),
        },
        CabinAnswer::ThresholdUndetermined { op } => CabinAnswerDto::ThresholdUndetermined {
            op: op.symbol().to_string(),
        },
    }
}

fn field_answer_to_dto(answer: FieldAnswer) -> FieldAnswerDto {
    match answer {
        FieldAnswer::UniqueCount {
            field,
            unique_values,
            total_records,
        } => FieldAnswerDto::UniqueCount {
            field,
            unique_values,
            total_records,
        },
        FieldAnswer::Values { field, values } => FieldAnswerDto::Values { field, values },
        FieldAnswer::Distribution(distribution) => FieldAnswerDto::Distribution(distribution),
        FieldAnswer::TopN { field, entries } => FieldAnswerDto::TopN { field, entries },
        FieldAnswer::Threshold {
            field,
            op,
            value,
            matches,
        } => FieldAnswerDto::Threshold {
            field,
            op: op.symbol().to_string(),
            value,
            matches,
        },
        FieldAnswer::ThresholdUndetermined { field, op } => FieldAnswerDto::ThresholdUndetermined {
            field,
            op: op.symbol().to_string(),
        },
        FieldAnswer::FieldUndetermined => FieldAnswerDto::FieldUndetermined,
        FieldAnswer::IntentUnknown { field } => FieldAnswerDto::IntentUnknown { field },
    }
}

/// ChatAnswer 转 ChatResponseDto
pub fn chat_answer_to_dto(answer: ChatAnswer) -> ChatResponseDto {
    match answer {
        ChatAnswer::Status { systems, totals } => ChatResponseDto::Status {
            systems: systems
                .into_iter()
                .map(|(system, status)| status_to_dto(system, status))
                .collect(),
            totals,
        },
        ChatAnswer::Cabins { systems } => ChatResponseDto::Cabins {
            systems: systems
                .into_iter()
                .map(|(system, answer)| SystemCabinAnswerDto {
                    system: system.table_name().to_string(),
                    answer: cabin_answer_to_dto(answer),
                })
                .collect(),
        },
        ChatAnswer::Field { systems, answer } => ChatResponseDto::Field {
            systems: system_names(&systems),
            answer: field_answer_to_dto(answer),
        },
        ChatAnswer::Unknown => ChatResponseDto::Unknown,
    }
}
