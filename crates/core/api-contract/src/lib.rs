//! 稳定的 DTO 与 API 响应契约。

use domain::{
    CabinBucket, CabinComposition, CabinDistribution, CountsByUserType, FieldDistribution,
    RawRecord, ShipTotals, ValueCount,
};
use serde::{Deserialize, Serialize};

/// 标准 API 响应封装。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
}

/// 失败响应的错误体。
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.into(),
                message: message.into(),
            }),
        }
    }
}

/// 单个系统的在线状态。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatusDto {
    pub system: String,
    pub display_name: String,
    pub online: CountsByUserType,
    pub offline: CountsByUserType,
    pub total: CountsByUserType,
    pub records: u64,
}

/// 仪表盘汇总。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryDto {
    pub systems: Vec<SystemStatusDto>,
    pub totals: ShipTotals,
    /// RFC 3339；没有任何时间戳列时为 null
    pub last_updated: Option<String>,
}

/// 表概览查询参数。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOverviewQuery {
    pub table: Option<String>,
    pub sample_size: Option<usize>,
}

/// 表概览。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableOverviewDto {
    pub table: String,
    pub display_name: String,
    pub total_count: u64,
    pub fields: Vec<String>,
    pub sample_rows: Vec<RawRecord>,
}

/// 线缆清单查询参数（`systems` 为逗号分隔，缺省为全部系统）。
#[derive(Debug, Deserialize)]
pub struct CableListQuery {
    pub systems: Option<String>,
}

/// 线缆清单行。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CableRowDto {
    pub system: String,
    pub cable_id: String,
    pub deck: String,
    pub fire_zone: String,
    pub cabin: String,
    pub device_name: String,
    pub device_type: String,
    pub mac_address: String,
    pub inside_cabin: String,
    pub user_class: String,
    pub remarks: String,
    pub cabin_type: String,
    pub origin_switch: String,
    pub offline: bool,
}

/// 线缆清单。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CableListDto {
    pub area: String,
    pub systems: Vec<String>,
    pub total: usize,
    pub offline: usize,
    pub rows: Vec<CableRowDto>,
}

/// 分桶用户构成。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketCompositionDto {
    pub bucket: CabinBucket,
    #[serde(flatten)]
    pub composition: CabinComposition,
}

/// 舱室分布报告。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinReportDto {
    pub distribution: CabinDistribution,
    pub composition: Vec<BucketCompositionDto>,
}

/// 问答请求体。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub message: String,
    pub system: Option<String>,
}

/// 舱室与设备数。
#[derive(Debug, Serialize)]
pub struct CabinCountDto {
    pub cabin: String,
    pub count: usize,
}

/// 舱室问句的回答。
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum CabinAnswerDto {
    CabinCount {
        cabins: usize,
        devices: usize,
    },
    Cabins {
        cabins: Vec<String>,
    },
    Threshold {
        op: String,
        value: usize,
        cabins: Vec<String>,
    },
    Distribution {
        distribution: CabinDistribution,
        composition: Vec<BucketCompositionDto>,
    },
    Top {
        cabins: Vec<CabinCountDto>,
    },
    ThresholdUndetermined {
        op: String,
    },
}

/// 字段问句的回答。
#[derive(Debug, Serialize)]
#[serde(tag = "result", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum FieldAnswerDto {
    UniqueCount {
        field: String,
        unique_values: usize,
        total_records: usize,
    },
    Values {
        field: String,
        values: Vec<String>,
    },
    Distribution(FieldDistribution),
    TopN {
        field: String,
        entries: Vec<ValueCount>,
    },
    Threshold {
        field: String,
        op: String,
        value: usize,
        matches: Vec<ValueCount>,
    },
    ThresholdUndetermined {
        field: String,
        op: String,
    },
    FieldUndetermined,
    IntentUnknown {
        field: String,
    },
}

/// 单个系统的舱室回答。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemCabinAnswerDto {
    pub system: String,
    pub answer: CabinAnswerDto,
}

/// 问答响应。
#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChatResponseDto {
    Status {
        systems: Vec<SystemStatusDto>,
        totals: ShipTotals,
    },
    Cabins {
        systems: Vec<SystemCabinAnswerDto>,
    },
    Field {
        systems: Vec<String>,
        answer: FieldAnswerDto,
    },
    Unknown,
}

/// 聚合指标快照。
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsSnapshotDto {
    pub pages_fetched: u64,
    pub page_failures: u64,
    pub fetches_truncated: u64,
    pub count_queries: u64,
    pub count_failures: u64,
    pub probes_unknown: u64,
    pub records_normalized: u64,
    pub aggregation_timeouts: u64,
    pub aggregation_latency_ms_total: u64,
    pub aggregation_latency_ms_count: u64,
}
