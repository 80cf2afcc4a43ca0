//! 输入验证辅助函数
//!
//! - parse_system：路径中的系统名
//! - parse_system_list：逗号分隔的系统列表（缺省为全部）
//! - normalize_message：问句去除首尾空格并检查非空
//!
//! 失败统一返回 bad_request_error 响应。

use crate::utils::response::bad_request_error;
use axum::response::Response;
use domain::SourceTable;
use shipnet_aggregate::parse_systems;

/// 解析系统名
pub fn parse_system(value: &str) -> Result<SourceTable, Response> {
    value
        .parse::<SourceTable>()
        .map_err(|err| bad_request_error(err.to_string()))
}

/// 解析可选系统名（空串视为未指定）
pub fn parse_optional_system(value: Option<&str>) -> Result<Option<SourceTable>, Response> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => parse_system(value).map(Some),
        None => Ok(None),
    }
}

/// 解析系统列表
pub fn parse_system_list(value: Option<&str>) -> Result<Vec<SourceTable>, Response> {
    parse_systems(value).map_err(|err| bad_request_error(err.to_string()))
}

/// 验证问句，去除空格并检查非空
pub fn normalize_message(value: String) -> Result<String, Response> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(bad_request_error("message required"));
    }
    Ok(trimmed.to_string())
}
