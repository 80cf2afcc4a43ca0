//! 系统列表参数解析。

use domain::SourceTable;

/// 聚合层边界错误。
#[derive(Debug, thiserror::Error)]
pub enum AggregateError {
    #[error("unknown system: {0}")]
    UnknownSystem(String),
}

/// 解析逗号分隔的系统列表；缺省或为空时返回全部系统。重复项只保留一次。
pub fn parse_systems(value: Option<&str>) -> Result<Vec<SourceTable>, AggregateError> {
    let Some(value) = value.filter(|value| !value.trim().is_empty()) else {
        return Ok(SourceTable::ALL.to_vec());
    };
    let mut systems = Vec::new();
    for item in value.split(',').map(str::trim).filter(|item| !item.is_empty()) {
        let system: SourceTable = item
            .parse()
            .map_err(|_| AggregateError::UnknownSystem(item.to_string()))?;
        if !systems.contains(&system) {
            systems.push(system);
        }
    }
    Ok(systems)
}
