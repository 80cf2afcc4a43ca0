//! 验证辅助函数
//!
//! 表名、列名会拼入远端查询 URL，拼接前统一校验：
//! - ensure_identifier：仅允许字母、数字与下划线
//! - ensure_query：校验查询中出现的全部表名与列名

use crate::error::StorageError;
use crate::query::RowQuery;

/// 验证表名/列名
pub fn ensure_identifier(name: &str) -> Result<(), StorageError> {
    if name.is_empty() {
        return Err(StorageError::new("identifier required"));
    }
    if !name
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
    {
        return Err(StorageError::new(format!("invalid identifier: {name}")));
    }
    Ok(())
}

/// 验证查询涉及的全部标识符
pub fn ensure_query(query: &RowQuery) -> Result<(), StorageError> {
    ensure_identifier(&query.table)?;
    if let Some(columns) = &query.columns {
        for column in columns {
            ensure_identifier(column)?;
        }
    }
    for filter in &query.filters {
        ensure_identifier(&filter.column)?;
    }
    if let Some(order) = &query.order {
        ensure_identifier(&order.column)?;
    }
    Ok(())
}
