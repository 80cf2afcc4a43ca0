//! 数据最近更新时间。
//!
//! 每张表取 `updated_at` / `created_at` 中存在的列，按降序（空值最后）取 1 行；
//! 全部表中的最大值即为最近更新时间。

use crate::service::ServiceAggregator;
use chrono::{DateTime, NaiveDateTime, Utc};
use domain::{SourceTable, value_to_string};
use futures::future::join_all;
use shipnet_storage::{Filter, RowQuery, TableSample};
use tracing::warn;

/// 时间戳列候选。
pub const TIMESTAMP_FIELDS: [&str; 2] = ["updated_at", "created_at"];

/// 解析时间戳：RFC 3339，或不带时区（按 UTC）。
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

impl ServiceAggregator {
    /// 单表最近更新时间。
    pub async fn table_last_updated(&self, table: SourceTable) -> Option<DateTime<Utc>> {
        let name = table.table_name();
        let sample = TableSample::load(self.store.as_ref(), name).await;
        let mut latest = None;
        for field in TIMESTAMP_FIELDS {
            if !sample.presence(field).is_present() {
                continue;
            }
            let query = RowQuery::new(name)
                .select([field])
                .filter(Filter::not_null(field))
                .order_by(field, true);
            match self.store.fetch_range(&query, 0, 1).await {
                Ok(rows) => {
                    let parsed = rows
                        .first()
                        .and_then(|row| row.get(field))
                        .and_then(value_to_string)
                        .and_then(|value| parse_timestamp(&value));
                    latest = latest.max(parsed);
                }
                Err(err) => warn!(table = name, field, error = %err, "latest timestamp query failed"),
            }
        }
        latest
    }

    /// 多表最近更新时间的最大值。
    pub async fn last_updated(&self, tables: &[SourceTable]) -> Option<DateTime<Utc>> {
        join_all(tables.iter().map(|table| self.table_last_updated(*table)))
            .await
            .into_iter()
            .flatten()
            .max()
    }
}

#[cfg(test)]
mod tests {
    use super::parse_timestamp;

    #[test]
    fn parses_with_and_without_offset() {
        let with_offset = parse_timestamp("2024-03-01T10:00:00+02:00").map(|ts| ts.to_rfc3339());
        assert_eq!(with_offset.as_deref(), Some("2024-03-01T08:00:00+00:00"));
        assert!(parse_timestamp("2024-03-01T10:00:00.123456").is_some());
        assert!(parse_timestamp("2024-03-01 10:00:00").is_some());
        assert!(parse_timestamp("yesterday").is_none());
    }
}
