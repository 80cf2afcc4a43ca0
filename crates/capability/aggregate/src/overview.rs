//! 表概览：总行数、字段列表、样本行。

use crate::service::ServiceAggregator;
use domain::{RawRecord, SourceTable};
use futures::future::join_all;
use shipnet_storage::{MAX_PAGE_SIZE, RowQuery};
use tracing::warn;

/// 默认样本行数。
pub const DEFAULT_SAMPLE_ROWS: usize = 5;

/// 单表概览。
#[derive(Debug, Clone, PartialEq)]
pub struct TableOverview {
    pub table: SourceTable,
    pub total_count: u64,
    /// 样本行中出现过的列名（按首次出现顺序）
    pub fields: Vec<String>,
    pub sample_rows: Vec<RawRecord>,
}

impl ServiceAggregator {
    /// 单表概览；计数或取样失败时对应部分为空。
    pub async fn overview(&self, table: SourceTable, sample_size: usize) -> TableOverview {
        let name = table.table_name();
        let sample_size = sample_size.clamp(1, MAX_PAGE_SIZE);
        let query = RowQuery::new(name);
        let (count, rows) = futures::join!(
            self.store.count(name, &[]),
            self.store.fetch_range(&query, 0, sample_size)
        );
        let total_count = count.unwrap_or_else(|err| {
            warn!(table = name, error = %err, "table count failed");
            0
        });
        let sample_rows = rows.unwrap_or_else(|err| {
            warn!(table = name, error = %err, "sample rows fetch failed");
            Vec::new()
        });
        let mut fields: Vec<String> = Vec::new();
        for key in sample_rows.iter().flat_map(|row| row.keys()) {
            if !fields.contains(key) {
                fields.push(key.clone());
            }
        }
        TableOverview {
            table,
            total_count,
            fields,
            sample_rows,
        }
    }

    pub async fn overviews(&self, tables: &[SourceTable], sample_size: usize) -> Vec<TableOverview> {
        join_all(tables.iter().map(|table| self.overview(*table, sample_size))).await
    }
}
