//! 字段存在性探测
//!
//! 部分表缺少可选分类列（例如 inside_cabin），对不存在的列做等值过滤会在远端报错。
//! 查询引用可选列之前，先取一行样本检查其键集合：
//! - 样本含该列：Present
//! - 样本不含该列：Absent
//! - 空表或采样失败：Unknown，调用方按“不过滤该列”处理

use crate::query::RowQuery;
use crate::traits::TableStore;
use domain::RawRecord;
use shipnet_telemetry::record_probe_unknown;
use tracing::warn;

/// 探测结果。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPresence {
    Present,
    Absent,
    Unknown,
}

impl FieldPresence {
    /// 只有 Present 允许在查询中引用该列。
    pub fn is_present(self) -> bool {
        matches!(self, FieldPresence::Present)
    }
}

/// 单行样本；一次采样可用于多次探测。
#[derive(Debug, Clone)]
pub struct TableSample {
    table: String,
    row: Option<RawRecord>,
}

impl TableSample {
    /// 读取一行样本；失败时记为无样本。
    pub async fn load(store: &dyn TableStore, table: &str) -> Self {
        let row = match store.fetch_range(&RowQuery::new(table), 0, 1).await {
            Ok(rows) => rows.into_iter().next(),
            Err(err) => {
                warn!(table, error = %err, "sample row fetch failed");
                None
            }
        };
        if row.is_none() {
            record_probe_unknown();
        }
        Self {
            table: table.to_string(),
            row,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn row(&self) -> Option<&RawRecord> {
        self.row.as_ref()
    }

    pub fn presence(&self, field: &str) -> FieldPresence {
        match &self.row {
            Some(row) if row.contains_key(field) => FieldPresence::Present,
            Some(_) => FieldPresence::Absent,
            None => FieldPresence::Unknown,
        }
    }

    /// 候选列表中第一个存在的列。
    pub fn first_present(&self, candidates: &[&str]) -> Option<String> {
        candidates
            .iter()
            .find(|candidate| self.presence(candidate).is_present())
            .map(|candidate| candidate.to_string())
    }

    /// 样本行的列名（空表为空）。
    pub fn columns(&self) -> Vec<String> {
        self.row
            .as_ref()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default()
    }
}

/// 探测单个字段。
pub async fn probe_field(store: &dyn TableStore, table: &str, field: &str) -> FieldPresence {
    TableSample::load(store, table).await.presence(field)
}

/// 按顺序探测候选字段，返回第一个存在的。
pub async fn probe_first(
    store: &dyn TableStore,
    table: &str,
    candidates: &[&str],
) -> Option<String> {
    TableSample::load(store, table).await.first_present(candidates)
}
