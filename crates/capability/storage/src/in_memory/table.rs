//! 表存储内存实现
//!
//! 仅用于本地演示和测试。
//!
//! 功能：
//! - 按表保存原始行
//! - 过滤、排序、投影与窗口取行，单次取行同样受行数上限约束
//! - 引用不存在的列时报错（与远端行为一致）
//! - 调用计数与故障注入

use crate::error::StorageError;
use crate::query::{Filter, RowQuery};
use crate::traits::TableStore;
use crate::validation::{ensure_identifier, ensure_query};
use domain::{RawRecord, value_to_string};
use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

/// 远端单次取行上限。
pub const DEFAULT_MAX_ROWS_PER_REQUEST: usize = 1000;

#[derive(Default)]
struct Faults {
    tables: HashSet<String>,
    fetch_offsets: HashSet<(String, usize)>,
    count_columns: HashSet<(String, String)>,
}

#[derive(Default)]
struct Calls {
    fetch: HashMap<String, usize>,
    count: HashMap<String, usize>,
}

/// 表存储内存实现
///
/// 使用 RwLock + HashMap 提供线程安全的内存存储。
pub struct InMemoryTableStore {
    tables: RwLock<HashMap<String, Vec<RawRecord>>>,
    max_rows_per_request: usize,
    faults: RwLock<Faults>,
    calls: RwLock<Calls>,
}

impl InMemoryTableStore {
    /// 创建空存储
    pub fn new() -> Self {
        Self::with_max_rows(DEFAULT_MAX_ROWS_PER_REQUEST)
    }

    /// 指定单次取行上限
    pub fn with_max_rows(max_rows_per_request: usize) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            max_rows_per_request: max_rows_per_request.max(1),
            faults: RwLock::new(Faults::default()),
            calls: RwLock::new(Calls::default()),
        }
    }

    /// 追加行（表不存在时创建）
    pub fn insert_rows(&self, table: &str, rows: impl IntoIterator<Item = RawRecord>) {
        if let Ok(mut map) = self.tables.write() {
            map.entry(table.to_string()).or_default().extend(rows);
        }
    }

    /// 由 JSON 对象数组追加行，非对象元素忽略
    pub fn insert_json(&self, table: &str, rows: serde_json::Value) {
        let rows = match rows {
            serde_json::Value::Array(items) => items
                .into_iter()
                .filter_map(|item| match item {
                    serde_json::Value::Object(map) => Some(map),
                    _ => None,
                })
                .collect::<Vec<_>>(),
            _ => Vec::new(),
        };
        self.insert_rows(table, rows);
    }

    /// 该表所有请求均失败
    pub fn fail_table(&self, table: &str) {
        if let Ok(mut faults) = self.faults.write() {
            faults.tables.insert(table.to_string());
        }
    }

    /// 指定偏移的取行请求失败
    pub fn fail_fetch_at(&self, table: &str, offset: usize) {
        if let Ok(mut faults) = self.faults.write() {
            faults.fetch_offsets.insert((table.to_string(), offset));
        }
    }

    /// 过滤条件包含指定列的计数请求失败
    pub fn fail_counts_on(&self, table: &str, column: &str) {
        if let Ok(mut faults) = self.faults.write() {
            faults
                .count_columns
                .insert((table.to_string(), column.to_string()));
        }
    }

    /// 该表已发出的取行请求数
    pub fn fetch_calls(&self, table: &str) -> usize {
        self.calls
            .read()
            .ok()
            .and_then(|calls| calls.fetch.get(table).copied())
            .unwrap_or(0)
    }

    /// 该表已发出的计数请求数
    pub fn count_calls(&self, table: &str) -> usize {
        self.calls
            .read()
            .ok()
            .and_then(|calls| calls.count.get(table).copied())
            .unwrap_or(0)
    }

    fn bump(&self, table: &str, fetch: bool) {
        if let Ok(mut calls) = self.calls.write() {
            let map = if fetch {
                &mut calls.fetch
            } else {
                &mut calls.count
            };
            *map.entry(table.to_string()).or_insert(0) += 1;
        }
    }

    fn table_failed(&self, table: &str) -> Result<(), StorageError> {
        let faults = self
            .faults
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        if faults.tables.contains(table) {
            return Err(StorageError::new(format!("table unavailable: {table}")));
        }
        Ok(())
    }

    fn snapshot(&self, table: &str) -> Result<Vec<RawRecord>, StorageError> {
        let map = self
            .tables
            .read()
            .map_err(|_| StorageError::new("lock failed"))?;
        Ok(map.get(table).cloned().unwrap_or_default())
    }
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

// 非空表上引用不存在的列时报错。
fn ensure_columns<'a>(
    table: &str,
    rows: &[RawRecord],
    columns: impl IntoIterator<Item = &'a String>,
) -> Result<(), StorageError> {
    if rows.is_empty() {
        return Ok(());
    }
    let known: HashSet<&String> = rows.iter().flat_map(|row| row.keys()).collect();
    for column in columns {
        if !known.contains(column) {
            return Err(StorageError::new(format!(
                "column {table}.{column} does not exist"
            )));
        }
    }
    Ok(())
}

fn matches_all(row: &RawRecord, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| filter.matches(row))
}

#[async_trait::async_trait]
impl TableStore for InMemoryTableStore {
    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StorageError> {
        ensure_identifier(table)?;
        self.bump(table, false);
        self.table_failed(table)?;
        {
            let faults = self
                .faults
                .read()
                .map_err(|_| StorageError::new("lock failed"))?;
            if filters.iter().any(|filter| {
                faults
                    .count_columns
                    .contains(&(table.to_string(), filter.column.clone()))
            }) {
                return Err(StorageError::new("count query failed"));
            }
        }
        let rows = self.snapshot(table)?;
        ensure_columns(table, &rows, filters.iter().map(|filter| &filter.column))?;
        Ok(rows.iter().filter(|row| matches_all(row, filters)).count() as u64)
    }

    async fn fetch_range(
        &self,
        query: &RowQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawRecord>, StorageError> {
        ensure_query(query)?;
        self.bump(&query.table, true);
        self.table_failed(&query.table)?;
        {
            let faults = self
                .faults
                .read()
                .map_err(|_| StorageError::new("lock failed"))?;
            if faults
                .fetch_offsets
                .contains(&(query.table.clone(), offset))
            {
                return Err(StorageError::new(format!("fetch failed at offset {offset}")));
            }
        }
        let rows = self.snapshot(&query.table)?;
        let mut referenced: Vec<&String> = query.filters.iter().map(|filter| &filter.column).collect();
        if let Some(columns) = &query.columns {
            referenced.extend(columns.iter());
        }
        if let Some(order) = &query.order {
            referenced.push(&order.column);
        }
        ensure_columns(&query.table, &rows, referenced)?;

        let mut matched: Vec<RawRecord> = rows
            .into_iter()
            .filter(|row| matches_all(row, &query.filters))
            .collect();
        if let Some(order) = &query.order {
            // 稳定排序；空值排在最后
            matched.sort_by(|a, b| {
                let a = a.get(&order.column).and_then(value_to_string);
                let b = b.get(&order.column).and_then(value_to_string);
                match (a, b) {
                    (Some(a), Some(b)) if order.descending => b.cmp(&a),
                    (Some(a), Some(b)) => a.cmp(&b),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            });
        }
        let take = limit.min(self.max_rows_per_request);
        let page = matched
            .into_iter()
            .skip(offset)
            .take(take)
            .map(|row| match &query.columns {
                Some(columns) => columns
                    .iter()
                    .filter_map(|column| row.get(column).map(|value| (column.clone(), value.clone())))
                    .collect(),
                None => row,
            })
            .collect();
        Ok(page)
    }
}
