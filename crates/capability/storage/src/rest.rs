//! REST 表存储实现
//!
//! 访问 `{store_url}/rest/v1/{table}`：
//! - 计数：`HEAD` + `Prefer: count=exact`，从 `Content-Range` 的 `/` 之后解析总数
//! - 取行：`GET` + `Range-Unit: items` + `Range: {offset}-{end}`
//! - 过滤：`column=eq.value` 等查询参数

use crate::connection::build_client;
use crate::error::StorageError;
use crate::query::{Filter, RowQuery};
use crate::traits::TableStore;
use crate::validation::{ensure_identifier, ensure_query};
use async_trait::async_trait;
use domain::RawRecord;
use reqwest::header::CONTENT_RANGE;
use reqwest::{Client, Response};
use tracing::debug;

/// REST 表存储
#[derive(Clone)]
pub struct RestTableStore {
    client: Client,
    base_url: String,
}

impl RestTableStore {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// 使用访问密钥建立客户端并创建存储
    pub fn connect(
        store_url: &str,
        store_key: &str,
        timeout_seconds: u64,
    ) -> Result<Self, StorageError> {
        let client = build_client(store_key, timeout_seconds)?;
        Ok(Self::new(client, store_url))
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| (filter.column.clone(), filter.to_param()))
        .collect()
}

/// 解析 `Content-Range`，形如 `0-24/3573` 或 `*/0`。
pub fn parse_content_range_total(value: &str) -> Option<u64> {
    value
        .rsplit_once('/')
        .and_then(|(_, total)| total.trim().parse::<u64>().ok())
}

async fn ensure_success(response: Response) -> Result<Response, StorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StorageError::new(format!("store responded {status}: {body}")))
}

#[async_trait]
impl TableStore for RestTableStore {
    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StorageError> {
        ensure_identifier(table)?;
        for filter in filters {
            ensure_identifier(&filter.column)?;
        }
        let mut params = vec![("select".to_string(), "*".to_string())];
        params.extend(filter_params(filters));
        let response = self
            .client
            .head(self.table_url(table))
            .query(&params)
            .header("Prefer", "count=exact")
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let header = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| StorageError::new("missing content-range header"))?;
        let total = parse_content_range_total(header)
            .ok_or_else(|| StorageError::new(format!("invalid content-range: {header}")))?;
        debug!(table, total, "count query");
        Ok(total)
    }

    async fn fetch_range(
        &self,
        query: &RowQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawRecord>, StorageError> {
        ensure_query(query)?;
        if limit == 0 {
            return Ok(Vec::new());
        }
        let mut params = vec![("select".to_string(), query.select_param())];
        params.extend(filter_params(&query.filters));
        if let Some(order) = &query.order {
            params.push(("order".to_string(), order.to_param()));
        }
        let end = offset + limit - 1;
        let response = self
            .client
            .get(self.table_url(&query.table))
            .query(&params)
            .header("Range-Unit", "items")
            .header("Range", format!("{offset}-{end}"))
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let rows: Vec<RawRecord> = response.json().await?;
        debug!(table = %query.table, offset, rows = rows.len(), "fetch range");
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::parse_content_range_total;

    #[test]
    fn content_range_total_parses() {
        assert_eq!(parse_content_range_total("0-24/3573"), Some(3573));
        assert_eq!(parse_content_range_total("*/0"), Some(0));
        assert_eq!(parse_content_range_total("0-24/*"), None);
        assert_eq!(parse_content_range_total("garbage"), None);
    }
}
