//! 分页拉取
//!
//! 远端单次请求最多返回 1000 行，完整读取一张表需要按窗口逐页请求：
//! - 第 N 页的偏移取决于前 N-1 页累计行数，因此页与页之间严格串行
//! - 某页返回行数少于页大小（含 0 行）即视为读完
//! - 页数上限防止异常后端永不返回短页导致死循环，触达上限时返回已收集的行
//! - 单页失败记录告警并停止该表的拉取，返回已收集的部分结果，不向上抛错

use crate::query::RowQuery;
use crate::traits::TableStore;
use domain::RawRecord;
use shipnet_telemetry::{record_fetch_truncated, record_page_failure, record_page_fetched};
use tracing::{debug, warn};

/// 远端单次请求行数上限。
pub const MAX_PAGE_SIZE: usize = 1000;

/// 默认页数上限（约 20,000 行）。
pub const DEFAULT_MAX_PAGES: usize = 20;

/// 分页参数。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    pub page_size: usize,
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl PaginationConfig {
    pub fn new(page_size: usize, max_pages: usize) -> Self {
        Self {
            page_size,
            max_pages,
        }
        .sanitized()
    }

    fn sanitized(mut self) -> Self {
        self.page_size = self.page_size.clamp(1, MAX_PAGE_SIZE);
        if self.max_pages == 0 {
            self.max_pages = 1;
        }
        self
    }
}

/// 拉取结束原因。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// 末页行数少于页大小
    ShortPage,
    /// 末页为空
    Empty,
    /// 触达页数上限
    PageLimit,
    /// 某页请求失败
    Failed(String),
}

/// 拉取结果。
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    pub rows: Vec<RawRecord>,
    /// 已发出的页请求数（含失败的一页）
    pub pages: usize,
    pub stop: StopReason,
}

impl FetchOutcome {
    /// 是否完整读完整张表。
    pub fn is_complete(&self) -> bool {
        matches!(self.stop, StopReason::ShortPage | StopReason::Empty)
    }

    pub fn into_rows(self) -> Vec<RawRecord> {
        self.rows
    }
}

/// 逐页读取查询的全部结果。
pub async fn fetch_all(
    store: &dyn TableStore,
    query: &RowQuery,
    config: &PaginationConfig,
) -> FetchOutcome {
    let config = config.clone().sanitized();
    let mut rows: Vec<RawRecord> = Vec::new();
    let mut pages = 0usize;

    loop {
        if pages >= config.max_pages {
            warn!(
                table = %query.table,
                pages,
                rows = rows.len(),
                "page limit reached, returning partial rows"
            );
            record_fetch_truncated();
            return FetchOutcome {
                rows,
                pages,
                stop: StopReason::PageLimit,
            };
        }

        let offset = rows.len();
        pages += 1;
        match store.fetch_range(query, offset, config.page_size).await {
            Ok(page) => {
                record_page_fetched();
                let received = page.len();
                debug!(table = %query.table, offset, received, "page fetched");
                rows.extend(page);
                if received == 0 {
                    return FetchOutcome {
                        rows,
                        pages,
                        stop: StopReason::Empty,
                    };
                }
                if received < config.page_size {
                    return FetchOutcome {
                        rows,
                        pages,
                        stop: StopReason::ShortPage,
                    };
                }
            }
            Err(err) => {
                record_page_failure();
                warn!(
                    table = %query.table,
                    offset,
                    error = %err,
                    "page fetch failed, returning partial rows"
                );
                return FetchOutcome {
                    rows,
                    pages,
                    stop: StopReason::Failed(err.to_string()),
                };
            }
        }
    }
}

/// 读取整张表（无投影、无过滤）。
pub async fn fetch_table(
    store: &dyn TableStore,
    table: &str,
    config: &PaginationConfig,
) -> FetchOutcome {
    fetch_all(store, &RowQuery::new(table), config).await
}
