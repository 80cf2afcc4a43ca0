//! 整表加载：分页拉取 + 标准化。

use crate::service::ServiceAggregator;
use domain::{SourceTable, TaggedRecord};
use futures::future::join_all;
use shipnet_normalize::tag_all;
use shipnet_storage::fetch_table;
use tracing::debug;

impl ServiceAggregator {
    /// 读取整张表并标准化；拉取中途失败时返回已读到的部分。
    pub async fn load(&self, table: SourceTable) -> Vec<TaggedRecord> {
        let outcome = fetch_table(self.store.as_ref(), table.table_name(), &self.pagination).await;
        debug!(
            table = %table,
            rows = outcome.rows.len(),
            pages = outcome.pages,
            complete = outcome.is_complete(),
            "table loaded"
        );
        tag_all(table, outcome.into_rows())
    }

    /// 并发读取多张表，按输入顺序返回。
    pub async fn load_many(&self, tables: &[SourceTable]) -> Vec<(SourceTable, Vec<TaggedRecord>)> {
        let loaded = join_all(tables.iter().map(|table| self.load(*table))).await;
        tables.iter().copied().zip(loaded).collect()
    }
}
