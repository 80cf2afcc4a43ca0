//! 存储接口 Trait 定义
//!
//! 远端表存储只暴露两类只读操作：
//! - count：带过滤条件的计数（仅返回数量）
//! - fetch_range：带过滤/排序/投影的窗口取行
//!
//! 设计原则：
//! - 存储句柄按请求传入，不依赖进程级单例
//! - 所有接口返回 StorageError，由调用方决定降级策略
//! - 使用 async_trait 支持动态分发

use crate::error::StorageError;
use crate::query::{Filter, RowQuery};
use async_trait::async_trait;
use domain::RawRecord;

/// 远端表存储接口
///
/// 远端对单次 `fetch_range` 有 1000 行硬上限，完整读取需走分页拉取。
#[async_trait]
pub trait TableStore: Send + Sync {
    /// 满足过滤条件的行数
    async fn count(&self, table: &str, filters: &[Filter]) -> Result<u64, StorageError>;

    /// 读取 `[offset, offset + limit - 1]` 窗口内的行
    async fn fetch_range(
        &self,
        query: &RowQuery,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<RawRecord>, StorageError>;
}
