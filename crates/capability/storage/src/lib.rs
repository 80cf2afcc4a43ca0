//! # Shipnet Storage 模块
//!
//! 本模块提供对远端表存储的只读访问抽象。
//!
//! ## 架构设计
//!
//! 1. **接口抽象层** (`traits.rs`)：`TableStore`，只含计数与窗口取行两类操作
//! 2. **查询描述层** (`query.rs`)：过滤条件、排序、投影
//! 3. **错误处理层** (`error.rs`)：统一的存储错误类型
//! 4. **验证辅助层** (`validation.rs`)：表名/列名校验
//! 5. **连接管理层** (`connection.rs`)：携带访问密钥的 HTTP 客户端
//! 6. **分页拉取** (`fetch.rs`)：越过单次 1000 行上限读取整张表
//! 7. **字段探测** (`probe.rs`)：查询引用可选列之前的存在性检查
//! 8. **实现层**：
//!    - `rest.rs`：REST 接口实现（生产环境）
//!    - `in_memory/`：内存实现（测试和演示）
//!
//! ## 失败语义
//!
//! - `TableStore` 方法返回 `StorageError`，由调用方决定如何降级
//! - `fetch_all` 永不失败：单页失败时返回已收集的部分行并在结果中标注原因
//! - 字段探测遇到空表或采样失败时返回 `Unknown`，调用方不得据此过滤
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use shipnet_storage::{PaginationConfig, RestTableStore, fetch_table};
//!
//! let store = RestTableStore::connect("https://store.example", "key", 30)?;
//! let outcome = fetch_table(&store, "wifi", &PaginationConfig::default()).await;
//! println!("rows: {}", outcome.rows.len());
//! ```

pub mod connection;
pub mod error;
pub mod fetch;
pub mod in_memory;
pub mod probe;
pub mod query;
pub mod rest;
pub mod traits;
pub mod validation;

pub use connection::*;
pub use error::*;
pub use fetch::*;
pub use probe::*;
pub use query::*;
pub use rest::RestTableStore;
pub use traits::*;
pub use validation::*;

pub use in_memory::InMemoryTableStore;
