//! 内存存储实现模块
//!
//! 仅用于本地演示和测试。
//!
//! 包含以下实现：
//! - TableStore: InMemoryTableStore

pub mod table;

pub use table::*;
