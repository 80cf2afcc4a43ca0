//! 统一记录标准化。
//!
//! 各数据表对同一概念使用不同列名（舱室号在 wifi/pbx/tv 上是
//! `primary_cabin__rccl_`，在 cabin_switch 上是 `cabin`）。
//! [`synonyms`] 为每张表静态声明全部统一字段的候选列，
//! [`normalizer`] 据此把原始行映射为 `CanonicalRecord`。

pub mod normalizer;
pub mod synonyms;

pub use normalizer::{first_present, normalize, normalize_all, tag, tag_all};
pub use synonyms::{primary_column, synonyms, table_mapping};
