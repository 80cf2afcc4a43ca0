//! # Shipnet Analysis 模块
//!
//! 基于标准化记录的分析：
//!
//! - [`cabin`]：舱室设备分布、分桶用户构成、按设备数筛选舱室
//! - [`synonyms`]：问句字段识别（有序同义词表）
//! - [`intent`]：意图识别与数字解析（阿拉伯数字、one..fifteen）
//! - [`field`]：通用字段分布引擎
//! - [`router`]：问答路由
//!
//! 记录统一通过 `FieldSource` 访问，统一字段之外的表专属列（如 `rdp_yard`）同样可分组。

pub mod cabin;
pub mod field;
pub mod intent;
pub mod router;
pub mod synonyms;

pub use cabin::{
    cabin_composition, cabin_distribution, cabins_with_exactly, cabins_with_fewer_than,
    cabins_with_more_than, group_by_cabin, top_cabins,
};
pub use field::{FieldAnswer, answer, answer_for, field_distribution};
pub use intent::{
    DEFAULT_TOP_N, QueryIntent, ThresholdOp, classify_intent, extract_device_count, extract_threshold,
    parse_number,
    tokenize,
};
pub use router::{CabinAnswer, ChatAnswer, ChatRouter, Route, answer_cabins, detect_systems, route};
pub use synonyms::{FIELD_SYNONYMS, FieldSynonym, detect_field, match_synonym, resolve_field};
