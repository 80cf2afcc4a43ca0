//! # Shipnet Aggregate 模块
//!
//! 在存储与标准化之上计算各系统与全船的统计：
//!
//! - [`rules`]：各表的在线状态列、在线/离线取值与聚合模式
//! - [`service`]：服务聚合器，计数模式与扫描模式
//! - [`combine`]：全船汇总与舱室并集
//! - [`load`]：整表加载（供舱室分布与字段分布使用）
//! - [`cables`]：舱内 / 公共区线缆清单
//! - [`overview`]：表概览
//! - [`freshness`]：最近更新时间
//! - [`dashboard`]：仪表盘汇总
//!
//! 聚合永不失败：单个计数失败记为 0，整表不可用时返回全 0 状态。

pub mod cables;
pub mod combine;
pub mod dashboard;
pub mod freshness;
pub mod load;
pub mod overview;
pub mod rules;
pub mod service;
pub mod systems;

pub use cables::{CableRow, annotate_cables, record_area};
pub use combine::{combine, unique_cabins};
pub use dashboard::DashboardSummary;
pub use freshness::{TIMESTAMP_FIELDS, parse_timestamp};
pub use overview::{DEFAULT_SAMPLE_ROWS, TableOverview};
pub use rules::{AggregationMode, OFFLINE_VALUE, ONLINE_VALUE, TableRules};
pub use service::{ServiceAggregator, classify_rows};
pub use systems::{AggregateError, parse_systems};
