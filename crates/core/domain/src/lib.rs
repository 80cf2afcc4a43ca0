//! 船舶网络设备清单与连通状态的领域模型。
//!
//! - [`table`]：数据源表枚举 SourceTable
//! - [`record`]：原始行 RawRecord、统一记录 CanonicalRecord、TaggedRecord
//! - [`stats`]：CountsByUserType、ServiceStatus、CabinDistribution、FieldDistribution
//! - [`ordering`]：舱室号与字段值排序规则

pub mod ordering;
pub mod record;
pub mod stats;
pub mod table;

pub use ordering::{sort_cabin_ids, sort_values};
pub use record::{
    Area, CABIN_PLACEHOLDERS, CanonicalField, CanonicalRecord, FieldSource, RawRecord,
    TaggedRecord, UserClass, is_placeholder_cabin, value_to_string,
};
pub use stats::{
    CabinBucket, CabinBuckets, CabinComposition, CabinDistribution, CountsByUserType,
    FieldDistribution, ServiceStatus, ShipTotals, ValueCount,
};
pub use table::{SourceTable, UnknownTable};
