//! 各数据表的列名同义词表。
//!
//! 每张表、每个统一字段都有一组按优先级排列的物理列名。
//! 通用列名作为默认值，表专属列名只在差异处覆盖；
//! 空列表表示该表不提供此字段，标准化结果恒为空串。

use domain::{CanonicalField, SourceTable};

/// 统一字段在指定表中的候选物理列名（按优先级）。
pub fn synonyms(table: SourceTable, field: CanonicalField) -> &'static [&'static str] {
    use CanonicalField as F;
    use SourceTable as T;

    match (table, field) {
        // 舱室号
        (T::Wifi | T::Pbx | T::Tv, F::Cabin) => &["primary_cabin__rccl_", "cabin"],
        (T::CabinSwitch, F::Cabin) => &["cabin", "cabin_no"],
        (T::FieldCables, F::Cabin) => &["cabin", "primary_cabin__rccl_", "location"],
        (T::Extracted, F::Cabin) => &["cabin", "primary_cabin__rccl_", "room"],

        // 设备名称
        (T::Wifi, F::DeviceName) => &["ap_name", "device_name", "name"],
        (T::Pbx, F::DeviceName) => &["extension", "device_name", "name"],
        (T::CabinSwitch, F::DeviceName) => &["switch_name", "hostname", "device_name"],

        // 设备类型 / 厂商
        (T::Wifi, F::DeviceType) => &["model", "device_type", "vendor"],
        (T::Pbx, F::DeviceType) => &["phone_type", "device_type", "model"],
        (T::Tv, F::DeviceType) => &["tv_type", "device_type", "model"],
        (T::FieldCables, F::DeviceType) => &["cable_type", "device_type"],
        (T::Extracted, F::DeviceType) => &["device_type", "category", "vendor"],

        // 上联交换机
        (T::CabinSwitch, F::OriginSwitch) => &["uplink_switch", "origin_switch"],
        (T::FieldCables, F::OriginSwitch) => &["from_switch", "origin_switch", "switch"],

        // 用途与区域
        (T::Extracted, F::UserClass) => &["user", "user_type", "owner"],
        (T::Extracted, F::InsideCabin) => &["inside_cabin", "location_type"],
        (T::FieldCables, F::UserClass | F::InsideCabin) => &[],

        (T::FieldCables, F::CableId) => &["cable_id", "cable_number", "cable_no"],

        (_, field) => default_synonyms(field),
    }
}

fn default_synonyms(field: CanonicalField) -> &'static [&'static str] {
    match field {
        CanonicalField::CableId => &["cable_id", "cable_no"],
        CanonicalField::Deck => &["deck"],
        CanonicalField::FireZone => &["fire_zone", "fz"],
        CanonicalField::Cabin => &["cabin"],
        CanonicalField::DeviceName => &["device_name", "name"],
        CanonicalField::DeviceType => &["device_type", "model"],
        CanonicalField::MacAddress => &["mac_address", "mac"],
        CanonicalField::InsideCabin => &["inside_cabin"],
        CanonicalField::UserClass => &["user", "user_type"],
        CanonicalField::Remarks => &["remarks", "remark", "comments"],
        CanonicalField::CabinType => &["cabin_type"],
        CanonicalField::OriginSwitch => &["origin_switch", "switch"],
    }
}

/// 表的完整映射：统一字段 -> 候选列名。
pub fn table_mapping(
    table: SourceTable,
) -> impl Iterator<Item = (CanonicalField, &'static [&'static str])> {
    CanonicalField::ALL
        .into_iter()
        .map(move |field| (field, synonyms(table, field)))
}

/// 统一字段在该表上的首选物理列名（计数查询按此列过滤）。
pub fn primary_column(table: SourceTable, field: CanonicalField) -> Option<&'static str> {
    synonyms(table, field).first().copied()
}
