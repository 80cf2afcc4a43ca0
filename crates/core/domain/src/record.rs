//! 原始行与统一设备记录。

use crate::table::SourceTable;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 远端表返回的原始行：不保证任何固定结构。
pub type RawRecord = serde_json::Map<String, Value>;

/// 视为“无舱室”的占位值（去除首尾空白后比较）。
pub const CABIN_PLACEHOLDERS: [&str; 4] = ["", "-", "undefined", "null"];

/// 判断舱室号是否为占位值。
pub fn is_placeholder_cabin(cabin: &str) -> bool {
    CABIN_PLACEHOLDERS.contains(&cabin.trim())
}

/// 将原始 JSON 值渲染为字符串；null 视为缺失。
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(v) => Some(v.clone()),
        Value::Bool(v) => Some(v.to_string()),
        Value::Number(v) => Some(v.to_string()),
        other => Some(other.to_string()),
    }
}

/// 统一记录的字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    CableId,
    Deck,
    FireZone,
    Cabin,
    DeviceName,
    DeviceType,
    MacAddress,
    InsideCabin,
    UserClass,
    Remarks,
    CabinType,
    OriginSwitch,
}

impl CanonicalField {
    pub const ALL: [CanonicalField; 12] = [
        CanonicalField::CableId,
        CanonicalField::Deck,
        CanonicalField::FireZone,
        CanonicalField::Cabin,
        CanonicalField::DeviceName,
        CanonicalField::DeviceType,
        CanonicalField::MacAddress,
        CanonicalField::InsideCabin,
        CanonicalField::UserClass,
        CanonicalField::Remarks,
        CanonicalField::CabinType,
        CanonicalField::OriginSwitch,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CanonicalField::CableId => "cable_id",
            CanonicalField::Deck => "deck",
            CanonicalField::FireZone => "fire_zone",
            CanonicalField::Cabin => "cabin",
            CanonicalField::DeviceName => "device_name",
            CanonicalField::DeviceType => "device_type",
            CanonicalField::MacAddress => "mac_address",
            CanonicalField::InsideCabin => "inside_cabin",
            CanonicalField::UserClass => "user_class",
            CanonicalField::Remarks => "remarks",
            CanonicalField::CabinType => "cabin_type",
            CanonicalField::OriginSwitch => "origin_switch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}

/// 标准化后的设备记录。
///
/// 所有字段均为字符串，缺失时为空串，保证下游比较是全函数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub cable_id: String,
    pub deck: String,
    pub fire_zone: String,
    pub cabin: String,
    pub device_name: String,
    pub device_type: String,
    pub mac_address: String,
    pub inside_cabin: String,
    pub user_class: String,
    pub remarks: String,
    pub cabin_type: String,
    pub origin_switch: String,
    pub source: SourceTable,
}

impl CanonicalRecord {
    /// 指定来源表的空记录。
    pub fn empty(source: SourceTable) -> Self {
        Self {
            cable_id: String::new(),
            deck: String::new(),
            fire_zone: String::new(),
            cabin: String::new(),
            device_name: String::new(),
            device_type: String::new(),
            mac_address: String::new(),
            inside_cabin: String::new(),
            user_class: String::new(),
            remarks: String::new(),
            cabin_type: String::new(),
            origin_switch: String::new(),
            source,
        }
    }

    pub fn get(&self, field: CanonicalField) -> &str {
        match field {
            CanonicalField::CableId => &self.cable_id,
            CanonicalField::Deck => &self.deck,
            CanonicalField::FireZone => &self.fire_zone,
            CanonicalField::Cabin => &self.cabin,
            CanonicalField::DeviceName => &self.device_name,
            CanonicalField::DeviceType => &self.device_type,
            CanonicalField::MacAddress => &self.mac_address,
            CanonicalField::InsideCabin => &self.inside_cabin,
            CanonicalField::UserClass => &self.user_class,
            CanonicalField::Remarks => &self.remarks,
            CanonicalField::CabinType => &self.cabin_type,
            CanonicalField::OriginSwitch => &self.origin_switch,
        }
    }

    pub fn set(&mut self, field: CanonicalField, value: String) {
        let slot = match field {
            CanonicalField::CableId => &mut self.cable_id,
            CanonicalField::Deck => &mut self.deck,
            CanonicalField::FireZone => &mut self.fire_zone,
            CanonicalField::Cabin => &mut self.cabin,
            CanonicalField::DeviceName => &mut self.device_name,
            CanonicalField::DeviceType => &mut self.device_type,
            CanonicalField::MacAddress => &mut self.mac_address,
            CanonicalField::InsideCabin => &mut self.inside_cabin,
            CanonicalField::UserClass => &mut self.user_class,
            CanonicalField::Remarks => &mut self.remarks,
            CanonicalField::CabinType => &mut self.cabin_type,
            CanonicalField::OriginSwitch => &mut self.origin_switch,
        };
        *slot = value;
    }

    /// 有效舱室号（占位值返回 None）。
    pub fn valid_cabin(&self) -> Option<&str> {
        if is_placeholder_cabin(&self.cabin) {
            None
        } else {
            Some(self.cabin.trim())
        }
    }

    pub fn user(&self) -> Option<UserClass> {
        UserClass::classify(&self.user_class)
    }
}

/// 用户类别（由自由文本 user 字段子串匹配得到）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserClass {
    Crew,
    Pax,
}

impl UserClass {
    /// 远端计数查询使用的子串（大小写不敏感）。
    pub fn pattern(self) -> &'static str {
        match self {
            UserClass::Crew => "crew",
            UserClass::Pax => "pax",
        }
    }

    /// 与远端 ilike 子串匹配保持一致：先匹配 crew，再匹配 pax。
    pub fn classify(value: &str) -> Option<Self> {
        let lower = value.to_ascii_lowercase();
        if lower.contains(UserClass::Crew.pattern()) {
            Some(UserClass::Crew)
        } else if lower.contains(UserClass::Pax.pattern()) {
            Some(UserClass::Pax)
        } else {
            None
        }
    }
}

/// 区域分类：舱内 / 公共区。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Area {
    Cabin,
    Public,
}

/// 按字段名取值的记录抽象（字段分布引擎使用）。
pub trait FieldSource {
    /// 字段存在时返回其字符串值（可能为空串）。
    fn field(&self, name: &str) -> Option<String>;

    /// 记录所在舱室（占位值为 None）。
    fn cabin(&self) -> Option<&str>;
}

impl FieldSource for CanonicalRecord {
    fn field(&self, name: &str) -> Option<String> {
        CanonicalField::from_name(name).map(|field| self.get(field).to_string())
    }

    fn cabin(&self) -> Option<&str> {
        self.valid_cabin()
    }
}

/// 统一记录 + 原始行。
///
/// 统一结构之外的表专属列（例如 `rdp_yard`）通过原始行查找。
#[derive(Debug, Clone, PartialEq)]
pub struct TaggedRecord {
    pub canonical: CanonicalRecord,
    pub raw: RawRecord,
}

impl TaggedRecord {
    pub fn new(canonical: CanonicalRecord, raw: RawRecord) -> Self {
        Self { canonical, raw }
    }

    pub fn source(&self) -> SourceTable {
        self.canonical.source
    }
}

impl FieldSource for TaggedRecord {
    fn field(&self, name: &str) -> Option<String> {
        if let Some(field) = CanonicalField::from_name(name) {
            let value = self.canonical.get(field);
            if !value.is_empty() || !self.raw.contains_key(name) {
                return Some(value.to_string());
            }
        }
        self.raw.get(name).map(|value| value_to_string(value).unwrap_or_default())
    }

    fn cabin(&self) -> Option<&str> {
        self.canonical.valid_cabin()
    }
}
