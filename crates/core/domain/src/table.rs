//! 数据源表枚举。

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 船上各网络系统对应的远端数据表。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTable {
    Wifi,
    Pbx,
    Tv,
    CabinSwitch,
    FieldCables,
    Extracted,
}

impl SourceTable {
    /// 全部数据表（固定顺序，用于扇出与汇总输出）。
    pub const ALL: [SourceTable; 6] = [
        SourceTable::Wifi,
        SourceTable::Pbx,
        SourceTable::Tv,
        SourceTable::CabinSwitch,
        SourceTable::FieldCables,
        SourceTable::Extracted,
    ];

    /// 远端存储中的物理表名。
    pub fn table_name(self) -> &'static str {
        match self {
            SourceTable::Wifi => "wifi",
            SourceTable::Pbx => "pbx",
            SourceTable::Tv => "tv",
            SourceTable::CabinSwitch => "cabin_switch",
            SourceTable::FieldCables => "field_cables",
            SourceTable::Extracted => "extracted",
        }
    }

    /// 面向用户的系统名称。
    pub fn display_name(self) -> &'static str {
        match self {
            SourceTable::Wifi => "WiFi",
            SourceTable::Pbx => "PBX",
            SourceTable::Tv => "TV",
            SourceTable::CabinSwitch => "Cabin Switch",
            SourceTable::FieldCables => "Field Cables",
            SourceTable::Extracted => "Extracted",
        }
    }

    /// 问句中指代该系统的关键字（小写）。
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            SourceTable::Wifi => &["wifi", "wi-fi", "wireless", "access point"],
            SourceTable::Pbx => &["pbx", "phone", "telephone", "telephony"],
            SourceTable::Tv => &["tv", "television", "iptv"],
            SourceTable::CabinSwitch => &["cabin switch", "cabin_switch", "switch", "switches"],
            SourceTable::FieldCables => &["field cable", "field_cables", "cabling"],
            SourceTable::Extracted => &["extracted"],
        }
    }
}

impl fmt::Display for SourceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.table_name())
    }
}

/// 未知数据表名。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTable(pub String);

impl fmt::Display for UnknownTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown table: {}", self.0)
    }
}

impl std::error::Error for UnknownTable {}

impl FromStr for SourceTable {
    type Err = UnknownTable;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = value.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        match key.as_str() {
            "wifi" | "wi_fi" => Ok(SourceTable::Wifi),
            "pbx" | "phone" | "phones" => Ok(SourceTable::Pbx),
            "tv" | "television" => Ok(SourceTable::Tv),
            "cabin_switch" | "cabinswitch" | "switch" => Ok(SourceTable::CabinSwitch),
            "field_cables" | "field_cable" | "cables" => Ok(SourceTable::FieldCables),
            "extracted" => Ok(SourceTable::Extracted),
            _ => Err(UnknownTable(value.to_string())),
        }
    }
}
