//! 各数据表的聚合规则。
//!
//! 规则只描述数据差异，不含逻辑：
//! - 在线状态列的候选名（按优先级探测）
//! - 在线 / 离线取值
//! - 舱内标志取值
//! - 计数模式或全量扫描模式

use domain::{Area, CanonicalField, CanonicalRecord, RawRecord, SourceTable, value_to_string};
use shipnet_normalize::synonyms;

/// 在线取值。
pub const ONLINE_VALUE: &str = "ONLINE";

/// 显式离线取值。
pub const OFFLINE_VALUE: &str = "OFFLINE";

const WIFI_ONLINE_FIELDS: &[&str] = &[
    "online__controller_",
    "online__at_once_",
    "online_status",
    "online",
];
const STATUS_FIELDS: &[&str] = &["online_status", "online"];
const SWITCH_STATUS_FIELDS: &[&str] = &["status", "online_status", "online"];

// 计数表的 inside_cabin 是布尔列，远端只接受布尔字面量
const BOOL_CABIN_FLAGS: &[&str] = &["true", "t", "yes", "y", "1"];
// location_type 是自由文本
const TEXT_CABIN_FLAGS: &[&str] = &["true", "t", "yes", "y", "1", "inside", "cabin"];

/// 聚合模式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationMode {
    /// 仅发计数查询（HEAD + count=exact）
    Count,
    /// 全量拉取后在内存中分类；用于分类列为自由文本、无法用单一谓词表达的表
    Scan,
}

/// 单表聚合规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRules {
    pub table: SourceTable,
    pub online_fields: &'static [&'static str],
    pub online_value: &'static str,
    /// 有显式离线计数的表；非 0 时优先于 `total − online`
    pub offline_value: Option<&'static str>,
    /// 舱内标志的小写取值
    pub cabin_flags: &'static [&'static str],
    pub mode: AggregationMode,
}

impl TableRules {
    pub fn for_table(table: SourceTable) -> Self {
        let (online_fields, offline_value, mode) = match table {
            SourceTable::Wifi => (WIFI_ONLINE_FIELDS, Some(OFFLINE_VALUE), AggregationMode::Count),
            SourceTable::Pbx | SourceTable::Tv | SourceTable::FieldCables => {
                (STATUS_FIELDS, None, AggregationMode::Count)
            }
            SourceTable::CabinSwitch => (SWITCH_STATUS_FIELDS, None, AggregationMode::Count),
            SourceTable::Extracted => (SWITCH_STATUS_FIELDS, None, AggregationMode::Scan),
        };
        let cabin_flags = match mode {
            AggregationMode::Count => BOOL_CABIN_FLAGS,
            AggregationMode::Scan => TEXT_CABIN_FLAGS,
        };
        Self {
            table,
            online_fields,
            online_value: ONLINE_VALUE,
            offline_value,
            cabin_flags,
            mode,
        }
    }

    /// user 列候选名。
    pub fn user_fields(&self) -> &'static [&'static str] {
        synonyms(self.table, CanonicalField::UserClass)
    }

    /// inside_cabin 列候选名。
    pub fn area_fields(&self) -> &'static [&'static str] {
        synonyms(self.table, CanonicalField::InsideCabin)
    }

    /// 计为舱内的全部写法（小写、首字母大写、全大写）。
    ///
    /// 计数查询的 `in` 过滤与本地判定共用这一份取值，两条路径口径一致。
    pub fn cabin_flag_values(&self) -> Vec<String> {
        let mut values: Vec<String> = Vec::new();
        for flag in self.cabin_flags {
            for variant in [flag.to_string(), capitalize(flag), flag.to_ascii_uppercase()] {
                if !values.contains(&variant) {
                    values.push(variant);
                }
            }
        }
        values
    }

    pub fn is_cabin_flag(&self, value: &str) -> bool {
        self.cabin_flag_values().iter().any(|flag| flag == value)
    }

    /// 记录的区域标志：无标志为 None，舱内取值以外的一律记为公共区。
    pub fn area_flag(&self, record: &CanonicalRecord) -> Option<Area> {
        if record.inside_cabin.is_empty() {
            return None;
        }
        if self.is_cabin_flag(&record.inside_cabin) {
            Some(Area::Cabin)
        } else {
            Some(Area::Public)
        }
    }

    /// 原始行的在线状态：Some(true) 在线，Some(false) 非在线，None 无状态列。
    pub fn online_state(&self, raw: &RawRecord) -> Option<bool> {
        let value = self
            .online_fields
            .iter()
            .filter_map(|field| raw.get(*field))
            .find_map(value_to_string)?;
        Some(value.trim().eq_ignore_ascii_case(self.online_value))
    }

    /// 原始行是否带显式离线取值。
    pub fn is_explicit_offline(&self, raw: &RawRecord) -> bool {
        let Some(offline_value) = self.offline_value else {
            return false;
        };
        self.online_fields
            .iter()
            .filter_map(|field| raw.get(*field))
            .find_map(value_to_string)
            .is_some_and(|value| value.trim().eq_ignore_ascii_case(offline_value))
    }
}

fn capitalize(flag: &str) -> String {
    let mut chars = flag.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flagged(table: SourceTable, flag: &str) -> CanonicalRecord {
        let mut record = CanonicalRecord::empty(table);
        record.inside_cabin = flag.to_string();
        record
    }

    #[test]
    fn wifi_probes_controller_field_first() {
        let rules = TableRules::for_table(SourceTable::Wifi);
        assert_eq!(rules.online_fields[0], "online__controller_");
        assert_eq!(rules.offline_value, Some("OFFLINE"));
        assert_eq!(
            TableRules::for_table(SourceTable::Extracted).mode,
            AggregationMode::Scan
        );
    }

    #[test]
    fn online_state_reads_first_present_field() {
        let rules = TableRules::for_table(SourceTable::Wifi);
        let raw = json!({ "online__at_once_": "online", "online": "OFFLINE" });
        let raw = raw.as_object().cloned().unwrap_or_default();
        assert_eq!(rules.online_state(&raw), Some(true));
        assert!(!rules.is_explicit_offline(&raw));
        assert_eq!(rules.online_state(&RawRecord::new()), None);
    }

    #[test]
    fn cabin_flags_accept_common_spellings() {
        let rules = TableRules::for_table(SourceTable::Pbx);
        for flag in ["true", "True", "TRUE", "Yes", "y", "1", "T"] {
            assert!(rules.is_cabin_flag(flag), "{flag}");
        }
        assert!(!rules.is_cabin_flag("inside"));
        assert!(!rules.is_cabin_flag(" yes"));
        assert_eq!(rules.area_flag(&flagged(SourceTable::Pbx, "no")), Some(Area::Public));
        assert_eq!(rules.area_flag(&flagged(SourceTable::Pbx, "")), None);

        let extracted = TableRules::for_table(SourceTable::Extracted);
        assert_eq!(
            extracted.area_flag(&flagged(SourceTable::Extracted, "Inside")),
            Some(Area::Cabin)
        );
        assert_eq!(
            extracted.area_flag(&flagged(SourceTable::Extracted, "outside")),
            Some(Area::Public)
        );
    }
}
