//! 原始行 -> 统一记录。
//!
//! 纯函数：不访问存储、不报错。
//! - 每个统一字段取第一个存在且非 null 的同义列
//! - 数字、布尔按字面渲染为字符串，字符串去除首尾空白
//! - 无匹配列时为空串

use crate::synonyms::synonyms;
use domain::{CanonicalField, CanonicalRecord, RawRecord, SourceTable, TaggedRecord, value_to_string};
use shipnet_telemetry::record_records_normalized;

/// 按候选列顺序取第一个非 null 值。
pub fn first_present(raw: &RawRecord, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .filter_map(|column| raw.get(*column))
        .find_map(value_to_string)
        .map(|value| value.trim().to_string())
}

/// 标准化单行。
pub fn normalize(table: SourceTable, raw: &RawRecord) -> CanonicalRecord {
    let mut record = CanonicalRecord::empty(table);
    for field in CanonicalField::ALL {
        if let Some(value) = first_present(raw, synonyms(table, field)) {
            record.set(field, value);
        }
    }
    record
}

/// 标准化单行并保留原始行。
pub fn tag(table: SourceTable, raw: RawRecord) -> TaggedRecord {
    TaggedRecord::new(normalize(table, &raw), raw)
}

/// 批量标准化。
pub fn normalize_all(table: SourceTable, rows: &[RawRecord]) -> Vec<CanonicalRecord> {
    let records: Vec<CanonicalRecord> = rows.iter().map(|raw| normalize(table, raw)).collect();
    record_records_normalized(records.len() as u64);
    records
}

/// 批量标准化并保留原始行。
pub fn tag_all(table: SourceTable, rows: Vec<RawRecord>) -> Vec<TaggedRecord> {
    let records: Vec<TaggedRecord> = rows.into_iter().map(|raw| tag(table, raw)).collect();
    record_records_normalized(records.len() as u64);
    records
}
