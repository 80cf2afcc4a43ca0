//! 问句字段识别用的同义词表。
//!
//! 按顺序匹配：更具体的短语排在前面（"cabin type" 在 "cabin" 之前）。
//! 命中后在记录集中按候选列顺序取第一个实际存在的列。

use domain::FieldSource;

/// 一组问句关键字及其候选字段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSynonym {
    pub keywords: &'static [&'static str],
    pub fields: &'static [&'static str],
}

impl FieldSynonym {
    /// 是否为舱室分组本身（由舱室分布处理）。
    pub fn is_cabin(&self) -> bool {
        self.fields == CABIN.fields
    }
}

const CABIN: FieldSynonym = FieldSynonym {
    keywords: &["cabin", "cabins", "stateroom", "room"],
    fields: &["cabin"],
};

/// 同义词表（有序）。
pub const FIELD_SYNONYMS: &[FieldSynonym] = &[
    FieldSynonym {
        keywords: &["rdp"],
        fields: &["rdp_yard", "rdp", "rdp_name"],
    },
    FieldSynonym {
        keywords: &["fire zone", "fire_zone", "firezone", "fz", "mvz"],
        fields: &["fire_zone"],
    },
    FieldSynonym {
        keywords: &["cabin type", "cabin_type", "cabin category"],
        fields: &["cabin_type"],
    },
    FieldSynonym {
        keywords: &["origin switch", "origin_switch", "uplink"],
        fields: &["origin_switch"],
    },
    FieldSynonym {
        keywords: &["device type", "device_type", "vendor", "model", "manufacturer"],
        fields: &["device_type"],
    },
    FieldSynonym {
        keywords: &["device name", "device_name", "hostname"],
        fields: &["device_name"],
    },
    FieldSynonym {
        keywords: &["mac"],
        fields: &["mac_address"],
    },
    FieldSynonym {
        keywords: &["cable id", "cable_id", "cable number", "cable"],
        fields: &["cable_id"],
    },
    FieldSynonym {
        keywords: &["deck"],
        fields: &["deck"],
    },
    FieldSynonym {
        keywords: &["remark", "remarks", "comment"],
        fields: &["remarks"],
    },
    FieldSynonym {
        keywords: &["user type", "user_type", "user class"],
        fields: &["user_class"],
    },
    CABIN,
];

/// 问句中是否出现关键字（按词边界匹配，允许复数 s；"mac" 不会命中 "machine"）。
pub(crate) fn mentions(query: &str, keyword: &str) -> bool {
    let boundary = |ch: Option<char>| ch.is_none_or(|ch| !ch.is_ascii_alphanumeric() && ch != '_');
    query.match_indices(keyword).any(|(start, matched)| {
        let before = query[..start].chars().next_back();
        let tail = &query[start + matched.len()..];
        let tail = tail.strip_prefix('s').unwrap_or(tail);
        boundary(before) && boundary(tail.chars().next())
    })
}

/// 第一个被问句提及的同义词组。
pub fn match_synonym(query: &str) -> Option<&'static FieldSynonym> {
    let query = query.to_ascii_lowercase();
    FIELD_SYNONYMS.iter().find(|synonym| {
        synonym
            .keywords
            .iter()
            .chain(synonym.fields.iter())
            .any(|keyword| mentions(&query, keyword))
    })
}

/// 在记录集中选出候选字段里第一个有值的列。
pub fn resolve_field<R: FieldSource>(synonym: &FieldSynonym, records: &[R]) -> Option<String> {
    synonym
        .fields
        .iter()
        .find(|field| {
            records
                .iter()
                .any(|record| record.field(field).is_some_and(|value| !value.trim().is_empty()))
        })
        .map(|field| field.to_string())
}

/// 识别问句所指的字段。
pub fn detect_field<R: FieldSource>(query: &str, records: &[R]) -> Option<String> {
    match_synonym(query).and_then(|synonym| resolve_field(synonym, records))
}
