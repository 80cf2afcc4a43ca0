//! 通用字段分布引擎。
//!
//! 识别问句所指字段与意图后，在合并记录集上回答：
//! 不同取值个数、取值列表、取值分布、前 N、阈值过滤。
//! 字段或阈值无法确定时返回显式结果，不做猜测。

use crate::intent::{DEFAULT_TOP_N, QueryIntent, ThresholdOp, classify_intent};
use crate::synonyms::detect_field;
use domain::{FieldDistribution, FieldSource, ValueCount, sort_values};
use std::collections::HashMap;

/// 字段问句的回答。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldAnswer {
    UniqueCount {
        field: String,
        unique_values: usize,
        total_records: usize,
    },
    Values {
        field: String,
        values: Vec<String>,
    },
    Distribution(FieldDistribution),
    TopN {
        field: String,
        entries: Vec<ValueCount>,
    },
    Threshold {
        field: String,
        op: ThresholdOp,
        value: usize,
        /// 满足阈值的取值（按取值排序规则排列）
        matches: Vec<ValueCount>,
    },
    /// 问句包含阈值短语但找不到数字
    ThresholdUndetermined { field: String, op: ThresholdOp },
    /// 问句未提及已知字段，或该字段在记录集中没有任何值
    FieldUndetermined,
    /// 提及了字段但意图无法识别
    IntentUnknown { field: String },
}

/// 字段取值分布：按计数降序，计数相同按取值升序。
///
/// `total_records` 为整个记录集的大小；缺失、null 或空串的记录计入总数但不进入分布，
/// 因此各取值计数之和 = `total_records` − 无值记录数。
pub fn field_distribution<R: FieldSource>(field: &str, records: &[R]) -> FieldDistribution {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in records {
        let Some(value) = record.field(field) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    let total_records = records.len();
    let mut distribution: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount { value, count })
        .collect();
    distribution.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    FieldDistribution {
        field: field.to_string(),
        total_records,
        unique_values: distribution.len(),
        distribution,
    }
}

/// 按取值排序规则排列（全数字按数值，否则字典序）。
fn order_by_value(entries: Vec<ValueCount>) -> Vec<ValueCount> {
    let mut values: Vec<String> = entries.iter().map(|entry| entry.value.clone()).collect();
    sort_values(&mut values);
    let mut counts: HashMap<String, usize> = entries
        .into_iter()
        .map(|entry| (entry.value, entry.count))
        .collect();
    values
        .into_iter()
        .filter_map(|value| {
            counts
                .remove(&value)
                .map(|count| ValueCount { value, count })
        })
        .collect()
}

/// 在已确定字段与意图时作答。
pub fn answer_for<R: FieldSource>(field: &str, intent: QueryIntent, records: &[R]) -> FieldAnswer {
    let distribution = field_distribution(field, records);
    let field = field.to_string();
    match intent {
        QueryIntent::Count => FieldAnswer::UniqueCount {
            field,
            unique_values: distribution.unique_values,
            total_records: distribution.total_records,
        },
        QueryIntent::List => {
            let mut values: Vec<String> = distribution
                .distribution
                .into_iter()
                .map(|entry| entry.value)
                .collect();
            sort_values(&mut values);
            FieldAnswer::Values { field, values }
        }
        QueryIntent::Distribution => FieldAnswer::Distribution(distribution),
        QueryIntent::TopN(n) => {
            let n = if n == 0 { DEFAULT_TOP_N } else { n };
            let mut entries = distribution.distribution;
            entries.truncate(n);
            FieldAnswer::TopN { field, entries }
        }
        QueryIntent::Threshold {
            op,
            value: Some(value),
        } => {
            let matches = distribution
                .distribution
                .into_iter()
                .filter(|entry| op.apply(entry.count, value))
                .collect();
            FieldAnswer::Threshold {
                field,
                op,
                value,
                matches: order_by_value(matches),
            }
        }
        QueryIntent::Threshold { op, value: None } => FieldAnswer::ThresholdUndetermined { field, op },
        QueryIntent::Unknown => FieldAnswer::IntentUnknown { field },
    }
}

/// 回答自由文本问句。
pub fn answer<R: FieldSource>(query: &str, records: &[R]) -> FieldAnswer {
    match detect_field(query, records) {
        Some(field) => answer_for(&field, classify_intent(query), records),
        None => FieldAnswer::FieldUndetermined,
    }
}
