//! 舱内 / 公共区线缆清单。
//!
//! 输出标准化后的全部行，并按线缆号标注离线状态：
//! 同一线缆号下任一设备非在线，则该线缆号的所有行都标记为离线。

use crate::rules::TableRules;
use crate::service::ServiceAggregator;
use domain::{Area, CanonicalRecord, SourceTable, TaggedRecord};
use std::collections::HashSet;

/// 清单行。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CableRow {
    pub record: CanonicalRecord,
    pub offline: bool,
}

/// 记录所属区域：优先 inside_cabin 标志（与状态统计同一套取值），其次是否有有效舱室号。
pub fn record_area(rules: &TableRules, record: &CanonicalRecord) -> Area {
    rules.area_flag(record).unwrap_or(if record.valid_cabin().is_some() {
        Area::Cabin
    } else {
        Area::Public
    })
}

/// 按区域筛选并标注离线状态。
pub fn annotate_cables(systems: Vec<(SourceTable, Vec<TaggedRecord>)>, area: Area) -> Vec<CableRow> {
    let mut offline_cables: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();
    for (table, records) in systems {
        let rules = TableRules::for_table(table);
        for tagged in records {
            let offline = rules.online_state(&tagged.raw) == Some(false);
            if offline && !tagged.canonical.cable_id.is_empty() {
                offline_cables.insert(tagged.canonical.cable_id.clone());
            }
            if record_area(&rules, &tagged.canonical) == area {
                rows.push(CableRow {
                    record: tagged.canonical,
                    offline,
                });
            }
        }
    }
    for row in &mut rows {
        if offline_cables.contains(&row.record.cable_id) {
            row.offline = true;
        }
    }
    rows
}

impl ServiceAggregator {
    pub async fn cable_list(&self, systems: &[SourceTable], area: Area) -> Vec<CableRow> {
        annotate_cables(self.load_many(systems).await, area)
    }
}
