//! 全船汇总。

use domain::{FieldSource, ServiceStatus, ShipTotals, SourceTable};
use std::collections::BTreeSet;

/// 全部记录中有效舱室号的并集（同一舱室在多个系统中只计一次）。
pub fn unique_cabins<'a, R>(records: impl IntoIterator<Item = &'a R>) -> BTreeSet<String>
where
    R: FieldSource + 'a,
{
    records
        .into_iter()
        .filter_map(|record| record.cabin())
        .map(str::to_string)
        .collect()
}

/// 汇总各系统状态：合计、在线、离线逐系统求和。
pub fn combine(statuses: &[(SourceTable, ServiceStatus)], unique_cabins: usize) -> ShipTotals {
    statuses
        .iter()
        .fold(
            ShipTotals {
                unique_cabins,
                ..ShipTotals::default()
            },
            |mut totals, (_, status)| {
                totals.total += status.total.total;
                totals.online += status.online.total;
                totals.offline += status.offline.total;
                totals
            },
        )
}
