//! 舱室设备分布。
//!
//! 按有效舱室号分组（占位值不参与分组），每个舱室按设备数归入 1 / 2 / 3 / ≥4 桶。

use domain::{
    CabinBucket, CabinBuckets, CabinComposition, CabinDistribution, CanonicalField, FieldSource,
    SourceTable, UserClass, sort_cabin_ids,
};
use std::collections::BTreeMap;

/// 按舱室号分组。
pub fn group_by_cabin<R: FieldSource>(records: &[R]) -> BTreeMap<String, Vec<&R>> {
    let mut groups: BTreeMap<String, Vec<&R>> = BTreeMap::new();
    for record in records {
        if let Some(cabin) = record.cabin() {
            groups.entry(cabin.to_string()).or_default().push(record);
        }
    }
    groups
}

/// 计算舱室分布。
pub fn cabin_distribution<R: FieldSource>(
    system: Option<SourceTable>,
    records: &[R],
) -> CabinDistribution {
    let cabin_counts: BTreeMap<String, usize> = group_by_cabin(records)
        .into_iter()
        .map(|(cabin, group)| (cabin, group.len()))
        .collect();
    let mut buckets = CabinBuckets::default();
    for count in cabin_counts.values() {
        if let Some(bucket) = CabinBucket::for_count(*count) {
            buckets.record(bucket);
        }
    }
    CabinDistribution {
        system,
        buckets,
        max_count: cabin_counts.values().copied().max().unwrap_or(0),
        devices_with_cabin: cabin_counts.values().sum(),
        cabin_counts,
    }
}

/// 指定分桶内舱室的用户构成。
///
/// 全部为船员记为 crew_only，全部为乘客记为 pax_only，其余（含无法识别用户）记为 mixed。
pub fn cabin_composition<R: FieldSource>(records: &[R], bucket: CabinBucket) -> CabinComposition {
    let mut composition = CabinComposition::default();
    for group in group_by_cabin(records).values() {
        if !bucket.contains(group.len()) {
            continue;
        }
        let classes: Vec<Option<UserClass>> = group
            .iter()
            .map(|record| {
                record
                    .field(CanonicalField::UserClass.name())
                    .and_then(|value| UserClass::classify(&value))
            })
            .collect();
        if classes.iter().all(|class| *class == Some(UserClass::Crew)) {
            composition.crew_only += 1;
        } else if classes.iter().all(|class| *class == Some(UserClass::Pax)) {
            composition.pax_only += 1;
        } else {
            composition.mixed += 1;
        }
    }
    composition
}

fn cabins_where(distribution: &CabinDistribution, predicate: impl Fn(usize) -> bool) -> Vec<String> {
    let mut cabins: Vec<String> = distribution
        .cabin_counts
        .iter()
        .filter(|(_, count)| predicate(**count))
        .map(|(cabin, _)| cabin.clone())
        .collect();
    sort_cabin_ids(&mut cabins);
    cabins
}

/// 设备数恰好为 n 的舱室。
pub fn cabins_with_exactly(distribution: &CabinDistribution, n: usize) -> Vec<String> {
    cabins_where(distribution, |count| count == n)
}

/// 设备数多于 n 的舱室。
pub fn cabins_with_more_than(distribution: &CabinDistribution, n: usize) -> Vec<String> {
    cabins_where(distribution, |count| count > n)
}

/// 设备数少于 n 的舱室。
pub fn cabins_with_fewer_than(distribution: &CabinDistribution, n: usize) -> Vec<String> {
    cabins_where(distribution, |count| count < n)
}

/// 设备数最多的前 n 个舱室（同数按舱室号排序）。
pub fn top_cabins(distribution: &CabinDistribution, n: usize) -> Vec<(String, usize)> {
    let mut ranked: Vec<(String, usize)> = distribution
        .cabin_counts
        .iter()
        .map(|(cabin, count)| (cabin.clone(), *count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
