//! 聚合统计结构。
//!
//! - CountsByUserType：船员/乘客 × 舱内/公共区 四象限计数
//! - ServiceStatus：在线/离线/合计
//! - CabinDistribution：每舱设备数直方图
//! - FieldDistribution：字段值分布
//! - ShipTotals：全船汇总

use crate::table::SourceTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Add;

/// 按用户类别与区域拆分的计数。
///
/// 恒有 `total = crew + pax`；区域分类可用时另有
/// `total = cabin_crew + cabin_pax + public_crew + public_pax`。
/// 区域字段缺失的表四象限全为 0。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsByUserType {
    pub crew: u64,
    pub pax: u64,
    pub total: u64,
    pub cabin_crew: u64,
    pub cabin_pax: u64,
    pub public_crew: u64,
    pub public_pax: u64,
}

impl CountsByUserType {
    /// 由四象限构造，汇总字段由象限推导。
    pub fn from_quadrants(cabin_crew: u64, public_crew: u64, cabin_pax: u64, public_pax: u64) -> Self {
        let crew = cabin_crew + public_crew;
        let pax = cabin_pax + public_pax;
        Self {
            crew,
            pax,
            total: crew + pax,
            cabin_crew,
            cabin_pax,
            public_crew,
            public_pax,
        }
    }

    /// 无区域分类时构造（四象限为 0）。
    pub fn without_area(crew: u64, pax: u64) -> Self {
        Self {
            crew,
            pax,
            total: crew + pax,
            ..Self::default()
        }
    }

    /// 由船员/乘客合计与舱内计数推导；公共区 = 合计 − 舱内。
    pub fn from_cabin_split(crew: u64, pax: u64, cabin_crew: u64, cabin_pax: u64) -> Self {
        let cabin_crew = cabin_crew.min(crew);
        let cabin_pax = cabin_pax.min(pax);
        Self::from_quadrants(cabin_crew, crew - cabin_crew, cabin_pax, pax - cabin_pax)
    }

    fn quadrant_sum(&self) -> u64 {
        self.cabin_crew + self.cabin_pax + self.public_crew + self.public_pax
    }

    /// 四象限是否完整覆盖合计（空计数视为覆盖）。
    pub fn has_area(&self) -> bool {
        self.quadrant_sum() == self.total
    }

    /// 校验汇总关系。
    pub fn is_consistent(&self) -> bool {
        if self.total != self.crew + self.pax {
            return false;
        }
        if self.quadrant_sum() == 0 {
            return true;
        }
        self.cabin_crew + self.public_crew == self.crew
            && self.cabin_pax + self.public_pax == self.pax
    }

    /// 逐象限截断到不超过 `bound`。
    pub fn clamp_to(&self, bound: &Self) -> Self {
        if self.has_area() && bound.has_area() {
            Self::from_quadrants(
                self.cabin_crew.min(bound.cabin_crew),
                self.public_crew.min(bound.public_crew),
                self.cabin_pax.min(bound.cabin_pax),
                self.public_pax.min(bound.public_pax),
            )
        } else {
            Self::without_area(self.crew.min(bound.crew), self.pax.min(bound.pax))
        }
    }

    /// 逐象限饱和减法。
    pub fn saturating_sub(&self, other: &Self) -> Self {
        if self.has_area() && other.has_area() {
            Self::from_quadrants(
                self.cabin_crew.saturating_sub(other.cabin_crew),
                self.public_crew.saturating_sub(other.public_crew),
                self.cabin_pax.saturating_sub(other.cabin_pax),
                self.public_pax.saturating_sub(other.public_pax),
            )
        } else {
            Self::without_area(
                self.crew.saturating_sub(other.crew),
                self.pax.saturating_sub(other.pax),
            )
        }
    }
}

impl Add for CountsByUserType {
    type Output = CountsByUserType;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            crew: self.crew + rhs.crew,
            pax: self.pax + rhs.pax,
            total: self.total + rhs.total,
            cabin_crew: self.cabin_crew + rhs.cabin_crew,
            cabin_pax: self.cabin_pax + rhs.cabin_pax,
            public_crew: self.public_crew + rhs.public_crew,
            public_pax: self.public_pax + rhs.public_pax,
        }
    }
}

/// 单个系统的在线状态。
///
/// 逐象限满足 `online + offline = total`。`records` 为表的原始行数，
/// 可能大于 `total.total`（user 字段既非 crew 也非 pax 的行不计入）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub online: CountsByUserType,
    pub offline: CountsByUserType,
    pub total: CountsByUserType,
    pub records: u64,
}

impl ServiceStatus {
    /// 全 0 状态（整表失败时的降级结果）。
    pub fn zero() -> Self {
        Self::default()
    }

    /// 离线由 `total − online` 推导。
    pub fn from_online(total: CountsByUserType, online: CountsByUserType, records: u64) -> Self {
        let online = online.clamp_to(&total);
        let offline = total.saturating_sub(&online);
        Self {
            online,
            offline,
            total,
            records,
        }
    }

    /// 在线与离线均有显式计数时，合计由两者相加得到。
    pub fn from_parts(online: CountsByUserType, offline: CountsByUserType, records: u64) -> Self {
        Self {
            online,
            offline,
            total: online + offline,
            records,
        }
    }

    pub fn is_consistent(&self) -> bool {
        self.online.is_consistent()
            && self.offline.is_consistent()
            && self.total.is_consistent()
            && self.online + self.offline == self.total
    }
}

/// 每舱设备数分桶。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CabinBucket {
    One,
    Two,
    Three,
    FourPlus,
}

impl CabinBucket {
    /// 设备数为 0 时无桶。
    pub fn for_count(count: usize) -> Option<Self> {
        match count {
            0 => None,
            1 => Some(CabinBucket::One),
            2 => Some(CabinBucket::Two),
            3 => Some(CabinBucket::Three),
            _ => Some(CabinBucket::FourPlus),
        }
    }

    pub fn contains(self, count: usize) -> bool {
        CabinBucket::for_count(count) == Some(self)
    }
}

/// 分桶计数（每桶为舱室数）。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinBuckets {
    pub one: usize,
    pub two: usize,
    pub three: usize,
    pub four_plus: usize,
}

impl CabinBuckets {
    pub fn record(&mut self, bucket: CabinBucket) {
        match bucket {
            CabinBucket::One => self.one += 1,
            CabinBucket::Two => self.two += 1,
            CabinBucket::Three => self.three += 1,
            CabinBucket::FourPlus => self.four_plus += 1,
        }
    }

    pub fn get(&self, bucket: CabinBucket) -> usize {
        match bucket {
            CabinBucket::One => self.one,
            CabinBucket::Two => self.two,
            CabinBucket::Three => self.three,
            CabinBucket::FourPlus => self.four_plus,
        }
    }

    pub fn cabins(&self) -> usize {
        self.one + self.two + self.three + self.four_plus
    }
}

/// 单个系统的舱室设备分布。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinDistribution {
    pub system: Option<SourceTable>,
    pub buckets: CabinBuckets,
    pub cabin_counts: BTreeMap<String, usize>,
    pub max_count: usize,
    /// 带有效舱室号的设备数。
    pub devices_with_cabin: usize,
}

/// 某一分桶内舱室的用户构成。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CabinComposition {
    pub crew_only: usize,
    pub pax_only: usize,
    pub mixed: usize,
}

/// 字段值与记录数。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// 字段值分布（按计数降序，计数相同按值升序）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDistribution {
    pub field: String,
    pub total_records: usize,
    pub unique_values: usize,
    pub distribution: Vec<ValueCount>,
}

/// 全船汇总。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipTotals {
    pub total: u64,
    pub online: u64,
    pub offline: u64,
    pub unique_cabins: usize,
}
