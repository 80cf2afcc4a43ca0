//! 仪表盘汇总。

use crate::combine::{combine, unique_cabins};
use crate::service::ServiceAggregator;
use chrono::{DateTime, Utc};
use domain::{ServiceStatus, ShipTotals, SourceTable};

/// 仪表盘数据。
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSummary {
    pub systems: Vec<(SourceTable, ServiceStatus)>,
    pub totals: ShipTotals,
    pub last_updated: Option<DateTime<Utc>>,
}

impl ServiceAggregator {
    /// 全部系统的状态、全船汇总与最近更新时间。
    pub async fn dashboard(&self) -> DashboardSummary {
        let tables = SourceTable::ALL;
        let (systems, loaded, last_updated) = futures::join!(
            self.statuses(&tables),
            self.load_many(&tables),
            self.last_updated(&tables)
        );
        let cabins = unique_cabins(loaded.iter().flat_map(|(_, records)| records.iter()));
        DashboardSummary {
            totals: combine(&systems, cabins.len()),
            systems,
            last_updated,
        }
    }
}
