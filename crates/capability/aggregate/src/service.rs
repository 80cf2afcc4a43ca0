//! 服务聚合：单个系统的在线/离线 × 船员/乘客 × 舱内/公共区统计。
//!
//! 计数模式（大部分表）：
//! 1. 取一行样本，探测 user / inside_cabin / 在线状态列
//! 2. 只发计数查询：船员、乘客（user 子串匹配），叠加 inside_cabin 属于舱内取值得到舱内象限，
//!    叠加在线列 = ONLINE 得到在线计数
//! 3. 公共区 = 合计 − 舱内；离线 = 合计 − 在线（逐象限）
//! 4. 有显式离线取值的表（WiFi），离线计数非 0 时直接采用
//!
//! 扫描模式（分类列为自由文本的表）：全量分页拉取，标准化后逐行分类。
//!
//! 任一计数失败只影响对应象限（记为 0），不会让整个状态失败。

use crate::rules::{AggregationMode, TableRules};
use domain::{Area, CountsByUserType, RawRecord, ServiceStatus, SourceTable, UserClass};
use futures::future::join_all;
use shipnet_normalize::normalize;
use shipnet_storage::{Filter, PaginationConfig, TableSample, TableStore, fetch_table};
use shipnet_telemetry::{record_count_failure, record_count_query};
use std::sync::Arc;
use tracing::{debug, warn};

/// 服务聚合器。
///
/// 持有请求作用域的存储句柄，每次调用都重新读取存储，不做跨调用缓存。
#[derive(Clone)]
pub struct ServiceAggregator {
    pub(crate) store: Arc<dyn TableStore>,
    pub(crate) pagination: PaginationConfig,
}

impl ServiceAggregator {
    pub fn new(store: Arc<dyn TableStore>) -> Self {
        Self::with_pagination(store, PaginationConfig::default())
    }

    pub fn with_pagination(store: Arc<dyn TableStore>, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    pub fn pagination(&self) -> &PaginationConfig {
        &self.pagination
    }

    /// 单个系统的状态。
    pub async fn status(&self, table: SourceTable) -> ServiceStatus {
        let rules = TableRules::for_table(table);
        match rules.mode {
            AggregationMode::Count => self.count_status(&rules).await,
            AggregationMode::Scan => self.scan_status(&rules).await,
        }
    }

    /// 多个系统并发聚合，按输入顺序返回。
    pub async fn statuses(&self, tables: &[SourceTable]) -> Vec<(SourceTable, ServiceStatus)> {
        let results = join_all(tables.iter().map(|table| self.status(*table))).await;
        tables.iter().copied().zip(results).collect()
    }

    async fn count_status(&self, rules: &TableRules) -> ServiceStatus {
        let table = rules.table.table_name();
        let sample = TableSample::load(self.store.as_ref(), table).await;
        if sample.row().is_none() {
            debug!(table, "no sample row, status is zero");
            return ServiceStatus::zero();
        }

        let counter = Counter {
            store: self.store.as_ref(),
            table,
            cabin_flags: rules.cabin_flag_values(),
        };
        let records = counter.count(&[]).await;
        let Some(user_field) = sample.first_present(rules.user_fields()) else {
            warn!(table, "no user column, crew/pax breakdown unavailable");
            return ServiceStatus {
                records,
                ..ServiceStatus::zero()
            };
        };
        let area_field = sample.first_present(rules.area_fields());
        let area_field = area_field.as_deref();

        let total = counter.split(&user_field, area_field, None).await;
        let Some(online_field) = sample.first_present(rules.online_fields) else {
            debug!(table, "no online column, every device counted offline");
            return ServiceStatus::from_online(total, CountsByUserType::default(), records);
        };

        let online = counter
            .split(
                &user_field,
                area_field,
                Some(Filter::eq(&online_field, rules.online_value)),
            )
            .await;
        let explicit_offline = match rules.offline_value {
            Some(offline_value) => Some(
                counter
                    .split(
                        &user_field,
                        area_field,
                        Some(Filter::eq(&online_field, offline_value)),
                    )
                    .await,
            ),
            None => None,
        };
        resolve_status(rules.table, total, online, explicit_offline, records)
    }

    async fn scan_status(&self, rules: &TableRules) -> ServiceStatus {
        let outcome = fetch_table(
            self.store.as_ref(),
            rules.table.table_name(),
            &self.pagination,
        )
        .await;
        classify_rows(rules, &outcome.rows)
    }
}

/// 合成最终状态：显式离线计数非 0 时优先，否则 `total − online`。
fn resolve_status(
    table: SourceTable,
    total: CountsByUserType,
    online: CountsByUserType,
    explicit_offline: Option<CountsByUserType>,
    records: u64,
) -> ServiceStatus {
    match explicit_offline {
        Some(offline) if offline.total > 0 => {
            let status = ServiceStatus::from_parts(online, offline, records);
            if status.total.total != total.total {
                // 状态既非在线也非离线的行导致两种口径不一致
                warn!(
                    table = %table,
                    explicit_total = status.total.total,
                    counted_total = total.total,
                    "explicit offline count disagrees with total minus online"
                );
            }
            status
        }
        _ => ServiceStatus::from_online(total, online, records),
    }
}

struct Counter<'a> {
    store: &'a dyn TableStore,
    table: &'a str,
    cabin_flags: Vec<String>,
}

impl Counter<'_> {
    async fn count(&self, filters: &[Filter]) -> u64 {
        record_count_query();
        match self.store.count(self.table, filters).await {
            Ok(count) => count,
            Err(err) => {
                record_count_failure();
                warn!(
                    table = self.table,
                    error = %err,
                    "count query failed, quadrant treated as zero"
                );
                0
            }
        }
    }

    /// 船员/乘客计数；有区域列时同时计算舱内象限。
    async fn split(
        &self,
        user_field: &str,
        area_field: Option<&str>,
        extra: Option<Filter>,
    ) -> CountsByUserType {
        let base = |class: UserClass| {
            let mut filters = vec![Filter::contains(user_field, class.pattern())];
            filters.extend(extra.clone());
            filters
        };
        let mut sets = vec![base(UserClass::Crew), base(UserClass::Pax)];
        if let Some(area_field) = area_field {
            for class in [UserClass::Crew, UserClass::Pax] {
                let mut filters = base(class);
                filters.push(Filter::one_of(area_field, self.cabin_flags.clone()));
                sets.push(filters);
            }
        }
        let counts = join_all(sets.iter().map(|filters| self.count(filters))).await;
        match counts.as_slice() {
            [crew, pax, cabin_crew, cabin_pax] => {
                CountsByUserType::from_cabin_split(*crew, *pax, *cabin_crew, *cabin_pax)
            }
            [crew, pax] => CountsByUserType::without_area(*crew, *pax),
            _ => CountsByUserType::default(),
        }
    }
}

#[derive(Debug, Default)]
struct Tally {
    crew: u64,
    pax: u64,
    cabin_crew: u64,
    cabin_pax: u64,
}

impl Tally {
    fn add(&mut self, user: UserClass, in_cabin: bool) {
        match (user, in_cabin) {
            (UserClass::Crew, true) => {
                self.crew += 1;
                self.cabin_crew += 1;
            }
            (UserClass::Crew, false) => self.crew += 1,
            (UserClass::Pax, true) => {
                self.pax += 1;
                self.cabin_pax += 1;
            }
            (UserClass::Pax, false) => self.pax += 1,
        }
    }

    fn counts(&self, has_area: bool) -> CountsByUserType {
        if has_area {
            CountsByUserType::from_cabin_split(self.crew, self.pax, self.cabin_crew, self.cabin_pax)
        } else {
            CountsByUserType::without_area(self.crew, self.pax)
        }
    }
}

/// 在内存中对原始行分类（扫描模式）。
///
/// 与计数模式口径一致：user 无法识别的行只计入 `records`；
/// inside_cabin 非舱内取值（含无法识别）记为公共区。
pub fn classify_rows(rules: &TableRules, rows: &[RawRecord]) -> ServiceStatus {
    let mut total = Tally::default();
    let mut online = Tally::default();
    let mut offline = Tally::default();
    let mut has_area = false;

    for raw in rows {
        let record = normalize(rules.table, raw);
        let Some(user) = record.user() else {
            continue;
        };
        let flag = rules.area_flag(&record);
        has_area |= flag.is_some();
        let in_cabin = flag == Some(Area::Cabin);
        total.add(user, in_cabin);
        if rules.online_state(raw) == Some(true) {
            online.add(user, in_cabin);
        }
        if rules.is_explicit_offline(raw) {
            offline.add(user, in_cabin);
        }
    }

    let explicit_offline = rules.offline_value.map(|_| offline.counts(has_area));
    resolve_status(
        rules.table,
        total.counts(has_area),
        online.counts(has_area),
        explicit_offline,
        rows.len() as u64,
    )
}
