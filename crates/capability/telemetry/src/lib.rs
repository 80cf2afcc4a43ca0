//! 追踪、请求 ID 与聚合指标。

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_subscriber::{EnvFilter, fmt};

/// 请求级追踪标识。
#[derive(Debug, Clone)]
pub struct RequestIds {
    pub request_id: String,
    pub trace_id: String,
}

/// 指标快照。
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub pages_fetched: u64,
    pub page_failures: u64,
    pub fetches_truncated: u64,
    pub count_queries: u64,
    pub count_failures: u64,
    pub probes_unknown: u64,
    pub records_normalized: u64,
    pub aggregation_timeouts: u64,
    pub aggregation_latency_ms_total: u64,
    pub aggregation_latency_ms_count: u64,
}

/// 进程级聚合指标。
pub struct TelemetryMetrics {
    pages_fetched: AtomicU64,
    page_failures: AtomicU64,
    fetches_truncated: AtomicU64,
    count_queries: AtomicU64,
    count_failures: AtomicU64,
    probes_unknown: AtomicU64,
    records_normalized: AtomicU64,
    aggregation_timeouts: AtomicU64,
    aggregation_latency_ms_total: AtomicU64,
    aggregation_latency_ms_count: AtomicU64,
}

impl TelemetryMetrics {
    pub fn new() -> Self {
        Self {
            pages_fetched: AtomicU64::new(0),
            page_failures: AtomicU64::new(0),
            fetches_truncated: AtomicU64::new(0),
            count_queries: AtomicU64::new(0),
            count_failures: AtomicU64::new(0),
            probes_unknown: AtomicU64::new(0),
            records_normalized: AtomicU64::new(0),
            aggregation_timeouts: AtomicU64::new(0),
            aggregation_latency_ms_total: AtomicU64::new(0),
            aggregation_latency_ms_count: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            pages_fetched: self.pages_fetched.load(Ordering::Relaxed),
            page_failures: self.page_failures.load(Ordering::Relaxed),
            fetches_truncated: self.fetches_truncated.load(Ordering::Relaxed),
            count_queries: self.count_queries.load(Ordering::Relaxed),
            count_failures: self.count_failures.load(Ordering::Relaxed),
            probes_unknown: self.probes_unknown.load(Ordering::Relaxed),
            records_normalized: self.records_normalized.load(Ordering::Relaxed),
            aggregation_timeouts: self.aggregation_timeouts.load(Ordering::Relaxed),
            aggregation_latency_ms_total: self
                .aggregation_latency_ms_total
                .load(Ordering::Relaxed),
            aggregation_latency_ms_count: self
                .aggregation_latency_ms_count
                .load(Ordering::Relaxed),
        }
    }
}

impl Default for TelemetryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

static METRICS: OnceLock<TelemetryMetrics> = OnceLock::new();

/// 获取全局指标实例。
pub fn metrics() -> &'static TelemetryMetrics {
    METRICS.get_or_init(TelemetryMetrics::new)
}

/// 初始化 tracing（默认 info）。
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).try_init();
}

/// 生成新的 request_id 与 trace_id。
pub fn new_request_ids() -> RequestIds {
    RequestIds {
        request_id: uuid::Uuid::new_v4().to_string(),
        trace_id: uuid::Uuid::new_v4().to_string(),
    }
}

/// 记录成功拉取的分页数。
pub fn record_page_fetched() {
    metrics().pages_fetched.fetch_add(1, Ordering::Relaxed);
}

/// 记录分页请求失败次数。
pub fn record_page_failure() {
    metrics().page_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录触达分页上限而截断的拉取次数。
pub fn record_fetch_truncated() {
    metrics().fetches_truncated.fetch_add(1, Ordering::Relaxed);
}

/// 记录计数查询次数。
pub fn record_count_query() {
    metrics().count_queries.fetch_add(1, Ordering::Relaxed);
}

/// 记录计数查询失败次数。
pub fn record_count_failure() {
    metrics().count_failures.fetch_add(1, Ordering::Relaxed);
}

/// 记录字段探测结果为 Unknown 的次数（空表或采样失败）。
pub fn record_probe_unknown() {
    metrics().probes_unknown.fetch_add(1, Ordering::Relaxed);
}

/// 记录标准化记录数。
pub fn record_records_normalized(count: u64) {
    metrics()
        .records_normalized
        .fetch_add(count, Ordering::Relaxed);
}

/// 记录聚合调用超时次数。
pub fn record_aggregation_timeout() {
    metrics()
        .aggregation_timeouts
        .fetch_add(1, Ordering::Relaxed);
}

/// 记录一次聚合调用耗时（毫秒）。
pub fn record_aggregation_latency_ms(latency_ms: u64) {
    let metrics = metrics();
    metrics
        .aggregation_latency_ms_total
        .fetch_add(latency_ms, Ordering::Relaxed);
    metrics
        .aggregation_latency_ms_count
        .fetch_add(1, Ordering::Relaxed);
}
