//! 船舶网络设备清单与连通状态 HTTP API。

mod handlers;
mod middleware;
mod routes;
mod utils;

use shipnet_aggregate::ServiceAggregator;
use shipnet_analysis::ChatRouter;
use shipnet_config::AppConfig;
use shipnet_storage::{PaginationConfig, RestTableStore, TableStore};
use shipnet_telemetry::init_tracing;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// 应用共享状态。
#[derive(Clone)]
pub struct AppState {
    pub aggregator: ServiceAggregator,
    pub chat: ChatRouter,
    /// 单次聚合调用的整体超时
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TableStore>,
        pagination: PaginationConfig,
        request_timeout: Duration,
    ) -> Self {
        let aggregator = ServiceAggregator::with_pagination(store, pagination);
        Self {
            chat: ChatRouter::new(aggregator.clone()),
            aggregator,
            request_timeout,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在），便于直接 cargo run 启动
    dotenvy::dotenv().ok();
    // 从环境变量加载运行配置
    let config = AppConfig::from_env()?;
    // 初始化结构化日志
    init_tracing();

    // 远端表存储（只读）
    let store: Arc<dyn TableStore> = Arc::new(RestTableStore::connect(
        &config.store_url,
        &config.store_key,
        config.http_timeout_seconds,
    )?);
    let state = AppState::new(
        store,
        PaginationConfig::new(config.page_size, config.max_pages),
        Duration::from_secs(config.request_timeout_seconds),
    );

    let app = routes::create_app(state);

    info!(addr = %config.http_addr, "shipnet api listening");
    let listener = tokio::net::TcpListener::bind(&config.http_addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
