//! 路由定义
//!
//! 集中管理所有 API 路由，将路径映射到对应的 handlers：
//! - 健康检查：/health
//! - 指标：/metrics
//! - 仪表盘：/api/dashboard/summary
//! - 表概览：/api/tables
//! - 系统状态与舱室分布：/api/systems/{system}/*
//! - 线缆清单：/api/cables/{cabin,public}
//! - 问答：/api/chat

use crate::AppState;
use crate::handlers::*;
use crate::middleware::request_context;
use crate::utils::response::not_found_error;
use axum::{
    Router, middleware,
    routing::{get, post},
};

/// 创建 API 路由
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .route("/dashboard/summary", get(dashboard_summary))
        .route("/tables", get(table_overview))
        .route("/systems/:system/status", get(system_status))
        .route("/systems/:system/cabins", get(system_cabins))
        .route("/cables/cabin", get(cabin_cables))
        .route("/cables/public", get(public_cables))
        .route("/chat", post(chat))
}

/// 完整应用：业务路由挂在 /api 下，并注入 request_id/trace_id
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(get_metrics))
        .nest("/api", create_api_router())
        .fallback(|| async { not_found_error() })
        .with_state(state)
        .layer(middleware::from_fn(request_context))
}

#[cfg(test)]
mod tests {
    use super::create_app;
    use crate::AppState;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use bytes::Bytes;
    use domain::RawRecord;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use shipnet_storage::{
        Filter, InMemoryTableStore, PaginationConfig, RowQuery, StorageError, TableStore,
    };
    use std::sync::Arc;
    use std::time::Duration;
    use tower::ServiceExt;

    fn seeded_store() -> InMemoryTableStore {
        let store = InMemoryTableStore::new();
        store.insert_json(
            "wifi",
            json!([
                { "user": "pax", "primary_cabin__rccl_": "0128", "online__at_once_": "ONLINE",
                  "cable_id": "C-1", "updated_at": "2024-01-01T00:00:00Z" },
                { "user": "crew", "primary_cabin__rccl_": "-", "online__at_once_": "OFFLINE",
                  "cable_id": "C-2", "updated_at": "2024-02-01T00:00:00Z" },
            ]),
        );
        store.insert_json(
            "pbx",
            json!([
                { "user": "pax", "primary_cabin__rccl_": "0128", "online_status": "OFFLINE",
                  "cable_id": "C-1", "created_at": "2024-05-01T12:00:00+00:00" },
                { "user": "pax", "primary_cabin__rccl_": "0200", "online_status": "ONLINE",
                  "cable_id": "C-3", "created_at": null },
            ]),
        );
        store
    }

    fn app_with(store: Arc<dyn TableStore>, timeout: Duration) -> Router {
        create_app(AppState::new(store, PaginationConfig::default(), timeout))
    }

    fn app() -> Router {
        app_with(Arc::new(seeded_store()), Duration::from_secs(5))
    }

    async fn body_json(body: Body) -> Value {
        let bytes: Bytes = body.collect().await.expect("body").to_bytes();
        serde_json::from_slice(&bytes).expect("json body")
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        (status, body_json(response.into_body()).await)
    }

    async fn post_chat(app: Router, payload: Value) -> (StatusCode, Value) {
        let request = Request::post("/api/chat")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .expect("request");
        let response = app.oneshot(request).await.expect("response");
        let status = response.status();
        (status, body_json(response.into_body()).await)
    }

    #[tokio::test]
    async fn health_sets_request_ids() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).expect("request"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert!(response.headers().contains_key("x-trace-id"));
        assert_eq!(body_json(response.into_body()).await, json!({ "ok": true }));
    }

    #[tokio::test]
    async fn dashboard_summary_reports_totals() {
        let (status, body) = get(app(), "/api/dashboard/summary").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], json!(true));
        let data = &body["data"];
        assert_eq!(data["systems"].as_array().map(Vec::len), Some(6));
        assert_eq!(data["totals"]["total"], json!(4));
        assert_eq!(data["totals"]["online"], json!(2));
        assert_eq!(data["totals"]["offline"], json!(2));
        assert_eq!(data["totals"]["uniqueCabins"], json!(2));
        assert_eq!(data["lastUpdated"], json!("2024-05-01T12:00:00+00:00"));
    }

    #[tokio::test]
    async fn system_status_splits_users() {
        let (status, body) = get(app(), "/api/systems/wifi/status").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["system"], json!("wifi"));
        assert_eq!(data["displayName"], json!("WiFi"));
        assert_eq!(data["total"]["total"], json!(2));
        assert_eq!(data["online"]["pax"], json!(1));
        assert_eq!(data["offline"]["crew"], json!(1));
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (status, body) = get(app(), "/api/nothing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], json!("RESOURCE.NOT_FOUND"));
    }

    #[tokio::test]
    async fn unknown_system_is_bad_request() {
        let (status, body) = get(app(), "/api/systems/radar/status").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], json!(false));
        assert_eq!(body["error"]["code"], json!("INVALID.REQUEST"));
    }

    #[tokio::test]
    async fn system_cabins_skips_placeholders() {
        let (status, body) = get(app(), "/api/systems/pbx/cabins").await;
        assert_eq!(status, StatusCode::OK);
        let distribution = &body["data"]["distribution"];
        assert_eq!(distribution["buckets"]["one"], json!(2));
        assert_eq!(distribution["cabinCounts"]["0128"], json!(1));
        assert_eq!(body["data"]["composition"].as_array().map(Vec::len), Some(4));
    }

    #[tokio::test]
    async fn public_cables_flag_offline_ids() {
        let (status, body) = get(app(), "/api/cables/public?systems=wifi").await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["area"], json!("public"));
        assert_eq!(data["systems"], json!(["wifi"]));
        assert_eq!(data["total"], json!(1));
        assert_eq!(data["offline"], json!(1));
        assert_eq!(data["rows"][0]["cableId"], json!("C-2"));
    }

    #[tokio::test]
    async fn cabin_cables_share_offline_state_across_systems() {
        let (status, body) = get(app(), "/api/cables/cabin").await;
        assert_eq!(status, StatusCode::OK);
        let rows = body["data"]["rows"].as_array().cloned().unwrap_or_default();
        let c1: Vec<&Value> = rows.iter().filter(|row| row["cableId"] == json!("C-1")).collect();
        assert_eq!(c1.len(), 2);
        assert!(c1.iter().all(|row| row["offline"] == json!(true)));
    }

    #[tokio::test]
    async fn invalid_systems_query_is_bad_request() {
        let (status, _) = get(app(), "/api/cables/cabin?systems=wifi,radar").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn table_overview_returns_samples() {
        let (status, body) = get(app(), "/api/tables?table=wifi&sampleSize=1").await;
        assert_eq!(status, StatusCode::OK);
        let overview = &body["data"][0];
        assert_eq!(overview["table"], json!("wifi"));
        assert_eq!(overview["totalCount"], json!(2));
        assert_eq!(overview["sampleRows"].as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn chat_answers_cabin_threshold() {
        let (status, body) = post_chat(
            app(),
            json!({ "message": "Which cabins have exactly 1 device?", "system": "pbx" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["kind"], json!("cabins"));
        assert_eq!(data["systems"].as_array().map(Vec::len), Some(1));
        assert_eq!(data["systems"][0]["system"], json!("pbx"));
        assert_eq!(data["systems"][0]["answer"]["result"], json!("threshold"));
        assert_eq!(data["systems"][0]["answer"]["cabins"], json!(["0128", "0200"]));
    }

    #[tokio::test]
    async fn chat_status_question() {
        let (status, body) = post_chat(app(), json!({ "message": "how many phones are online" })).await;
        assert_eq!(status, StatusCode::OK);
        let data = &body["data"];
        assert_eq!(data["kind"], json!("status"));
        assert_eq!(data["systems"][0]["system"], json!("pbx"));
        assert_eq!(data["totals"]["online"], json!(1));
    }

    #[tokio::test]
    async fn chat_unrecognised_question_is_unknown() {
        let (status, body) = post_chat(app(), json!({ "message": "hello there" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["kind"], json!("unknown"));
    }

    #[tokio::test]
    async fn chat_rejects_blank_message() {
        let (status, body) = post_chat(app(), json!({ "message": "   " })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], json!("INVALID.REQUEST"));
    }

    struct SlowStore;

    #[async_trait::async_trait]
    impl TableStore for SlowStore {
        async fn count(&self, _table: &str, _filters: &[Filter]) -> Result<u64, StorageError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(0)
        }

        async fn fetch_range(
            &self,
            _query: &RowQuery,
            _offset: usize,
            _limit: usize,
        ) -> Result<Vec<RawRecord>, StorageError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn slow_store_times_out() {
        let app = app_with(Arc::new(SlowStore), Duration::from_millis(20));
        let (status, body) = get(app, "/api/systems/tv/status").await;
        assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(body["error"]["code"], json!("INTERNAL.TIMEOUT"));
    }
}
