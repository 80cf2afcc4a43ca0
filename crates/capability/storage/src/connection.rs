//! 远端存储连接管理
//!
//! 提供 HTTP 客户端初始化功能：
//! - build_client：携带访问密钥与超时的 reqwest 客户端
//!
//! 设计原则：
//! - 访问密钥同时放入 `apikey` 与 `Authorization: Bearer` 头
//! - 单次请求超时由配置决定

use crate::error::StorageError;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use std::time::Duration;

/// 建立远端存储 HTTP 客户端
///
/// # 参数
/// - `store_key`：访问密钥
/// - `timeout_seconds`：单次请求超时（秒）
///
/// # 返回
/// - `Result<Client, StorageError>`：客户端或错误
pub fn build_client(store_key: &str, timeout_seconds: u64) -> Result<Client, StorageError> {
    let mut headers = HeaderMap::new();
    let api_key =
        HeaderValue::from_str(store_key).map_err(|err| StorageError::new(err.to_string()))?;
    let bearer = HeaderValue::from_str(&format!("Bearer {store_key}"))
        .map_err(|err| StorageError::new(err.to_string()))?;
    headers.insert("apikey", api_key);
    headers.insert(AUTHORIZATION, bearer);

    let client = Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(timeout_seconds.max(1)))
        .build()?;
    Ok(client)
}
