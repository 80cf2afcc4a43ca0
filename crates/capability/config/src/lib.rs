//! 应用运行配置加载。

use std::env;

/// 远端存储单次请求的行数上限。
pub const STORE_MAX_ROWS_PER_REQUEST: usize = 1000;

/// 配置加载错误。
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required env: {0}")]
    Missing(String),
    #[error("invalid value for {0}: {1}")]
    Invalid(String, String),
}

/// 应用运行配置。
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http_addr: String,
    pub store_url: String,
    pub store_key: String,
    pub page_size: usize,
    pub max_pages: usize,
    pub http_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
}

impl AppConfig {
    /// 从环境变量读取配置。
    ///
    /// 存储 URL 与访问密钥缺失属于启动期致命错误。
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_url = read_required("SHIPNET_STORE_URL")?;
        let store_key = read_required("SHIPNET_STORE_KEY")?;
        let http_addr =
            env::var("SHIPNET_HTTP_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let page_size =
            read_usize_with_default("SHIPNET_PAGE_SIZE", STORE_MAX_ROWS_PER_REQUEST)?;
        if page_size == 0 || page_size > STORE_MAX_ROWS_PER_REQUEST {
            return Err(ConfigError::Invalid(
                "SHIPNET_PAGE_SIZE".to_string(),
                page_size.to_string(),
            ));
        }
        let max_pages = read_usize_with_default("SHIPNET_MAX_PAGES", 20)?;
        if max_pages == 0 {
            return Err(ConfigError::Invalid(
                "SHIPNET_MAX_PAGES".to_string(),
                max_pages.to_string(),
            ));
        }
        let http_timeout_seconds = read_u64_with_default("SHIPNET_HTTP_TIMEOUT_SECONDS", 30)?;
        let request_timeout_seconds =
            read_u64_with_default("SHIPNET_REQUEST_TIMEOUT_SECONDS", 60)?;

        Ok(Self {
            http_addr,
            store_url: store_url.trim_end_matches('/').to_string(),
            store_key,
            page_size,
            max_pages,
            http_timeout_seconds,
            request_timeout_seconds,
        })
    }
}

fn read_required(key: &str) -> Result<String, ConfigError> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(ConfigError::Missing(key.to_string())),
    }
}

fn read_usize_with_default(key: &str, default: usize) -> Result<usize, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<usize>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}

fn read_u64_with_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    let value = match env::var(key) {
        Ok(value) => value,
        Err(_) => return Ok(default),
    };
    value
        .parse::<u64>()
        .map_err(|_| ConfigError::Invalid(key.to_string(), value))
}
