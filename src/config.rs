use std::{env, path::PathBuf, time::Duration};

use anyhow::Context;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(2000);
pub const DEFAULT_DELIVERY_FEE: i64 = 15_000;
pub const DEFAULT_SESSION_STORE_PATH: &str = ".storefront/session.json";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_base_url: String,
    pub http_timeout: Duration,
    pub session_store_path: PathBuf,
    pub delivery_fee: i64,
    pub processing_delay: Duration,
}

impl AppConfig {
    /// Config with defaults for everything but the backend address.
    pub fn new(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            session_store_path: PathBuf::from(DEFAULT_SESSION_STORE_PATH),
            delivery_fee: DEFAULT_DELIVERY_FEE,
            processing_delay: DEFAULT_PROCESSING_DELAY,
        }
    }

    pub fn from_env() -> anyhow::Result<Self> {
        let api_base_url = env::var("API_BASE_URL").context("API_BASE_URL is not set")?;
        let http_timeout = env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_HTTP_TIMEOUT);
        let session_store_path = env::var("SESSION_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SESSION_STORE_PATH));
        let delivery_fee = env::var("DELIVERY_FEE")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|fee| *fee >= 0)
            .unwrap_or(DEFAULT_DELIVERY_FEE);
        let processing_delay = env::var("PROCESSING_DELAY_MS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PROCESSING_DELAY);

        Ok(Self {
            api_base_url,
            http_timeout,
            session_store_path,
            delivery_fee,
            processing_delay,
        })
    }
}
