//! Application configuration loaded from environment variables.

use std::env;

use lostfound_infra::{AiConfig, LarkConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub lark: LarkConfig,
    pub gas_upload_url: Option<String>,
    pub ai: AiConfig,
    /// Upstream timezone, informational only.
    pub timezone: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            lark: LarkConfig::from_env(),
            gas_upload_url: env::var("GAS_UPLOAD_URL").ok(),
            ai: AiConfig::from_env(),
            timezone: env::var("TZ").unwrap_or_else(|_| "Asia/Ho_Chi_Minh".to_string()),
        }
    }
}
