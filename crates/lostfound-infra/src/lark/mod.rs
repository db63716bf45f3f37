//! Lark Bitable integration: tenant-token acquisition and the record
//! client for the postings and users tables.

mod bitable;
mod token;

pub use bitable::BitableClient;
pub use token::TenantTokenCache;

/// Lark connection configuration.
#[derive(Debug, Clone)]
pub struct LarkConfig {
    pub app_id: String,
    pub app_secret: String,
    /// The Bitable app ("base") holding both tables.
    pub base_token: String,
    pub postings_table: String,
    pub users_table: String,
    pub host: String,
}

impl LarkConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            app_id: std::env::var("LARK_APP_ID").unwrap_or_default(),
            app_secret: std::env::var("LARK_APP_SECRET").unwrap_or_default(),
            base_token: std::env::var("LARK_BASE_TOKEN").unwrap_or_default(),
            postings_table: std::env::var("LARK_TABLE_ID").unwrap_or_default(),
            users_table: std::env::var("LARK_USERS_TABLE_ID").unwrap_or_default(),
            host: std::env::var("LARK_HOST")
                .unwrap_or_else(|_| "https://open.larksuite.com".to_string()),
        }
    }
}
