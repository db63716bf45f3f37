//! Cached tenant access token for the Lark API.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::RwLock;

use lostfound_core::ports::{AccessTokenProvider, TokenError};

use super::LarkConfig;

/// Refresh this many seconds before the upstream expiry.
const EXPIRY_MARGIN_SECS: u64 = 120;

struct CachedToken {
    token: String,
    expires_at: Instant,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    code: i64,
    #[serde(default)]
    msg: String,
    tenant_access_token: Option<String>,
    expire: Option<u64>,
}

/// Tenant-token cache, injectable into the table client.
///
/// Holds the token and its expiry behind an async RwLock. Two
/// concurrent callers that both see an expired token will both
/// refresh; the second refresh merely overwrites the first with an
/// equally valid token.
pub struct TenantTokenCache {
    http: reqwest::Client,
    config: LarkConfig,
    state: RwLock<Option<CachedToken>>,
}

impl TenantTokenCache {
    pub fn new(http: reqwest::Client, config: LarkConfig) -> Self {
        Self {
            http,
            config,
            state: RwLock::new(None),
        }
    }

    /// Force a refresh, overwriting any cached token.
    pub async fn refresh(&self) -> Result<String, TokenError> {
        let url = format!(
            "{}/open-apis/auth/v3/tenant_access_token/internal",
            self.config.host
        );
        let payload = serde_json::json!({
            "app_id": self.config.app_id,
            "app_secret": self.config.app_secret,
        });

        let response = self
            .http
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| TokenError::Http(e.to_string()))?;
        let parsed: TokenResponse = response
            .json()
            .await
            .map_err(|e| TokenError::Http(e.to_string()))?;

        let token = match (parsed.code, parsed.tenant_access_token) {
            (0, Some(token)) => token,
            (code, _) => {
                let msg = if parsed.msg.is_empty() {
                    format!("code {code}")
                } else {
                    parsed.msg
                };
                return Err(TokenError::Rejected(msg));
            }
        };

        let ttl = parsed
            .expire
            .unwrap_or(3600)
            .saturating_sub(EXPIRY_MARGIN_SECS);
        let mut guard = self.state.write().await;
        *guard = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + Duration::from_secs(ttl),
        });

        tracing::debug!(ttl_secs = ttl, "tenant token refreshed");
        Ok(token)
    }
}

#[async_trait]
impl AccessTokenProvider for TenantTokenCache {
    async fn token(&self) -> Result<String, TokenError> {
        if let Some(cached) = self.state.read().await.as_ref() {
            if cached.is_fresh() {
                return Ok(cached.token.clone());
            }
        }
        self.refresh().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cached_token_freshness() {
        let fresh = CachedToken {
            token: "t".to_string(),
            expires_at: Instant::now() + Duration::from_secs(60),
        };
        assert!(fresh.is_fresh());

        let stale = CachedToken {
            token: "t".to_string(),
            expires_at: Instant::now() - Duration::from_secs(1),
        };
        assert!(!stale.is_fresh());
    }

    #[test]
    fn token_response_parsing() {
        let ok: TokenResponse = serde_json::from_str(
            r#"{"code":0,"msg":"ok","tenant_access_token":"abc","expire":7200}"#,
        )
        .unwrap();
        assert_eq!(ok.code, 0);
        assert_eq!(ok.tenant_access_token.as_deref(), Some("abc"));
        assert_eq!(ok.expire, Some(7200));

        let rejected: TokenResponse =
            serde_json::from_str(r#"{"code":10003,"msg":"invalid app_secret"}"#).unwrap();
        assert_eq!(rejected.code, 10003);
        assert!(rejected.tenant_access_token.is_none());
    }
}
