use async_trait::async_trait;

/// Short-lived credential for the table service.
///
/// Implementations cache the token with its expiry and refresh on
/// demand. Two concurrent callers both observing an expired token may
/// both refresh; the duplicate call is harmless.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return a currently valid access token, refreshing if needed.
    async fn token(&self) -> Result<String, TokenError>;
}

/// Token acquisition errors.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("auth request failed: {0}")]
    Http(String),

    #[error("auth rejected: {0}")]
    Rejected(String),
}
