use async_trait::async_trait;

/// Image storage - turns an uploaded payload into a public URL.
///
/// No retry: a failed upload fails the enclosing request.
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Upload an image (base64 data URL) and return its public URL.
    async fn upload(&self, data: &str, filename: &str) -> Result<String, StorageError>;
}

/// Image storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("upload destination not configured")]
    NotConfigured,

    #[error("upload failed: {0}")]
    Upload(String),
}
