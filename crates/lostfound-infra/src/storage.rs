//! Image upload proxy implementing the `ImageStorage` port.
//!
//! Uploads go through a Google Apps Script endpoint that stores the
//! image and hands back a public URL.

use async_trait::async_trait;
use serde::Deserialize;

use lostfound_core::ports::{ImageStorage, StorageError};

#[derive(Deserialize)]
struct UploadResponse {
    url: Option<String>,
    error: Option<String>,
}

/// Apps-Script upload proxy. Misconfiguration (no URL) and upstream
/// failures both fail the enclosing request; there is no retry.
pub struct GasImageStorage {
    http: reqwest::Client,
    upload_url: Option<String>,
}

impl GasImageStorage {
    pub fn new(http: reqwest::Client, upload_url: Option<String>) -> Self {
        Self { http, upload_url }
    }
}

#[async_trait]
impl ImageStorage for GasImageStorage {
    async fn upload(&self, data: &str, filename: &str) -> Result<String, StorageError> {
        let url = self
            .upload_url
            .as_deref()
            .ok_or(StorageError::NotConfigured)?;

        let payload = serde_json::json!({
            "base64": data,
            "filename": filename,
        });

        let response = self
            .http
            .post(url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;
        let parsed: UploadResponse = response
            .json()
            .await
            .map_err(|e| StorageError::Upload(e.to_string()))?;

        match parsed.url {
            Some(public_url) => Ok(public_url),
            None => Err(StorageError::Upload(
                parsed
                    .error
                    .unwrap_or_else(|| "no url in upload response".to_string()),
            )),
        }
    }
}
