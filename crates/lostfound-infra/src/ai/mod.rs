//! OpenRouter client implementing the `AiService` port.

mod prompts;

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::Value;

use lostfound_core::ports::{AiError, AiService, ScanOutcome};

/// OpenRouter connection configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API keys rotated round-robin, one per call.
    pub keys: Vec<String>,
    pub model: String,
    pub referer: String,
    pub title: String,
    pub endpoint: String,
}

impl AiConfig {
    /// Load configuration from environment variables. Keys come from
    /// every `OPENROUTER_KEY*` variable, gathered in sorted variable
    /// name order so the rotation order is deterministic.
    pub fn from_env() -> Self {
        let mut key_vars: Vec<(String, String)> = std::env::vars()
            .filter(|(name, value)| name.starts_with("OPENROUTER_KEY") && !value.is_empty())
            .collect();
        key_vars.sort_by(|a, b| a.0.cmp(&b.0));

        Self {
            keys: key_vars.into_iter().map(|(_, value)| value).collect(),
            model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "anthropic/claude-3-haiku:latest".to_string()),
            referer: std::env::var("OPENROUTER_REFERER")
                .unwrap_or_else(|_| "https://timdosinhvien.site".to_string()),
            title: std::env::var("OPENROUTER_TITLE")
                .unwrap_or_else(|_| "Lost & Found".to_string()),
            endpoint: std::env::var("OPENROUTER_ENDPOINT")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1/chat/completions".to_string()),
        }
    }
}

/// Round-robin API-key rotation. An explicit stateful object owned by
/// the client; the index advances atomically so concurrent callers
/// spread across keys.
pub struct KeyRing {
    keys: Vec<String>,
    next: AtomicUsize,
}

impl KeyRing {
    pub fn new(keys: Vec<String>) -> Self {
        Self {
            keys,
            next: AtomicUsize::new(0),
        }
    }

    /// The next key in rotation, or None when no key is configured.
    pub fn next_key(&self) -> Option<&str> {
        if self.keys.is_empty() {
            return None;
        }
        let index = self.next.fetch_add(1, Ordering::Relaxed) % self.keys.len();
        Some(&self.keys[index])
    }
}

/// OpenRouter chat-completions client.
pub struct OpenRouterClient {
    http: reqwest::Client,
    config: AiConfig,
    keys: KeyRing,
}

impl OpenRouterClient {
    pub fn new(http: reqwest::Client, config: AiConfig) -> Self {
        let keys = KeyRing::new(config.keys.clone());
        Self { http, config, keys }
    }

    /// One completion call; returns the first choice's content.
    async fn complete(&self, payload: Value) -> Result<String, AiError> {
        let key = self.keys.next_key().ok_or(AiError::NoKey)?;

        let response = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AiError::Http(e.to_string()))?;
        let body: Value = response
            .json()
            .await
            .map_err(|e| AiError::Decode(e.to_string()))?;

        if let Some(error) = body.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unspecified upstream error");
            return Err(AiError::Upstream(message.to_string()));
        }

        body.pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .map(String::from)
            .ok_or_else(|| AiError::Upstream("no choices in completion".to_string()))
    }
}

/// Parse the model's JSON answer into a `ScanOutcome`, keeping the
/// raw string for the client. Booleans may come back as strings.
fn parse_scan_content(content: &str) -> Result<ScanOutcome, AiError> {
    let parsed: Value =
        serde_json::from_str(content).map_err(|e| AiError::Decode(e.to_string()))?;

    let opt_str = |key: &str| -> Option<String> {
        parsed.get(key).and_then(Value::as_str).map(String::from)
    };
    let is_sensitive = match parsed.get("is_sensitive") {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    };

    Ok(ScanOutcome {
        name: opt_str("name"),
        dob: opt_str("dob"),
        school_code: opt_str("school_code"),
        item_type: opt_str("item_type"),
        short_desc: opt_str("short_desc"),
        is_sensitive,
        raw: content.to_string(),
    })
}

#[async_trait]
impl AiService for OpenRouterClient {
    async fn scan_image(&self, image_data: &str) -> Result<ScanOutcome, AiError> {
        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": prompts::SCAN_PROMPT },
                    { "type": "image_url", "image_url": { "url": image_data } },
                ],
            }],
            "response_format": { "type": "json_object" },
        });

        let content = self.complete(payload).await?;
        parse_scan_content(&content)
    }

    async fn chat(&self, question: &str, candidates_json: &str) -> Result<String, AiError> {
        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": prompts::CHAT_SYSTEM_PROMPT },
                {
                    "role": "user",
                    "content": format!("Here are the most relevant postings (JSON):\n{candidates_json}"),
                },
                { "role": "user", "content": format!("Here is my question:\n{question}") },
            ],
        });

        self.complete(payload).await
    }
}
