use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Structured extraction from an OCR scan of a lost-item photo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Holder name, uppercased and unaccented when printed on a card.
    pub name: Option<String>,
    /// Date of birth as printed.
    pub dob: Option<String>,
    /// Canonical campus/school code recognized on the item.
    pub school_code: Option<String>,
    /// Item category recognized from the image.
    pub item_type: Option<String>,
    /// Short free-text description of the item.
    pub short_desc: Option<String>,
    /// True when an unredacted sensitive number is visible.
    pub is_sensitive: bool,
    /// The raw JSON string the model produced.
    pub raw: String,
}

/// AI completion service - two call shapes against the same provider.
#[async_trait]
pub trait AiService: Send + Sync {
    /// Image + OCR prompt, expecting a structured JSON extraction.
    async fn scan_image(&self, image_data: &str) -> Result<ScanOutcome, AiError>;

    /// Question + candidate-posting JSON, expecting a free-text answer.
    async fn chat(&self, question: &str, candidates_json: &str) -> Result<String, AiError>;
}

/// AI service errors.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("no api key configured")]
    NoKey,

    #[error("request failed: {0}")]
    Http(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("malformed completion: {0}")]
    Decode(String),
}
