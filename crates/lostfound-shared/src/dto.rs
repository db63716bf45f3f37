//! Data Transfer Objects - request/response types for the API.
//!
//! Wire names match what the existing frontend already sends and
//! expects (`tieuDe`, `isAdmin`, `img1_base64`, ...), so renames here
//! are load-bearing.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A posting submission as sent by the form (submitPost / updatePost).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostSubmission {
    #[serde(rename = "tieuDe")]
    pub title: Option<String>,
    #[serde(rename = "noiDung")]
    pub description: Option<String>,
    #[serde(rename = "khuVuc")]
    pub area: Option<String>,
    /// `"timdo"` when the poster is seeking a lost item.
    #[serde(rename = "dangTinLa")]
    pub post_kind: Option<String>,
    #[serde(rename = "loaiDo")]
    pub category: Option<String>,
    pub group: Option<String>,
    #[serde(rename = "lienHe")]
    pub contact: Option<String>,
    #[serde(rename = "emailNguoiDang")]
    pub poster_email: Option<String>,
    #[serde(rename = "img1_base64")]
    pub image_data: Option<String>,
    #[serde(rename = "img1_name")]
    pub image_name: Option<String>,
    pub keep_image_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub longitude: Option<f64>,
}

/// Coordinates arrive as numbers from the JSON body but as strings
/// from a query string; accept both.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.parse().ok(),
        _ => None,
    })
}

/// checkUserRole result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleResponse {
    pub success: bool,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
}

impl RoleResponse {
    pub fn ok(is_admin: bool) -> Self {
        Self {
            success: true,
            is_admin,
        }
    }
}

/// getMyPosts result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemsResponse {
    pub success: bool,
    pub items: Vec<Value>,
}

impl ItemsResponse {
    pub fn ok(items: Vec<Value>) -> Self {
        Self {
            success: true,
            items,
        }
    }
}

/// getSinglePost result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemResponse {
    pub success: bool,
    pub item: Value,
}

impl ItemResponse {
    pub fn ok(item: Value) -> Self {
        Self {
            success: true,
            item,
        }
    }
}

/// Plain confirmation (approvePost, submitPost, updatePost).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// deletePost result - confirmation plus the upstream delete payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
    pub message: String,
    pub result: Value,
}

impl DeleteResponse {
    pub fn ok(message: impl Into<String>, result: Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            result,
        }
    }
}

/// chatWithAI result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    pub success: bool,
    pub answer: String,
}

impl ChatResponse {
    pub fn ok(answer: impl Into<String>) -> Self {
        Self {
            success: true,
            answer: answer.into(),
        }
    }
}

/// scanImage result - the structured OCR extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResponse {
    pub success: bool,
    pub name: Option<String>,
    pub dob: Option<String>,
    pub school_code: Option<String>,
    pub item_type: Option<String>,
    #[serde(rename = "moTaNgan")]
    pub short_desc: Option<String>,
    #[serde(rename = "isSensitive")]
    pub is_sensitive: bool,
    /// Raw JSON string the model produced, for client-side debugging.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn submission_uses_frontend_field_names() {
        let sub: PostSubmission = serde_json::from_value(json!({
            "tieuDe": "Lost wallet",
            "noiDung": "black leather",
            "khuVuc": "Library",
            "dangTinLa": "timdo",
            "loaiDo": "Ví tiền",
            "lienHe": "0901234567",
            "emailNguoiDang": "a@b.edu",
            "img1_base64": "data:image/png;base64,AAAA",
            "img1_name": "wallet.png",
            "latitude": 10.87,
            "longitude": "106.80"
        }))
        .unwrap();

        assert_eq!(sub.title.as_deref(), Some("Lost wallet"));
        assert_eq!(sub.post_kind.as_deref(), Some("timdo"));
        assert_eq!(sub.poster_email.as_deref(), Some("a@b.edu"));
        assert_eq!(sub.latitude, Some(10.87));
        // string coordinate from a query string still parses
        assert_eq!(sub.longitude, Some(106.80));
    }

    #[test]
    fn role_response_wire_name() {
        let body = serde_json::to_value(RoleResponse::ok(true)).unwrap();
        assert_eq!(body, json!({"success": true, "isAdmin": true}));
    }

    #[test]
    fn scan_response_wire_names() {
        let body = serde_json::to_value(ScanResponse {
            success: true,
            name: Some("NGUYEN VAN A".to_string()),
            dob: None,
            school_code: Some("IU".to_string()),
            item_type: Some("Thẻ sinh viên".to_string()),
            short_desc: Some("student card".to_string()),
            is_sensitive: false,
            text: "{}".to_string(),
        })
        .unwrap();
        assert_eq!(body["moTaNgan"], json!("student card"));
        assert_eq!(body["isSensitive"], json!(false));
    }
}
