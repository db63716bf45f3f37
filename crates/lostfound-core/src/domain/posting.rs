//! Posting vocabulary: table field names, review status, post type,
//! and the static label remaps.
//!
//! The external table owns the schema, so field names and enum values
//! here mirror its columns verbatim rather than being translated.

/// Column names of the postings table.
pub mod fields {
    pub const TITLE: &str = "TieuDe";
    pub const DESCRIPTION: &str = "MoTa";
    pub const AREA: &str = "KhuVuc";
    pub const POST_TYPE: &str = "LoaiTin";
    pub const REVIEW_STATUS: &str = "TrangThai";
    pub const CATEGORY: &str = "LoaiDo";
    pub const PHONE: &str = "LienHe";
    pub const FACEBOOK: &str = "LinkFacebook";
    pub const OWNER_EMAIL: &str = "EmailNguoiDang";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
    pub const GROUP: &str = "Group";
    pub const IMAGE_URL: &str = "HinhAnhURL";
}

/// Column names of the users table.
pub mod user_fields {
    pub const EMAIL: &str = "email";
    pub const IS_ADMIN: &str = "IsAdmin";
}

/// Review status of a posting. Everything starts out pending unless an
/// admin posts it; only the approve action moves it forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewStatus {
    Pending,
    Approved,
}

impl ReviewStatus {
    /// The value stored in the table's `TrangThai` column.
    pub fn as_field(self) -> &'static str {
        match self {
            ReviewStatus::Pending => "Chờ duyệt",
            ReviewStatus::Approved => "Đã duyệt",
        }
    }
}

/// Whether the poster is looking for a lost item or reporting a found one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostType {
    Seeking,
    Found,
}

impl PostType {
    /// The submission form sends `"timdo"` for seeking; anything else
    /// (including an absent flag) is treated as a found-item report.
    pub fn from_submission(flag: Option<&str>) -> Self {
        match flag {
            Some("timdo") => PostType::Seeking,
            _ => PostType::Found,
        }
    }

    /// The value stored in the table's `LoaiTin` column.
    pub fn as_field(self) -> &'static str {
        match self {
            PostType::Seeking => "Cần tìm",
            PostType::Found => "Nhặt được",
        }
    }
}

/// Remap a user-facing campus/group label to its canonical code.
/// Unmapped labels pass through unchanged.
pub fn canonical_group(label: &str) -> &str {
    match label {
        "HCMIU" => "IU",
        other => other,
    }
}

/// Remap a user-facing item-category label to its canonical code.
/// Unmapped labels pass through unchanged.
pub fn canonical_category(label: &str) -> &str {
    match label {
        "GPLX (Bằng lái xe)" => "GPLX",
        "Giấy tờ (Chung)" => "Giấy tờ",
        other => other,
    }
}
