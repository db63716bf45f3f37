//! Raw posting submission as received from the client form.

/// A submission for `submitPost`/`updatePost` before field mapping.
///
/// Everything is optional; the mapper decides which absent fields are
/// omitted and which become explicit nulls in the table record.
#[derive(Debug, Clone, Default)]
pub struct Submission {
    pub title: Option<String>,
    pub description: Option<String>,
    pub area: Option<String>,
    /// Raw seeking-or-found flag (`"timdo"` means seeking).
    pub post_kind: Option<String>,
    pub category: Option<String>,
    pub group: Option<String>,
    /// Free-text contact: phone number, or a URL to a Facebook profile.
    pub contact: Option<String>,
    pub poster_email: Option<String>,
    /// New image payload as a base64 data URL.
    pub image_data: Option<String>,
    pub image_name: Option<String>,
    /// Existing image URL to retain on update when no new image is sent.
    pub keep_image_url: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
