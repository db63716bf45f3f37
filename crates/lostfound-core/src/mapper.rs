//! Field mapper - turns a raw submission into the canonical record
//! fields expected by the postings table.

use serde_json::{Map, Value, json};

use crate::authz::is_admin;
use crate::domain::{
    PostType, ReviewStatus, Submission, canonical_category, canonical_group, fields,
};
use crate::error::DomainError;
use crate::ports::{ImageStorage, TableService};

/// Map a submission to the postings-table field set.
///
/// Image precedence: new bytes win and are uploaded (an upload failure
/// fails the whole submission); otherwise a supplied keep-URL is
/// reused; otherwise the image field is an explicit null. Note the
/// last rule holds on update too - a client that forgets to resend
/// the keep-URL clears the stored image.
///
/// The contact string is classified as a Facebook link when it
/// contains `"http"`, else as a phone number; exactly one of the two
/// fields is populated.
///
/// Review status defaults to pending and is approved only when the
/// poster's email passes the admin check - the single authorization
/// lookup this function performs.
pub async fn map_submission(
    submission: &Submission,
    tables: &dyn TableService,
    storage: &dyn ImageStorage,
) -> Result<Map<String, Value>, DomainError> {
    let image_url: Option<String> = match submission.image_data.as_deref() {
        Some(data) => {
            let filename = submission.image_name.as_deref().unwrap_or("image");
            Some(storage.upload(data, filename).await?)
        }
        None => submission.keep_image_url.clone(),
    };

    let contact = submission.contact.as_deref().unwrap_or("");
    let (phone, facebook) = if contact.is_empty() {
        (None, None)
    } else if contact.contains("http") {
        (None, Some(contact))
    } else {
        (Some(contact), None)
    };

    let status = if is_admin(tables, submission.poster_email.as_deref()).await {
        ReviewStatus::Approved
    } else {
        ReviewStatus::Pending
    };

    let mut out = Map::new();
    if let Some(title) = &submission.title {
        out.insert(fields::TITLE.to_string(), json!(title));
    }
    if let Some(description) = &submission.description {
        out.insert(fields::DESCRIPTION.to_string(), json!(description));
    }
    if let Some(area) = &submission.area {
        out.insert(fields::AREA.to_string(), json!(area));
    }
    out.insert(
        fields::POST_TYPE.to_string(),
        json!(PostType::from_submission(submission.post_kind.as_deref()).as_field()),
    );
    out.insert(fields::REVIEW_STATUS.to_string(), json!(status.as_field()));
    if let Some(category) = submission.category.as_deref() {
        out.insert(
            fields::CATEGORY.to_string(),
            json!([canonical_category(category)]),
        );
    }
    out.insert(fields::PHONE.to_string(), json!(phone));
    out.insert(fields::FACEBOOK.to_string(), json!(facebook));
    out.insert(
        fields::OWNER_EMAIL.to_string(),
        json!(submission.poster_email),
    );
    out.insert(fields::LATITUDE.to_string(), json!(submission.latitude));
    out.insert(fields::LONGITUDE.to_string(), json!(submission.longitude));
    if let Some(group) = submission.group.as_deref() {
        let canonical = canonical_group(group);
        if !canonical.trim().is_empty() {
            out.insert(fields::GROUP.to_string(), json!([canonical]));
        }
    }
    out.insert(fields::IMAGE_URL.to_string(), json!(image_url));

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::domain::user_fields;
    use crate::ports::{Record, RecordPage, StorageError, Table, TableError};

    /// Users-table fake holding a single admin email, counting lookups.
    struct Users {
        admin_email: Option<&'static str>,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl TableService for Users {
        async fn add_record(&self, _: Table, _: Map<String, Value>) -> Result<Record, TableError> {
            unimplemented!()
        }

        async fn get_record(&self, _: Table, _: &str) -> Result<Record, TableError> {
            unimplemented!()
        }

        async fn list_by_filter(
            &self,
            _: Table,
            _: &str,
            value: &str,
        ) -> Result<Vec<Record>, TableError> {
            self.lookups.fetch_add(1, Ordering::SeqCst);
            let mut items = Vec::new();
            if self.admin_email == Some(value) {
                let mut f = Map::new();
                f.insert(user_fields::IS_ADMIN.to_string(), json!(true));
                items.push(Record {
                    record_id: "usr1".to_string(),
                    fields: f,
                });
            }
            Ok(items)
        }

        async fn list_page(&self, _: Table, _: Option<&str>) -> Result<RecordPage, TableError> {
            unimplemented!()
        }

        async fn update_record(
            &self,
            _: Table,
            _: &str,
            _: Map<String, Value>,
        ) -> Result<(), TableError> {
            unimplemented!()
        }

        async fn delete_record(&self, _: Table, _: &str) -> Result<Value, TableError> {
            unimplemented!()
        }
    }

    struct Storage {
        fail: bool,
        uploads: AtomicUsize,
    }

    impl Storage {
        fn ok() -> Self {
            Self {
                fail: false,
                uploads: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                uploads: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ImageStorage for Storage {
        async fn upload(&self, _data: &str, filename: &str) -> Result<String, StorageError> {
            self.uploads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(StorageError::Upload("proxy rejected payload".to_string()));
            }
            Ok(format!("https://img.example/{filename}"))
        }
    }

    fn no_admins() -> Users {
        Users {
            admin_email: None,
            lookups: AtomicUsize::new(0),
        }
    }

    fn base_submission() -> Submission {
        Submission {
            title: Some("Lost wallet".to_string()),
            description: Some("Black leather wallet".to_string()),
            area: Some("Library".to_string()),
            post_kind: Some("timdo".to_string()),
            category: Some("Ví tiền".to_string()),
            poster_email: Some("student@campus.edu".to_string()),
            contact: Some("0901234567".to_string()),
            ..Submission::default()
        }
    }

    #[tokio::test]
    async fn contact_with_url_marker_goes_to_facebook() {
        let mut sub = base_submission();
        sub.contact = Some("https://facebook.com/someone".to_string());
        let out = map_submission(&sub, &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(
            out[fields::FACEBOOK],
            json!("https://facebook.com/someone")
        );
        assert_eq!(out[fields::PHONE], Value::Null);
    }

    #[tokio::test]
    async fn plain_contact_goes_to_phone() {
        let out = map_submission(&base_submission(), &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(out[fields::PHONE], json!("0901234567"));
        assert_eq!(out[fields::FACEBOOK], Value::Null);
    }

    #[tokio::test]
    async fn empty_contact_leaves_both_null() {
        let mut sub = base_submission();
        sub.contact = None;
        let out = map_submission(&sub, &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(out[fields::PHONE], Value::Null);
        assert_eq!(out[fields::FACEBOOK], Value::Null);
    }

    #[tokio::test]
    async fn new_image_wins_over_keep_url() {
        let mut sub = base_submission();
        sub.image_data = Some("data:image/png;base64,AAAA".to_string());
        sub.image_name = Some("wallet.png".to_string());
        sub.keep_image_url = Some("https://img.example/old.png".to_string());
        let storage = Storage::ok();
        let out = map_submission(&sub, &no_admins(), &storage).await.unwrap();
        assert_eq!(out[fields::IMAGE_URL], json!("https://img.example/wallet.png"));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn keep_url_is_reused_without_new_bytes() {
        let mut sub = base_submission();
        sub.keep_image_url = Some("https://img.example/old.png".to_string());
        let storage = Storage::ok();
        let out = map_submission(&sub, &no_admins(), &storage).await.unwrap();
        assert_eq!(out[fields::IMAGE_URL], json!("https://img.example/old.png"));
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn omitting_image_clears_the_field() {
        let out = map_submission(&base_submission(), &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(out[fields::IMAGE_URL], Value::Null);
    }

    #[tokio::test]
    async fn upload_failure_fails_the_submission() {
        let mut sub = base_submission();
        sub.image_data = Some("data:image/png;base64,AAAA".to_string());
        let err = map_submission(&sub, &no_admins(), &Storage::failing())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Storage(_)));
    }

    #[tokio::test]
    async fn status_defaults_to_pending() {
        let out = map_submission(&base_submission(), &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(
            out[fields::REVIEW_STATUS],
            json!(ReviewStatus::Pending.as_field())
        );
    }

    #[tokio::test]
    async fn admin_poster_is_approved_at_creation() {
        let users = Users {
            admin_email: Some("student@campus.edu"),
            lookups: AtomicUsize::new(0),
        };
        let out = map_submission(&base_submission(), &users, &Storage::ok())
            .await
            .unwrap();
        assert_eq!(
            out[fields::REVIEW_STATUS],
            json!(ReviewStatus::Approved.as_field())
        );
    }

    #[tokio::test]
    async fn admin_check_runs_exactly_once_per_mapping() {
        let users = no_admins();
        map_submission(&base_submission(), &users, &Storage::ok())
            .await
            .unwrap();
        assert_eq!(users.lookups.load(Ordering::SeqCst), 1);

        // an image upload in the same invocation adds no extra lookup
        let users = no_admins();
        let storage = Storage::ok();
        let mut sub = base_submission();
        sub.image_data = Some("data:image/png;base64,AAAA".to_string());
        map_submission(&sub, &users, &storage).await.unwrap();
        assert_eq!(users.lookups.load(Ordering::SeqCst), 1);
        assert_eq!(storage.uploads.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn group_is_remapped_and_blank_group_omitted() {
        let mut sub = base_submission();
        sub.group = Some("HCMIU".to_string());
        let out = map_submission(&sub, &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(out[fields::GROUP], json!(["IU"]));

        sub.group = Some("   ".to_string());
        let out = map_submission(&sub, &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert!(!out.contains_key(fields::GROUP));
    }

    #[tokio::test]
    async fn category_label_is_canonicalized() {
        let mut sub = base_submission();
        sub.category = Some("GPLX (Bằng lái xe)".to_string());
        let out = map_submission(&sub, &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(out[fields::CATEGORY], json!(["GPLX"]));
    }

    #[tokio::test]
    async fn seeking_flag_maps_post_type() {
        let out = map_submission(&base_submission(), &no_admins(), &Storage::ok())
            .await
            .unwrap();
        assert_eq!(out[fields::POST_TYPE], json!("Cần tìm"));
    }
}
