//! Posting actions: listing, fetch, submit, update, approve, delete.
//!
//! Ownership is never trusted from the request: every owner-gated
//! action re-fetches the record and compares its stored poster email
//! to the caller's.

use actix_web::HttpResponse;
use async_trait::async_trait;
use serde_json::Value;

use lostfound_core::DomainError;
use lostfound_core::domain::{ReviewStatus, Submission, fields};
use lostfound_core::mapper::map_submission;
use lostfound_core::ports::{Record, Table, list_all};
use lostfound_shared::dto::{
    DeleteResponse, ItemResponse, ItemsResponse, MessageResponse, PostSubmission,
};

use super::{ActionContext, ActionHandler};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Admin-or-owner gate against the authoritative record.
fn ensure_owner_or_admin(record: &Record, email: &str, is_admin: bool) -> Result<(), AppError> {
    if is_admin || record.field_str(fields::OWNER_EMAIL) == Some(email) {
        Ok(())
    } else {
        Err(DomainError::not_owner().into())
    }
}

/// Parse the parameter bag as a posting submission and lower it to
/// the domain type.
fn submission_from(ctx: &ActionContext<'_>) -> Result<Submission, AppError> {
    let wire: PostSubmission = serde_json::from_value(ctx.params.to_value())
        .map_err(|e| DomainError::missing(format!("invalid submission: {e}")))?;
    Ok(Submission {
        title: wire.title,
        description: wire.description,
        area: wire.area,
        post_kind: wire.post_kind,
        category: wire.category,
        group: wire.group,
        contact: wire.contact,
        poster_email: wire.poster_email,
        image_data: wire.image_data,
        image_name: wire.image_name,
        keep_image_url: wire.keep_image_url,
        latitude: wire.latitude,
        longitude: wire.longitude,
    })
}

fn record_json(record: Record) -> Value {
    serde_json::to_value(record).unwrap_or(Value::Null)
}

pub struct GetMyPosts;

#[async_trait]
impl ActionHandler for GetMyPosts {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        let email = ctx.require_email("getMyPosts")?;
        // Admins see every posting, across all pages; everyone else
        // sees only their own.
        let records = if ctx.is_admin {
            list_all(state.tables.as_ref(), Table::Postings).await?
        } else {
            state
                .tables
                .list_by_filter(Table::Postings, fields::OWNER_EMAIL, email)
                .await?
        };
        let items = records.into_iter().map(record_json).collect();
        Ok(HttpResponse::Ok().json(ItemsResponse::ok(items)))
    }
}

pub struct GetSinglePost;

#[async_trait]
impl ActionHandler for GetSinglePost {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        let email = ctx.require_email("getSinglePost")?;
        let record_id = ctx.require_record_id("getSinglePost")?;
        let record = state.tables.get_record(Table::Postings, record_id).await?;
        ensure_owner_or_admin(&record, email, ctx.is_admin)?;
        Ok(HttpResponse::Ok().json(ItemResponse::ok(record_json(record))))
    }
}

pub struct DeletePost;

#[async_trait]
impl ActionHandler for DeletePost {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        let email = ctx.require_email("deletePost")?;
        let record_id = ctx.require_record_id("deletePost")?;
        // Fetch-then-delete: the ownership check needs the stored
        // record, and the fetch result gates the destructive call.
        let record = state.tables.get_record(Table::Postings, record_id).await?;
        ensure_owner_or_admin(&record, email, ctx.is_admin)?;
        let result = state
            .tables
            .delete_record(Table::Postings, record_id)
            .await?;
        Ok(HttpResponse::Ok().json(DeleteResponse::ok("posting deleted", result)))
    }
}

pub struct ApprovePost;

#[async_trait]
impl ActionHandler for ApprovePost {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        if ctx.email.is_none() || !ctx.is_admin {
            return Err(DomainError::admin_only("approve postings").into());
        }
        let record_id = ctx.require_record_id("approvePost")?;
        let mut update = serde_json::Map::new();
        update.insert(
            fields::REVIEW_STATUS.to_string(),
            Value::String(ReviewStatus::Approved.as_field().to_string()),
        );
        state
            .tables
            .update_record(Table::Postings, record_id, update)
            .await?;
        Ok(HttpResponse::Ok().json(MessageResponse::ok("posting approved")))
    }
}

pub struct SubmitPost;

#[async_trait]
impl ActionHandler for SubmitPost {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        ctx.require_email("submitPost")?;
        let submission = submission_from(ctx)?;
        let record_fields =
            map_submission(&submission, state.tables.as_ref(), state.storage.as_ref()).await?;

        let approved = record_fields
            .get(fields::REVIEW_STATUS)
            .and_then(Value::as_str)
            == Some(ReviewStatus::Approved.as_field());

        state
            .tables
            .add_record(Table::Postings, record_fields)
            .await?;

        let message = if approved {
            "posting published (admin)"
        } else {
            "posting submitted, awaiting review"
        };
        Ok(HttpResponse::Ok().json(MessageResponse::ok(message)))
    }
}

pub struct UpdatePost;

#[async_trait]
impl ActionHandler for UpdatePost {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        let email = ctx.require_email("updatePost")?;
        let record_id = ctx.require_record_id("updatePost")?;
        let submission = submission_from(ctx)?;
        // Field mapping (and any image upload) happens before the
        // ownership check; a denied update may leave an orphaned
        // image behind, which this layer accepts.
        let record_fields =
            map_submission(&submission, state.tables.as_ref(), state.storage.as_ref()).await?;

        let existing = state.tables.get_record(Table::Postings, record_id).await?;
        ensure_owner_or_admin(&existing, email, ctx.is_admin)?;

        state
            .tables
            .update_record(Table::Postings, record_id, record_fields)
            .await?;
        Ok(HttpResponse::Ok().json(MessageResponse::ok("posting updated")))
    }
}
