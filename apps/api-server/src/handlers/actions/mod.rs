//! Action handlers - one value per `action` name, looked up through
//! a registry instead of a monolithic switch so each handler tests
//! independently.

mod ai;
mod posts;
mod role;

use std::collections::HashMap;
use std::sync::Arc;

use actix_web::HttpResponse;
use async_trait::async_trait;

use lostfound_core::DomainError;

use crate::error::{AppError, AppResult};
use crate::handlers::dispatch::ParamBag;
use crate::state::AppState;

/// Per-request context shared by every handler: the raw parameters
/// plus the extracted identity fields and the (already computed)
/// admin flag.
pub struct ActionContext<'a> {
    pub params: &'a ParamBag,
    pub email: Option<String>,
    pub record_id: Option<String>,
    pub is_admin: bool,
}

impl ActionContext<'_> {
    /// The caller's email, or a missing-input error naming the action.
    pub fn require_email(&self, action: &str) -> Result<&str, AppError> {
        self.email
            .as_deref()
            .ok_or_else(|| DomainError::missing(format!("email is required for {action}")).into())
    }

    /// The target record id, or a missing-input error naming the action.
    pub fn require_record_id(&self, action: &str) -> Result<&str, AppError> {
        self.record_id.as_deref().ok_or_else(|| {
            DomainError::missing(format!("record_id is required for {action}")).into()
        })
    }
}

/// One dispatched operation.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse>;
}

/// Build the action registry. Adding an operation is one line here
/// plus its handler.
pub fn registry() -> HashMap<&'static str, Arc<dyn ActionHandler>> {
    let mut map: HashMap<&'static str, Arc<dyn ActionHandler>> = HashMap::new();
    map.insert("checkUserRole", Arc::new(role::CheckUserRole));
    map.insert("getMyPosts", Arc::new(posts::GetMyPosts));
    map.insert("getSinglePost", Arc::new(posts::GetSinglePost));
    map.insert("deletePost", Arc::new(posts::DeletePost));
    map.insert("approvePost", Arc::new(posts::ApprovePost));
    map.insert("submitPost", Arc::new(posts::SubmitPost));
    map.insert("updatePost", Arc::new(posts::UpdatePost));
    map.insert("scanImage", Arc::new(ai::ScanImage));
    map.insert("chatWithAI", Arc::new(ai::ChatWithAi));
    map
}
