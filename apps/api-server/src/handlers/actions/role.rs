//! checkUserRole - report the caller's admin status.

use actix_web::HttpResponse;
use async_trait::async_trait;

use lostfound_shared::dto::RoleResponse;

use super::{ActionContext, ActionHandler};
use crate::error::AppResult;
use crate::state::AppState;

pub struct CheckUserRole;

#[async_trait]
impl ActionHandler for CheckUserRole {
    async fn handle(&self, _state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        ctx.require_email("checkUserRole")?;
        Ok(HttpResponse::Ok().json(RoleResponse::ok(ctx.is_admin)))
    }
}
