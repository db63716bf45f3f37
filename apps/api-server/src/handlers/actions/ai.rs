//! AI-backed actions: image scanning and the posting chatbot.

use actix_web::HttpResponse;
use async_trait::async_trait;

use lostfound_core::DomainError;
use lostfound_shared::dto::{ChatResponse, ScanResponse};

use super::{ActionContext, ActionHandler};
use crate::error::AppResult;
use crate::state::AppState;

pub struct ScanImage;

#[async_trait]
impl ActionHandler for ScanImage {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        if ctx.email.is_none() || !ctx.is_admin {
            return Err(DomainError::admin_only("use the image scanner").into());
        }
        let image = ctx
            .params
            .str("imageData")
            .ok_or_else(|| DomainError::missing("imageData is required for scanImage"))?;

        let outcome = state.ai.scan_image(image).await?;
        Ok(HttpResponse::Ok().json(ScanResponse {
            success: true,
            name: outcome.name,
            dob: outcome.dob,
            school_code: outcome.school_code,
            item_type: outcome.item_type,
            short_desc: outcome.short_desc,
            is_sensitive: outcome.is_sensitive,
            text: outcome.raw,
        }))
    }
}

pub struct ChatWithAi;

#[async_trait]
impl ActionHandler for ChatWithAi {
    async fn handle(&self, state: &AppState, ctx: &ActionContext<'_>) -> AppResult<HttpResponse> {
        if ctx.email.is_none() {
            return Err(
                DomainError::PermissionDenied("you must be signed in to chat".to_string()).into(),
            );
        }
        let question = ctx
            .params
            .str("question")
            .ok_or_else(|| DomainError::missing("question is required for chatWithAI"))?;
        let candidates = ctx.params.str("filteredData").unwrap_or("[]");

        let answer = state.ai.chat(question, candidates).await?;
        Ok(HttpResponse::Ok().json(ChatResponse::ok(answer)))
    }
}
