//! Request dispatch: parameter-bag normalization, liveness, and the
//! action registry lookup.

use std::collections::HashMap;

use actix_web::{HttpResponse, ResponseError, web};
use serde_json::{Map, Value};

use lostfound_core::{DomainError, authz};

use crate::error::AppResult;
use crate::handlers::actions::ActionContext;
use crate::state::AppState;

const LIVENESS_MESSAGE: &str =
    "API is up. Call ?action=checkUserRole&email=... to check a user role.";

/// Request parameters, method-independent: GET query parameters and
/// POST JSON bodies are normalized into the same bag.
#[derive(Debug, Clone, Default)]
pub struct ParamBag(Map<String, Value>);

impl ParamBag {
    pub fn from_query(query: HashMap<String, String>) -> Self {
        Self(
            query
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }

    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(map) => Self(map),
            _ => Self(Map::new()),
        }
    }

    /// Non-empty string value of a parameter.
    pub fn str(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// First present value among fallback parameter names.
    pub fn first_str(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|key| self.str(key))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

pub async fn dispatch_get(
    state: web::Data<AppState>,
    query: web::Query<HashMap<String, String>>,
) -> HttpResponse {
    dispatch(&state, true, ParamBag::from_query(query.into_inner())).await
}

pub async fn dispatch_post(state: web::Data<AppState>, body: web::Json<Value>) -> HttpResponse {
    dispatch(&state, false, ParamBag::from_body(body.into_inner())).await
}

/// Top-level dispatch. Failures never escape: they are logged with
/// the original parameters and rendered as the uniform envelope.
pub async fn dispatch(state: &AppState, is_get: bool, params: ParamBag) -> HttpResponse {
    match route(state, is_get, &params).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(error = %err, params = %params.to_value(), "request failed");
            err.error_response()
        }
    }
}

async fn route(state: &AppState, is_get: bool, params: &ParamBag) -> AppResult<HttpResponse> {
    let Some(action) = params.str("action") else {
        // Bare GETs on the endpoint are health probes, not errors.
        if is_get && params.is_empty() {
            return Ok(HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .body(LIVENESS_MESSAGE));
        }
        return Err(DomainError::missing("action was not provided").into());
    };

    let email = params
        .first_str(&["email", "emailNguoiDang"])
        .map(String::from);
    let record_id = params
        .first_str(&["record_id", "record_id_to_edit"])
        .map(String::from);
    // One admin lookup per request, reused by every handler.
    let is_admin = authz::is_admin(state.tables.as_ref(), email.as_deref()).await;

    let ctx = ActionContext {
        params,
        email,
        record_id,
        is_admin,
    };

    let handler = state
        .actions
        .get(action)
        .ok_or_else(|| DomainError::UnknownAction(action.to_string()))?;
    handler.handle(state, &ctx).await
}
