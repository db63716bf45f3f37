//! Application error - the uniform failure envelope.
//!
//! Every failure, whatever its source, surfaces as HTTP 500 with
//! `{"success": false, "error": "<message>"}`. There is no 4xx
//! convention on this API; clients switch on the `success` flag.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use lostfound_core::DomainError;
use lostfound_core::ports::{AiError, StorageError, TableError};
use lostfound_shared::ErrorBody;

/// Wrapper giving `DomainError` the HTTP response contract.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct AppError(#[from] pub DomainError);

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody::new(self.0.to_string()))
    }
}

impl From<TableError> for AppError {
    fn from(err: TableError) -> Self {
        Self(DomainError::from(err))
    }
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        Self(DomainError::from(err))
    }
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        Self(DomainError::from(err))
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
