//! Domain-level error types.

use thiserror::Error;

use crate::ports::{AiError, StorageError, TableError};

/// Domain errors - everything a dispatched action can fail with.
///
/// All variants surface to the caller as an HTTP 500 envelope; the
/// collaborator wrappers prefix the upstream message with the failing
/// service so operators can tell the sources apart.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0}")]
    MissingInput(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("table service: {0}")]
    Table(#[from] TableError),

    #[error("image storage: {0}")]
    Storage(#[from] StorageError),

    #[error("ai service: {0}")]
    Ai(#[from] AiError),
}

impl DomainError {
    /// Missing required request field.
    pub fn missing(what: impl Into<String>) -> Self {
        Self::MissingInput(what.into())
    }

    /// The caller is neither an admin nor the posting's owner.
    pub fn not_owner() -> Self {
        Self::PermissionDenied("you are not the owner of this posting".to_string())
    }

    /// The action is reserved for admins.
    pub fn admin_only(what: &str) -> Self {
        Self::PermissionDenied(format!("only admins may {what}"))
    }
}
