//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WidgetHubError`] via `From`.

use crate::id::WidgetId;
use crate::version::Version;

/// Top-level error shared by the domain, application and adapter layers.
#[derive(Debug, thiserror::Error)]
pub enum WidgetHubError {
    #[error("validation error")]
    Validation(#[from] ValidationError),

    #[error("not found")]
    NotFound(#[from] NotFoundError),

    #[error("version conflict")]
    Conflict(#[from] VersionConflictError),

    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A domain invariant or input format was violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,

    #[error("description must not be empty")]
    EmptyDescription,

    #[error("invalid widget id: {0:?}")]
    InvalidId(String),

    #[error("invalid version: {0:?}")]
    InvalidVersion(String),

    #[error("body id {body} does not match path id {path}")]
    IdMismatch { path: WidgetId, body: WidgetId },
}

/// The requested record does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{entity} {id} not found")]
pub struct NotFoundError {
    pub entity: &'static str,
    pub id: String,
}

/// The caller's expected version does not match the stored one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("widget {id} is at version {actual}, expected {expected}")]
pub struct VersionConflictError {
    pub id: WidgetId,
    pub expected: Version,
    pub actual: Version,
}
