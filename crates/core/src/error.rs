//! Domain error taxonomy shared by all crates.
//!
//! Authentication and authorization failures carry generic messages so the
//! HTTP layer can forward them without leaking detail; not-found and
//! validation errors name the resource or field that failed.

use thiserror::Error;

/// Domain-level errors. The api crate maps these onto HTTP status codes.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A resource lookup failed. `id` is the stringified identifier
    /// (numeric row id or setting key).
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    /// Input failed validation; the message names the offending field.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A unique constraint or business rule conflict.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Missing or invalid credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Authenticated but not allowed.
    #[error("{0}")]
    Forbidden(String),

    /// Unexpected internal failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Shorthand for a [`CoreError::NotFound`] with a numeric row id.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CoreError::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}
