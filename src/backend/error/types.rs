/**
 * Backend Error Types
 *
 * Errors returned by HTTP handlers. Storage and validation failures are
 * wrapped as-is so the status code can be chosen from their kind.
 *
 * # Status Code Mapping
 *
 * - `Validation` → 400 Bad Request
 * - `Constraint` → 409 Conflict
 * - `Connection` / `SchemaMissing` → 500 Internal Server Error
 * - `HandlerError` → the status it carries
 *
 * `SchemaMissing` only reaches this layer from the direct PostgreSQL
 * driver; the remote driver's supervisor absorbs it.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::storage::StorageError;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use mkite_leads::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Invalid JSON body");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// Handler error (e.g. a body that is not JSON)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Storage error from the active driver
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Shared validation error
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::Storage(err) => match err {
                StorageError::Validation(shared) => shared_status(shared),
                StorageError::Constraint { .. } => StatusCode::CONFLICT,
                StorageError::Connection { .. } | StorageError::SchemaMissing { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::SharedError(err) => shared_status(err),
        }
    }

    /// Get the error message shown to clients
    ///
    /// Validation errors show only their message (`"Name is required"`);
    /// everything else shows the full error text.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::Storage(StorageError::Validation(err)) | Self::SharedError(err) => {
                shared_message(err)
            }
            Self::Storage(err) => err.to_string(),
        }
    }
}

fn shared_status(err: &SharedError) -> StatusCode {
    match err {
        SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
    }
}

fn shared_message(err: &SharedError) -> String {
    match err {
        SharedError::ValidationError { message, .. } => message.clone(),
    }
}
