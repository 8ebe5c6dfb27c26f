//! Shared Error Types
//!
//! This module defines error types that are shared between the storage layer
//! and the HTTP layer. They do not depend on which backend is active.
//!
//! `ValidationError` is raised when a required field is missing or empty.
//!
//! # Usage
//!
//! ```rust
//! use mkite_leads::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Email is required");
//! assert!(error.is_validation());
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error was caused by bad caller input
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError { .. })
    }
}
