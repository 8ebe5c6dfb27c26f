//! Shared Module
//!
//! This module contains types that do not depend on the server runtime:
//! the record model, shared error types and storage configuration. They are
//! used by the storage drivers, the HTTP handlers and the diagnostic tool.

/// Record model (users, contact submissions, newsletter subscriptions)
pub mod records;

/// Shared error types
pub mod error;

/// Storage configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use config::{ConfigError, StorageConfig, StorageConfigBuilder};
pub use error::SharedError;
pub use records::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};
