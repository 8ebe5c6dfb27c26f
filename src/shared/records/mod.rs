//! Record Model
//!
//! The three entities persisted by every storage backend:
//!
//! - **`User`** - administrative accounts (username + opaque password)
//! - **`ContactSubmission`** - a submitted contact form
//! - **`NewsletterSubscription`** - one subscribed email address
//!
//! Each entity comes with a `New*` input type. Input types only guarantee
//! that required fields are present and non-empty; no format checks are
//! made here. Records are serialized with camelCase keys
//! (`kitchenSize`, `createdAt`) for HTTP clients.

use serde::{Deserialize, Deserializer};

use crate::shared::error::SharedError;

/// User accounts
pub mod user;

/// Contact form submissions
pub mod contact;

/// Newsletter subscriptions
pub mod newsletter;

pub use contact::{ContactSubmission, NewContactSubmission};
pub use newsletter::{NewNewsletterSubscription, NewsletterSubscription};
pub use user::{NewUser, User};

/// Fail with a `ValidationError` when `value` is empty or whitespace.
pub(crate) fn require(field: &str, value: &str, label: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, format!("{} is required", label)));
    }
    Ok(())
}

/// Collapse an empty optional value to `None`.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Accept a missing or `null` JSON string as an empty string so that the
/// validator, not the JSON decoder, reports the missing field.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Option::unwrap_or_default)
}
