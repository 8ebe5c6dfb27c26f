//! Newsletter Subscription
//!
//! At most one subscription exists per email address.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::records::{null_as_empty, require};

/// A stored newsletter subscription
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    /// Server-assigned ID
    pub id: i32,
    /// Subscribed email, unique across all subscriptions
    pub email: String,
    /// Assigned at insert
    pub created_at: DateTime<Utc>,
}

/// Input for a new newsletter subscription
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewNewsletterSubscription {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
}

impl NewNewsletterSubscription {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into() }
    }

    /// Reject a missing or empty email
    pub fn validate(self) -> Result<Self, SharedError> {
        require("email", &self.email, "Email")?;
        Ok(self)
    }
}
