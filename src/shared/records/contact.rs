//! Contact Submission
//!
//! A contact form submitted from the website. Immutable once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::records::{non_empty, null_as_empty, require};

/// A stored contact form submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    /// Server-assigned ID
    pub id: i32,
    /// Name of the person asking to be contacted
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Optional kitchen size, free text
    pub kitchen_size: Option<String>,
    /// Optional free-form message
    pub message: Option<String>,
    /// Assigned at insert, never mutated
    pub created_at: DateTime<Utc>,
}

/// Input for a new contact submission
///
/// Missing or `null` required fields decode to empty strings so that
/// [`NewContactSubmission::validate`] can reject them with a field name.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewContactSubmission {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub phone: String,
    #[serde(default)]
    pub kitchen_size: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl NewContactSubmission {
    /// Create an input with the three required fields
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            kitchen_size: None,
            message: None,
        }
    }

    /// Set the kitchen size
    pub fn with_kitchen_size(mut self, kitchen_size: impl Into<String>) -> Self {
        self.kitchen_size = Some(kitchen_size.into());
        self
    }

    /// Set the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Check required fields and normalize the optional ones
    ///
    /// `name`, `email` and `phone` must be non-empty. Empty `kitchenSize`
    /// and `message` values become `None`.
    pub fn validate(self) -> Result<Self, SharedError> {
        require("name", &self.name, "Name")?;
        require("email", &self.email, "Email")?;
        require("phone", &self.phone, "Phone")?;

        Ok(Self {
            kitchen_size: non_empty(self.kitchen_size),
            message: non_empty(self.message),
            ..self
        })
    }
}
