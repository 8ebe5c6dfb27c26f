//! User Model
//!
//! Administrative accounts. Created out of band; the marketing flows
//! only read them.

use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::records::require;

/// A stored user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Server-assigned ID
    pub id: i32,
    /// Unique username
    pub username: String,
    /// Opaque, stored as given. Never serialized.
    #[serde(skip_serializing, default)]
    pub password: String,
}

/// Input for a new user
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Reject an empty username or password
    pub fn validate(self) -> Result<Self, SharedError> {
        require("username", &self.username, "Username")?;
        require("password", &self.password, "Password")?;
        Ok(self)
    }
}
