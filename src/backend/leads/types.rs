/**
 * Lead Handler Types
 *
 * Response bodies returned by the lead handlers. Request bodies are the
 * shared `New*` input types.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::storage::BackendTier;

/// Standard response envelope
///
/// ```json
/// { "success": true, "message": "Contact form submitted successfully", "data": { ... } }
/// ```
#[derive(Serialize, Deserialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Successful response carrying only a payload
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Successful response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Details of a database health probe
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct DbHealthDetails {
    pub tier: BackendTier,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newsletter_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response for `GET /api/db-health`
#[derive(Serialize, Debug)]
pub struct DbHealthResponse {
    pub success: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub details: DbHealthDetails,
}

/// Response for `GET /api/health`
#[derive(Serialize, Debug)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub tier: BackendTier,
}
