//! Leads Module
//!
//! Contact form submissions and newsletter sign-ups from the marketing
//! site, plus the admin lists and health endpoints over them.
//!
//! # Architecture
//!
//! - **`service`** - `SubmissionService`, the facade over the active storage driver
//! - **`handlers`** - axum handlers for `/api/contact`, `/api/subscribe`,
//!   `/api/admin/*` and the health endpoints
//! - **`types`** - response envelopes
//!
//! # Module Structure
//!
//! ```text
//! leads/
//! ├── mod.rs      - Module exports and documentation
//! ├── service.rs  - SubmissionService, SubscribeOutcome, StorageHealth
//! ├── handlers.rs - HTTP handlers
//! └── types.rs    - Response types
//! ```

/// Submission service
pub mod service;

/// HTTP handlers
pub mod handlers;

/// Response types
pub mod types;

pub use service::{StorageHealth, SubmissionService, SubscribeOutcome};
