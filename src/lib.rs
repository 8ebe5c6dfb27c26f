//! mkite_leads - Lead Capture Backend
//!
//! Storage and HTTP API for a kitchen-design marketing site: contact form
//! submissions, newsletter subscriptions and admin users.
//!
//! # Module Structure
//!
//! - **`shared`** - Types with no server dependencies
//!   - Record model (`ContactSubmission`, `NewsletterSubscription`, `User`)
//!   - Storage configuration
//!   - Error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Storage drivers: in-memory, PostgreSQL, remote REST
//!   - Backend selection and the in-memory fallback supervisor
//!   - Submission service and Axum HTTP handlers
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the backend module and its
//!   dependencies (axum, sqlx, tower-http, ...)
//!
//! # Storage Tiers
//!
//! One driver is chosen at startup, first match wins:
//!
//! 1. Remote REST credentials → remote driver, demoted to in-memory
//!    storage for the rest of the process if a table is missing
//! 2. `DATABASE_URL` → PostgreSQL driver
//! 3. Otherwise → in-memory driver
//!
//! # Usage
//!
//! ```rust,no_run
//! use mkite_leads::backend::leads::SubmissionService;
//! use mkite_leads::backend::storage::{select_storage, Storage};
//! use mkite_leads::shared::{NewContactSubmission, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let storage = select_storage(&StorageConfig::from_env()?)?;
//! storage.initialize_database().await?;
//!
//! let service = SubmissionService::new(storage);
//! let record = service
//!     .create_contact_submission(NewContactSubmission::new("Jane", "jane@example.com", "555-0100"))
//!     .await?;
//! assert_eq!(record.name, "Jane");
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
