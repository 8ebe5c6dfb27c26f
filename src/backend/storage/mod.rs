//! Storage Module
//!
//! A uniform storage contract over contact submissions, newsletter
//! subscriptions and users, with three interchangeable drivers and the
//! logic that picks one of them at startup.
//!
//! # Architecture
//!
//! - **`memory`** - in-process maps, never fails, lost on restart
//! - **`postgres`** - direct PostgreSQL through a sqlx pool; creates its own tables
//! - **`remote`** - hosted PostgREST-style service over HTTPS; cannot create tables
//! - **`supervisor`** - wraps the remote driver and demotes the process to
//!   the in-memory driver the first time a table turns out to be missing
//! - **`selector`** - reads `StorageConfig` and builds exactly one driver
//! - **`rows`** - database row shapes shared by the SQL and REST drivers
//! - **`error`** - `StorageError`, the classified failure every driver returns
//!
//! # Module Structure
//!
//! ```text
//! storage/
//! ├── mod.rs        - Storage trait and tier enum
//! ├── error.rs      - StorageError
//! ├── rows.rs       - Row types and row → record conversion
//! ├── memory.rs     - MemoryStorage
//! ├── postgres.rs   - PostgresStorage
//! ├── remote.rs     - RestStorage
//! ├── supervisor.rs - FallbackStorage
//! └── selector.rs   - select_storage, credential sniffing
//! ```

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;

use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};

/// Storage error types
pub mod error;

/// Row types shared by the SQL and REST drivers
pub mod rows;

/// In-memory driver
pub mod memory;

/// Direct PostgreSQL driver
pub mod postgres;

/// Remote REST driver
pub mod remote;

/// Fallback supervisor for the remote driver
pub mod supervisor;

/// Backend selection
pub mod selector;

pub use error::StorageError;
pub use memory::MemoryStorage;
pub use postgres::PostgresStorage;
pub use remote::RestStorage;
pub use selector::{redact, resolve_remote_credentials, select_storage, RemoteCredentials};
pub use supervisor::{FallbackStorage, SupervisorMode};

/// Table holding users
pub const USERS_TABLE: &str = "users";

/// Table holding contact submissions
pub const CONTACTS_TABLE: &str = "contact_submissions";

/// Table holding newsletter subscriptions
pub const NEWSLETTERS_TABLE: &str = "newsletters";

/// All tables a backend must provide
pub const TABLES: [&str; 3] = [USERS_TABLE, CONTACTS_TABLE, NEWSLETTERS_TABLE];

pub type StorageResult<T> = Result<T, StorageError>;

/// Which kind of backend is serving requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendTier {
    /// Hosted REST service
    Remote,
    /// Direct PostgreSQL
    Relational,
    /// In-process maps
    Memory,
}

impl fmt::Display for BackendTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Remote => "remote",
            Self::Relational => "relational",
            Self::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Uniform storage contract implemented by every driver
///
/// List operations return records newest first. Drivers never return raw
/// transport errors; every failure is a classified [`StorageError`].
#[async_trait]
pub trait Storage: Send + Sync {
    /// Tier currently answering calls
    fn tier(&self) -> BackendTier;

    /// Prepare the backend (create or verify tables). Idempotent.
    async fn initialize_database(&self) -> StorageResult<()>;

    /// Cheap round trip proving the backend answers
    async fn health_check(&self) -> StorageResult<()>;

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>>;

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>>;

    async fn create_user(&self, user: NewUser) -> StorageResult<User>;

    /// Insert a submission, assigning `id` and `created_at`
    async fn create_contact_submission(
        &self,
        contact: NewContactSubmission,
    ) -> StorageResult<ContactSubmission>;

    async fn get_all_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>>;

    /// Insert a subscription. Callers check [`Storage::is_email_subscribed`] first.
    async fn subscribe_to_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> StorageResult<NewsletterSubscription>;

    async fn is_email_subscribed(&self, email: &str) -> StorageResult<bool>;

    async fn get_all_newsletter_subscriptions(&self) -> StorageResult<Vec<NewsletterSubscription>>;
}
