//! Backend Module
//!
//! Server-side code: the storage drivers and the HTTP server that accepts
//! contact form submissions and newsletter sign-ups.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`storage`** - `Storage` trait, the in-memory, PostgreSQL and remote
//!   REST drivers, backend selection and the fallback supervisor
//! - **`leads`** - `SubmissionService` and the HTTP handlers over it
//! - **`routes`** - Route configuration and router assembly
//! - **`server`** - Configuration, application state and startup
//! - **`error`** - `BackendError` and its HTTP response conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - mkite-server binary
//! ├── storage/        - Drivers, selector, supervisor
//! ├── leads/          - Service and handlers
//! ├── routes/         - Route configuration
//! ├── server/         - Server initialization and state
//! └── error/          - Error types
//! ```
//!
//! # Request Flow
//!
//! ```text
//! HTTP request → handler → SubmissionService → Storage
//!                                               ├── MemoryStorage
//!                                               ├── PostgresStorage
//!                                               └── FallbackStorage → RestStorage
//!                                                                   ↘ MemoryStorage (after a missing table)
//! ```

/// Storage drivers and backend selection
pub mod storage;

/// Contact and newsletter service and handlers
pub mod leads;

/// Route configuration
pub mod routes;

/// Server initialization and state
pub mod server;

/// Backend error types
pub mod error;
