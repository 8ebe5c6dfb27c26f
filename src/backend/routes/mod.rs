//! Route Configuration Module
//!
//! Configures all HTTP routes for the backend server.
//!
//! # Architecture
//!
//! - **`router`** - Main router creation (CORS, static site, fallback)
//! - **`api_routes`** - JSON API endpoints
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - API endpoint routes
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
