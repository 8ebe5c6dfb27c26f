/**
 * Router Configuration
 *
 * Builds the single axum router for the process.
 *
 * # Route Order
 *
 * 1. API routes (`/api/...`); unknown `/api` paths get a JSON 404
 * 2. Static marketing site from `static_dir`
 * 3. `index.html` for any other path, so client-side routes load the app
 *
 * CORS is permissive: any origin, `GET`/`POST`/`OPTIONS`, `Content-Type`.
 */

use std::path::Path;

use axum::{
    http::{header, Method},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state holding the submission service
/// * `static_dir` - Directory of the built site; need not exist
pub fn create_router(app_state: AppState, static_dir: &Path) -> Router<()> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    let site = ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    let router = configure_api_routes(Router::new());

    router
        .fallback_service(site)
        .layer(cors)
        .with_state(app_state)
}
