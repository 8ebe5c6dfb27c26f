/**
 * API Routes
 *
 * # Routes
 *
 * ## Public
 * - `POST /api/contact` - Submit the contact form
 * - `POST /api/subscribe` - Subscribe an email to the newsletter
 *
 * ## Admin
 * - `GET /api/admin/contacts` - All contact submissions, newest first
 * - `GET /api/admin/newsletters` - All newsletter subscriptions, newest first
 *
 * ## Health
 * - `GET /api/db-health` - Active storage tier, reachability and row counts
 * - `GET /api/health` - Liveness
 *
 * Any other path under `/api` gets a JSON 404 instead of the site.
 */

use axum::{
    routing::{any, get, post},
    Router,
};

use crate::backend::leads::handlers::{
    api_not_found, create_contact, db_health, health, list_contacts, list_newsletters, subscribe,
};
use crate::backend::server::state::AppState;

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/api/contact", post(create_contact))
        .route("/api/subscribe", post(subscribe))
        // Admin lists (no authentication)
        .route("/api/admin/contacts", get(list_contacts))
        .route("/api/admin/newsletters", get(list_newsletters))
        .route("/api/db-health", get(db_health))
        .route("/api/health", get(health))
        .route("/api", any(api_not_found))
        .route("/api/{*rest}", any(api_not_found))
}
