/**
 * Application State Management
 *
 * The state container handed to the axum router, and the `FromRef`
 * implementations that let handlers extract only the part they need.
 *
 * # Example
 *
 * ```rust,no_run
 * use axum::extract::State;
 * use mkite_leads::backend::leads::SubmissionService;
 *
 * async fn handler(State(service): State<SubmissionService>) {
 *     let _tier = service.tier();
 * }
 * ```
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::leads::SubmissionService;
use crate::backend::storage::Storage;

/// Application state
///
/// Holds the submission service, which owns the single storage driver
/// chosen at startup. Cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub service: SubmissionService,
}

impl AppState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            service: SubmissionService::new(storage),
        }
    }
}

impl FromRef<AppState> for SubmissionService {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.service.clone()
    }
}
