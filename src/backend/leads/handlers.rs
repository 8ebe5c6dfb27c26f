/**
 * Lead Handlers
 *
 * HTTP handlers for the contact form, the newsletter sign-up, the admin
 * lists and the health endpoints. Every handler goes through
 * `SubmissionService`; none touches a driver directly.
 *
 * # Status Codes
 *
 * - `201 Created` - new contact submission or newsletter subscription
 * - `200 OK` - lists, health, and an email that was already subscribed
 * - `400 Bad Request` - missing required field or a body that is not JSON
 * - `404 Not Found` - unknown path under `/api`
 * - `500 Internal Server Error` - driver failure
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;

use crate::backend::error::BackendError;
use crate::backend::leads::service::{SubmissionService, SubscribeOutcome};
use crate::backend::leads::types::{
    ApiResponse, DbHealthDetails, DbHealthResponse, HealthResponse,
};
use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewsletterSubscription,
};

fn bad_body(rejection: JsonRejection) -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, rejection.body_text())
}

/// Contact form handler
///
/// # Example Request
///
/// ```http
/// POST /api/contact HTTP/1.1
/// Content-Type: application/json
///
/// {
///   "name": "Jane",
///   "email": "jane@example.com",
///   "phone": "555-0100",
///   "kitchenSize": "Medium"
/// }
/// ```
///
/// # Errors
///
/// * `400 Bad Request` - `name`, `email` or `phone` missing or empty
/// * `500 Internal Server Error` - the backend failed
pub async fn create_contact(
    State(service): State<SubmissionService>,
    payload: Result<Json<NewContactSubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ContactSubmission>>), BackendError> {
    let Json(contact) = payload.map_err(bad_body)?;

    let record = service.create_contact_submission(contact).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok("Contact form submitted successfully", record)),
    ))
}

/// Newsletter sign-up handler
///
/// Returns `201` with the stored record for a new email, or `200` with
/// `"Email is already subscribed"` and no record otherwise.
pub async fn subscribe(
    State(service): State<SubmissionService>,
    payload: Result<Json<NewNewsletterSubscription>, JsonRejection>,
) -> Result<Response, BackendError> {
    let Json(subscription) = payload.map_err(bad_body)?;

    let response = match service.subscribe_to_newsletter(subscription).await? {
        SubscribeOutcome::Created(record) => (
            StatusCode::CREATED,
            Json(ApiResponse::ok("Successfully subscribed to newsletter", record)),
        )
            .into_response(),
        SubscribeOutcome::AlreadySubscribed => (
            StatusCode::OK,
            Json(ApiResponse::<NewsletterSubscription>::message(
                "Email is already subscribed",
            )),
        )
            .into_response(),
    };
    Ok(response)
}

/// List contact submissions, newest first
pub async fn list_contacts(
    State(service): State<SubmissionService>,
) -> Result<Json<ApiResponse<Vec<ContactSubmission>>>, BackendError> {
    let contacts = service.get_all_contact_submissions().await?;
    Ok(Json(ApiResponse::data(contacts)))
}

/// List newsletter subscriptions, newest first
pub async fn list_newsletters(
    State(service): State<SubmissionService>,
) -> Result<Json<ApiResponse<Vec<NewsletterSubscription>>>, BackendError> {
    let subscriptions = service.get_all_newsletter_subscriptions().await?;
    Ok(Json(ApiResponse::data(subscriptions)))
}

/// Database health handler
///
/// Probes the active backend and, when it answers, counts both lists.
pub async fn db_health(State(service): State<SubmissionService>) -> Response {
    let health = service.health().await;

    let counts = if health.reachable {
        let contacts = service.get_all_contact_submissions().await;
        let newsletters = service.get_all_newsletter_subscriptions().await;
        match (contacts, newsletters) {
            (Ok(c), Ok(n)) => Ok((c.len(), n.len())),
            (Err(e), _) | (_, Err(e)) => Err(e.to_string()),
        }
    } else {
        Err(health.error.unwrap_or_else(|| "backend unreachable".to_string()))
    };

    let timestamp = Utc::now();
    // Re-read the tier; counting may have triggered a fallback
    let tier = service.tier();

    match counts {
        Ok((contact_count, newsletter_count)) => Json(DbHealthResponse {
            success: true,
            message: format!("{} storage is working", tier),
            timestamp,
            details: DbHealthDetails {
                tier,
                reachable: true,
                contact_count: Some(contact_count),
                newsletter_count: Some(newsletter_count),
                error: None,
            },
        })
        .into_response(),
        Err(error) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(DbHealthResponse {
                success: false,
                message: format!("{} storage is not reachable", tier),
                timestamp,
                details: DbHealthDetails {
                    tier,
                    reachable: false,
                    contact_count: None,
                    newsletter_count: None,
                    error: Some(error),
                },
            }),
        )
            .into_response(),
    }
}

/// Liveness handler
pub async fn health(State(service): State<SubmissionService>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: Utc::now(),
        tier: service.tier(),
    })
}

/// Unknown `/api` path
///
/// Answers with a JSON 404 so a mistyped API call never receives the
/// site's `index.html`.
pub async fn api_not_found(uri: Uri) -> BackendError {
    BackendError::handler(
        StatusCode::NOT_FOUND,
        format!("No API route for {}", uri.path()),
    )
}
