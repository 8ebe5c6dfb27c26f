//! HTTP endpoints through the axum router

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use mkite_leads::backend::storage::{FallbackStorage, RemoteCredentials, RestStorage};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{get, memory_router, post, router, TEST_KEY};

#[tokio::test]
async fn test_contact_created() {
    let app = memory_router();
    let (status, body) = post(
        &app,
        "/api/contact",
        json!({"name": "Jane", "email": "jane@example.com", "phone": "555-0100", "kitchenSize": "Medium"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["kitchenSize"], "Medium");
    assert_eq!(body["data"]["message"], serde_json::Value::Null);
    assert!(body["data"]["createdAt"].is_string());
}

#[tokio::test]
async fn test_contact_missing_field_is_bad_request() {
    let app = memory_router();
    let (status, body) = post(&app, "/api/contact", json!({"email": "jane@example.com", "phone": "1"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Name is required");

    let (_, list) = get(&app, "/api/admin/contacts").await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_contact_malformed_body_is_bad_request() {
    let app = memory_router();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_subscribe_then_already_subscribed() {
    let app = memory_router();

    let (status, body) = post(&app, "/api/subscribe", json!({"email": "a@x.com"})).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["email"], "a@x.com");

    let (status, body) = post(&app, "/api/subscribe", json!({"email": "a@x.com"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"success": true, "message": "Email is already subscribed"})
    );

    let (_, list) = get(&app, "/api/admin/newsletters").await;
    assert_eq!(list["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_subscribe_without_email_is_bad_request() {
    let app = memory_router();
    let (status, body) = post(&app, "/api/subscribe", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Email is required");
}

#[tokio::test]
async fn test_admin_lists_newest_first() {
    let app = memory_router();
    for name in ["First", "Second", "Third"] {
        post(&app, "/api/contact", json!({"name": name, "email": "x@x.com", "phone": "1"})).await;
    }

    let (status, body) = get(&app, "/api/admin/contacts").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_health_endpoints_report_tier() {
    let app = memory_router();
    post(&app, "/api/subscribe", json!({"email": "a@x.com"})).await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["tier"], "memory");

    let (status, body) = get(&app, "/api/db-health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["details"],
        json!({"tier": "memory", "reachable": true, "contactCount": 0, "newsletterCount": 1})
    );
}

#[tokio::test]
async fn test_db_health_reports_unreachable_remote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let remote = RestStorage::new(
        RemoteCredentials {
            url: server.uri(),
            key: TEST_KEY.to_string(),
        },
        Duration::from_secs(2),
    )
    .unwrap();
    let app = router(Arc::new(FallbackStorage::new(Arc::new(remote))));

    let (status, body) = get(&app, "/api/db-health").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["details"]["tier"], "remote");
    assert_eq!(body["details"]["reachable"], false);
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = memory_router();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_unknown_paths_serve_the_site() {
    let app = memory_router();
    let request = Request::builder()
        .uri("/gallery/modern-kitchens")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<title>Kitchen Design</title>"));
}

#[tokio::test]
async fn test_unknown_api_path_is_json_not_found() {
    let app = memory_router();

    let (status, body) = get(&app, "/api/admin/contact").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        json!({"success": false, "message": "No API route for /api/admin/contact", "status": 404})
    );

    let (status, body) = post(&app, "/api/contacts", json!({"name": "A"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

/// Log sink shared with a `tracing_subscriber` fmt layer
#[derive(Clone, Default)]
struct LogBuffer(Arc<std::sync::Mutex<Vec<u8>>>);

impl std::io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[tokio::test]
async fn test_contact_fields_stay_out_of_logs() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = memory_router();
    let (status, _) = post(
        &app,
        "/api/contact",
        json!({"name": "Ada Visitor", "email": "ada.visitor@example.com", "phone": "555-0199"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
    assert!(output.contains("Stored contact submission 1"));
    assert!(!output.contains("ada.visitor@example.com"));
    assert!(!output.contains("Ada Visitor"));
    assert!(!output.contains("555-0199"));
}
