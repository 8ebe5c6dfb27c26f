//! Remote driver and fallback supervisor against a PostgREST double

use assert_matches::assert_matches;
use mkite_leads::backend::leads::{SubmissionService, SubscribeOutcome};
use mkite_leads::backend::storage::{select_storage, BackendTier, StorageError};
use mkite_leads::shared::{NewNewsletterSubscription, StorageConfig};
use pretty_assertions::assert_eq;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    contact, mount_empty_tables, mount_missing_table, remote_config, request_count, rest_error,
    TEST_KEY,
};

fn remote_service(config: &StorageConfig) -> SubmissionService {
    SubmissionService::new(assert_ok!(select_storage(config)))
}

async fn server_missing_all_tables() -> MockServer {
    let server = MockServer::start().await;
    for table in ["users", "contact_submissions", "newsletters"] {
        mount_missing_table(&server, table).await;
    }
    server
}

#[tokio::test]
async fn test_first_call_succeeds_and_later_calls_stay_local() {
    let server = server_missing_all_tables().await;
    let service = remote_service(&remote_config(&server));
    assert_eq!(service.tier(), BackendTier::Remote);

    let record = assert_ok!(service.create_contact_submission(contact("A")).await);
    assert_eq!(record.id, 1);
    assert_eq!(service.tier(), BackendTier::Memory);
    assert_eq!(request_count(&server).await, 1);

    // Every operation now goes to memory, not only the one that failed
    let outcome = assert_ok!(
        service
            .subscribe_to_newsletter(NewNewsletterSubscription::new("a@x.com"))
            .await
    );
    assert_matches!(outcome, SubscribeOutcome::Created(_));
    let contacts = assert_ok!(service.get_all_contact_submissions().await);
    assert_eq!(contacts, vec![record]);

    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_each_process_gets_its_own_local_store() {
    let server = server_missing_all_tables().await;
    let config = remote_config(&server);

    let first = remote_service(&config);
    assert_ok!(first.create_contact_submission(contact("A")).await);
    assert_ok!(first.create_contact_submission(contact("B")).await);

    let second = remote_service(&config);
    let contacts = assert_ok!(second.get_all_contact_submissions().await);
    assert!(contacts.is_empty());
    assert_eq!(second.tier(), BackendTier::Memory);
}

#[tokio::test]
async fn test_initialize_demotes_at_startup() {
    let server = MockServer::start().await;
    mount_missing_table(&server, "newsletters").await;
    mount_empty_tables(&server).await;

    let service = remote_service(&remote_config(&server));
    assert_ok!(service.initialize_database().await);
    assert_eq!(service.tier(), BackendTier::Memory);

    let seen = request_count(&server).await;
    assert_ok!(service.get_all_newsletter_subscriptions().await);
    assert_eq!(request_count(&server).await, seen);
}

#[tokio::test]
async fn test_connection_errors_propagate_and_keep_remote() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let service = remote_service(&remote_config(&server));
    let result = service.get_all_contact_submissions().await;
    assert_err!(result, StorageError::Connection { .. });
    assert_eq!(service.tier(), BackendTier::Remote);

    let result = service.get_all_contact_submissions().await;
    assert_err!(result, StorageError::Connection { .. });
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn test_remote_unique_violation_is_already_subscribed() {
    let server = MockServer::start().await;
    mount_empty_tables(&server).await;
    Mock::given(method("POST"))
        .and(path("/rest/v1/newsletters"))
        .respond_with(rest_error(
            409,
            "23505",
            "duplicate key value violates unique constraint \"newsletters_email_key\"",
        ))
        .mount(&server)
        .await;

    let service = remote_service(&remote_config(&server));
    let outcome = assert_ok!(
        service
            .subscribe_to_newsletter(NewNewsletterSubscription::new("a@x.com"))
            .await
    );
    assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);
    assert_eq!(service.tier(), BackendTier::Remote);
}

#[tokio::test]
async fn test_swapped_credentials_behave_the_same() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/rest/v1/contact_submissions"))
        .and(header("apikey", TEST_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 7, "name": "A", "email": "a@x.com", "phone": "1",
             "kitchen_size": null, "message": null, "created_at": "2024-05-01T12:00:00Z"}
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let ordered = StorageConfig::builder()
        .remote_url(server.uri())
        .remote_key(TEST_KEY)
        .build()
        .unwrap();
    let swapped = StorageConfig::builder()
        .remote_url(TEST_KEY)
        .remote_key(server.uri())
        .build()
        .unwrap();

    let from_ordered = assert_ok!(remote_service(&ordered).get_all_contact_submissions().await);
    let from_swapped = assert_ok!(remote_service(&swapped).get_all_contact_submissions().await);

    assert_eq!(from_ordered, from_swapped);
    assert_eq!(from_ordered[0].id, 7);
}
