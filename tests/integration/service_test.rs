//! Submission service scenarios

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::Utc;
use mkite_leads::backend::leads::{SubmissionService, SubscribeOutcome};
use mkite_leads::backend::storage::StorageError;
use mkite_leads::shared::{NewContactSubmission, NewNewsletterSubscription, SharedError};
use pretty_assertions::assert_eq;

use crate::common::{contact, memory_service, RecordingStorage};

#[tokio::test]
async fn test_memory_scenario_ids_and_order() {
    let service = memory_service();
    let before = Utc::now();

    let first = assert_ok!(
        service
            .create_contact_submission(NewContactSubmission::new("A", "a@x.com", "123"))
            .await
    );
    assert_eq!(first.id, 1);
    assert_eq!(first.name, "A");
    assert_eq!(first.email, "a@x.com");
    assert_eq!(first.phone, "123");
    assert_eq!(first.kitchen_size, None);
    assert_eq!(first.message, None);
    assert!(first.created_at >= before);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["kitchenSize"], serde_json::Value::Null);
    assert_eq!(json["message"], serde_json::Value::Null);

    let second = assert_ok!(service.create_contact_submission(contact("B")).await);
    assert_eq!(second.id, 2);

    let all = assert_ok!(service.get_all_contact_submissions().await);
    assert_eq!(all, vec![second, first]);
}

#[tokio::test]
async fn test_optional_fields_are_kept() {
    let service = memory_service();
    let input = contact("C").with_kitchen_size("Large").with_message("Call after 5");

    let record = assert_ok!(service.create_contact_submission(input).await);
    assert_eq!(record.kitchen_size.as_deref(), Some("Large"));
    assert_eq!(record.message.as_deref(), Some("Call after 5"));
}

#[tokio::test]
async fn test_validation_runs_before_driver() {
    let storage = Arc::new(RecordingStorage::new());
    let service = SubmissionService::new(storage.clone());

    let result = service
        .create_contact_submission(NewContactSubmission::new("A", "a@x.com", "  "))
        .await;
    assert_err!(
        result,
        StorageError::Validation(SharedError::ValidationError { .. })
    );

    let result = service
        .subscribe_to_newsletter(NewNewsletterSubscription::new(""))
        .await;
    assert_err!(result, StorageError::Validation(_));

    assert!(storage.calls().is_empty(), "driver was called: {:?}", storage.calls());
}

#[tokio::test]
async fn test_subscribe_checks_before_inserting() {
    let storage = Arc::new(RecordingStorage::new());
    let service = SubmissionService::new(storage.clone());

    let first = assert_ok!(
        service
            .subscribe_to_newsletter(NewNewsletterSubscription::new("a@x.com"))
            .await
    );
    assert_matches!(first, SubscribeOutcome::Created(ref record) if record.email == "a@x.com");

    let second = assert_ok!(
        service
            .subscribe_to_newsletter(NewNewsletterSubscription::new("a@x.com"))
            .await
    );
    assert_eq!(second, SubscribeOutcome::AlreadySubscribed);

    assert_eq!(
        storage.calls(),
        vec![
            "is_email_subscribed",
            "subscribe_to_newsletter",
            "is_email_subscribed",
        ]
    );
    assert_eq!(assert_ok!(service.get_all_newsletter_subscriptions().await).len(), 1);
}

#[tokio::test]
async fn test_constraint_on_insert_means_already_subscribed() {
    let storage = Arc::new(RecordingStorage::rejecting_newsletter_inserts());
    let service = SubmissionService::new(storage);

    let outcome = assert_ok!(
        service
            .subscribe_to_newsletter(NewNewsletterSubscription::new("race@x.com"))
            .await
    );
    assert_eq!(outcome, SubscribeOutcome::AlreadySubscribed);
}

#[tokio::test]
async fn test_distinct_emails_each_stored() {
    let service = memory_service();
    for email in ["a@x.com", "b@x.com", "c@x.com"] {
        let outcome = assert_ok!(
            service
                .subscribe_to_newsletter(NewNewsletterSubscription::new(email))
                .await
        );
        assert_matches!(outcome, SubscribeOutcome::Created(_));
    }

    let all = assert_ok!(service.get_all_newsletter_subscriptions().await);
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].email, "c@x.com");
    assert_newest_first!(all);

    assert!(assert_ok!(service.is_email_subscribed("b@x.com").await));
    assert!(!assert_ok!(service.is_email_subscribed("d@x.com").await));
}

#[tokio::test]
async fn test_duplicate_username_is_constraint() {
    let service = memory_service();
    assert_ok!(
        service
            .create_user(mkite_leads::shared::NewUser::new("admin", "secret"))
            .await
    );

    let result = service
        .create_user(mkite_leads::shared::NewUser::new("admin", "other"))
        .await;
    assert_err!(result, StorageError::Constraint { .. });
}
