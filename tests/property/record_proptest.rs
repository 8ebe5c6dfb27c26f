//! Property-based tests for the submission service
//!
//! Uses proptest to generate contact inputs and emails, driving the
//! service over a fresh in-memory driver for each case.

use chrono::Utc;
use mkite_leads::backend::leads::SubscribeOutcome;
use mkite_leads::backend::storage::StorageError;
use mkite_leads::shared::{NewContactSubmission, NewNewsletterSubscription};
use proptest::prelude::*;

use crate::common::memory_service;

fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9@. +-]{0,12}[A-Za-z0-9]{1,8}"
}

fn blank() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

proptest! {
    #[test]
    fn test_created_contact_is_listed_once(
        name in field(),
        email in field(),
        phone in field(),
        kitchen_size in proptest::option::of(field()),
        message in proptest::option::of(field()),
    ) {
        let service = memory_service();
        let mut input = NewContactSubmission::new(name, email, phone);
        input.kitchen_size = kitchen_size;
        input.message = message;

        let before = Utc::now();
        let created = tokio_test::block_on(service.create_contact_submission(input.clone())).unwrap();
        let all = tokio_test::block_on(service.get_all_contact_submissions()).unwrap();

        prop_assert_eq!(all.len(), 1);
        let stored = &all[0];
        prop_assert_eq!(stored, &created);
        prop_assert_eq!(&stored.name, &input.name);
        prop_assert_eq!(&stored.email, &input.email);
        prop_assert_eq!(&stored.phone, &input.phone);
        prop_assert_eq!(&stored.kitchen_size, &input.kitchen_size);
        prop_assert_eq!(&stored.message, &input.message);
        prop_assert!(stored.created_at >= before);
    }

    #[test]
    fn test_subscribing_twice_stores_once(email in field()) {
        let service = memory_service();

        let first = tokio_test::block_on(
            service.subscribe_to_newsletter(NewNewsletterSubscription::new(email.clone())),
        )
        .unwrap();
        let second = tokio_test::block_on(
            service.subscribe_to_newsletter(NewNewsletterSubscription::new(email.clone())),
        )
        .unwrap();

        prop_assert!(matches!(first, SubscribeOutcome::Created(_)));
        prop_assert_eq!(second, SubscribeOutcome::AlreadySubscribed);

        let all = tokio_test::block_on(service.get_all_newsletter_subscriptions()).unwrap();
        prop_assert_eq!(all.iter().filter(|s| s.email == email).count(), 1);
    }

    #[test]
    fn test_blank_required_field_is_rejected(
        name in field(),
        email in field(),
        phone in field(),
        blank in blank(),
        which in 0usize..3,
    ) {
        let service = memory_service();
        let mut input = NewContactSubmission::new(name, email, phone);
        match which {
            0 => input.name = blank,
            1 => input.email = blank,
            _ => input.phone = blank,
        }

        let result = tokio_test::block_on(service.create_contact_submission(input));
        prop_assert!(matches!(result, Err(StorageError::Validation(_))));

        let all = tokio_test::block_on(service.get_all_contact_submissions()).unwrap();
        prop_assert!(all.is_empty());
    }
}
