/**
 * Submission Service
 *
 * The facade request handlers talk to. Validates input before any driver
 * call and owns the one policy no driver owns: subscribing an email that
 * is already on the list succeeds without storing a second row.
 *
 * # Newsletter Idempotency
 *
 * 1. `is_email_subscribed(email)` → `true` ⇒ `AlreadySubscribed`
 * 2. otherwise insert ⇒ `Created(record)`
 * 3. a `Constraint` error on that insert (another request won the race)
 *    ⇒ `AlreadySubscribed`
 *
 * The check and the insert are not atomic.
 */

use std::sync::Arc;

use serde::Serialize;

use crate::backend::storage::{BackendTier, Storage, StorageError, StorageResult};
use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};

/// Result of a newsletter subscription request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscribeOutcome {
    /// A new subscription was stored
    Created(NewsletterSubscription),
    /// The email was already on the list; nothing was stored
    AlreadySubscribed,
}

/// Reachability of the active backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StorageHealth {
    pub tier: BackendTier,
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Storage facade used by HTTP handlers
#[derive(Clone)]
pub struct SubmissionService {
    storage: Arc<dyn Storage>,
}

impl SubmissionService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Tier currently answering calls
    ///
    /// Changes from `Remote` to `Memory` after a fallback.
    pub fn tier(&self) -> BackendTier {
        self.storage.tier()
    }

    pub async fn initialize_database(&self) -> StorageResult<()> {
        self.storage.initialize_database().await
    }

    pub async fn create_contact_submission(
        &self,
        contact: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        let contact = contact.validate()?;
        let record = self.storage.create_contact_submission(contact).await?;
        tracing::info!("Stored contact submission {}", record.id);
        Ok(record)
    }

    pub async fn get_all_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        self.storage.get_all_contact_submissions().await
    }

    pub async fn subscribe_to_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> StorageResult<SubscribeOutcome> {
        let subscription = subscription.validate()?;

        if self.storage.is_email_subscribed(&subscription.email).await? {
            tracing::debug!("Email already subscribed; skipping insert");
            return Ok(SubscribeOutcome::AlreadySubscribed);
        }

        match self.storage.subscribe_to_newsletter(subscription).await {
            Ok(record) => {
                tracing::info!("Stored newsletter subscription {}", record.id);
                Ok(SubscribeOutcome::Created(record))
            }
            Err(StorageError::Constraint { message }) => {
                tracing::debug!("Concurrent subscription for the same email: {}", message);
                Ok(SubscribeOutcome::AlreadySubscribed)
            }
            Err(e) => Err(e),
        }
    }

    pub async fn is_email_subscribed(&self, email: &str) -> StorageResult<bool> {
        self.storage.is_email_subscribed(email).await
    }

    pub async fn get_all_newsletter_subscriptions(&self) -> StorageResult<Vec<NewsletterSubscription>> {
        self.storage.get_all_newsletter_subscriptions().await
    }

    pub async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        self.storage.get_user(id).await
    }

    pub async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.storage.get_user_by_username(username).await
    }

    /// Create a user; a taken username is a `Constraint` error
    pub async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let user = user.validate()?;
        self.storage.create_user(user).await
    }

    /// Probe the active backend
    pub async fn health(&self) -> StorageHealth {
        let result = self.storage.health_check().await;
        // Read the tier after the probe; the probe itself can trigger a fallback
        let tier = self.storage.tier();
        match result {
            Ok(()) => StorageHealth {
                tier,
                reachable: true,
                error: None,
            },
            Err(e) => {
                tracing::error!("Health check failed on {} backend: {}", tier, e);
                StorageHealth {
                    tier,
                    reachable: false,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}
