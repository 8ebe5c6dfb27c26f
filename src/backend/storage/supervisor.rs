/**
 * Fallback Supervisor
 *
 * Wraps the remote REST driver. The remote service cannot create tables,
 * so a missing table fails the same way for the rest of the process. The
 * first time any operation reports `SchemaMissing`, the supervisor builds a
 * fresh `MemoryStorage`, switches to it for good and replays the operation
 * there. The caller sees the replayed result.
 *
 * # States
 *
 * - `Remote` - initial; every call goes to the remote driver
 * - `Local` - terminal; every call goes to the in-memory driver
 *
 * Any other error (timeouts, constraint violations) propagates unchanged
 * and leaves the state alone.
 */

use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use crate::backend::storage::{BackendTier, MemoryStorage, Storage, StorageError, StorageResult};
use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};

/// Which driver the supervisor is routing to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorMode {
    Remote,
    Local,
}

/// Remote driver with one-way fallback to in-memory storage
pub struct FallbackStorage {
    remote: Arc<dyn Storage>,
    // Written at most once, on the Remote → Local transition
    local: OnceLock<Arc<dyn Storage>>,
}

impl FallbackStorage {
    pub fn new(remote: Arc<dyn Storage>) -> Self {
        Self {
            remote,
            local: OnceLock::new(),
        }
    }

    pub fn mode(&self) -> SupervisorMode {
        if self.local.get().is_some() {
            SupervisorMode::Local
        } else {
            SupervisorMode::Remote
        }
    }

    /// Switch to local storage, building it on the first call
    fn demote(&self, table: &str, operation: &str) -> Arc<dyn Storage> {
        let mut switched = false;
        let local = self.local.get_or_init(|| {
            switched = true;
            Arc::new(MemoryStorage::new())
        });

        if switched {
            tracing::warn!(
                "Table '{}' is missing on the remote backend (during {}); switching to in-memory storage. Data will not survive a restart.",
                table,
                operation
            );
        }
        Arc::clone(local)
    }

    /// Run one logical operation against the active driver
    ///
    /// `op` is called again with the in-memory driver if the remote attempt
    /// reports `SchemaMissing`.
    async fn run<T, F>(&self, operation: &'static str, op: F) -> StorageResult<T>
    where
        F: Fn(Arc<dyn Storage>) -> BoxFuture<'static, StorageResult<T>> + Send + Sync,
        T: Send,
    {
        if let Some(local) = self.local.get() {
            return op(Arc::clone(local)).await;
        }

        match op(Arc::clone(&self.remote)).await {
            Err(StorageError::SchemaMissing { table }) => {
                let local = self.demote(&table, operation);
                op(local).await
            }
            result => result,
        }
    }
}

#[async_trait]
impl Storage for FallbackStorage {
    fn tier(&self) -> BackendTier {
        match self.mode() {
            SupervisorMode::Remote => BackendTier::Remote,
            SupervisorMode::Local => BackendTier::Memory,
        }
    }

    async fn initialize_database(&self) -> StorageResult<()> {
        self.run("initialize_database", |storage| {
            Box::pin(async move { storage.initialize_database().await })
        })
        .await
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.run("health_check", |storage| {
            Box::pin(async move { storage.health_check().await })
        })
        .await
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        self.run("get_user", move |storage| {
            Box::pin(async move { storage.get_user(id).await })
        })
        .await
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let username = username.to_string();
        self.run("get_user_by_username", move |storage| {
            let username = username.clone();
            Box::pin(async move { storage.get_user_by_username(&username).await })
        })
        .await
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        self.run("create_user", move |storage| {
            let user = user.clone();
            Box::pin(async move { storage.create_user(user).await })
        })
        .await
    }

    async fn create_contact_submission(
        &self,
        contact: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        self.run("create_contact_submission", move |storage| {
            let contact = contact.clone();
            Box::pin(async move { storage.create_contact_submission(contact).await })
        })
        .await
    }

    async fn get_all_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        self.run("get_all_contact_submissions", |storage| {
            Box::pin(async move { storage.get_all_contact_submissions().await })
        })
        .await
    }

    async fn subscribe_to_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> StorageResult<NewsletterSubscription> {
        self.run("subscribe_to_newsletter", move |storage| {
            let subscription = subscription.clone();
            Box::pin(async move { storage.subscribe_to_newsletter(subscription).await })
        })
        .await
    }

    async fn is_email_subscribed(&self, email: &str) -> StorageResult<bool> {
        let email = email.to_string();
        self.run("is_email_subscribed", move |storage| {
            let email = email.clone();
            Box::pin(async move { storage.is_email_subscribed(&email).await })
        })
        .await
    }

    async fn get_all_newsletter_subscriptions(&self) -> StorageResult<Vec<NewsletterSubscription>> {
        self.run("get_all_newsletter_subscriptions", |storage| {
            Box::pin(async move { storage.get_all_newsletter_subscriptions().await })
        })
        .await
    }
}
