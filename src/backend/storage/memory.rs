/**
 * In-Memory Storage Driver
 *
 * Keeps the three entity sets in process memory. Each set has its own id
 * counter starting at 1. Nothing survives a restart.
 *
 * # Thread Safety
 *
 * All maps and counters sit behind a single `std::sync::Mutex`. Every
 * operation takes the lock once, does its work and releases it before
 * returning; the lock is never held across an `.await`.
 */

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::backend::storage::{BackendTier, Storage, StorageError, StorageResult};
use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};

#[derive(Debug)]
struct Tables {
    users: BTreeMap<i32, User>,
    contacts: BTreeMap<i32, ContactSubmission>,
    newsletters: BTreeMap<i32, NewsletterSubscription>,
    next_user_id: i32,
    next_contact_id: i32,
    next_newsletter_id: i32,
}

impl Default for Tables {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            contacts: BTreeMap::new(),
            newsletters: BTreeMap::new(),
            next_user_id: 1,
            next_contact_id: 1,
            next_newsletter_id: 1,
        }
    }
}

/// In-memory storage driver
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: Mutex<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        // Every write is a single insert, so a poisoned lock holds consistent data.
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Newest first; equal timestamps fall back to insertion order, newest first.
fn newest_first<T: Clone>(records: &BTreeMap<i32, T>, created_at: impl Fn(&T) -> chrono::DateTime<Utc>) -> Vec<T> {
    let mut list: Vec<(i32, T)> = records.iter().map(|(id, r)| (*id, r.clone())).collect();
    list.sort_by(|(a_id, a), (b_id, b)| {
        created_at(b)
            .cmp(&created_at(a))
            .then_with(|| b_id.cmp(a_id))
    });
    list.into_iter().map(|(_, r)| r).collect()
}

#[async_trait]
impl Storage for MemoryStorage {
    fn tier(&self) -> BackendTier {
        BackendTier::Memory
    }

    async fn initialize_database(&self) -> StorageResult<()> {
        tracing::debug!("In-memory storage needs no initialization");
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        Ok(self.tables().users.get(&id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let mut tables = self.tables();
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(StorageError::constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        let id = tables.next_user_id;
        tables.next_user_id += 1;
        let user = User {
            id,
            username: user.username,
            password: user.password,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn create_contact_submission(
        &self,
        contact: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        let mut tables = self.tables();
        let id = tables.next_contact_id;
        tables.next_contact_id += 1;

        let record = ContactSubmission {
            id,
            name: contact.name,
            email: contact.email,
            phone: contact.phone,
            kitchen_size: contact.kitchen_size,
            message: contact.message,
            created_at: Utc::now(),
        };
        tables.contacts.insert(id, record.clone());
        Ok(record)
    }

    async fn get_all_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        Ok(newest_first(&self.tables().contacts, |c| c.created_at))
    }

    async fn subscribe_to_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> StorageResult<NewsletterSubscription> {
        let mut tables = self.tables();
        let id = tables.next_newsletter_id;
        tables.next_newsletter_id += 1;

        let record = NewsletterSubscription {
            id,
            email: subscription.email,
            created_at: Utc::now(),
        };
        tables.newsletters.insert(id, record.clone());
        Ok(record)
    }

    async fn is_email_subscribed(&self, email: &str) -> StorageResult<bool> {
        Ok(self
            .tables()
            .newsletters
            .values()
            .any(|subscription| subscription.email == email))
    }

    async fn get_all_newsletter_subscriptions(&self) -> StorageResult<Vec<NewsletterSubscription>> {
        Ok(newest_first(&self.tables().newsletters, |n| n.created_at))
    }
}
