//! Database rows
//!
//! Column names follow the persisted layout (`kitchen_size`, `created_at`).
//! The same row types decode sqlx results and PostgREST JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::{ContactSubmission, NewContactSubmission, NewsletterSubscription, User};

#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub struct UserRow {
    pub id: i32,
    pub username: String,
    pub password: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            password: row.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub struct ContactRow {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub kitchen_size: Option<String>,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<ContactRow> for ContactSubmission {
    fn from(row: ContactRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            kitchen_size: row.kitchen_size,
            message: row.message,
            created_at: row.created_at,
        }
    }
}

/// Insert payload for `contact_submissions`
#[derive(Debug, Serialize)]
pub struct ContactInsert<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub kitchen_size: Option<&'a str>,
    pub message: Option<&'a str>,
}

impl<'a> From<&'a NewContactSubmission> for ContactInsert<'a> {
    fn from(contact: &'a NewContactSubmission) -> Self {
        Self {
            name: &contact.name,
            email: &contact.email,
            phone: &contact.phone,
            kitchen_size: contact.kitchen_size.as_deref(),
            message: contact.message.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, sqlx::FromRow)]
pub struct NewsletterRow {
    pub id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<NewsletterRow> for NewsletterSubscription {
    fn from(row: NewsletterRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            created_at: row.created_at,
        }
    }
}
