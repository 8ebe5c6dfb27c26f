/**
 * Remote REST Storage Driver
 *
 * Talks to a hosted PostgREST-style service (`{url}/rest/v1/{table}`) with a
 * project URL and an API token. The service exposes rows but not DDL, so
 * this driver can only detect missing tables, never create them.
 *
 * # Error Classification
 *
 * - PostgREST `code` `42P01` or `PGRST205` → `SchemaMissing`
 * - `23505` → `Constraint`
 * - transport errors, timeouts, auth failures, anything else → `Connection`
 */

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::storage::rows::{ContactInsert, ContactRow, NewsletterRow, UserRow};
use crate::backend::storage::selector::RemoteCredentials;
use crate::backend::storage::{
    BackendTier, Storage, StorageError, StorageResult, CONTACTS_TABLE, NEWSLETTERS_TABLE, TABLES,
    USERS_TABLE,
};
use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};

/// PostgREST code for "table not found in the schema cache"
pub const SCHEMA_CACHE_MISS: &str = "PGRST205";

/// Error body returned by PostgREST
#[derive(Debug, Default, Deserialize)]
struct RestErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Classify a non-success response from `table`
pub fn classify_response(status: StatusCode, body: &str, table: &str) -> StorageError {
    let parsed: RestErrorBody = serde_json::from_str(body).unwrap_or_default();
    let message = parsed
        .message
        .unwrap_or_else(|| format!("{} responded with {}", table, status));

    match parsed.code.as_deref() {
        Some(SCHEMA_CACHE_MISS) => StorageError::schema_missing(table),
        code => StorageError::from_code(code, table, message),
    }
}

fn classify_transport(table: &str, error: reqwest::Error) -> StorageError {
    if error.is_timeout() {
        StorageError::connection(format!("request to {} timed out", table))
    } else {
        StorageError::connection(format!("request to {} failed: {}", table, error))
    }
}

#[derive(Serialize)]
struct UserInsert<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NewsletterInsert<'a> {
    email: &'a str,
}

/// Remote REST storage driver
#[derive(Debug, Clone)]
pub struct RestStorage {
    client: Client,
    rest_url: String,
    api_key: String,
}

impl RestStorage {
    /// Create a driver for already-resolved credentials
    pub fn new(credentials: RemoteCredentials, timeout: Duration) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::connection(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            rest_url: format!("{}/rest/v1", credentials.url.trim_end_matches('/')),
            api_key: credentials.key,
        })
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{}", self.rest_url, table))
            .header("apikey", &self.api_key)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(header::ACCEPT, "application/json")
    }

    /// Send a request and decode the JSON body, classifying every failure
    async fn send<T: DeserializeOwned>(&self, table: &str, request: RequestBuilder) -> StorageResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| classify_transport(table, e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = classify_response(status, &body, table);
            tracing::debug!("{} request failed ({}): {}", table, status, error);
            return Err(error);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StorageError::connection(format!("unreadable response from {}: {}", table, e)))
    }

    async fn select<T: DeserializeOwned>(&self, table: &str, query: &[(&str, &str)]) -> StorageResult<Vec<T>> {
        self.send(table, self.request(Method::GET, table).query(query)).await
    }

    async fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(&self, table: &str, body: &B) -> StorageResult<T> {
        let request = self
            .request(Method::POST, table)
            .header("Prefer", "return=representation")
            .json(body);

        let rows: Vec<T> = self.send(table, request).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StorageError::connection(format!("insert into {} returned no row", table)))
    }

    /// Trivial read proving `table` exists
    pub async fn probe_table(&self, table: &str) -> StorageResult<()> {
        let _: Vec<serde_json::Value> = self.select(table, &[("select", "id"), ("limit", "1")]).await?;
        Ok(())
    }
}

#[async_trait]
impl Storage for RestStorage {
    fn tier(&self) -> BackendTier {
        BackendTier::Remote
    }

    /// Probe the three tables
    ///
    /// A missing table is returned as `SchemaMissing`; connectivity failures
    /// are logged and left for the first real operation to report.
    async fn initialize_database(&self) -> StorageResult<()> {
        tracing::info!("Checking remote tables...");

        let mut missing = Vec::new();
        for table in TABLES {
            match self.probe_table(table).await {
                Ok(()) => tracing::info!("Table {} exists", table),
                Err(StorageError::SchemaMissing { table }) => missing.push(table),
                Err(e) => tracing::error!("Error checking table {}: {}", table, e),
            }
        }

        match missing.first() {
            Some(table) => {
                tracing::warn!(
                    "Remote service is missing tables: {}. They must be created from the service console.",
                    missing.join(", ")
                );
                Err(StorageError::schema_missing(table.clone()))
            }
            None => {
                tracing::info!("Remote tables check complete");
                Ok(())
            }
        }
    }

    async fn health_check(&self) -> StorageResult<()> {
        self.probe_table(CONTACTS_TABLE).await
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        let id = format!("eq.{}", id);
        let rows: Vec<UserRow> = self
            .select(USERS_TABLE, &[("select", "*"), ("id", id.as_str())])
            .await?;
        Ok(rows.into_iter().next().map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        let username = format!("eq.{}", username);
        let rows: Vec<UserRow> = self
            .select(USERS_TABLE, &[("select", "*"), ("username", username.as_str())])
            .await?;
        Ok(rows.into_iter().next().map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        let body = [UserInsert {
            username: &user.username,
            password: &user.password,
        }];
        let row: UserRow = self.insert(USERS_TABLE, &body).await?;
        Ok(row.into())
    }

    async fn create_contact_submission(
        &self,
        contact: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        let body = [ContactInsert::from(&contact)];
        let row: ContactRow = self.insert(CONTACTS_TABLE, &body).await?;
        Ok(row.into())
    }

    async fn get_all_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        let rows: Vec<ContactRow> = self
            .select(CONTACTS_TABLE, &[("select", "*"), ("order", "created_at.desc,id.desc")])
            .await?;
        Ok(rows.into_iter().map(ContactSubmission::from).collect())
    }

    async fn subscribe_to_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> StorageResult<NewsletterSubscription> {
        let body = [NewsletterInsert {
            email: &subscription.email,
        }];
        let row: NewsletterRow = self.insert(NEWSLETTERS_TABLE, &body).await?;
        Ok(row.into())
    }

    async fn is_email_subscribed(&self, email: &str) -> StorageResult<bool> {
        let email = format!("eq.{}", email);
        let rows: Vec<serde_json::Value> = self
            .select(NEWSLETTERS_TABLE, &[("select", "id"), ("email", email.as_str())])
            .await?;
        Ok(!rows.is_empty())
    }

    async fn get_all_newsletter_subscriptions(&self) -> StorageResult<Vec<NewsletterSubscription>> {
        let rows: Vec<NewsletterRow> = self
            .select(NEWSLETTERS_TABLE, &[("select", "*"), ("order", "created_at.desc,id.desc")])
            .await?;
        Ok(rows.into_iter().map(NewsletterSubscription::from).collect())
    }
}
