/**
 * PostgreSQL Storage Driver
 *
 * Talks to PostgreSQL directly through a sqlx connection pool. Unlike the
 * remote REST driver it can create its own tables, so missing schema is
 * repaired by `initialize_database` instead of being papered over.
 *
 * If the server is unreachable when the process starts, the tables are
 * created by the first operation that finds it reachable again.
 *
 * # Queries
 *
 * All queries are parameterized. List ordering (`created_at DESC`) is done
 * by the database, not in Rust.
 */

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::backend::storage::rows::{ContactInsert, ContactRow, NewsletterRow, UserRow};
use crate::backend::storage::{
    BackendTier, Storage, StorageError, StorageResult, CONTACTS_TABLE, NEWSLETTERS_TABLE,
    USERS_TABLE,
};
use crate::shared::{
    ContactSubmission, NewContactSubmission, NewNewsletterSubscription, NewUser,
    NewsletterSubscription, User,
};

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
)
"#;

const CREATE_CONTACT_SUBMISSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS contact_submissions (
    id SERIAL PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT NOT NULL,
    kitchen_size TEXT,
    message TEXT,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW() NOT NULL
)
"#;

const CREATE_NEWSLETTERS: &str = r#"
CREATE TABLE IF NOT EXISTS newsletters (
    id SERIAL PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    created_at TIMESTAMP WITH TIME ZONE DEFAULT NOW() NOT NULL
)
"#;

/// Map a sqlx error raised while touching `table` to a classified error
fn classify(table: &str, error: sqlx::Error) -> StorageError {
    match &error {
        sqlx::Error::Database(db_error) => {
            StorageError::from_code(db_error.code().as_deref(), table, db_error.message())
        }
        _ => StorageError::connection(error.to_string()),
    }
}

/// Direct PostgreSQL storage driver
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
    tables_ready: Arc<AtomicBool>,
}

impl PostgresStorage {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            tables_ready: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Build a pool for `database_url` without opening a connection yet
    ///
    /// The first real connection happens in `initialize_database`, which
    /// reports an unreachable server as a `Connection` error once
    /// `acquire_timeout` has passed.
    pub fn connect_lazy(database_url: &str, acquire_timeout: Duration) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(|e| StorageError::connection(format!("invalid DATABASE_URL: {}", e)))?;
        Ok(Self::new(pool))
    }

    /// Get the underlying pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Whether `initialize_database` has succeeded on this pool
    pub fn tables_ready(&self) -> bool {
        self.tables_ready.load(Ordering::Acquire)
    }

    async fn ensure_tables(&self) -> StorageResult<()> {
        if self.tables_ready() {
            return Ok(());
        }
        self.initialize_database().await
    }

    /// Trivial read proving `table` exists
    ///
    /// `table` must be one of the known table names; it is not escaped.
    pub async fn probe_table(&self, table: &str) -> StorageResult<()> {
        sqlx::query(&format!("SELECT id FROM {} LIMIT 1", table))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify(table, e))?;
        Ok(())
    }
}

#[async_trait]
impl Storage for PostgresStorage {
    fn tier(&self) -> BackendTier {
        BackendTier::Relational
    }

    async fn initialize_database(&self) -> StorageResult<()> {
        tracing::info!("Creating PostgreSQL tables if they do not exist...");

        for (table, ddl) in [
            (USERS_TABLE, CREATE_USERS),
            (CONTACTS_TABLE, CREATE_CONTACT_SUBMISSIONS),
            (NEWSLETTERS_TABLE, CREATE_NEWSLETTERS),
        ] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create table {}: {:?}", table, e);
                    classify(table, e)
                })?;
        }

        self.tables_ready.store(true, Ordering::Release);
        tracing::info!("PostgreSQL tables ready");
        Ok(())
    }

    async fn health_check(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StorageError::connection(e.to_string()))?;
        Ok(())
    }

    async fn get_user(&self, id: i32) -> StorageResult<Option<User>> {
        self.ensure_tables().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(USERS_TABLE, e))?;

        Ok(row.map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> StorageResult<Option<User>> {
        self.ensure_tables().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify(USERS_TABLE, e))?;

        Ok(row.map(User::from))
    }

    async fn create_user(&self, user: NewUser) -> StorageResult<User> {
        self.ensure_tables().await?;

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (username, password)
            VALUES ($1, $2)
            RETURNING id, username, password
            "#,
        )
        .bind(&user.username)
        .bind(&user.password)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(USERS_TABLE, e))?;

        Ok(row.into())
    }

    async fn create_contact_submission(
        &self,
        contact: NewContactSubmission,
    ) -> StorageResult<ContactSubmission> {
        self.ensure_tables().await?;

        let insert = ContactInsert::from(&contact);
        let row = sqlx::query_as::<_, ContactRow>(
            r#"
            INSERT INTO contact_submissions (name, email, phone, kitchen_size, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, email, phone, kitchen_size, message, created_at
            "#,
        )
        .bind(insert.name)
        .bind(insert.email)
        .bind(insert.phone)
        .bind(insert.kitchen_size)
        .bind(insert.message)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(CONTACTS_TABLE, e))?;

        Ok(row.into())
    }

    async fn get_all_contact_submissions(&self) -> StorageResult<Vec<ContactSubmission>> {
        self.ensure_tables().await?;

        let rows = sqlx::query_as::<_, ContactRow>(
            r#"
            SELECT id, name, email, phone, kitchen_size, message, created_at
            FROM contact_submissions
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(CONTACTS_TABLE, e))?;

        Ok(rows.into_iter().map(ContactSubmission::from).collect())
    }

    async fn subscribe_to_newsletter(
        &self,
        subscription: NewNewsletterSubscription,
    ) -> StorageResult<NewsletterSubscription> {
        self.ensure_tables().await?;

        let row = sqlx::query_as::<_, NewsletterRow>(
            r#"
            INSERT INTO newsletters (email)
            VALUES ($1)
            RETURNING id, email, created_at
            "#,
        )
        .bind(&subscription.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(NEWSLETTERS_TABLE, e))?;

        Ok(row.into())
    }

    async fn is_email_subscribed(&self, email: &str) -> StorageResult<bool> {
        self.ensure_tables().await?;

        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (SELECT 1 FROM newsletters WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(NEWSLETTERS_TABLE, e))?;

        Ok(exists)
    }

    async fn get_all_newsletter_subscriptions(&self) -> StorageResult<Vec<NewsletterSubscription>> {
        self.ensure_tables().await?;

        let rows = sqlx::query_as::<_, NewsletterRow>(
            r#"
            SELECT id, email, created_at
            FROM newsletters
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(NEWSLETTERS_TABLE, e))?;

        Ok(rows.into_iter().map(NewsletterSubscription::from).collect())
    }
}
