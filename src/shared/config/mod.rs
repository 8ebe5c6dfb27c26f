//! Storage configuration
//!
//! Holds the raw credentials that decide which storage backend the process
//! uses. Values are kept exactly as supplied; deciding whether they are
//! usable (and un-swapping them) is the backend selector's job.

use std::time::Duration;

use thiserror::Error;

/// Environment variables holding the remote REST service URL, in priority order
pub const REMOTE_URL_VARS: [&str; 2] = ["VITE_SUPABASE_URL", "SUPABASE_URL"];

/// Environment variables holding the remote REST service API token, in priority order
pub const REMOTE_KEY_VARS: [&str; 2] = ["VITE_SUPABASE_ANON_KEY", "SUPABASE_ANON_KEY"];

/// Environment variable holding the direct PostgreSQL connection string
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Environment variable holding the storage request timeout in seconds
pub const REMOTE_TIMEOUT_VAR: &str = "REMOTE_TIMEOUT_SECS";

const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Remote REST service URL (may hold the token if the operator swapped them)
    pub remote_url: Option<String>,
    /// Remote REST service API token
    pub remote_key: Option<String>,
    /// Direct PostgreSQL connection string
    pub database_url: Option<String>,
    /// Per-request timeout for the remote REST service, and how long the
    /// PostgreSQL pool waits for a connection
    pub request_timeout: Duration,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            remote_url: None,
            remote_key: None,
            database_url: None,
            request_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

impl StorageConfig {
    /// Create a new StorageConfigBuilder
    pub fn builder() -> StorageConfigBuilder {
        StorageConfigBuilder::default()
    }

    /// Build the configuration from a key lookup function
    ///
    /// The lookup is usually `|key| std::env::var(key).ok()`. Blank values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|key| non_blank(lookup(*key)));

        let request_timeout = match non_blank(lookup(REMOTE_TIMEOUT_VAR)) {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| ConfigError::InvalidNumber { key: REMOTE_TIMEOUT_VAR, value: raw.clone() })?;
                Duration::from_secs(secs)
            }
            None => DEFAULT_REMOTE_TIMEOUT,
        };

        Ok(Self {
            remote_url: first(&REMOTE_URL_VARS[..]),
            remote_key: first(&REMOTE_KEY_VARS[..]),
            database_url: first(&[DATABASE_URL_VAR][..]),
            request_timeout,
        })
    }

    /// Build the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.request_timeout.is_zero() {
            return Err(ConfigError::InvalidNumber {
                key: REMOTE_TIMEOUT_VAR,
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Builder for StorageConfig
#[derive(Debug, Default)]
pub struct StorageConfigBuilder {
    remote_url: Option<String>,
    remote_key: Option<String>,
    database_url: Option<String>,
    request_timeout: Option<Duration>,
}

impl StorageConfigBuilder {
    /// Set the remote REST service URL
    pub fn remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote_url = Some(url.into());
        self
    }

    /// Set the remote REST service API token
    pub fn remote_key(mut self, key: impl Into<String>) -> Self {
        self.remote_key = Some(key.into());
        self
    }

    /// Set the direct PostgreSQL connection string
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the remote request timeout
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StorageConfig, ConfigError> {
        let config = StorageConfig {
            remote_url: non_blank(self.remote_url),
            remote_key: non_blank(self.remote_key),
            database_url: non_blank(self.database_url),
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REMOTE_TIMEOUT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid number for {key}: {value}")]
    InvalidNumber { key: &'static str, value: String },
}
