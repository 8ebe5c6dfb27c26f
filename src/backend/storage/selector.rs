/**
 * Backend Selection
 *
 * Runs once at startup and builds exactly one driver, first match wins:
 *
 * 1. Remote URL + token both present and recognizable → `RestStorage`
 *    wrapped in `FallbackStorage`
 * 2. `DATABASE_URL` present → `PostgresStorage`
 * 3. Otherwise → `MemoryStorage`
 *
 * Operators sometimes paste the URL and token into each other's variables.
 * Shapes are sniffed: a URL starts with `http`, a token starts with `ey`
 * (base64 of `{"`). Swapped values are corrected with a warning; values
 * matching neither arrangement are ignored.
 */

use std::sync::Arc;

use crate::backend::storage::{
    FallbackStorage, MemoryStorage, PostgresStorage, RestStorage, Storage, StorageResult,
};
use crate::shared::StorageConfig;

/// Remote REST credentials in the right order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCredentials {
    pub url: String,
    pub key: String,
}

fn looks_like_url(value: &str) -> bool {
    value.starts_with("http")
}

fn looks_like_token(value: &str) -> bool {
    value.starts_with("ey")
}

/// Shorten a credential for logging
pub fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(12).collect();
    if prefix.len() < value.len() {
        format!("{}...", prefix)
    } else {
        prefix
    }
}

/// Put the remote URL and token in the right slots, or give up
///
/// Returns `None` when either value is missing or when the pair matches
/// neither the expected nor the swapped arrangement.
pub fn resolve_remote_credentials(url: Option<&str>, key: Option<&str>) -> Option<RemoteCredentials> {
    let (url, key) = (url?, key?);

    if looks_like_url(url) && looks_like_token(key) {
        return Some(RemoteCredentials {
            url: url.to_string(),
            key: key.to_string(),
        });
    }

    if looks_like_token(url) && looks_like_url(key) {
        tracing::warn!("Remote URL and API key appear to be swapped; using them the other way round");
        return Some(RemoteCredentials {
            url: key.to_string(),
            key: url.to_string(),
        });
    }

    tracing::warn!("Remote credentials are set but not recognizable as a URL and a token; ignoring them");
    None
}

/// Build the storage driver for this process
pub fn select_storage(config: &StorageConfig) -> StorageResult<Arc<dyn Storage>> {
    let credentials =
        resolve_remote_credentials(config.remote_url.as_deref(), config.remote_key.as_deref());

    if let Some(credentials) = credentials {
        tracing::info!("Using remote REST storage at {}", redact(&credentials.url));
        let remote = RestStorage::new(credentials, config.request_timeout)?;
        return Ok(Arc::new(FallbackStorage::new(Arc::new(remote))));
    }

    if let Some(database_url) = config.database_url.as_deref() {
        tracing::info!("Using PostgreSQL storage");
        return Ok(Arc::new(PostgresStorage::connect_lazy(
            database_url,
            config.request_timeout,
        )?));
    }

    tracing::info!("No database configured; using in-memory storage");
    Ok(Arc::new(MemoryStorage::new()))
}
