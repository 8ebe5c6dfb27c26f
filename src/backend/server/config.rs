/**
 * Server Configuration
 *
 * Reads the HTTP server settings and the storage configuration from
 * environment variables.
 *
 * # Variables
 *
 * - `SERVER_PORT`, then `PORT` - listen port (default 5000)
 * - `STATIC_DIR` - built marketing site (default `dist/public`)
 * - storage variables, see `StorageConfig`
 */

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::shared::{ConfigError, StorageConfig};

/// Environment variables holding the listen port, in priority order
pub const PORT_VARS: [&str; 2] = ["SERVER_PORT", "PORT"];

/// Environment variable holding the static site directory
pub const STATIC_DIR_VAR: &str = "STATIC_DIR";

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_STATIC_DIR: &str = "dist/public";

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub static_dir: PathBuf,
    pub storage: StorageConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            storage: StorageConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Build the configuration from a key lookup function
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut port = DEFAULT_PORT;
        if let Some((key, raw)) = PORT_VARS
            .iter()
            .find_map(|key| lookup(*key).filter(|v| !v.trim().is_empty()).map(|v| (*key, v)))
        {
            port = raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidNumber { key, value: raw.clone() })?;
        }

        let static_dir = lookup(STATIC_DIR_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STATIC_DIR));

        let storage = StorageConfig::from_lookup(&lookup)?;
        storage.validate()?;

        Ok(Self {
            port,
            static_dir,
            storage,
        })
    }

    /// Build the configuration from the process environment
    ///
    /// Call `dotenv::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Address to bind, on all interfaces
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
