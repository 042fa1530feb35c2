//! # Configuration
//!
//! Settings are resolved in this order (highest first):
//! 1. Command-line flags (applied by the CLI)
//! 2. Environment: `REGISTRAR_RATE_LIMIT`
//! 3. TOML file (`--config <path>`, or `registrar.toml` if present)
//! 4. Built-in defaults
//!
//! ```toml
//! [server]
//! host = "127.0.0.1"
//! port = 8080
//! rate_limit = 100
//!
//! [storage]
//! backend = "redb"
//! database = "registrar.db"
//! ```

use registrar_core::{RegistrarError, Registry};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "registrar.toml";

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

// =============================================================================
// ERRORS
// =============================================================================

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

// =============================================================================
// SETTINGS
// =============================================================================

/// Which store backs the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Volatile in-process map.
    Memory,
    /// redb database file.
    Redb,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Memory => f.write_str("memory"),
            Backend::Redb => f.write_str("redb"),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second across all clients; 0 disables limiting.
    pub rate_limit: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: DEFAULT_RATE_LIMIT,
        }
    }
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Database file, used by the redb backend.
    pub database: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Redb,
            database: PathBuf::from("registrar.db"),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration from an explicit file, or from
    /// `registrar.toml` in the working directory if it exists.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env();
        Ok(config)
    }

    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides.
    pub fn apply_env(&mut self) {
        if let Some(limit) = std::env::var("REGISTRAR_RATE_LIMIT")
            .ok()
            .and_then(|s| s.parse().ok())
        {
            self.server.rate_limit = limit;
        }
    }

    /// `host:port` for the listener.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Open the registry this configuration describes.
    pub fn open_registry(&self) -> Result<Registry, RegistrarError> {
        match self.storage.backend {
            Backend::Memory => Ok(Registry::new()),
            Backend::Redb => Registry::with_redb(&self.storage.database),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
