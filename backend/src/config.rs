//! Environment configuration, read once at startup.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;
use tracing::warn;

pub const DATABASE_URL_VAR: &str = "TURSO_DATABASE_URL";
pub const AUTH_TOKEN_VAR: &str = "TURSO_AUTH_TOKEN";
pub const PORT_VAR: &str = "PORT";
pub const DATA_DIR_VAR: &str = "DAY_TRACKER_DATA_DIR";
pub const PUBLIC_DIR_VAR: &str = "DAY_TRACKER_PUBLIC_DIR";

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid PORT value {value:?}: {source}")]
    InvalidPort {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

/// Which storage backend to run with
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// Remote libSQL database (Turso)
    Database { url: String, auth_token: String },
    /// One JSON file per date under `data_directory`
    File { data_directory: PathBuf },
}

impl StorageConfig {
    pub fn describe(&self) -> &'static str {
        match self {
            StorageConfig::Database { .. } => "Turso cloud database",
            StorageConfig::File { .. } => "local JSON files",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub storage: StorageConfig,
    /// Directory holding `index.html` and the other static assets
    pub public_directory: PathBuf,
}

impl ServerConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from any variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let port = match var(PORT_VAR) {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|source| ConfigError::InvalidPort { value, source })?,
            None => DEFAULT_PORT,
        };

        let storage = match (var(DATABASE_URL_VAR), var(AUTH_TOKEN_VAR)) {
            (Some(url), Some(auth_token)) => StorageConfig::Database { url, auth_token },
            (url, _) => {
                if url.is_some() {
                    warn!(
                        "{} is set without {}, falling back to file storage",
                        DATABASE_URL_VAR, AUTH_TOKEN_VAR
                    );
                }
                StorageConfig::File {
                    data_directory: PathBuf::from(
                        var(DATA_DIR_VAR).unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
                    ),
                }
            }
        };

        let public_directory = PathBuf::from(
            var(PUBLIC_DIR_VAR).unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string()),
        );

        Ok(Self {
            port,
            storage,
            public_directory,
        })
    }
}
