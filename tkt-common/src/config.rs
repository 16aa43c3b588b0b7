//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming the database file
pub const DATABASE_ENV_VAR: &str = "TKT_DATABASE";

/// File name used when no path is configured
pub const DEFAULT_DATABASE_FILE: &str = "tickets.db";

/// Contents of `config.toml`
///
/// Every key is optional; a missing file is equivalent to an empty one.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct TomlConfig {
    /// Path of the SQLite database file
    pub database_path: Option<PathBuf>,
    /// Log filter directive (e.g. "info", "tkt_common=debug")
    pub log_level: Option<String>,
    /// Connection pool size for file-backed databases
    pub max_connections: Option<u32>,
}

impl TomlConfig {
    /// Parse config from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load config from an explicit file; the file must exist
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&content)
    }

    /// Load config from `path` if given, else from the platform config file
    ///
    /// Only the explicit path is required to exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match default_config_file() {
            Some(path) if path.exists() => Self::load(&path),
            Some(path) => {
                debug!("No config file at {}, using defaults", path.display());
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Storage settings derived from this config
    pub fn storage(&self) -> StorageConfig {
        let mut storage = StorageConfig::default();
        if let Some(max) = self.max_connections {
            storage.max_connections = max.max(1);
        }
        storage
    }
}

/// Connection settings for the storage engine
#[derive(Debug, Clone, PartialEq)]
pub struct StorageConfig {
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            max_connections: 4,
            busy_timeout_ms: 5000,
        }
    }
}

/// Database path resolution, highest priority first:
/// 1. Command-line argument
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &config.database_path {
        return path.clone();
    }

    // Priority 4: OS-dependent compiled default
    default_database_path()
}

/// Platform config file location (`~/.config/tkt/config.toml` on Linux)
pub fn default_config_file() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("tkt").join("config.toml"))
}

/// OS-dependent default database path
pub fn default_database_path() -> PathBuf {
    // ~/.local/share/tkt, ~/Library/Application Support/tkt, %LOCALAPPDATA%\tkt
    dirs::data_local_dir()
        .map(|d| d.join("tkt"))
        .unwrap_or_else(|| PathBuf::from("./tkt_data"))
        .join(DEFAULT_DATABASE_FILE)
}
