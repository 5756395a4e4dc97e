//! Application configuration
//!
//! Loaded from `eatsplit.toml`. Every field has a default, so a missing
//! file or an empty one yields a working setup.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Placeholder avatar service used for new friends
pub const DEFAULT_AVATAR_BASE: &str = "https://i.pravatar.cc/48";

/// Storage key holding the roster snapshot
pub const DEFAULT_STORAGE_KEY: &str = "friends";

pub const CONFIG_FILE_NAME: &str = "eatsplit.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Could not determine {0} directory")]
    NoProjectDirs(&'static str),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub avatar: AvatarConfig,
    pub log: LogConfig,
}

/// Which persistence backend holds the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Sqlite,
    Json,
    Memory,
}

impl StorageBackend {
    /// File name used inside the data directory when no path is configured
    pub fn default_file_name(&self) -> Option<&'static str> {
        match self {
            StorageBackend::Sqlite => Some("eatsplit.db"),
            StorageBackend::Json => Some("friends.json"),
            StorageBackend::Memory => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Explicit file location; defaults to the platform data directory
    pub path: Option<PathBuf>,
    /// Namespace key the snapshot is stored under
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            path: None,
            key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl StorageConfig {
    /// Resolve the backing file for this backend, if it has one
    pub fn resolve_path(&self, data_dir: &Path) -> Option<PathBuf> {
        match (&self.path, self.backend.default_file_name()) {
            (_, None) => None,
            (Some(path), Some(_)) => Some(path.clone()),
            (None, Some(name)) => Some(data_dir.join(name)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvatarConfig {
    pub base_url: String,
}

impl Default for AvatarConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_AVATAR_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load configuration from a file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Default config file location
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs("config")?.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Default data directory for storage files
    pub fn default_data_dir() -> Result<PathBuf, ConfigError> {
        Ok(project_dirs("data")?.data_dir().to_path_buf())
    }
}

fn project_dirs(kind: &'static str) -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("dev", "eatsplit", "eatsplit").ok_or(ConfigError::NoProjectDirs(kind))
}
