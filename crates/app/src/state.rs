//! Application state management

use std::path::{Path, PathBuf};

use eatsplit_core::{initial_friends, open_store, Config, FriendStore, Ledger, Result};

/// Resolved configuration plus where the data lives
pub struct AppState {
    config: Config,
    data_dir: PathBuf,
}

impl AppState {
    /// Load config from `config_path` (or the platform default) and resolve
    /// the data directory
    pub fn new(config_path: Option<PathBuf>, data_dir: Option<PathBuf>) -> Result<Self> {
        let config_path = match config_path {
            Some(path) => path,
            None => Config::default_path()?,
        };
        let config = Config::load(&config_path)?;

        let data_dir = match data_dir {
            Some(dir) => dir,
            None => Config::default_data_dir()?,
        };

        Ok(Self { config, data_dir })
    }

    #[cfg(test)]
    pub fn with_config(config: Config, data_dir: PathBuf) -> Self {
        Self { config, data_dir }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Open the configured store and load the roster
    pub fn open_ledger(&self) -> Result<Ledger<Box<dyn FriendStore>>> {
        tracing::info!(data_dir = %self.data_dir.display(), "Opening ledger");
        let store = open_store(&self.config, &self.data_dir)?;
        Ledger::open(store, initial_friends())
    }
}
