//! Roster persistence
//!
//! The roster is written as one snapshot under a fixed key. Backends:
//! SQLite ([`Database`]), a JSON file ([`JsonFileStore`]) and memory
//! ([`MemoryStore`]).

mod file;
mod kv;
mod memory;
mod migrations;
pub mod snapshot;
mod traits;

use std::path::Path;

use rusqlite::Connection;
use tracing::instrument;

use crate::config::{Config, StorageBackend};
use crate::error::Result;
use crate::models::Friend;

pub use file::JsonFileStore;
pub use kv::KvStore;
pub use memory::MemoryStore;
pub use traits::FriendStore;

/// SQLite database handle holding the roster under one key
pub struct Database {
    conn: Connection,
    key: String,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P, key: &str) -> Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn, key)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory(key: &str) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, key)
    }

    fn init(conn: Connection, key: &str) -> Result<Self> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn,
            key: key.to_string(),
        })
    }

    /// Current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::current_version(&self.conn)
    }

    /// Raw key-value access
    pub fn kv(&self) -> KvStore<'_> {
        KvStore::new(&self.conn)
    }

    /// Key the roster snapshot lives under
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl FriendStore for Database {
    fn load(&self) -> Result<Option<Vec<Friend>>> {
        Ok(self
            .kv()
            .get(&self.key)?
            .as_deref()
            .and_then(snapshot::decode_bytes))
    }

    fn save(&self, friends: &[Friend]) -> Result<()> {
        let encoded = snapshot::encode(friends)?;
        self.kv().put(&self.key, &encoded)?;
        tracing::debug!(key = %self.key, count = friends.len(), "Roster saved");
        Ok(())
    }
}

/// Open the store selected by `config`, placing files under `data_dir`
/// unless the config names an explicit path.
pub fn open_store(config: &Config, data_dir: &Path) -> Result<Box<dyn FriendStore>> {
    let storage = &config.storage;
    let path = storage.resolve_path(data_dir);

    let store: Box<dyn FriendStore> = match (storage.backend, path) {
        (StorageBackend::Sqlite, Some(path)) => Box::new(Database::open(path, &storage.key)?),
        (StorageBackend::Json, Some(path)) => Box::new(JsonFileStore::open(path)?),
        _ => Box::new(MemoryStore::new()),
    };

    tracing::info!(backend = ?storage.backend, "Storage opened");
    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::initial_friends;
    use tempfile::tempdir;

    #[test]
    fn test_database_empty() {
        let db = Database::open_in_memory("friends").unwrap();
        assert_eq!(db.schema_version().unwrap(), 1);
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn test_database_save_load() {
        let db = Database::open_in_memory("friends").unwrap();
        let friends = initial_friends();
        db.save(&friends).unwrap();
        assert_eq!(db.load().unwrap(), Some(friends));
    }

    #[test]
    fn test_database_malformed_value() {
        let db = Database::open_in_memory("friends").unwrap();
        db.kv().put("friends", "[{\"oops\"").unwrap();
        assert!(db.load().unwrap().is_none());
    }

    #[test]
    fn test_database_non_utf8_value() {
        let db = Database::open_in_memory("friends").unwrap();
        db.conn
            .execute(
                "INSERT OR REPLACE INTO kv_store (key, value, updated_at) \
                 VALUES ('friends', CAST(X'FFFE5B5D' AS TEXT), 'now')",
                [],
            )
            .unwrap();
        assert!(db.load().unwrap().is_none());

        let ledger = crate::Ledger::open(&db, initial_friends()).unwrap();
        assert_eq!(ledger.friends(), initial_friends().as_slice());
    }

    #[test]
    fn test_database_keys_are_isolated() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("eatsplit.db");

        let a = Database::open(&path, "friends").unwrap();
        a.save(&initial_friends()).unwrap();
        drop(a);

        let b = Database::open(&path, "other").unwrap();
        assert!(b.load().unwrap().is_none());
        drop(b);

        let a = Database::open(&path, "friends").unwrap();
        assert_eq!(a.load().unwrap().unwrap().len(), 3);
    }

    #[test]
    fn test_open_store_backends() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();

        for backend in [StorageBackend::Sqlite, StorageBackend::Json] {
            config.storage.backend = backend;
            let store = open_store(&config, dir.path()).unwrap();
            store.save(&initial_friends()).unwrap();

            let reopened = open_store(&config, dir.path()).unwrap();
            assert_eq!(reopened.load().unwrap(), Some(initial_friends()));
        }

        config.storage.backend = StorageBackend::Memory;
        let store = open_store(&config, dir.path()).unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
