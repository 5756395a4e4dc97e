//! JSON file roster store

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::instrument;

use crate::error::Result;
use crate::models::Friend;
use crate::storage::{snapshot, FriendStore};

/// Stores the roster as a single JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Use `path`, creating its parent directory if needed
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FriendStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<Friend>>> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(snapshot::decode_bytes(&raw))
    }

    fn save(&self, friends: &[Friend]) -> Result<()> {
        let encoded = snapshot::encode(friends)?;

        // Write beside the target and rename over it so readers never see
        // a half-written file.
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(encoded.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), count = friends.len(), "Roster saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::initial_friends;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_absent() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("friends.json")).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_load() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("nested").join("friends.json")).unwrap();
        let friends = initial_friends();

        store.save(&friends).unwrap();
        assert_eq!(store.load().unwrap(), Some(friends));
    }

    #[test]
    fn test_save_replaces_previous_snapshot() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("friends.json")).unwrap();
        let mut friends = initial_friends();

        store.save(&friends).unwrap();
        friends.truncate(1);
        store.save(&friends).unwrap();

        assert_eq!(store.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_file_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("friends.json");
        fs::write(&path, "[{\"id\": true}]").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_non_utf8_file_is_absent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("friends.json");
        fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert!(store.load().unwrap().is_none());

        let ledger = crate::Ledger::open(&store, initial_friends()).unwrap();
        assert_eq!(ledger.friends(), initial_friends().as_slice());
        assert_eq!(store.load().unwrap(), Some(initial_friends()));
    }
}
