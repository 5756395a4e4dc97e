//! In-memory roster store

use std::cell::RefCell;

use crate::error::Result;
use crate::models::Friend;
use crate::storage::{snapshot, FriendStore};

/// Keeps the encoded snapshot in memory. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already-encoded value, malformed or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: RefCell::new(Some(raw.into())),
        }
    }

    /// The currently stored encoded snapshot
    pub fn raw(&self) -> Option<String> {
        self.raw.borrow().clone()
    }
}

impl FriendStore for MemoryStore {
    fn load(&self) -> Result<Option<Vec<Friend>>> {
        Ok(self.raw.borrow().as_deref().and_then(snapshot::decode))
    }

    fn save(&self, friends: &[Friend]) -> Result<()> {
        let encoded = snapshot::encode(friends)?;
        *self.raw.borrow_mut() = Some(encoded);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::initial_friends;

    #[test]
    fn test_empty_store() {
        assert!(MemoryStore::new().load().unwrap().is_none());
    }

    #[test]
    fn test_save_load() {
        let store = MemoryStore::new();
        let friends = initial_friends();
        store.save(&friends).unwrap();
        assert_eq!(store.load().unwrap(), Some(friends));
    }

    #[test]
    fn test_malformed_is_absent() {
        let store = MemoryStore::with_raw("{broken");
        assert!(store.load().unwrap().is_none());
    }
}
