//! Storage adapter trait
//!
//! The roster is persisted as one whole snapshot under a single key.
//! Implementations may be backed by SQLite, a JSON file, or memory.

use crate::error::Result;
use crate::models::Friend;

/// Persistence adapter for the friend roster
pub trait FriendStore {
    /// Load the last saved roster.
    ///
    /// Returns `Ok(None)` when nothing was ever saved or the stored value is
    /// malformed; malformed data is never an error.
    fn load(&self) -> Result<Option<Vec<Friend>>>;

    /// Replace the stored snapshot with `friends`. Partial writes must never
    /// be visible to a later `load`.
    fn save(&self, friends: &[Friend]) -> Result<()>;
}

impl<T: FriendStore + ?Sized> FriendStore for &T {
    fn load(&self) -> Result<Option<Vec<Friend>>> {
        (**self).load()
    }

    fn save(&self, friends: &[Friend]) -> Result<()> {
        (**self).save(friends)
    }
}

impl<T: FriendStore + ?Sized> FriendStore for Box<T> {
    fn load(&self) -> Result<Option<Vec<Friend>>> {
        (**self).load()
    }

    fn save(&self, friends: &[Friend]) -> Result<()> {
        (**self).save(friends)
    }
}
