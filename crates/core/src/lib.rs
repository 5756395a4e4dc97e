//! Eatsplit Core Library
//!
//! Friend roster, bill splitting and balance persistence for Eatsplit.

pub mod config;
pub mod error;
pub mod forms;
pub mod invariants;
pub mod ledger;
pub mod models;
pub mod roster;
pub mod selection;
pub mod storage;

pub use config::{Config, ConfigError, StorageBackend};
pub use error::{Error, Result};
pub use forms::{AddFriendForm, SplitForm};
pub use ledger::{Ledger, LedgerEvent, LedgerObserver, Mode};
pub use models::*;
pub use roster::Roster;
pub use selection::{SelectOutcome, Selection};
pub use storage::{open_store, Database, FriendStore, JsonFileStore, MemoryStore};
