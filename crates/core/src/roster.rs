//! Friend roster
//!
//! Ordered collection of friends, newest first. Every mutation writes the
//! whole roster back through the store before returning.

use rust_decimal::Decimal;
use tracing::{debug, instrument};

use crate::error::Result;
use crate::invariants::assert_roster_invariants;
use crate::models::{Friend, FriendId};
use crate::storage::FriendStore;

pub struct Roster<S: FriendStore> {
    friends: Vec<Friend>,
    store: S,
}

impl<S: FriendStore> Roster<S> {
    /// Load the persisted roster, falling back to `seed` when nothing
    /// usable was stored
    #[instrument(skip_all)]
    pub fn create(store: S, seed: Vec<Friend>) -> Result<Self> {
        let friends = match store.load()? {
            Some(friends) if !friends.is_empty() => {
                debug!(count = friends.len(), "Loaded persisted roster");
                friends
            }
            _ => {
                debug!(count = seed.len(), "No persisted roster, using seed");
                seed
            }
        };
        assert_roster_invariants(&friends);

        let roster = Self { friends, store };
        roster.persist()?;
        Ok(roster)
    }

    pub fn friends(&self) -> &[Friend] {
        &self.friends
    }

    pub fn get(&self, id: &FriendId) -> Option<&Friend> {
        self.friends.iter().find(|f| &f.id == id)
    }

    pub fn contains(&self, id: &FriendId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.friends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.friends.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Insert `friend` at the front. Returns `false` without touching the
    /// roster if the id is already present.
    pub fn add(&mut self, friend: Friend) -> Result<bool> {
        if self.contains(&friend.id) {
            debug!(friend_id = %friend.id, "Add ignored, id already in roster");
            return Ok(false);
        }

        debug!(friend_id = %friend.id, name = %friend.name, "Adding friend");
        self.friends.insert(0, friend);
        self.persist()?;
        Ok(true)
    }

    /// Remove a friend by id. Returns whether anything was removed; an
    /// unknown id is a no-op.
    pub fn remove(&mut self, id: &FriendId) -> Result<bool> {
        let before = self.friends.len();
        self.friends.retain(|f| &f.id != id);
        if self.friends.len() == before {
            debug!(friend_id = %id, "Remove ignored, no such friend");
            return Ok(false);
        }

        self.persist()?;
        Ok(true)
    }

    /// Add `delta` to a friend's balance. Returns the new balance, or `None`
    /// when the id is unknown or the sum is out of range.
    pub fn adjust_balance(&mut self, id: &FriendId, delta: Decimal) -> Result<Option<Decimal>> {
        let Some(friend) = self.friends.iter_mut().find(|f| &f.id == id) else {
            debug!(friend_id = %id, %delta, "Balance adjustment ignored, no such friend");
            return Ok(None);
        };

        let Some(balance) = friend.balance.checked_add(delta) else {
            debug!(friend_id = %id, %delta, balance = %friend.balance, "Balance adjustment ignored, overflow");
            return Ok(None);
        };
        friend.balance = balance;
        debug!(friend_id = %id, %delta, %balance, "Balance adjusted");

        self.persist()?;
        Ok(Some(balance))
    }

    fn persist(&self) -> Result<()> {
        assert_roster_invariants(&self.friends);
        self.store.save(&self.friends)
    }
}
