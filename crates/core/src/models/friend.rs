//! Friend model

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Opaque friend identifier.
///
/// New friends get a random UUID. Stored rosters written by older
/// frontends may carry plain integers, which are kept as their decimal
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct FriendId(String);

impl FriendId {
    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FriendId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FriendId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for FriendId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u64> for FriendId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFriendId {
    Text(String),
    Number(u64),
}

impl<'de> Deserialize<'de> for FriendId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match RawFriendId::deserialize(deserializer)? {
            RawFriendId::Text(s) => FriendId(s),
            RawFriendId::Number(n) => FriendId::from(n),
        })
    }
}

/// A roster entry: someone the user shares expenses with.
///
/// Balance sign: negative means the user owes this friend, positive means
/// the friend owes the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub id: FriendId,
    pub name: String,
    #[serde(alias = "image")]
    pub avatar_ref: String,
    pub balance: Decimal,
}

impl Friend {
    /// Create a settled friend with a fresh id and an avatar templated by that id
    pub fn new(name: String, avatar_base: &str) -> Self {
        let id = FriendId::generate();
        let avatar_ref = avatar_url(avatar_base, &id);
        Self {
            id,
            name,
            avatar_ref,
            balance: Decimal::ZERO,
        }
    }

    /// Where this friend stands relative to the user
    pub fn standing(&self) -> Standing {
        match self.balance.cmp(&Decimal::ZERO) {
            Ordering::Less => Standing::YouOwe(self.balance.abs()),
            Ordering::Greater => Standing::OwesYou(self.balance),
            Ordering::Equal => Standing::Even,
        }
    }
}

/// Settlement direction for a single friend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Standing {
    /// The user owes the friend this (positive) amount
    YouOwe(Decimal),
    /// The friend owes the user this (positive) amount
    OwesYou(Decimal),
    Even,
}

/// Template an avatar URL from a placeholder service base and an id
pub fn avatar_url(base: &str, id: &FriendId) -> String {
    format!("{}?u={}", base.trim_end_matches('?'), id)
}

/// Roster used when nothing has been persisted yet
pub fn initial_friends() -> Vec<Friend> {
    [
        (118836_u64, "Folarin", -70_i64),
        (933372, "Abolore", 20),
        (499476, "Akinwunmi", 0),
    ]
    .into_iter()
    .map(|(id, name, balance)| {
        let id = FriendId::from(id);
        Friend {
            avatar_ref: avatar_url(crate::config::DEFAULT_AVATAR_BASE, &id),
            id,
            name: name.to_string(),
            balance: Decimal::from(balance),
        }
    })
    .collect()
}
