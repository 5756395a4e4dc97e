//! Roster snapshot encoding
//!
//! Error-safe decoding of stored values: anything structurally
//! incompatible decodes to `None`.

use std::collections::HashSet;

use crate::error::Result;
use crate::models::Friend;

/// Serialize a roster snapshot
pub fn encode(friends: &[Friend]) -> Result<String> {
    Ok(serde_json::to_string(friends)?)
}

/// Deserialize raw stored bytes; text that is not UTF-8 counts as malformed
pub fn decode_bytes(raw: &[u8]) -> Option<Vec<Friend>> {
    match std::str::from_utf8(raw) {
        Ok(text) => decode(text),
        Err(e) => {
            tracing::warn!(error = %e, "Stored roster is not valid UTF-8, ignoring it");
            None
        }
    }
}

/// Deserialize a roster snapshot, treating malformed data as absent
pub fn decode(raw: &str) -> Option<Vec<Friend>> {
    let friends: Vec<Friend> = match serde_json::from_str(raw) {
        Ok(friends) => friends,
        Err(e) => {
            tracing::warn!(error = %e, "Stored roster is malformed, ignoring it");
            return None;
        }
    };

    let duplicate = {
        let mut seen = HashSet::with_capacity(friends.len());
        friends
            .iter()
            .find(|f| !seen.insert(&f.id))
            .map(|f| f.id.clone())
    };
    if let Some(id) = duplicate {
        tracing::warn!(friend_id = %id, "Stored roster has duplicate ids, ignoring it");
        return None;
    }

    if let Some(unnamed) = friends.iter().find(|f| f.name.trim().is_empty()) {
        tracing::warn!(friend_id = %unnamed.id, "Stored roster has an unnamed friend, ignoring it");
        return None;
    }

    Some(friends)
}
