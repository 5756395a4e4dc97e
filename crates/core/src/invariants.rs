//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible states during development.
//! These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{Friend, FriendId};

/// Validate that a roster is internally consistent
pub fn assert_roster_invariants(friends: &[Friend]) {
    if !cfg!(debug_assertions) {
        return;
    }

    let mut seen = HashSet::with_capacity(friends.len());
    for friend in friends {
        let first_seen = seen.insert(&friend.id);
        debug_assert!(
            first_seen,
            "Roster holds friend id {} more than once",
            friend.id
        );

        debug_assert!(
            !friend.name.trim().is_empty(),
            "Friend {} has empty name",
            friend.id
        );
    }
}

/// Validate that a selected id still refers to a roster member
pub fn assert_selection_in_roster(selected: Option<&FriendId>, friends: &[Friend]) {
    if let Some(id) = selected {
        debug_assert!(
            friends.iter().any(|f| &f.id == id),
            "Selection {} is not in the roster",
            id
        );
    }
}
