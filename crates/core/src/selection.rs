//! Selection state
//!
//! At most one friend is active for a split at any time.

use crate::models::FriendId;

/// Result of a `select` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The friend is now selected
    Selected,
    /// The friend was already selected and the selection is now empty
    Cleared,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<FriendId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, or clear the selection if `id` is already selected
    pub fn select(&mut self, id: FriendId) -> SelectOutcome {
        if self.selected.as_ref() == Some(&id) {
            self.selected = None;
            SelectOutcome::Cleared
        } else {
            self.selected = Some(id);
            SelectOutcome::Selected
        }
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<&FriendId> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, id: &FriendId) -> bool {
        self.selected.as_ref() == Some(id)
    }
}
