//! Ledger state container
//!
//! Owns the roster, the selection and the add-form flag, and drives the
//! Idle / Adding / Selected state machine. Presentation layers subscribe
//! with a [`LedgerObserver`] and redraw on each [`LedgerEvent`].

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::error::Result;
use crate::forms::SplitForm;
use crate::invariants::assert_selection_in_roster;
use crate::models::{BillSplit, Friend, FriendId};
use crate::roster::Roster;
use crate::selection::{SelectOutcome, Selection};
use crate::storage::FriendStore;

/// What the user is currently doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    /// The add-friend form is open
    Adding,
    /// A friend is selected and the split form is open
    Selected(FriendId),
}

/// Change notifications, emitted after the change is persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEvent {
    FriendAdded {
        id: FriendId,
    },
    FriendRemoved {
        id: FriendId,
    },
    BalanceAdjusted {
        id: FriendId,
        delta: Decimal,
        balance: Decimal,
    },
    SelectionChanged {
        selected: Option<FriendId>,
    },
    AddFormToggled {
        open: bool,
    },
}

/// Receives ledger change notifications
pub trait LedgerObserver {
    fn on_event(&mut self, event: &LedgerEvent);
}

impl<F> LedgerObserver for F
where
    F: FnMut(&LedgerEvent),
{
    fn on_event(&mut self, event: &LedgerEvent) {
        self(event)
    }
}

pub struct Ledger<S: FriendStore> {
    roster: Roster<S>,
    selection: Selection,
    add_form_open: bool,
    observers: Vec<Box<dyn LedgerObserver>>,
}

impl<S: FriendStore> Ledger<S> {
    pub fn new(roster: Roster<S>) -> Self {
        Self {
            roster,
            selection: Selection::new(),
            add_form_open: false,
            observers: Vec::new(),
        }
    }

    /// Load the roster from `store` (or `seed`) and start idle
    pub fn open(store: S, seed: Vec<Friend>) -> Result<Self> {
        let roster = Roster::create(store, seed)?;
        info!(friends = roster.len(), "Ledger ready");
        Ok(Self::new(roster))
    }

    pub fn subscribe(&mut self, observer: impl LedgerObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn roster(&self) -> &Roster<S> {
        &self.roster
    }

    pub fn friends(&self) -> &[Friend] {
        self.roster.friends()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection.selected().and_then(|id| self.roster.get(id))
    }

    pub fn is_add_form_open(&self) -> bool {
        self.add_form_open
    }

    pub fn mode(&self) -> Mode {
        match self.selection.selected() {
            Some(id) => Mode::Selected(id.clone()),
            None if self.add_form_open => Mode::Adding,
            None => Mode::Idle,
        }
    }

    /// Open the add-friend form, dropping any active selection
    pub fn open_add_form(&mut self) {
        if self.add_form_open {
            return;
        }
        self.clear_selection();
        self.set_add_form(true);
    }

    pub fn close_add_form(&mut self) {
        self.set_add_form(false);
    }

    pub fn toggle_add_form(&mut self) {
        if self.add_form_open {
            self.close_add_form();
        } else {
            self.open_add_form();
        }
    }

    /// Prepend a new friend and close the add-friend form. A friend whose id
    /// is already in the roster is ignored and the form stays as it is.
    pub fn add_friend(&mut self, friend: Friend) -> Result<bool> {
        let id = friend.id.clone();
        if !self.roster.add(friend)? {
            return Ok(false);
        }
        self.emit(LedgerEvent::FriendAdded { id });
        self.close_add_form();
        Ok(true)
    }

    /// Delete a friend, clearing the selection if it pointed at them
    pub fn remove_friend(&mut self, id: &FriendId) -> Result<bool> {
        if !self.roster.remove(id)? {
            return Ok(false);
        }

        if self.selection.is_selected(id) {
            self.clear_selection();
        }
        self.emit(LedgerEvent::FriendRemoved { id: id.clone() });
        self.check_invariants();
        Ok(true)
    }

    /// Select a friend for splitting; selecting the active friend again
    /// deselects. Unknown ids are ignored.
    pub fn select_friend(&mut self, id: &FriendId) -> Option<SelectOutcome> {
        if !self.roster.contains(id) {
            debug!(friend_id = %id, "Select ignored, no such friend");
            return None;
        }

        let outcome = self.selection.select(id.clone());
        self.emit(LedgerEvent::SelectionChanged {
            selected: self.selection.selected().cloned(),
        });
        self.close_add_form();
        self.check_invariants();
        Some(outcome)
    }

    /// Apply a split to the selected friend and clear the selection.
    /// Returns the friend's new balance, or `None` when nothing is selected.
    pub fn split_bill(&mut self, split: BillSplit) -> Result<Option<Decimal>> {
        let Some(id) = self.selection.selected().cloned() else {
            debug!("Split ignored, no friend selected");
            return Ok(None);
        };

        let delta = split.delta();
        let Some(balance) = self.roster.adjust_balance(&id, delta)? else {
            return Ok(None);
        };
        info!(friend_id = %id, %delta, %balance, "Bill split");
        self.emit(LedgerEvent::BalanceAdjusted { id, delta, balance });
        self.clear_selection();
        Ok(Some(balance))
    }

    /// Submit the split form. Incomplete or invalid input changes nothing and
    /// keeps the selection.
    pub fn submit_split(&mut self, form: &SplitForm) -> Result<Option<Decimal>> {
        match form.build() {
            Some(split) => self.split_bill(split),
            None => {
                debug!(bill = ?form.bill(), paid = ?form.paid_by_user(), "Split form invalid");
                Ok(None)
            }
        }
    }

    fn clear_selection(&mut self) {
        if self.selection.selected().is_some() {
            self.selection.clear();
            self.emit(LedgerEvent::SelectionChanged { selected: None });
        }
    }

    fn set_add_form(&mut self, open: bool) {
        if self.add_form_open != open {
            self.add_form_open = open;
            self.emit(LedgerEvent::AddFormToggled { open });
        }
    }

    fn emit(&mut self, event: LedgerEvent) {
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }

    fn check_invariants(&self) {
        assert_selection_in_roster(self.selection.selected(), self.roster.friends());
    }
}
