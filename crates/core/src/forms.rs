//! Form input layer
//!
//! Turns free-text input into validated model values. Invalid input never
//! produces an error here; the form simply has nothing to submit.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::models::{BillSplit, Friend, Payer};

/// Parse a user-entered amount, ignoring surrounding whitespace
pub fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text).ok()
}

/// Add-friend form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddFriendForm {
    pub name: String,
    pub avatar_base: String,
    default_avatar_base: String,
}

impl AddFriendForm {
    pub fn new(default_avatar_base: &str) -> Self {
        Self {
            name: String::new(),
            avatar_base: default_avatar_base.to_string(),
            default_avatar_base: default_avatar_base.to_string(),
        }
    }

    /// Build a new friend from the current fields and reset the form.
    /// Returns `None` if the name or avatar base is blank.
    pub fn submit(&mut self) -> Option<Friend> {
        let name = self.name.trim();
        let avatar_base = self.avatar_base.trim();
        if name.is_empty() || avatar_base.is_empty() {
            return None;
        }

        let friend = Friend::new(name.to_string(), avatar_base);
        self.reset();
        Some(friend)
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.avatar_base = self.default_avatar_base.clone();
    }
}

/// Split-bill form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitForm {
    bill: Option<Decimal>,
    paid_by_user: Option<Decimal>,
    payer: Payer,
}

impl SplitForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bill(&self) -> Option<Decimal> {
        self.bill
    }

    pub fn paid_by_user(&self) -> Option<Decimal> {
        self.paid_by_user
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    pub fn set_bill(&mut self, text: &str) {
        self.bill = parse_amount(text);
    }

    /// Set the user's share. Values outside `[0, bill]` are rejected and the
    /// previous value is kept.
    pub fn set_paid_by_user(&mut self, text: &str) {
        let Some(amount) = parse_amount(text) else {
            self.paid_by_user = None;
            return;
        };

        let bill = self.bill.unwrap_or(Decimal::ZERO);
        if amount < Decimal::ZERO || amount > bill {
            tracing::debug!(%amount, %bill, "Paid amount outside bill, keeping previous value");
            return;
        }
        self.paid_by_user = Some(amount);
    }

    pub fn set_payer(&mut self, payer: Payer) {
        self.payer = payer;
    }

    /// The friend's share, once a bill has been entered
    pub fn paid_by_friend(&self) -> Option<Decimal> {
        self.bill
            .map(|bill| bill - self.paid_by_user.unwrap_or(Decimal::ZERO))
    }

    /// A validated split, or `None` while the input is incomplete or invalid
    pub fn build(&self) -> Option<BillSplit> {
        let bill = self.bill?;
        let paid_by_user = self.paid_by_user?;
        BillSplit::new(bill, paid_by_user, self.payer).ok()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
