//! Friend list view model

use std::fmt;

use eatsplit_core::{Friend, FriendStore, Ledger, Standing};
use rust_decimal::Decimal;

/// Colour hint for a balance line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// The user owes money
    Red,
    /// The friend owes money
    Green,
    Neutral,
}

/// One rendered roster line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FriendRow {
    /// 1-based position, usable as a shell reference
    pub index: usize,
    pub id: String,
    pub name: String,
    pub status: String,
    pub tone: Tone,
    pub selected: bool,
}

impl fmt::Display for FriendRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.selected { '*' } else { ' ' };
        let sign = match self.tone {
            Tone::Red => '-',
            Tone::Green => '+',
            Tone::Neutral => '=',
        };
        write!(
            f,
            "{} {:>2}. {:<14} {} {}  [{}]",
            marker, self.index, self.name, sign, self.status, self.id
        )
    }
}

pub fn format_amount(amount: Decimal) -> String {
    format!("${}", amount.normalize())
}

/// Human-readable settlement line for a friend
pub fn status_line(friend: &Friend) -> (String, Tone) {
    match friend.standing() {
        Standing::YouOwe(amount) => (
            format!("You owe {} {}", friend.name, format_amount(amount)),
            Tone::Red,
        ),
        Standing::OwesYou(amount) => (
            format!("{} owes you {}", friend.name, format_amount(amount)),
            Tone::Green,
        ),
        Standing::Even => (format!("You and {} are even.", friend.name), Tone::Neutral),
    }
}

pub fn friend_rows<S: FriendStore>(ledger: &Ledger<S>) -> Vec<FriendRow> {
    ledger
        .friends()
        .iter()
        .enumerate()
        .map(|(i, friend)| {
            let (status, tone) = status_line(friend);
            FriendRow {
                index: i + 1,
                id: friend.id.to_string(),
                name: friend.name.clone(),
                status,
                tone,
                selected: ledger.selection().is_selected(&friend.id),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatsplit_core::{initial_friends, FriendId, MemoryStore};

    #[test]
    fn test_status_lines() {
        let friends = initial_friends();
        assert_eq!(
            status_line(&friends[0]),
            ("You owe Folarin $70".to_string(), Tone::Red)
        );
        assert_eq!(
            status_line(&friends[1]),
            ("Abolore owes you $20".to_string(), Tone::Green)
        );
        assert_eq!(
            status_line(&friends[2]),
            ("You and Akinwunmi are even.".to_string(), Tone::Neutral)
        );
    }

    #[test]
    fn test_format_amount_drops_trailing_zeros() {
        assert_eq!(format_amount(Decimal::new(3000, 2)), "$30");
        assert_eq!(format_amount(Decimal::new(1250, 2)), "$12.5");
    }

    #[test]
    fn test_rows_mark_selection() {
        let mut ledger = Ledger::open(MemoryStore::new(), initial_friends()).unwrap();
        ledger.select_friend(&FriendId::from("933372"));

        let rows = friend_rows(&ledger);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].index, 2);
        assert!(rows[1].selected);
        assert!(!rows[0].selected);
        assert!(rows[1].to_string().starts_with("*  2. Abolore"));
        assert_eq!(rows[0].id, "118836");
    }
}
