//! Split form view model

use std::fmt;

use eatsplit_core::{Friend, Payer, SplitForm};

use super::friends::format_amount;

/// Rendered state of the split form for the selected friend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitPanel {
    pub title: String,
    pub bill: String,
    pub your_expense: String,
    pub friend_label: String,
    pub friend_expense: String,
    pub payer: String,
}

impl SplitPanel {
    pub fn new(friend: &Friend, form: &SplitForm) -> Self {
        let show = |amount: Option<rust_decimal::Decimal>| {
            amount.map(format_amount).unwrap_or_default()
        };

        Self {
            title: format!("Split a bill with {}", friend.name),
            bill: show(form.bill()),
            your_expense: show(form.paid_by_user()),
            friend_label: format!("{}'s expense", friend.name),
            friend_expense: show(form.paid_by_friend()),
            payer: match form.payer() {
                Payer::User => "You".to_string(),
                Payer::Friend => friend.name.clone(),
            },
        }
    }
}

impl fmt::Display for SplitPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "  Bill value:          {}", self.bill)?;
        writeln!(f, "  Your expense:        {}", self.your_expense)?;
        writeln!(f, "  {:<20} {}", format!("{}:", self.friend_label), self.friend_expense)?;
        write!(f, "  Who is paying:       {}", self.payer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatsplit_core::initial_friends;

    #[test]
    fn test_panel_values() {
        let friend = initial_friends().remove(0);
        let mut form = SplitForm::new();
        form.set_bill("50");
        form.set_paid_by_user("20");

        let panel = SplitPanel::new(&friend, &form);
        assert_eq!(panel.title, "Split a bill with Folarin");
        assert_eq!(panel.bill, "$50");
        assert_eq!(panel.your_expense, "$20");
        assert_eq!(panel.friend_expense, "$30");
        assert_eq!(panel.payer, "You");

        form.set_payer(Payer::Friend);
        assert_eq!(SplitPanel::new(&friend, &form).payer, "Folarin");
    }

    #[test]
    fn test_empty_panel() {
        let friend = initial_friends().remove(1);
        let panel = SplitPanel::new(&friend, &SplitForm::new());
        assert!(panel.bill.is_empty());
        assert!(panel.friend_expense.is_empty());
        assert!(panel.to_string().contains("Abolore's expense:"));
    }
}
