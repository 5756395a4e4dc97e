//! One-shot subcommands

use std::io::Write;

use eatsplit_core::{AddFriendForm, FriendId, FriendStore, Ledger, Payer, Result, SplitForm};

use crate::viewmodel::friend_rows;

pub fn list<S: FriendStore>(ledger: &Ledger<S>, out: &mut impl Write) -> Result<()> {
    for row in friend_rows(ledger) {
        writeln!(out, "{}", row)?;
    }
    Ok(())
}

pub fn add<S: FriendStore>(
    ledger: &mut Ledger<S>,
    name: &str,
    avatar_base: &str,
    out: &mut impl Write,
) -> Result<()> {
    let mut form = AddFriendForm::new(avatar_base);
    form.name = name.to_string();

    if let Some(friend) = form.submit() {
        let (name, id) = (friend.name.clone(), friend.id.clone());
        if ledger.add_friend(friend)? {
            writeln!(out, "Added {} [{}]", name, id)?;
        }
    }
    Ok(())
}

pub fn remove<S: FriendStore>(
    ledger: &mut Ledger<S>,
    id: &str,
    out: &mut impl Write,
) -> Result<()> {
    let id = FriendId::from(id);
    if ledger.remove_friend(&id)? {
        writeln!(out, "Removed [{}]", id)?;
    }
    Ok(())
}

/// Select a friend and submit a split in one step. Unknown friends and
/// invalid amounts leave everything unchanged.
pub fn split<S: FriendStore>(
    ledger: &mut Ledger<S>,
    id: &str,
    bill: &str,
    paid: &str,
    payer: Payer,
    out: &mut impl Write,
) -> Result<()> {
    let id = FriendId::from(id);
    if ledger.select_friend(&id).is_none() {
        return Ok(());
    }

    let mut form = SplitForm::new();
    form.set_bill(bill);
    form.set_paid_by_user(paid);
    form.set_payer(payer);

    if ledger.submit_split(&form)?.is_some() {
        list(ledger, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use eatsplit_core::config::DEFAULT_AVATAR_BASE;
    use eatsplit_core::{initial_friends, MemoryStore};
    use rust_decimal::Decimal;

    fn ledger() -> Ledger<MemoryStore> {
        Ledger::open(MemoryStore::new(), initial_friends()).unwrap()
    }

    #[test]
    fn test_list() {
        let mut out = Vec::new();
        list(&ledger(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("Abolore owes you $20"));
    }

    #[test]
    fn test_add_and_remove() {
        let mut ledger = ledger();
        let mut out = Vec::new();

        add(&mut ledger, "Tolu", DEFAULT_AVATAR_BASE, &mut out).unwrap();
        let id = ledger.friends()[0].id.to_string();
        remove(&mut ledger, &id, &mut out).unwrap();
        remove(&mut ledger, &id, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(ledger.friends(), initial_friends().as_slice());
    }

    #[test]
    fn test_split() {
        let mut ledger = ledger();
        let mut out = Vec::new();
        split(&mut ledger, "118836", "100", "40", Payer::Friend, &mut out).unwrap();

        let folarin = ledger.roster().get(&FriendId::from("118836")).unwrap();
        assert_eq!(folarin.balance, Decimal::from(-110));
        assert!(ledger.selection().selected().is_none());
    }

    #[test]
    fn test_split_rejects_paid_above_bill() {
        let mut ledger = ledger();
        let mut out = Vec::new();
        split(&mut ledger, "118836", "10", "40", Payer::User, &mut out).unwrap();

        assert_eq!(ledger.friends(), initial_friends().as_slice());
        assert!(out.is_empty());
    }

    #[test]
    fn test_split_unknown_friend() {
        let mut ledger = ledger();
        let mut out = Vec::new();
        split(&mut ledger, "nobody", "10", "5", Payer::User, &mut out).unwrap();
        assert_eq!(ledger.friends(), initial_friends().as_slice());
    }
}
