//! Interactive shell
//!
//! Line-oriented frontend over a [`Ledger`]. The roster is redrawn
//! whenever the ledger reports a change.

use std::cell::Cell;
use std::io::{BufRead, Write};
use std::rc::Rc;

use eatsplit_core::{
    AddFriendForm, FriendId, FriendStore, Ledger, LedgerEvent, Mode, Payer, Result, SplitForm,
};

use crate::viewmodel::{friend_rows, SplitPanel};

const HELP: &str = "\
Commands:
  list                 show friends
  show <n|id>          show one friend
  add <name>           add a friend
  avatar <url>         avatar service for the next added friend
  toggle-add           open or close the add-friend form
  select <n|id>        select a friend (again to deselect)
  bill <amount>        bill value
  paid <amount>        your expense
  payer user|friend    who is paying the bill
  split                split the bill with the selected friend
  remove <n|id>        delete a friend
  help                 this text
  quit                 leave";

/// A parsed shell line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Show(String),
    Add(String),
    Avatar(String),
    ToggleAdd,
    Select(String),
    Bill(String),
    Paid(String),
    Payer(String),
    Split,
    Remove(String),
    Help,
    Quit,
    Empty,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim().to_string()),
            None => (line, String::new()),
        };

        match word {
            "" => Command::Empty,
            "list" | "ls" => Command::List,
            "show" => Command::Show(rest),
            "add" => Command::Add(rest),
            "avatar" => Command::Avatar(rest),
            "toggle-add" => Command::ToggleAdd,
            "select" => Command::Select(rest),
            "bill" => Command::Bill(rest),
            "paid" => Command::Paid(rest),
            "payer" => Command::Payer(rest),
            "split" => Command::Split,
            "remove" | "rm" | "delete" => Command::Remove(rest),
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

pub struct Shell<S: FriendStore, W: Write> {
    ledger: Ledger<S>,
    add_form: AddFriendForm,
    split_form: SplitForm,
    dirty: Rc<Cell<bool>>,
    out: W,
}

impl<S: FriendStore, W: Write> Shell<S, W> {
    pub fn new(mut ledger: Ledger<S>, avatar_base: &str, out: W) -> Self {
        let dirty = Rc::new(Cell::new(false));
        let flag = dirty.clone();
        ledger.subscribe(move |event: &LedgerEvent| {
            tracing::trace!(?event, "Ledger changed");
            flag.set(true);
        });

        Self {
            ledger,
            add_form: AddFriendForm::new(avatar_base),
            split_form: SplitForm::new(),
            dirty,
            out,
        }
    }

    #[cfg(test)]
    pub fn ledger(&self) -> &Ledger<S> {
        &self.ledger
    }

    /// Read commands until `quit` or end of input
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<()> {
        self.render()?;
        self.prompt()?;

        for line in input.lines() {
            let command = Command::parse(&line?);
            if command == Command::Quit {
                break;
            }

            self.execute(command)?;
            if self.dirty.replace(false) {
                self.render()?;
            }
            self.prompt()?;
        }

        writeln!(self.out)?;
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> Result<()> {
        match command {
            Command::List => self.render()?,
            Command::Show(target) => {
                if let Some(friend) = self
                    .resolve(&target)
                    .and_then(|id| self.ledger.roster().get(&id))
                {
                    writeln!(self.out, "{} [{}]", friend.name, friend.id)?;
                    writeln!(self.out, "  avatar:  {}", friend.avatar_ref)?;
                    writeln!(self.out, "  balance: {}", friend.balance.normalize())?;
                }
            }
            Command::Add(name) => {
                self.ledger.open_add_form();
                self.add_form.name = name;
                if let Some(friend) = self.add_form.submit() {
                    self.ledger.add_friend(friend)?;
                }
            }
            Command::Avatar(url) => self.add_form.avatar_base = url,
            Command::ToggleAdd => self.ledger.toggle_add_form(),
            Command::Select(target) => {
                if let Some(id) = self.resolve(&target) {
                    self.split_form.clear();
                    self.ledger.select_friend(&id);
                }
            }
            Command::Bill(text) => {
                self.split_form.set_bill(&text);
                self.render_split()?;
            }
            Command::Paid(text) => {
                self.split_form.set_paid_by_user(&text);
                self.render_split()?;
            }
            Command::Payer(text) => {
                if let Ok(payer) = text.parse::<Payer>() {
                    self.split_form.set_payer(payer);
                }
                self.render_split()?;
            }
            Command::Split => {
                if self.ledger.submit_split(&self.split_form)?.is_some() {
                    self.split_form.clear();
                }
            }
            Command::Remove(target) => {
                if let Some(id) = self.resolve(&target) {
                    self.ledger.remove_friend(&id)?;
                }
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Unknown(word) => writeln!(self.out, "Unknown command '{}', try 'help'", word)?,
            Command::Empty | Command::Quit => {}
        }
        Ok(())
    }

    /// Resolve a 1-based list position or a literal id
    fn resolve(&self, target: &str) -> Option<FriendId> {
        let friends = self.ledger.friends();
        if let Ok(index) = target.parse::<usize>() {
            if let Some(friend) = index.checked_sub(1).and_then(|i| friends.get(i)) {
                return Some(friend.id.clone());
            }
        }

        let id = FriendId::from(target);
        self.ledger.roster().contains(&id).then_some(id)
    }

    fn render(&mut self) -> Result<()> {
        for row in friend_rows(&self.ledger) {
            writeln!(self.out, "{}", row)?;
        }

        match self.ledger.mode() {
            Mode::Idle => {}
            Mode::Adding => writeln!(self.out, "(adding a friend: add <name>)")?,
            Mode::Selected(_) => self.render_split()?,
        }
        Ok(())
    }

    fn render_split(&mut self) -> Result<()> {
        if let Some(friend) = self.ledger.selected_friend() {
            writeln!(self.out, "{}", SplitPanel::new(friend, &self.split_form))?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }
}
