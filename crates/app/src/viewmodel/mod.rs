//! View models for the terminal frontend

mod friends;
mod split;

pub use friends::{friend_rows, FriendRow};
pub use split::SplitPanel;
