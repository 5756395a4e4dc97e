//! Data models for Eatsplit

mod friend;
mod split;

pub use friend::*;
pub use split::*;
