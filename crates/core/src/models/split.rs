//! Bill split model

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Who paid the bill out of pocket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Payer {
    #[default]
    User,
    Friend,
}

impl FromStr for Payer {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "user" | "you" | "me" => Ok(Payer::User),
            "friend" => Ok(Payer::Friend),
            other => Err(Error::InvalidSplit(format!("unknown payer '{}'", other))),
        }
    }
}

impl fmt::Display for Payer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payer::User => f.write_str("user"),
            Payer::Friend => f.write_str("friend"),
        }
    }
}

/// One validated bill-division event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillSplit {
    bill: Decimal,
    paid_by_user: Decimal,
    payer: Payer,
}

impl BillSplit {
    /// Validate a split. The bill must be positive and the user's share
    /// must lie within `[0, bill]`.
    pub fn new(bill: Decimal, paid_by_user: Decimal, payer: Payer) -> Result<Self> {
        if bill <= Decimal::ZERO {
            return Err(Error::InvalidSplit(format!("bill must be positive, got {}", bill)));
        }
        if paid_by_user < Decimal::ZERO {
            return Err(Error::InvalidSplit(format!(
                "paid amount must not be negative, got {}",
                paid_by_user
            )));
        }
        if paid_by_user > bill {
            return Err(Error::InvalidSplit(format!(
                "paid amount {} exceeds bill {}",
                paid_by_user, bill
            )));
        }

        Ok(Self {
            bill,
            paid_by_user,
            payer,
        })
    }

    pub fn bill(&self) -> Decimal {
        self.bill
    }

    pub fn paid_by_user(&self) -> Decimal {
        self.paid_by_user
    }

    pub fn payer(&self) -> Payer {
        self.payer
    }

    /// The friend's share of the bill
    pub fn paid_by_friend(&self) -> Decimal {
        self.bill - self.paid_by_user
    }

    /// Signed change to apply to the selected friend's balance
    pub fn delta(&self) -> Decimal {
        match self.payer {
            Payer::User => self.paid_by_friend(),
            Payer::Friend => -self.paid_by_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_user_pays() {
        let split = BillSplit::new(dec(100), dec(40), Payer::User).unwrap();
        assert_eq!(split.paid_by_friend(), dec(60));
        assert_eq!(split.delta(), dec(60));
    }

    #[test]
    fn test_friend_pays() {
        let split = BillSplit::new(dec(100), dec(40), Payer::Friend).unwrap();
        assert_eq!(split.delta(), dec(-40));
    }

    #[test]
    fn test_fractional_amounts() {
        let split = BillSplit::new(Decimal::new(1999, 2), Decimal::new(1000, 2), Payer::User)
            .unwrap();
        assert_eq!(split.delta(), Decimal::new(999, 2));
    }

    #[test]
    fn test_edges_of_paid_range() {
        let all_user = BillSplit::new(dec(50), dec(50), Payer::User).unwrap();
        assert_eq!(all_user.delta(), Decimal::ZERO);

        let nothing_from_user = BillSplit::new(dec(50), Decimal::ZERO, Payer::Friend).unwrap();
        assert_eq!(nothing_from_user.delta(), Decimal::ZERO);
    }

    #[test]
    fn test_rejects_non_positive_bill() {
        assert!(matches!(
            BillSplit::new(Decimal::ZERO, Decimal::ZERO, Payer::User),
            Err(Error::InvalidSplit(_))
        ));
        assert!(BillSplit::new(dec(-5), Decimal::ZERO, Payer::User).is_err());
    }

    #[test]
    fn test_rejects_paid_out_of_range() {
        assert!(BillSplit::new(dec(10), dec(11), Payer::User).is_err());
        assert!(BillSplit::new(dec(10), dec(-1), Payer::Friend).is_err());
    }

    #[test]
    fn test_payer_parse() {
        assert_eq!("user".parse::<Payer>().unwrap(), Payer::User);
        assert_eq!(" Friend ".parse::<Payer>().unwrap(), Payer::Friend);
        assert!("someone".parse::<Payer>().is_err());
    }
}
