//! Overdue fine value type.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::{DateTime, TimeDelta, Utc};
use libris_core::error::LendingError;
use serde::Serialize;

use super::loan::Loan;

/// Fine charged per started overdue day, in yen.
pub const DAILY_RATE: i64 = 50;


/// A nonnegative amount of money owed for a late return.
///
/// Fines are values: equal amounts are equal fines, and combining two fines
/// produces a new one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Fine {
    amount: i64,
}

impl Fine {
    /// Creates a fine of `amount` yen.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::NegativeAmount` if `amount` is below zero.
    pub fn new(amount: i64) -> Result<Self, LendingError> {
        if amount < 0 {
            return Err(LendingError::NegativeAmount(amount));
        }
        Ok(Self { amount })
    }

    #[must_use]
    pub const fn zero() -> Self {
        Self { amount: 0 }
    }

    /// Computes the fine for returning `loan` at `return_date`.
    ///
    /// Returning on or before the due date costs nothing. Afterwards every
    /// started day past the due date costs [`DAILY_RATE`].
    #[must_use]
    pub fn calculate(loan: &Loan, return_date: DateTime<Utc>) -> Self {
        if return_date <= loan.due_date() {
            return Self::zero();
        }
        let overdue_days = started_days(return_date - loan.due_date());
        Self {
            amount: overdue_days.saturating_mul(DAILY_RATE),
        }
    }

    #[must_use]
    pub fn amount(&self) -> i64 {
        self.amount
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }
}

/// Number of days, counting a partial day as a whole one. `late` is positive.
fn started_days(late: TimeDelta) -> i64 {
    let whole = late.num_days();
    if late > TimeDelta::days(whole) {
        whole + 1
    } else {
        whole
    }
}

impl Add for Fine {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            amount: self.amount.saturating_add(other.amount),
        }
    }
}

impl Sum for Fine {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::zero(), Add::add)
    }
}

impl fmt::Display for Fine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} yen", self.amount)
    }
}
