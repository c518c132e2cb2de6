//! Immutable loan record.

use chrono::{DateTime, Days, Utc};

use super::book::Book;
use super::member::Member;

/// Length of every loan, in calendar days.
pub const LOAN_PERIOD_DAYS: u64 = 14;

/// A book lent to a member. Fixed once created; the due date is derived at
/// construction and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    isbn: String,
    title: String,
    member_id: String,
    checkout_date: DateTime<Utc>,
    due_date: DateTime<Utc>,
}

impl Loan {
    /// Creates a loan of `book` to `member` starting at `checkout_date`.
    #[must_use]
    pub fn new(book: &Book, member: &Member, checkout_date: DateTime<Utc>) -> Self {
        Self {
            isbn: book.isbn().to_owned(),
            title: book.title().to_owned(),
            member_id: member.id().to_owned(),
            checkout_date,
            due_date: checkout_date + Days::new(LOAN_PERIOD_DAYS),
        }
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    /// Title of the book at checkout time.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn member_id(&self) -> &str {
        &self.member_id
    }

    #[must_use]
    pub fn checkout_date(&self) -> DateTime<Utc> {
        self.checkout_date
    }

    #[must_use]
    pub fn due_date(&self) -> DateTime<Utc> {
        self.due_date
    }

    /// True once `date` is strictly past the due date. The due date itself is
    /// never overdue.
    #[must_use]
    pub fn is_overdue(&self, date: DateTime<Utc>) -> bool {
        date > self.due_date
    }

    #[must_use]
    pub fn belongs_to(&self, member_id: &str) -> bool {
        self.member_id == member_id
    }

    #[must_use]
    pub fn references(&self, isbn: &str) -> bool {
        self.isbn == isbn
    }
}
