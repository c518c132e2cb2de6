//! Lending error taxonomy.

use thiserror::Error;

/// Every way a lending operation can be rejected.
///
/// Each variant carries a stable machine-readable code (see [`LendingError::code`])
/// and a human-readable message via `Display`. None of these are fatal; the
/// caller may retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LendingError {
    /// No book is registered under the given isbn.
    #[error("book not found: {0}")]
    BookNotFound(String),

    /// No member is registered under the given id.
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// A checkout was attempted on a book that is already lent out.
    #[error("book {0} is already checked out")]
    AlreadyCheckedOut(String),

    /// A lending rule denied the checkout.
    #[error("{rule} rule violated: {reason}")]
    RuleViolation {
        /// Name of the first rule that denied the request.
        rule: &'static str,
        /// The reason reported by that rule.
        reason: String,
    },

    /// The member does not currently hold the book.
    #[error("member {member_id} has not borrowed book {isbn}")]
    NotBorrowed {
        /// The member attempting the return.
        member_id: String,
        /// The book being returned.
        isbn: String,
    },

    /// The member already holds the book.
    #[error("member {member_id} has already borrowed book {isbn}")]
    DuplicateBorrow {
        /// The member attempting the borrow.
        member_id: String,
        /// The book being borrowed.
        isbn: String,
    },

    /// A fine was constructed with a negative amount.
    #[error("fine amount must not be negative: {0}")]
    NegativeAmount(i64),

    /// A storage or synchronization failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl LendingError {
    /// Returns the machine-readable code for this error.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BookNotFound(_) => "BOOK_NOT_FOUND",
            Self::MemberNotFound(_) => "MEMBER_NOT_FOUND",
            Self::AlreadyCheckedOut(_) => "ALREADY_CHECKED_OUT",
            Self::RuleViolation { .. } => "RULE_VIOLATION",
            Self::NotBorrowed { .. } => "NOT_BORROWED",
            Self::DuplicateBorrow { .. } => "DUPLICATE_BORROW",
            Self::NegativeAmount(_) => "NEGATIVE_AMOUNT",
            Self::Infrastructure(_) => "INFRASTRUCTURE",
        }
    }
}
