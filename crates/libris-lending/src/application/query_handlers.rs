//! Query handlers for the Lending context.
//!
//! These functions read from a `Library` and return serializable view DTOs.
//! They never mutate state.

use chrono::{DateTime, Utc};
use libris_core::error::LendingError;
use serde::Serialize;

use crate::application::library::{Library, ReturnReceipt};
use crate::domain::book::{Book, BookStatus};
use crate::domain::loan::Loan;
use crate::domain::member::Member;

/// Read-only view of a catalog entry.
#[derive(Debug, Serialize)]
pub struct BookView {
    /// The isbn.
    pub isbn: String,
    /// The genre.
    pub genre: String,
    /// The title.
    pub title: String,
    /// The author.
    pub author: String,
    /// Current availability.
    pub status: BookStatus,
}

impl From<&Book> for BookView {
    fn from(book: &Book) -> Self {
        Self {
            isbn: book.isbn().to_owned(),
            genre: book.genre().to_owned(),
            title: book.title().to_owned(),
            author: book.author().to_owned(),
            status: book.status(),
        }
    }
}

/// Read-only view of a member.
#[derive(Debug, Serialize)]
pub struct MemberView {
    /// The member identifier.
    pub member_id: String,
    /// The member's name.
    pub name: String,
    /// Isbns currently held, in borrow order.
    pub borrowed_books: Vec<String>,
    /// Number of books currently held.
    pub borrowed_count: usize,
}

impl From<&Member> for MemberView {
    fn from(member: &Member) -> Self {
        Self {
            member_id: member.id().to_owned(),
            name: member.name().to_owned(),
            borrowed_books: member.borrowed_books(),
            borrowed_count: member.borrowed_count(),
        }
    }
}

/// Read-only view of an active loan.
#[derive(Debug, Serialize)]
pub struct LoanView {
    /// The lent book.
    pub isbn: String,
    /// Title of the lent book.
    pub title: String,
    /// The borrowing member.
    pub member_id: String,
    /// When the loan started.
    pub checkout_date: DateTime<Utc>,
    /// When the book is due back.
    pub due_date: DateTime<Utc>,
    /// Whether the loan is overdue as of the query date.
    pub overdue: bool,
}

impl LoanView {
    /// Builds the view, judging overdue status as of `as_of`.
    #[must_use]
    pub fn new(loan: &Loan, as_of: DateTime<Utc>) -> Self {
        Self {
            isbn: loan.isbn().to_owned(),
            title: loan.title().to_owned(),
            member_id: loan.member_id().to_owned(),
            checkout_date: loan.checkout_date(),
            due_date: loan.due_date(),
            overdue: loan.is_overdue(as_of),
        }
    }
}

/// Read-only view of a completed return.
#[derive(Debug, Serialize)]
pub struct ReturnView {
    /// The returned book.
    pub isbn: String,
    /// The returning member.
    pub member_id: String,
    /// When the loan was due.
    pub due_date: DateTime<Utc>,
    /// When the book came back.
    pub return_date: DateTime<Utc>,
    /// Fine owed, in yen.
    pub fine: i64,
}

impl From<&ReturnReceipt> for ReturnView {
    fn from(receipt: &ReturnReceipt) -> Self {
        Self {
            isbn: receipt.loan.isbn().to_owned(),
            member_id: receipt.loan.member_id().to_owned(),
            due_date: receipt.loan.due_date(),
            return_date: receipt.return_date,
            fine: receipt.fine.amount(),
        }
    }
}

/// Retrieves a book by isbn.
///
/// # Errors
///
/// Returns `LendingError::BookNotFound` if no book has the isbn.
pub fn get_book(library: &Library, isbn: &str) -> Result<BookView, LendingError> {
    library
        .find_book(isbn)?
        .map(|book| BookView::from(&book))
        .ok_or_else(|| LendingError::BookNotFound(isbn.to_owned()))
}

/// Retrieves a member by id.
///
/// # Errors
///
/// Returns `LendingError::MemberNotFound` if no member has the id.
pub fn get_member(library: &Library, member_id: &str) -> Result<MemberView, LendingError> {
    library
        .find_member(member_id)?
        .map(|member| MemberView::from(&member))
        .ok_or_else(|| LendingError::MemberNotFound(member_id.to_owned()))
}

/// Lists a member's active loans, flagging those overdue as of `as_of`.
///
/// # Errors
///
/// Returns `LendingError::MemberNotFound` if no member has the id.
pub fn get_member_loans(
    library: &Library,
    member_id: &str,
    as_of: DateTime<Utc>,
) -> Result<Vec<LoanView>, LendingError> {
    if library.find_member(member_id)?.is_none() {
        return Err(LendingError::MemberNotFound(member_id.to_owned()));
    }
    Ok(library
        .loans_for_member(member_id)
        .into_iter()
        .map(|loan| LoanView::new(loan, as_of))
        .collect())
}
