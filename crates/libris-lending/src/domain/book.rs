//! Catalog item and its availability state machine.

use std::fmt;
use std::hash::{Hash, Hasher};

use libris_core::error::LendingError;
use libris_core::repository::Entity;
use serde::Serialize;

/// Availability of a single catalog item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookStatus {
    /// On the shelf and free to lend.
    #[default]
    Available,
    /// Lent out under an active loan.
    CheckedOut,
}

/// A book registered in the catalog.
///
/// Two books are the same book when their isbns match, whatever the rest of
/// their fields say.
#[derive(Debug, Clone)]
pub struct Book {
    isbn: String,
    genre: String,
    title: String,
    author: String,
    status: BookStatus,
}

impl Book {
    /// Creates an available book.
    #[must_use]
    pub fn new(
        isbn: impl Into<String>,
        genre: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            isbn: isbn.into(),
            genre: genre.into(),
            title: title.into(),
            author: author.into(),
            status: BookStatus::Available,
        }
    }

    #[must_use]
    pub fn isbn(&self) -> &str {
        &self.isbn
    }

    #[must_use]
    pub fn genre(&self) -> &str {
        &self.genre
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub fn status(&self) -> BookStatus {
        self.status
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == BookStatus::Available
    }

    /// Marks the book as lent out.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::AlreadyCheckedOut` if the book is not available.
    pub fn checkout(&mut self) -> Result<(), LendingError> {
        if self.status == BookStatus::CheckedOut {
            return Err(LendingError::AlreadyCheckedOut(self.isbn.clone()));
        }
        self.status = BookStatus::CheckedOut;
        Ok(())
    }

    /// Puts the book back on the shelf. Returning an available book is a no-op.
    pub fn return_book(&mut self) {
        self.status = BookStatus::Available;
    }

    /// Keeps the lending status of an already registered copy of this book.
    pub(crate) fn with_status_of(mut self, existing: &Book) -> Self {
        self.status = existing.status;
        self
    }
}

impl PartialEq for Book {
    fn eq(&self, other: &Self) -> bool {
        self.isbn == other.isbn
    }
}

impl Eq for Book {}

impl Hash for Book {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.isbn.hash(state);
    }
}

impl Entity for Book {
    fn key(&self) -> &str {
        &self.isbn
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" by {}", self.title, self.author)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_book() -> Book {
        Book::new("978-4-00-000001-0", "fiction", "I Am a Cat", "Natsume Soseki")
    }

    #[test]
    fn test_new_book_is_available() {
        let book = sample_book();

        assert!(book.is_available());
        assert_eq!(book.status(), BookStatus::Available);
    }

    #[test]
    fn test_checkout_marks_book_checked_out() {
        let mut book = sample_book();

        book.checkout().unwrap();

        assert!(!book.is_available());
        assert_eq!(book.status(), BookStatus::CheckedOut);
    }

    #[test]
    fn test_checkout_twice_returns_already_checked_out() {
        // Arrange
        let mut book = sample_book();
        book.checkout().unwrap();

        // Act
        let result = book.checkout();

        // Assert
        match result {
            Err(LendingError::AlreadyCheckedOut(isbn)) => assert_eq!(isbn, "978-4-00-000001-0"),
            other => panic!("expected AlreadyCheckedOut, got {other:?}"),
        }
        assert!(!book.is_available());
    }

    #[test]
    fn test_return_book_makes_book_available_again() {
        let mut book = sample_book();
        book.checkout().unwrap();

        book.return_book();

        assert!(book.is_available());
    }

    #[test]
    fn test_return_book_on_available_book_is_a_no_op() {
        let mut book = sample_book();

        book.return_book();

        assert!(book.is_available());
    }

    #[test]
    fn test_books_are_equal_by_isbn() {
        let a = sample_book();
        let b = Book::new("978-4-00-000001-0", "other", "Other Title", "Someone Else");
        let c = Book::new("978-4-00-000002-0", "fiction", "I Am a Cat", "Natsume Soseki");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_display_shows_title_and_author() {
        assert_eq!(sample_book().to_string(), "\"I Am a Cat\" by Natsume Soseki");
    }
}
