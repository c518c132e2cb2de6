//! Library member and the set of books they hold.

use std::hash::{Hash, Hasher};

use libris_core::error::LendingError;
use libris_core::repository::Entity;

use super::book::Book;

/// A registered library member.
///
/// Members compare equal by id.
#[derive(Debug, Clone)]
pub struct Member {
    id: String,
    name: String,
    /// Isbns currently held, in borrow order. Never contains duplicates.
    borrowed: Vec<String>,
}

impl Member {
    /// Creates a member holding no books.
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            borrowed: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of books currently held.
    #[must_use]
    pub fn borrowed_count(&self) -> usize {
        self.borrowed.len()
    }

    /// Returns a copy of the held isbns. Changing the copy leaves the member
    /// untouched.
    #[must_use]
    pub fn borrowed_books(&self) -> Vec<String> {
        self.borrowed.clone()
    }

    #[must_use]
    pub fn has_borrowed(&self, book: &Book) -> bool {
        self.borrowed.iter().any(|isbn| isbn == book.isbn())
    }

    /// Records that the member now holds `book`.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::DuplicateBorrow` if the member already holds it.
    pub fn borrow(&mut self, book: &Book) -> Result<(), LendingError> {
        if self.has_borrowed(book) {
            return Err(LendingError::DuplicateBorrow {
                member_id: self.id.clone(),
                isbn: book.isbn().to_owned(),
            });
        }
        self.borrowed.push(book.isbn().to_owned());
        Ok(())
    }

    /// Records that the member gave `book` back.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::NotBorrowed` if the member does not hold it.
    pub fn return_book(&mut self, book: &Book) -> Result<(), LendingError> {
        if !self.has_borrowed(book) {
            return Err(LendingError::NotBorrowed {
                member_id: self.id.clone(),
                isbn: book.isbn().to_owned(),
            });
        }
        self.borrowed.retain(|isbn| isbn != book.isbn());
        Ok(())
    }

    /// Keeps the holdings of an already registered copy of this member.
    pub(crate) fn with_holdings_of(mut self, existing: &Member) -> Self {
        self.borrowed.clone_from(&existing.borrowed);
        self
    }
}

impl PartialEq for Member {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Member {}

impl Hash for Member {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Entity for Member {
    fn key(&self) -> &str {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat() -> Book {
        Book::new("978-4-00-000001-0", "fiction", "I Am a Cat", "Natsume Soseki")
    }

    fn botchan() -> Book {
        Book::new("978-4-00-000002-0", "fiction", "Botchan", "Natsume Soseki")
    }

    #[test]
    fn test_new_member_holds_nothing() {
        let member = Member::new("M001", "Taro Yamada");

        assert_eq!(member.borrowed_count(), 0);
        assert!(member.borrowed_books().is_empty());
    }

    #[test]
    fn test_borrow_adds_book() {
        let mut member = Member::new("M001", "Taro Yamada");

        member.borrow(&cat()).unwrap();
        member.borrow(&botchan()).unwrap();

        assert_eq!(member.borrowed_count(), 2);
        assert!(member.has_borrowed(&cat()));
        assert_eq!(
            member.borrowed_books(),
            vec!["978-4-00-000001-0".to_owned(), "978-4-00-000002-0".to_owned()]
        );
    }

    #[test]
    fn test_borrow_same_book_twice_returns_duplicate_borrow() {
        // Arrange
        let mut member = Member::new("M001", "Taro Yamada");
        member.borrow(&cat()).unwrap();

        // Act
        let result = member.borrow(&cat());

        // Assert
        match result {
            Err(LendingError::DuplicateBorrow { member_id, isbn }) => {
                assert_eq!(member_id, "M001");
                assert_eq!(isbn, "978-4-00-000001-0");
            }
            other => panic!("expected DuplicateBorrow, got {other:?}"),
        }
        assert_eq!(member.borrowed_count(), 1);
    }

    #[test]
    fn test_return_book_removes_only_that_book() {
        let mut member = Member::new("M001", "Taro Yamada");
        member.borrow(&cat()).unwrap();
        member.borrow(&botchan()).unwrap();

        member.return_book(&cat()).unwrap();

        assert!(!member.has_borrowed(&cat()));
        assert!(member.has_borrowed(&botchan()));
        assert_eq!(member.borrowed_count(), 1);
    }

    #[test]
    fn test_return_unheld_book_returns_not_borrowed() {
        let mut member = Member::new("M001", "Taro Yamada");

        let result = member.return_book(&cat());

        assert!(matches!(result, Err(LendingError::NotBorrowed { .. })));
    }

    #[test]
    fn test_borrowed_books_is_a_defensive_copy() {
        // Arrange
        let mut member = Member::new("M001", "Taro Yamada");
        member.borrow(&cat()).unwrap();

        // Act
        let mut snapshot = member.borrowed_books();
        snapshot.clear();
        snapshot.push("tampered".to_owned());

        // Assert
        assert_eq!(member.borrowed_count(), 1);
        assert_eq!(member.borrowed_books(), vec!["978-4-00-000001-0".to_owned()]);
    }

    #[test]
    fn test_members_are_equal_by_id() {
        assert_eq!(Member::new("M001", "Taro"), Member::new("M001", "Someone"));
        assert_ne!(Member::new("M001", "Taro"), Member::new("M002", "Taro"));
    }
}
