//! The lending orchestrator.
//!
//! `Library` owns the catalog, the membership, the active loans, the rule
//! chain, and the notifier. `checkout` and `return_book` are transactions:
//! every precondition is checked before anything is written, and the book,
//! member, and loan collection change together or not at all.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use chrono::{DateTime, Utc};
use libris_core::error::LendingError;
use libris_core::repository::Repository;
use tracing::{info, instrument, warn};

use crate::application::ports::Notifier;
use crate::domain::book::Book;
use crate::domain::fine::Fine;
use crate::domain::loan::Loan;
use crate::domain::member::Member;
use crate::domain::rules::{LendingContext, RuleChain};

/// Outcome of a successful return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    /// The loan that was closed.
    pub loan: Loan,
    /// Fine owed for the return (zero when on time).
    pub fine: Fine,
    /// When the book came back.
    pub return_date: DateTime<Utc>,
}

/// Lending orchestrator.
pub struct Library {
    catalog: Box<dyn Repository<Book>>,
    membership: Box<dyn Repository<Member>>,
    active_loans: Vec<Loan>,
    rules: RuleChain,
    notifier: Option<Box<dyn Notifier>>,
}

impl Library {
    /// Creates a library over the given stores, using the standard rule chain
    /// and no notifier.
    #[must_use]
    pub fn new(
        catalog: impl Repository<Book> + 'static,
        membership: impl Repository<Member> + 'static,
    ) -> Self {
        Self {
            catalog: Box::new(catalog),
            membership: Box::new(membership),
            active_loans: Vec::new(),
            rules: RuleChain::default(),
            notifier: None,
        }
    }

    /// Replaces the rule chain.
    #[must_use]
    pub fn with_rules(mut self, rules: RuleChain) -> Self {
        self.rules = rules;
        self
    }

    /// Installs a notifier for checkout messages.
    #[must_use]
    pub fn with_notifier(mut self, notifier: impl Notifier + 'static) -> Self {
        self.notifier = Some(Box::new(notifier));
        self
    }

    /// Registers a book, replacing the catalog details of any book with the
    /// same isbn. A re-registered book keeps its current lending status.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if the catalog store fails.
    pub fn add_book(&mut self, book: Book) -> Result<(), LendingError> {
        let book = match self.catalog.find(book.isbn())? {
            Some(existing) => book.with_status_of(&existing),
            None => book,
        };
        self.catalog.save(book)
    }

    /// Registers a member, replacing the details of any member with the same
    /// id. A re-registered member keeps the books they hold.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if the membership store fails.
    pub fn add_member(&mut self, member: Member) -> Result<(), LendingError> {
        let member = match self.membership.find(member.id())? {
            Some(existing) => member.with_holdings_of(&existing),
            None => member,
        };
        self.membership.save(member)
    }

    /// Lends the book `isbn` to member `member_id` as of `current_date`.
    ///
    /// On success the book is checked out, the member holds it, a new loan is
    /// active, and the member is notified (best effort).
    ///
    /// # Errors
    ///
    /// - `BookNotFound` / `MemberNotFound` if either key is unknown.
    /// - `RuleViolation` for the first lending rule that denies the request.
    /// - `Infrastructure` if a store rejects the write; the transaction is
    ///   rolled back.
    #[instrument(skip(self), fields(%current_date))]
    pub fn checkout(
        &mut self,
        member_id: &str,
        isbn: &str,
        current_date: DateTime<Utc>,
    ) -> Result<Loan, LendingError> {
        let mut book = self.require_book(isbn)?;
        let mut member = self.require_member(member_id)?;

        let context = LendingContext {
            book: &book,
            member: &member,
            active_loans: &self.active_loans,
            current_date,
        };
        self.rules.evaluate(&context)?;

        let original_book = book.clone();
        let loan = Loan::new(&book, &member, current_date);
        book.checkout()?;
        member.borrow(&book)?;

        let message = format!(
            "You have checked out {book}. Please return it by {}.",
            loan.due_date().format("%Y-%m-%d")
        );
        self.persist(book, member.clone(), original_book)?;
        self.active_loans.push(loan.clone());

        info!(due_date = %loan.due_date(), "book checked out");
        self.notify(&member, &message);

        Ok(loan)
    }

    /// Takes back the book `isbn` from member `member_id` as of `return_date`
    /// and computes the fine owed.
    ///
    /// # Errors
    ///
    /// - `BookNotFound` / `MemberNotFound` if either key is unknown.
    /// - `NotBorrowed` if the member does not hold the book.
    /// - `Infrastructure` if a store rejects the write; the transaction is
    ///   rolled back.
    #[instrument(skip(self), fields(%return_date))]
    pub fn return_book(
        &mut self,
        member_id: &str,
        isbn: &str,
        return_date: DateTime<Utc>,
    ) -> Result<ReturnReceipt, LendingError> {
        let mut book = self.require_book(isbn)?;
        let mut member = self.require_member(member_id)?;

        let not_borrowed = || LendingError::NotBorrowed {
            member_id: member_id.to_owned(),
            isbn: isbn.to_owned(),
        };
        if !member.has_borrowed(&book) {
            return Err(not_borrowed());
        }
        let position = self
            .active_loans
            .iter()
            .position(|loan| loan.references(isbn) && loan.belongs_to(member_id))
            .ok_or_else(not_borrowed)?;
        let fine = Fine::calculate(&self.active_loans[position], return_date);

        let original_book = book.clone();
        book.return_book();
        member.return_book(&book)?;
        self.persist(book, member, original_book)?;
        let loan = self.active_loans.remove(position);

        info!(%fine, "book returned");
        Ok(ReturnReceipt {
            loan,
            fine,
            return_date,
        })
    }

    /// Looks up a book by isbn.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if the catalog store fails.
    pub fn find_book(&self, isbn: &str) -> Result<Option<Book>, LendingError> {
        self.catalog.find(isbn)
    }

    /// Looks up a member by id.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::Infrastructure` if the membership store fails.
    pub fn find_member(&self, member_id: &str) -> Result<Option<Member>, LendingError> {
        self.membership.find(member_id)
    }

    /// All loans not yet returned, in checkout order.
    #[must_use]
    pub fn active_loans(&self) -> &[Loan] {
        &self.active_loans
    }

    /// Active loans held by `member_id`.
    #[must_use]
    pub fn loans_for_member(&self, member_id: &str) -> Vec<&Loan> {
        self.active_loans
            .iter()
            .filter(|loan| loan.belongs_to(member_id))
            .collect()
    }

    /// Active loans held by `member_id` that are overdue as of `as_of`.
    #[must_use]
    pub fn overdue_loans(&self, member_id: &str, as_of: DateTime<Utc>) -> Vec<&Loan> {
        self.active_loans
            .iter()
            .filter(|loan| loan.belongs_to(member_id) && loan.is_overdue(as_of))
            .collect()
    }

    fn require_book(&self, isbn: &str) -> Result<Book, LendingError> {
        self.catalog
            .find(isbn)?
            .ok_or_else(|| LendingError::BookNotFound(isbn.to_owned()))
    }

    fn require_member(&self, member_id: &str) -> Result<Member, LendingError> {
        self.membership
            .find(member_id)?
            .ok_or_else(|| LendingError::MemberNotFound(member_id.to_owned()))
    }

    /// Writes the staged book and member. If the member write fails, the book
    /// is restored to `original_book`.
    fn persist(
        &mut self,
        book: Book,
        member: Member,
        original_book: Book,
    ) -> Result<(), LendingError> {
        self.catalog.save(book)?;
        if let Err(err) = self.membership.save(member) {
            warn!(error = %err, isbn = original_book.isbn(), "rolling back book after failed member write");
            if let Err(rollback_err) = self.catalog.save(original_book) {
                tracing::error!(error = %rollback_err, "book rollback failed");
            }
            return Err(err);
        }
        Ok(())
    }

    /// Sends `message` to `member`, discarding any failure. A panicking
    /// notifier is contained as well.
    fn notify(&self, member: &Member, message: &str) {
        let Some(notifier) = &self.notifier else {
            return;
        };
        match panic::catch_unwind(AssertUnwindSafe(|| notifier.send(member, message))) {
            Ok(Ok(())) => {}
            Ok(Err(err)) => warn!(error = %err, "checkout notification failed"),
            Err(_) => warn!(member_id = member.id(), "checkout notifier panicked"),
        }
    }
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("active_loans", &self.active_loans)
            .field("rules", &self.rules)
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use chrono::TimeZone;
    use libris_store::InMemoryRepository;

    use super::*;
    use crate::application::ports::NotificationError;
    use crate::domain::rules::{BookAvailableRule, MaxLoansRule};

    #[derive(Debug, Default, Clone)]
    struct SpyNotifier {
        sent: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl Notifier for SpyNotifier {
        fn send(&self, member: &Member, message: &str) -> Result<(), NotificationError> {
            self.sent
                .lock()
                .unwrap()
                .push((member.id().to_owned(), message.to_owned()));
            Ok(())
        }
    }

    #[derive(Debug)]
    struct BrokenNotifier;

    impl Notifier for BrokenNotifier {
        fn send(&self, member: &Member, _message: &str) -> Result<(), NotificationError> {
            Err(NotificationError::new(member.id(), "smtp unreachable"))
        }
    }

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn library() -> Library {
        let mut library = Library::new(InMemoryRepository::default(), InMemoryRepository::default());
        for n in 1..=4 {
            library
                .add_book(Book::new(
                    format!("978-4-00-00000{n}-0"),
                    "fiction",
                    format!("Title {n}"),
                    "Natsume Soseki",
                ))
                .unwrap();
        }
        library.add_member(Member::new("M001", "Taro Tanaka")).unwrap();
        library.add_member(Member::new("M002", "Hanako Sato")).unwrap();
        library
    }

    const CAT: &str = "978-4-00-000001-0";
    const BOTCHAN: &str = "978-4-00-000002-0";

    #[test]
    fn test_checkout_creates_loan_and_updates_book_and_member() {
        // Arrange
        let mut library = library();

        // Act
        let loan = library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        // Assert
        assert_eq!(loan.due_date(), date(2026, 2, 15));
        assert!(!library.find_book(CAT).unwrap().unwrap().is_available());
        let member = library.find_member("M001").unwrap().unwrap();
        assert_eq!(member.borrowed_books(), vec![CAT.to_owned()]);
        assert_eq!(library.active_loans(), &[loan]);
    }

    #[test]
    fn test_checkout_unknown_book_returns_book_not_found() {
        let mut library = library();

        let result = library.checkout("M001", "999-UNKNOWN", date(2026, 2, 1));

        assert_eq!(result, Err(LendingError::BookNotFound("999-UNKNOWN".to_owned())));
    }

    #[test]
    fn test_checkout_unknown_member_returns_member_not_found() {
        let mut library = library();

        let result = library.checkout("M999", CAT, date(2026, 2, 1));

        assert_eq!(result, Err(LendingError::MemberNotFound("M999".to_owned())));
        assert!(library.find_book(CAT).unwrap().unwrap().is_available());
    }

    #[test]
    fn test_checkout_of_lent_book_is_rule_violation() {
        let mut library = library();
        library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        let result = library.checkout("M002", CAT, date(2026, 2, 2));

        match result {
            Err(LendingError::RuleViolation { rule, .. }) => assert_eq!(rule, "book_available"),
            other => panic!("expected RuleViolation, got {other:?}"),
        }
        assert!(library.loans_for_member("M002").is_empty());
    }

    #[test]
    fn test_custom_rule_chain_is_used() {
        // Arrange
        let mut library = library().with_rules(RuleChain::new(vec![
            Box::new(BookAvailableRule),
            Box::new(MaxLoansRule::new(1)),
        ]));
        library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        // Act
        let result = library.checkout("M001", BOTCHAN, date(2026, 2, 1));

        // Assert
        match result {
            Err(LendingError::RuleViolation { rule, reason }) => {
                assert_eq!(rule, "max_loans");
                assert_eq!(reason, "loan limit of 1 reached");
            }
            other => panic!("expected RuleViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_return_book_closes_loan_and_reports_fine() {
        let mut library = library();
        let loan = library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        let receipt = library.return_book("M001", CAT, date(2026, 2, 16)).unwrap();

        assert_eq!(receipt.loan, loan);
        assert_eq!(receipt.fine.amount(), 50);
        assert_eq!(receipt.return_date, date(2026, 2, 16));
        assert!(library.active_loans().is_empty());
        assert!(library.find_book(CAT).unwrap().unwrap().is_available());
        assert_eq!(library.find_member("M001").unwrap().unwrap().borrowed_count(), 0);
    }

    #[test]
    fn test_return_by_non_holder_returns_not_borrowed() {
        let mut library = library();
        library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        let result = library.return_book("M002", CAT, date(2026, 2, 2));

        assert_eq!(
            result,
            Err(LendingError::NotBorrowed {
                member_id: "M002".to_owned(),
                isbn: CAT.to_owned(),
            })
        );
        assert_eq!(library.active_loans().len(), 1);
        assert!(!library.find_book(CAT).unwrap().unwrap().is_available());
    }

    #[test]
    fn test_return_unknown_book_returns_book_not_found() {
        let mut library = library();

        let result = library.return_book("M001", "999-UNKNOWN", date(2026, 2, 2));

        assert!(matches!(result, Err(LendingError::BookNotFound(_))));
    }

    #[test]
    fn test_checkout_notifies_member() {
        // Arrange
        let notifier = SpyNotifier::default();
        let mut library = library().with_notifier(notifier.clone());

        // Act
        library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        // Assert
        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "M001");
        assert!(sent[0].1.contains("Title 1"));
        assert!(sent[0].1.contains("2026-02-15"));
    }

    #[test]
    fn test_failed_checkout_does_not_notify() {
        let notifier = SpyNotifier::default();
        let mut library = library().with_notifier(notifier.clone());

        let _ = library.checkout("M001", "999-UNKNOWN", date(2026, 2, 1));

        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failing_notifier_does_not_block_checkout() {
        let mut library = library().with_notifier(BrokenNotifier);

        let result = library.checkout("M001", CAT, date(2026, 2, 1));

        assert!(result.is_ok());
        assert!(!library.find_book(CAT).unwrap().unwrap().is_available());
        assert_eq!(library.active_loans().len(), 1);
    }

    #[test]
    fn test_add_book_is_an_upsert_by_isbn() {
        let mut library = library();

        library
            .add_book(Book::new(CAT, "classic", "I Am a Cat", "Natsume Soseki"))
            .unwrap();

        let book = library.find_book(CAT).unwrap().unwrap();
        assert_eq!(book.title(), "I Am a Cat");
        assert_eq!(book.genre(), "classic");
    }

    #[test]
    fn test_re_registering_lent_book_and_member_keeps_loan_state() {
        // Arrange
        let mut library = library();
        library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();

        // Act
        library
            .add_book(Book::new(CAT, "classic", "I Am a Cat", "Natsume Soseki"))
            .unwrap();
        library.add_member(Member::new("M001", "Taro T.")).unwrap();

        // Assert
        assert!(!library.find_book(CAT).unwrap().unwrap().is_available());
        let member = library.find_member("M001").unwrap().unwrap();
        assert_eq!(member.name(), "Taro T.");
        assert_eq!(member.borrowed_books(), vec![CAT.to_owned()]);
    }

    #[test]
    fn test_overdue_loans_lists_only_that_members_late_loans() {
        let mut library = library();
        library.checkout("M001", CAT, date(2026, 2, 1)).unwrap();
        library.checkout("M001", BOTCHAN, date(2026, 2, 10)).unwrap();
        library
            .checkout("M002", "978-4-00-000003-0", date(2026, 1, 1))
            .unwrap();

        let overdue = library.overdue_loans("M001", date(2026, 2, 20));

        assert_eq!(overdue.len(), 1);
        assert_eq!(overdue[0].isbn(), CAT);
        assert_eq!(library.loans_for_member("M001").len(), 2);
    }

    #[test]
    fn test_library_over_empty_stores_reports_unknown_keys() {
        // Arrange
        let mut library = Library::new(
            InMemoryRepository::<Book>::default(),
            InMemoryRepository::<Member>::default(),
        );

        // Act
        let result = library.checkout("M001", CAT, date(2026, 2, 1));

        // Assert
        assert!(matches!(result, Err(LendingError::BookNotFound(isbn)) if isbn == CAT));
        assert!(library.find_member("M001").unwrap().is_none());
        assert!(library.active_loans().is_empty());
    }
}
