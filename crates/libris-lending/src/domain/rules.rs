//! Lending policy: pluggable rules evaluated before a checkout.
//!
//! A [`RuleChain`] holds an ordered list of [`LendingRule`]s. Evaluation
//! stops at the first rule that denies the request, and that rule's reason is
//! reported to the caller. Rules are pure functions of the [`LendingContext`].

use std::fmt;

use chrono::{DateTime, Utc};
use libris_core::error::LendingError;

use super::book::Book;
use super::loan::Loan;
use super::member::Member;

/// Loan limit used by the standard chain.
pub const DEFAULT_MAX_LOANS: usize = 3;

/// Everything a rule may look at when judging a checkout.
#[derive(Debug, Clone, Copy)]
pub struct LendingContext<'a> {
    /// The book being requested.
    pub book: &'a Book,
    /// The member requesting it.
    pub member: &'a Member,
    /// All active loans in the library.
    pub active_loans: &'a [Loan],
    /// The date the checkout would happen.
    pub current_date: DateTime<Utc>,
}

/// Verdict of a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule has no objection.
    Allowed,
    /// The rule forbids the checkout.
    Denied {
        /// Human-readable explanation.
        reason: String,
    },
}

impl RuleOutcome {
    fn denied(reason: impl Into<String>) -> Self {
        Self::Denied {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// A lending policy predicate.
pub trait LendingRule: Send + Sync {
    /// Stable identifier reported in `LendingError::RuleViolation`.
    fn name(&self) -> &'static str;

    /// Judges the checkout described by `context`.
    fn check(&self, context: &LendingContext<'_>) -> RuleOutcome;
}

/// Denies checkout of a book that is already lent out.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookAvailableRule;

impl LendingRule for BookAvailableRule {
    fn name(&self) -> &'static str {
        "book_available"
    }

    fn check(&self, context: &LendingContext<'_>) -> RuleOutcome {
        if context.book.is_available() {
            RuleOutcome::Allowed
        } else {
            RuleOutcome::denied(format!("{} is currently checked out", context.book))
        }
    }
}

/// Denies checkout once a member holds `limit` books.
#[derive(Debug, Clone, Copy)]
pub struct MaxLoansRule {
    limit: usize,
}

impl MaxLoansRule {
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    #[must_use]
    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl LendingRule for MaxLoansRule {
    fn name(&self) -> &'static str {
        "max_loans"
    }

    fn check(&self, context: &LendingContext<'_>) -> RuleOutcome {
        if context.member.borrowed_count() < self.limit {
            RuleOutcome::Allowed
        } else {
            RuleOutcome::denied(format!("loan limit of {} reached", self.limit))
        }
    }
}

/// Denies checkout while any of the member's loans is overdue.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOverdueRule;

impl LendingRule for NoOverdueRule {
    fn name(&self) -> &'static str {
        "no_overdue"
    }

    fn check(&self, context: &LendingContext<'_>) -> RuleOutcome {
        let member_id = context.member.id();
        let has_overdue = context
            .active_loans
            .iter()
            .any(|loan| loan.belongs_to(member_id) && loan.is_overdue(context.current_date));
        if has_overdue {
            RuleOutcome::denied("member has overdue loans")
        } else {
            RuleOutcome::Allowed
        }
    }
}

/// Ordered list of lending rules.
pub struct RuleChain {
    rules: Vec<Box<dyn LendingRule>>,
}

impl RuleChain {
    /// Creates a chain evaluating `rules` in the given order.
    #[must_use]
    pub fn new(rules: Vec<Box<dyn LendingRule>>) -> Self {
        Self { rules }
    }

    /// Book available, then at most `max_loans` loans, then nothing overdue.
    #[must_use]
    pub fn standard(max_loans: usize) -> Self {
        Self::new(vec![
            Box::new(BookAvailableRule),
            Box::new(MaxLoansRule::new(max_loans)),
            Box::new(NoOverdueRule),
        ])
    }

    /// Names of the rules, in evaluation order.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Runs every rule in order, stopping at the first denial.
    ///
    /// # Errors
    ///
    /// Returns `LendingError::RuleViolation` carrying the first failing rule's
    /// name and reason.
    pub fn evaluate(&self, context: &LendingContext<'_>) -> Result<(), LendingError> {
        self.rules.iter().try_for_each(|rule| match rule.check(context) {
            RuleOutcome::Allowed => Ok(()),
            RuleOutcome::Denied { reason } => {
                tracing::debug!(rule = rule.name(), %reason, "lending rule denied checkout");
                Err(LendingError::RuleViolation {
                    rule: rule.name(),
                    reason,
                })
            }
        })
    }
}

impl Default for RuleChain {
    fn default() -> Self {
        Self::standard(DEFAULT_MAX_LOANS)
    }
}

impl fmt::Debug for RuleChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.rule_names()).finish()
    }
}
