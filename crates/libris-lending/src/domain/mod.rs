//! Entities, value types, and lending policy.

pub mod book;
pub mod fine;
pub mod loan;
pub mod member;
pub mod rules;
