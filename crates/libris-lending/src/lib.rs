//! Libris — Lending bounded context.
//!
//! Tracks which books are checked out, enforces borrowing policy through an
//! ordered rule chain, computes overdue fines, and notifies members on
//! successful checkout.

pub mod application;
pub mod domain;
