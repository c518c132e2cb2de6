//! Libris Core — shared abstractions for the lending engine.
//!
//! This crate defines the error taxonomy, the clock, and the storage
//! contract that the lending context depends on. It contains no
//! infrastructure code.

pub mod clock;
pub mod error;
pub mod repository;
