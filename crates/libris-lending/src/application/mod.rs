//! Orchestration, ports, and read models.

pub mod library;
pub mod ports;
pub mod query_handlers;
