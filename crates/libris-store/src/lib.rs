//! Libris Store — storage backends for catalog and membership.

pub mod in_memory;

pub use in_memory::InMemoryRepository;
