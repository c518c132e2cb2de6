//! Libris — HTTP front-end for the lending engine.

pub mod config;
pub mod error;
pub mod notifier;
pub mod routes;
pub mod seed;
pub mod state;

use libris_lending::application::library::Library;
use libris_lending::domain::book::Book;
use libris_lending::domain::member::Member;
use libris_lending::domain::rules::RuleChain;
use libris_store::InMemoryRepository;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::notifier::TracingNotifier;
use crate::seed::SeedFile;

/// Builds the lending engine described by `config`: in-memory stores, the
/// standard rule chain with the configured loan limit, log-based
/// notifications, and the optional seed data.
///
/// # Errors
///
/// Returns `AppError` if the seed file cannot be read, parsed, or applied.
pub fn build_library(config: &AppConfig) -> Result<Library, AppError> {
    let mut library = Library::new(
        InMemoryRepository::<Book>::new(),
        InMemoryRepository::<Member>::new(),
    )
    .with_rules(RuleChain::standard(config.max_loans))
    .with_notifier(TracingNotifier);

    if let Some(path) = &config.seed_file {
        let (books, members) = SeedFile::load(path)?.apply(&mut library)?;
        tracing::info!(path = %path.display(), books, members, "seeded library");
    }

    Ok(library)
}
