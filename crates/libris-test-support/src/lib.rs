//! Shared test fakes and fixtures for the Libris lending engine.

mod clock;
mod fixtures;
mod notifier;
mod repository;

pub use clock::FixedClock;
pub use fixtures::{date, fixture_library, sample_books, sample_members};
pub use notifier::{FailingNotifier, PanickingNotifier, RecordingNotifier};
pub use repository::FailingRepository;
