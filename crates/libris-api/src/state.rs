//! Shared application state.

use std::fmt;
use std::sync::{Arc, Mutex};

use libris_core::clock::Clock;
use libris_core::error::LendingError;
use libris_lending::application::library::Library;

/// Application state shared across all request handlers.
///
/// The library sits behind a single mutex, so every request touching it runs
/// as one critical section and lending transactions never interleave.
#[derive(Clone)]
pub struct AppState {
    /// Source of "now" when a request omits its date.
    pub clock: Arc<dyn Clock + Send + Sync>,
    /// The lending engine.
    pub library: Arc<Mutex<Library>>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock + Send + Sync>, library: Library) -> Self {
        Self {
            clock,
            library: Arc::new(Mutex::new(library)),
        }
    }

    /// Runs `f` with exclusive access to the library.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or `LendingError::Infrastructure` if a
    /// previous holder of the lock panicked.
    pub fn with_library<T>(
        &self,
        f: impl FnOnce(&mut Library) -> Result<T, LendingError>,
    ) -> Result<T, LendingError> {
        let mut library = self
            .library
            .lock()
            .map_err(|_| LendingError::Infrastructure("library lock poisoned".to_owned()))?;
        f(&mut library)
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("library", &self.library)
            .finish_non_exhaustive()
    }
}
