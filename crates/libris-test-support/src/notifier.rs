//! Test notifiers — fake `Notifier` implementations for tests.

use std::sync::{Arc, Mutex};

use libris_lending::application::ports::{NotificationError, Notifier};
use libris_lending::domain::member::Member;

/// A notifier that records every message it is asked to send. Clones share
/// the same record, so a test can keep one clone and hand the other to the
/// library.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of `(member_id, message)` pairs sent so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn send(&self, member: &Member, message: &str) -> Result<(), NotificationError> {
        self.sent
            .lock()
            .unwrap()
            .push((member.id().to_owned(), message.to_owned()));
        Ok(())
    }
}

/// A notifier whose transport is always down.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingNotifier;

impl Notifier for FailingNotifier {
    fn send(&self, member: &Member, _message: &str) -> Result<(), NotificationError> {
        Err(NotificationError::new(member.id(), "connection refused"))
    }
}

/// A notifier that panics on every send.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanickingNotifier;

impl Notifier for PanickingNotifier {
    fn send(&self, _member: &Member, _message: &str) -> Result<(), NotificationError> {
        panic!("notifier exploded");
    }
}
