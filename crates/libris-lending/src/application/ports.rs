//! Outbound ports used by the library orchestrator.

use thiserror::Error;

use crate::domain::member::Member;

/// Failure reported by a notification transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("notification to {recipient} failed: {message}")]
pub struct NotificationError {
    /// Id of the member who should have been notified.
    pub recipient: String,
    /// Transport-specific description.
    pub message: String,
}

impl NotificationError {
    #[must_use]
    pub fn new(recipient: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            recipient: recipient.into(),
            message: message.into(),
        }
    }
}

/// Delivers messages to members (mail, SMS, logs...).
///
/// The library treats delivery as best effort: errors are logged and dropped,
/// and never undo the transaction that triggered them.
pub trait Notifier: Send + Sync {
    /// Sends `message` to `member`.
    ///
    /// # Errors
    ///
    /// Returns `NotificationError` if the transport could not deliver.
    fn send(&self, member: &Member, message: &str) -> Result<(), NotificationError>;
}
