//! Notification transport that writes checkout messages to the trace log.

use libris_lending::application::ports::{NotificationError, Notifier};
use libris_lending::domain::member::Member;

/// Delivers member notifications as structured `info` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn send(&self, member: &Member, message: &str) -> Result<(), NotificationError> {
        tracing::info!(member_id = member.id(), member_name = member.name(), text = message, "member notified");
        Ok(())
    }
}
