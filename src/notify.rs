use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// NoticeKind
///
/// The two flavors of user-facing confirmation the portal emits. Serialized
/// lowercase ("success"/"error") to match what the toast layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Notifier
///
/// Fire-and-forget notification sink. The access core pushes short
/// confirmations through this after identity-affecting operations (sign-in,
/// sign-out); how they are surfaced—toast, status bar, log line—is entirely
/// the implementation's business. Nothing in the access-control contract
/// depends on a notice being delivered.
pub trait Notifier: Send + Sync {
    fn push(&self, text: &str, kind: NoticeKind);
}

/// NotifierState
///
/// The concrete type used to share the notification sink across the
/// application state.
pub type NotifierState = Arc<dyn Notifier>;

/// TracingNotifier
///
/// Default sink for headless shells: notices become structured log events.
#[derive(Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn push(&self, text: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => tracing::info!(notice = %text, "notice"),
            NoticeKind::Error => tracing::error!(notice = %text, "notice"),
        }
    }
}

/// RecordingNotifier
///
/// Test sink that records every pushed notice so assertions can inspect what
/// the user would have seen.
#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(String, NoticeKind)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// A snapshot of everything pushed so far, in order.
    pub fn notices(&self) -> Vec<(String, NoticeKind)> {
        self.notices.lock().expect("notice lock poisoned").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn push(&self, text: &str, kind: NoticeKind) {
        self.notices
            .lock()
            .expect("notice lock poisoned")
            .push((text.to_string(), kind));
    }
}
