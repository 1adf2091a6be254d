use std::sync::{Arc, RwLock};

use crate::{
    config::AppConfig,
    models::{Identity, Role},
    notify::{NoticeKind, NotifierState},
    storage::StorageState,
};

/// SessionProvider
///
/// Owns the current authenticated identity for the lifetime of the
/// application session and keeps it write-through persisted under the
/// namespaced `authUser` key, so the session survives a reload of the shell.
///
/// Every mutating operation persists to storage *before* updating the
/// in-memory copy: a concurrent reader of the same store (a second tab, in
/// browser terms) observes the new value immediately, even though it keeps
/// its own stale in-memory copy until it re-reads storage. There is no
/// cross-instance change notification; that limitation is accepted, not
/// worked around here.
///
/// This provider performs no credential verification. Establishing a session
/// is an ordinary operation fed by whatever gate the shell puts in front of
/// it.
pub struct SessionProvider {
    storage: StorageState,
    notifier: NotifierState,
    /// Fully namespaced storage key for the persisted identity record.
    key: String,
    current: RwLock<Option<Identity>>,
}

/// SessionState
///
/// The concrete type used to share the session provider across the
/// application state.
pub type SessionState = Arc<SessionProvider>;

impl SessionProvider {
    /// new
    ///
    /// Constructs the provider and hydrates the in-memory session from
    /// storage. Malformed or unreadable persisted data is treated as
    /// signed-out: the resolution path must never crash over a bad record,
    /// it fails safe to the login gate.
    pub fn new(storage: StorageState, notifier: NotifierState, config: &AppConfig) -> Self {
        let key = config.session_key();

        let current = match storage.get(&key) {
            Some(raw) => match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    tracing::warn!("discarding malformed persisted session: {}", e);
                    None
                }
            },
            None => None,
        };

        Self {
            storage,
            notifier,
            key,
            current: RwLock::new(current),
        }
    }

    /// current
    ///
    /// The signed-in identity, or `None` when signed out.
    pub fn current(&self) -> Option<Identity> {
        self.current.read().expect("session lock poisoned").clone()
    }

    /// sign_in
    ///
    /// Establishes a session for `identity` and confirms it to the user.
    /// Replaces any existing session.
    pub fn sign_in(&self, identity: Identity) {
        // 1. Write-through persistence, ahead of the in-memory update.
        self.persist(&identity);

        // 2. In-memory state update.
        *self.current.write().expect("session lock poisoned") = Some(identity.clone());

        tracing::info!(user = %identity.name, role = %identity.role, "signed in");
        self.notifier.push(
            &format!("Signed in as {} ({})", identity.name, identity.role),
            NoticeKind::Success,
        );
    }

    /// sign_out
    ///
    /// Clears the session and its persisted record. Subsequent access-control
    /// decisions treat the session as absent. Signing out while already
    /// signed out is a no-op.
    pub fn sign_out(&self) {
        let mut current = self.current.write().expect("session lock poisoned");
        if current.is_none() {
            return;
        }

        self.storage.remove(&self.key);
        *current = None;
        drop(current);

        tracing::info!("signed out");
        self.notifier.push("Signed out", NoticeKind::Success);
    }

    /// set_role
    ///
    /// Replaces the role on the active session without re-authentication.
    /// The portal models role-switching as a first-class operation: a
    /// multi-role user picks the role they are acting under, and the very
    /// next access decision reflects it. Silent no-op when signed out.
    pub fn set_role(&self, role: Role) {
        let mut current = self.current.write().expect("session lock poisoned");
        let Some(identity) = current.as_ref() else {
            return;
        };

        let updated = Identity {
            role,
            ..identity.clone()
        };

        // Storage first, then memory, same as sign_in.
        self.persist(&updated);
        *current = Some(updated);

        tracing::debug!(role = %role, "active role changed");
    }

    /// Serializes and writes the identity record. A write failure degrades
    /// persistence (the session will not survive a reload) but never the
    /// live session itself, so it is logged and swallowed.
    fn persist(&self, identity: &Identity) {
        match serde_json::to_string(identity) {
            Ok(raw) => {
                if let Err(e) = self.storage.set(&self.key, &raw) {
                    tracing::error!("failed to persist session: {}", e);
                }
            }
            Err(e) => tracing::error!("failed to encode session record: {}", e),
        }
    }
}
