use std::sync::Arc;

use collab3pl_access::notify::{NoticeKind, RecordingNotifier};
use collab3pl_access::storage::{KeyValueStore, MemoryStore};
use collab3pl_access::{AppConfig, Identity, Role, SessionProvider};

/// The key the provider persists under, derived the same way it derives it.
fn session_key() -> String {
    AppConfig::default().session_key()
}

fn provider_over(store: Arc<MemoryStore>) -> SessionProvider {
    SessionProvider::new(store, Arc::new(RecordingNotifier::new()), &AppConfig::default())
}

// --- Lifecycle ---

#[test]
fn test_starts_signed_out_on_empty_storage() {
    let provider = provider_over(Arc::new(MemoryStore::new()));
    assert_eq!(provider.current(), None);
}

#[test]
fn test_sign_in_establishes_the_session() {
    let provider = provider_over(Arc::new(MemoryStore::new()));
    let alice = Identity::new("Alice", Role::Admin);

    provider.sign_in(alice.clone());

    assert_eq!(provider.current(), Some(alice));
}

#[test]
fn test_session_survives_reload() {
    let store = Arc::new(MemoryStore::new());
    let alice = Identity::new("Alice", Role::Ops);

    provider_over(store.clone()).sign_in(alice.clone());

    // A fresh provider over the same store is the page-reload case: it must
    // hydrate the identity, id and all, from the persisted record.
    let reloaded = provider_over(store);
    assert_eq!(reloaded.current(), Some(alice));
}

#[test]
fn test_sign_out_clears_memory_and_storage() {
    let store = Arc::new(MemoryStore::new());
    let provider = provider_over(store.clone());

    provider.sign_in(Identity::new("Alice", Role::Admin));
    provider.sign_out();

    assert_eq!(provider.current(), None);
    assert_eq!(store.get(&session_key()), None);

    // And the reload case agrees.
    assert_eq!(provider_over(store).current(), None);
}

// --- Role Switching ---

#[test]
fn test_set_role_replaces_only_the_role() {
    let provider = provider_over(Arc::new(MemoryStore::new()));
    let alice = Identity::new("Alice", Role::Cs);
    provider.sign_in(alice.clone());

    provider.set_role(Role::Ops);

    let current = provider.current().unwrap();
    assert_eq!(current.role, Role::Ops);
    assert_eq!(current.id, alice.id);
    assert_eq!(current.name, "Alice");
}

#[test]
fn test_set_role_is_persisted() {
    let store = Arc::new(MemoryStore::new());
    let provider = provider_over(store.clone());

    provider.sign_in(Identity::new("Alice", Role::Cs));
    provider.set_role(Role::WarehouseManager);

    let reloaded = provider_over(store);
    assert_eq!(reloaded.current().unwrap().role, Role::WarehouseManager);
}

#[test]
fn test_set_role_is_a_noop_when_signed_out() {
    let store = Arc::new(MemoryStore::new());
    let provider = provider_over(store.clone());

    provider.set_role(Role::Admin);

    assert_eq!(provider.current(), None);
    assert_eq!(store.get(&session_key()), None);
}

// --- Fail-Safe Behavior ---

#[test]
fn test_corrupt_persisted_record_is_treated_as_signed_out() {
    let store = Arc::new(MemoryStore::new());
    store.set(&session_key(), "{definitely not json").unwrap();

    let provider = provider_over(store);
    assert_eq!(provider.current(), None);
}

#[test]
fn test_wrong_shape_record_is_treated_as_signed_out() {
    let store = Arc::new(MemoryStore::new());
    store
        .set(&session_key(), r#"{"role":"Sudo","label":"nope"}"#)
        .unwrap();

    let provider = provider_over(store);
    assert_eq!(provider.current(), None);
}

#[test]
fn test_failing_storage_degrades_persistence_not_the_session() {
    let provider = provider_over(Arc::new(MemoryStore::new_failing()));
    let alice = Identity::new("Alice", Role::Admin);

    // The write fails behind the scenes; the live session must still work.
    provider.sign_in(alice.clone());
    assert_eq!(provider.current(), Some(alice));
}

// --- Write-Through Semantics ---

#[test]
fn test_writes_are_visible_to_a_concurrent_storage_reader() {
    let store = Arc::new(MemoryStore::new());
    let provider = provider_over(store.clone());
    let alice = Identity::new("Alice", Role::Finance);

    provider.sign_in(alice.clone());

    // Reading the raw store directly (what a second tab would do on its own
    // load) observes the new value immediately.
    let raw = store.get(&session_key()).unwrap();
    let persisted: Identity = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, alice);
}

#[test]
fn test_second_provider_keeps_its_stale_copy_until_it_rereads() {
    // Accepted limitation: there is no cross-instance change notification.
    let store = Arc::new(MemoryStore::new());
    let first = provider_over(store.clone());
    first.sign_in(Identity::new("Alice", Role::Cs));

    let second = provider_over(store.clone());
    first.set_role(Role::Ops);

    // Storage has the new role; the second instance still shows the role it
    // hydrated at construction time.
    let raw: Identity = serde_json::from_str(&store.get(&session_key()).unwrap()).unwrap();
    assert_eq!(raw.role, Role::Ops);
    assert_eq!(second.current().unwrap().role, Role::Cs);
}

// --- Notices ---

#[test]
fn test_sign_in_and_out_confirm_to_the_user() {
    let notifier = Arc::new(RecordingNotifier::new());
    let provider = SessionProvider::new(
        Arc::new(MemoryStore::new()),
        notifier.clone(),
        &AppConfig::default(),
    );

    provider.sign_in(Identity::new("Alice", Role::Admin));
    provider.sign_out();

    let notices = notifier.notices();
    assert_eq!(notices.len(), 2);
    assert_eq!(notices[0], ("Signed in as Alice (Admin)".to_string(), NoticeKind::Success));
    assert_eq!(notices[1], ("Signed out".to_string(), NoticeKind::Success));
}

#[test]
fn test_signing_out_while_signed_out_is_silent() {
    let notifier = Arc::new(RecordingNotifier::new());
    let provider = SessionProvider::new(
        Arc::new(MemoryStore::new()),
        notifier.clone(),
        &AppConfig::default(),
    );

    provider.sign_out();

    assert!(notifier.notices().is_empty());
}
