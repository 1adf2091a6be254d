use std::sync::Arc;

// --- Module Structure ---

// Core application services and components.
pub mod config;
pub mod filter;
pub mod models;
pub mod notify;
pub mod session;
pub mod storage;
pub mod views;

// Module for the route registry (the single navigation source of truth).
pub mod routes;

// --- Public Re-exports ---

// Makes the core types easily accessible to the embedding shell.
pub use config::{AppConfig, Env};
pub use filter::{Resolution, navigable_routes, resolve, resolve_root};
pub use models::{Grant, Identity, NavEntry, Role};
pub use notify::{NoticeKind, Notifier, NotifierState, RecordingNotifier, TracingNotifier};
pub use routes::{RegistryError, Route, RouteRegistry, collab3pl_routes};
pub use session::{SessionProvider, SessionState};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError, StorageState};
pub use views::{LoginView, NotAuthorizedView, NotFoundView, View, ViewRef};

/// AppState
///
/// The single, thread-safe, immutable container holding the access core's
/// services: the sealed route registry, the session provider, the
/// notification sink, and the loaded configuration. The embedding shell
/// constructs one of these at startup and drives every navigation and
/// identity operation through it.
///
/// All collaborators are injected: there is no hidden global session and no
/// ambient storage. Cloning is cheap; every component is shared.
#[derive(Clone)]
pub struct AppState {
    /// The validated, immutable route table.
    pub registry: Arc<RouteRegistry>,
    /// Session layer: current identity plus write-through persistence.
    pub session: SessionState,
    /// Notification sink for user-facing confirmations.
    pub notifier: NotifierState,
    /// Configuration: the loaded, immutable settings.
    pub config: AppConfig,
}

impl AppState {
    /// new
    ///
    /// Assembles the application state from an already-built registry and
    /// injected collaborators. The session provider hydrates itself from
    /// `storage` here, which is what makes a session survive a shell
    /// restart.
    pub fn new(
        registry: RouteRegistry,
        storage: StorageState,
        notifier: NotifierState,
        config: AppConfig,
    ) -> Self {
        let session = Arc::new(SessionProvider::new(storage, notifier.clone(), &config));
        Self {
            registry: Arc::new(registry),
            session,
            notifier,
            config,
        }
    }

    /// collab3pl
    ///
    /// Convenience assembly over the standard portal route table.
    pub fn collab3pl(storage: StorageState, notifier: NotifierState, config: AppConfig) -> Self {
        let registry = collab3pl_routes(&config);
        Self::new(registry, storage, notifier, config)
    }

    /// from_config
    ///
    /// Full assembly from configuration alone: the file-backed store when a
    /// session file is configured, the in-memory store otherwise, and log
    /// events as the notification sink. Shells with their own storage or
    /// toast layer use [`AppState::collab3pl`] and inject theirs instead.
    pub fn from_config(config: AppConfig) -> Self {
        let storage: StorageState = match &config.session_file {
            Some(path) => Arc::new(JsonFileStore::open(path.clone())),
            None => Arc::new(MemoryStore::new()),
        };
        Self::collab3pl(storage, Arc::new(TracingNotifier), config)
    }

    // --- Session Operations ---

    /// The signed-in identity, or `None` when signed out.
    pub fn current_session(&self) -> Option<Identity> {
        self.session.current()
    }

    pub fn sign_in(&self, identity: Identity) {
        self.session.sign_in(identity);
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    pub fn set_role(&self, role: Role) {
        self.session.set_role(role);
    }

    /// The active role, if any. Every access decision below is made against
    /// this value at call time; nothing is cached across calls.
    fn current_role(&self) -> Option<Role> {
        self.session.current().map(|identity| identity.role)
    }

    // --- Navigation Operations ---

    /// resolve
    ///
    /// The router-facing decision for a navigation attempt. `/` resolves to
    /// the role's landing route; everything else goes through the registry
    /// lookup.
    pub fn resolve(&self, path: &str) -> Resolution<'_> {
        if path == "/" {
            filter::resolve_root(&self.registry, self.current_role())
        } else {
            filter::resolve(&self.registry, self.current_role(), path)
        }
    }

    /// navigable_routes
    ///
    /// The menu entries for the current session, in registry order. Empty
    /// when signed out; there is no navigation to show on the login gate.
    pub fn navigable_routes(&self) -> Vec<NavEntry> {
        match self.current_role() {
            Some(role) => filter::navigable_routes(&self.registry, role),
            None => Vec::new(),
        }
    }

    /// home
    ///
    /// Where the root path lands for the current session.
    pub fn home(&self) -> Resolution<'_> {
        filter::resolve_root(&self.registry, self.current_role())
    }

    /// render
    ///
    /// Maps a navigation attempt all the way to rendered output, the way the
    /// app shell does: allowed routes render their own view, and each other
    /// outcome renders its terminal view in place (no redirects).
    pub fn render(&self, path: &str) -> String {
        match self.resolve(path) {
            Resolution::Allowed(route) => route.view.render(),
            Resolution::Denied => NotAuthorizedView.render(),
            Resolution::NotFound => NotFoundView.render(),
            Resolution::NoSession => LoginView.render(),
        }
    }
}
