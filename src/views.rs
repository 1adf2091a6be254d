use std::sync::Arc;

use chrono::Utc;

use crate::models::Role;

/// View
///
/// An opaque renderable unit. The registry maps each route to one of these,
/// and neither the registry nor the access filter ever inspects what is
/// behind the trait: rendering is entirely the view's business. The shell
/// renders whatever the resolution hands back.
pub trait View: Send + Sync {
    fn render(&self) -> String;
}

/// ViewRef
///
/// The concrete type routes hold. Views are shared, stateless renderers.
pub type ViewRef = Arc<dyn View>;

// --- Business Page Placeholder ---

/// PageView
///
/// Stand-in for a business screen (finance dashboard, inventory list, ...).
/// The registry shipped with placeholder components for screens that were
/// still under construction; this keeps that shape.
pub struct PageView {
    title: String,
}

impl PageView {
    pub fn new(title: impl Into<String>) -> ViewRef {
        Arc::new(Self {
            title: title.into(),
        })
    }
}

impl View for PageView {
    fn render(&self) -> String {
        format!("{} Placeholder", self.title)
    }
}

// --- Utility Routes ---

/// HealthzView
///
/// Diagnostic endpoint body: version, commit, and render timestamp as JSON.
/// Reachable by typed path for any signed-in user, never listed in
/// navigation.
pub struct HealthzView;

impl HealthzView {
    pub fn new() -> ViewRef {
        Arc::new(Self)
    }
}

impl View for HealthzView {
    fn render(&self) -> String {
        let body = serde_json::json!({
            "appVersion": env!("CARGO_PKG_VERSION"),
            "commit": option_env!("COMMIT_SHA").unwrap_or("dev"),
            "ts": Utc::now().to_rfc3339(),
        });
        serde_json::to_string_pretty(&body).unwrap_or_default()
    }
}

/// MetaView
///
/// Build/deployment metadata as JSON, the sibling diagnostic route to
/// healthz.
pub struct MetaView {
    namespace: String,
}

impl MetaView {
    pub fn new(namespace: impl Into<String>) -> ViewRef {
        Arc::new(Self {
            namespace: namespace.into(),
        })
    }
}

impl View for MetaView {
    fn render(&self) -> String {
        let body = serde_json::json!({
            "appVersion": env!("CARGO_PKG_VERSION"),
            "packageVersion": env!("CARGO_PKG_VERSION"),
            "namespace": self.namespace,
        });
        serde_json::to_string_pretty(&body).unwrap_or_default()
    }
}

// --- Terminal / Fallback Views ---

/// NotFoundView
///
/// Terminal state for any path absent from the registry. Not recoverable by
/// retry; the shell renders it in place.
pub struct NotFoundView;

impl View for NotFoundView {
    fn render(&self) -> String {
        "Not Found\nThe page you're looking for doesn't exist or you don't have access.".to_string()
    }
}

/// NotAuthorizedView
///
/// Rendered in place when a route resolves to Denied. The copy confirms only
/// that the current role lacks access; it must not echo the target path or
/// otherwise leak what exists there.
pub struct NotAuthorizedView;

impl View for NotAuthorizedView {
    fn render(&self) -> String {
        "Not Authorized\nYou don't have permission to view this page. Your current role doesn't allow access to this area.".to_string()
    }
}

/// LoginView
///
/// The sign-in gate shown whenever no session is active. Lists the roles the
/// portal offers so the shell can build its picker from the same closed set
/// the filter enforces.
pub struct LoginView;

impl View for LoginView {
    fn render(&self) -> String {
        let roles = Role::ALL
            .iter()
            .map(Role::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        format!("Collab3PL\nSign in to continue\nRoles: {}", roles)
    }
}
