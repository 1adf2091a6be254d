use std::collections::HashSet;

use thiserror::Error;

use crate::{
    config::AppConfig,
    models::{Grant, Role},
    views::{HealthzView, MetaView, PageView, ViewRef},
};

/// Route
///
/// A navigable location plus its metadata and access policy. Routes are
/// immutable once the registry is built.
///
/// A route without a `label` never appears in navigation but stays directly
/// reachable by typed path, the utility-route pattern (healthz, meta).
/// `parent` is display metadata for hierarchical menus and breadcrumbs; it is
/// not validated against existing paths and plays no part in access
/// decisions.
pub struct Route {
    /// Unique path pattern. Literal segments match exactly; `:name` segments
    /// match any single non-empty segment (`/clients/:id`).
    pub path: String,
    /// The opaque renderable unit behind this route.
    pub view: ViewRef,
    pub label: Option<String>,
    /// Decorative glyph for menus. Never interpreted.
    pub icon: Option<String>,
    pub parent: Option<String>,
    /// The access list. Empty means no route-specific restriction; the
    /// filter decides what that implies.
    pub grants: Vec<Grant>,
}

impl Route {
    /// new
    ///
    /// Starts a route with just a path and a view; metadata is layered on
    /// with the chained setters below, keeping table rows readable.
    pub fn new(path: impl Into<String>, view: ViewRef) -> Self {
        Self {
            path: path.into(),
            view,
            label: None,
            icon: None,
            parent: None,
            grants: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    pub fn grants(mut self, grants: impl IntoIterator<Item = Grant>) -> Self {
        self.grants = grants.into_iter().collect();
        self
    }

    /// Shorthand for the common case of granting plain roles.
    pub fn roles(self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.grants(roles.into_iter().map(Grant::Role))
    }

    /// grants_cover
    ///
    /// Whether any grant on this route admits `role`. An empty grant list
    /// covers nobody; the open-by-default policy for empty lists lives in
    /// the access filter, not here.
    pub fn grants_cover(&self, role: Role) -> bool {
        self.grants.iter().any(|g| g.covers(role))
    }

    /// matches
    ///
    /// Segment-wise match of a concrete path against this route's pattern.
    /// Both sides must have the same number of segments; `:name` pattern
    /// segments accept any non-empty concrete segment.
    pub fn matches(&self, path: &str) -> bool {
        let pattern = self.path.split('/');
        let concrete = path.split('/');
        if self.path.split('/').count() != path.split('/').count() {
            return false;
        }
        pattern.zip(concrete).all(|(p, c)| {
            if p.starts_with(':') {
                !c.is_empty()
            } else {
                p == c
            }
        })
    }

    /// Whether the pattern contains no `:name` segments.
    fn is_literal(&self) -> bool {
        !self.path.split('/').any(|s| s.starts_with(':'))
    }
}

/// RegistryError
///
/// Construction-time validation failures. The registry refuses to exist with
/// a defective table rather than shadowing routes silently at lookup time.
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    #[error("duplicate route path: {path}")]
    DuplicatePath { path: String },
}

/// RouteRegistry
///
/// An ordered, immutable sequence of routes, validated on construction.
/// Registry order is meaningful: it is the navigation order, the tiebreak
/// between parametric patterns, and the order the root redirect scans.
pub struct RouteRegistry {
    routes: Vec<Route>,
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRegistry")
            .field(
                "routes",
                &self.routes.iter().map(|r| &r.path).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl RouteRegistry {
    /// new
    ///
    /// Validates and seals the route table. Path patterns must be unique;
    /// a duplicate is rejected here instead of letting one row silently
    /// shadow the other forever.
    pub fn new(routes: Vec<Route>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.path.as_str()) {
                return Err(RegistryError::DuplicatePath {
                    path: route.path.clone(),
                });
            }
        }
        Ok(Self { routes })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// find
    ///
    /// Resolves a concrete path to a route. Literal patterns win over
    /// parametric ones (`/clients/new` is New Client, not Client Details
    /// with id "new"); among parametric candidates, registry order decides.
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes
            .iter()
            .find(|r| r.is_literal() && r.path == path)
            .or_else(|| self.routes.iter().find(|r| r.matches(path)))
    }
}

/// Trims a trailing slash so `/clients/` and `/clients` resolve identically.
/// The root path is left untouched.
fn normalize(path: &str) -> &str {
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

/// collab3pl_routes
///
/// Single source of truth for all routes in the portal. Business screens are
/// placeholder views; the access policy on each row is the real content.
///
/// `/healthz` and `/meta` are unlabeled utility routes: reachable by typed
/// path for any signed-in user, never offered in navigation.
pub fn collab3pl_routes(config: &AppConfig) -> RouteRegistry {
    use Role::*;

    let routes = vec![
        Route::new("/healthz", HealthzView::new()),
        Route::new("/meta", MetaView::new(config.namespace.clone())),
        Route::new("/finance", PageView::new("Finance Dashboard"))
            .label("Finance")
            .icon("💰")
            .roles([Admin, Finance]),
        Route::new("/products", PageView::new("Products"))
            .label("Products")
            .icon("📦")
            .roles([Admin, Finance, Ops, Cs]),
        Route::new("/leads", PageView::new("Leads"))
            .label("Leads")
            .icon("🧲")
            .roles([Admin, Finance, Ops, Cs, AccountManager]),
        Route::new("/clients", PageView::new("Clients"))
            .label("Clients")
            .roles([Admin, AccountManager]),
        Route::new("/clients/new", PageView::new("New Client"))
            .label("New Client")
            .parent("/clients")
            .roles([Admin, AccountManager]),
        Route::new("/clients/:id", PageView::new("Client Details"))
            .label("Client Details")
            .parent("/clients")
            .roles([Admin, AccountManager]),
        Route::new("/clients/:id/edit", PageView::new("Edit Client"))
            .label("Edit Client")
            .parent("/clients")
            .roles([Admin, AccountManager]),
        Route::new("/inventory", PageView::new("Inventory"))
            .label("Inventory")
            .icon("📦")
            .roles([Admin, Ops, WarehouseManager, WarehouseStaff]),
        Route::new("/inventory/new", PageView::new("New Inventory Item"))
            .label("New Inventory Item")
            .icon("➕")
            .parent("/inventory")
            .roles([Admin, Ops, WarehouseManager]),
        Route::new("/inventory/:id", PageView::new("Inventory Details"))
            .label("Inventory Details")
            .parent("/inventory")
            .roles([Admin, Ops, WarehouseManager, WarehouseStaff]),
        Route::new("/inventory/:id/edit", PageView::new("Edit Inventory Item"))
            .label("Edit Inventory Item")
            .parent("/inventory")
            .roles([Admin, Ops, WarehouseManager]),
        Route::new("/po", PageView::new("Inbound"))
            .label("Inbound")
            .icon("🧾")
            .roles([Admin, Finance, Ops]),
        Route::new("/po/new", PageView::new("New Inbound"))
            .label("New Inbound")
            .icon("➕")
            .parent("/po")
            .roles([Admin, Finance, Ops]),
        Route::new("/po/:id", PageView::new("Inbound Details"))
            .label("Inbound Details")
            .parent("/po")
            .roles([Admin, Finance, Ops]),
        Route::new("/po/:id/edit", PageView::new("Edit Inbound"))
            .label("Edit Inbound")
            .parent("/po")
            .roles([Admin, Finance, Ops]),
        Route::new("/shipments", PageView::new("Shipments"))
            .label("Shipments")
            .icon("🚚")
            .roles([Admin, Ops, WarehouseManager, WarehouseStaff, Cs]),
        Route::new("/shipments/new", PageView::new("New Shipment"))
            .label("New Shipment")
            .icon("➕")
            .parent("/shipments")
            .roles([Admin, Ops, WarehouseManager]),
        Route::new("/shipments/:id", PageView::new("Shipment Details"))
            .label("Shipment Details")
            .parent("/shipments")
            .roles([Admin, Ops, WarehouseManager, WarehouseStaff, Cs]),
        Route::new("/shipments/:id/edit", PageView::new("Edit Shipment"))
            .label("Edit Shipment")
            .parent("/shipments")
            .roles([Admin, Ops, WarehouseManager]),
    ];

    // The table above is static; a duplicate here is a programming error
    // caught the first time anything touches the registry.
    RouteRegistry::new(routes).expect("portal route table contains a duplicate path")
}
