use crate::{
    models::{NavEntry, Role},
    routes::registry::{Route, RouteRegistry},
};

/// Resolution
///
/// The outcome of one navigation attempt. All four outcomes are ordinary
/// values: the filter never panics and never returns an error type, because
/// a denied or unknown route is a normal state of the portal, not a fault.
///
/// - `Allowed` carries the matched route, whose view the shell renders.
/// - `Denied`: authenticated, but the active role is not granted. Recoverable
///   by switching role or navigating elsewhere.
/// - `NotFound`: the path matches nothing in the registry. Terminal.
/// - `NoSession`: nobody is signed in; the shell shows the login gate.
pub enum Resolution<'a> {
    Allowed(&'a Route),
    Denied,
    NotFound,
    NoSession,
}

impl<'a> Resolution<'a> {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Resolution::Allowed(_))
    }

    /// The matched route, when access was granted.
    pub fn route(&self) -> Option<&'a Route> {
        match self {
            Resolution::Allowed(route) => Some(route),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Resolution<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resolution::Allowed(route) => write!(f, "Allowed({})", route.path),
            Resolution::Denied => write!(f, "Denied"),
            Resolution::NotFound => write!(f, "NotFound"),
            Resolution::NoSession => write!(f, "NoSession"),
        }
    }
}

/// The one place the empty-access-list policy is decided: an empty list
/// means "open to any authenticated session". Earlier portal revisions
/// flip-flopped between that reading and owner-only-by-omission; pinning the
/// policy here applies it uniformly to every such route.
fn role_may_access(route: &Route, role: Role) -> bool {
    route.grants.is_empty() || route.grants_cover(role)
}

/// resolve
///
/// The access decision for one navigation attempt: a pure, synchronous
/// function of the registry, the current role, and the target path. Nothing
/// is cached between calls: the role can change mid-session via `set_role`,
/// and the very next resolution must reflect it.
///
/// Decision order: no session wins over everything (the whole shell sits
/// behind the login gate, so even unknown paths resolve to `NoSession` when
/// signed out); then unknown paths; then the route's access list.
pub fn resolve<'a>(registry: &'a RouteRegistry, role: Option<Role>, path: &str) -> Resolution<'a> {
    let Some(role) = role else {
        return Resolution::NoSession;
    };

    let Some(route) = registry.find(path) else {
        tracing::debug!(path, "no registry match");
        return Resolution::NotFound;
    };

    if role_may_access(route, role) {
        Resolution::Allowed(route)
    } else {
        tracing::debug!(path = %route.path, role = %role, "access denied");
        Resolution::Denied
    }
}

/// navigable_routes
///
/// The navigation menu for a role: exactly the labeled routes the role may
/// access, in registry order. Unlabeled routes are never listed, for any
/// role; they stay reachable by typed path only. Labeled-but-denied routes
/// are omitted entirely rather than shown greyed out.
pub fn navigable_routes(registry: &RouteRegistry, role: Role) -> Vec<NavEntry> {
    registry
        .iter()
        .filter(|route| route.label.is_some() && role_may_access(route, role))
        .map(|route| NavEntry {
            path: route.path.clone(),
            label: route.label.clone().unwrap_or_default(),
            icon: route.icon.clone(),
        })
        .collect()
}

/// resolve_root
///
/// Where `/` lands: the first labeled route in registry order that the
/// current role may access. Restricting the scan to labeled routes keeps the
/// unlisted utility routes from becoming anyone's landing page. With no
/// session there is nothing to land on; with a session but no accessible
/// labeled route, the root is `NotFound`.
pub fn resolve_root<'a>(registry: &'a RouteRegistry, role: Option<Role>) -> Resolution<'a> {
    let Some(role) = role else {
        return Resolution::NoSession;
    };

    registry
        .iter()
        .find(|route| route.label.is_some() && role_may_access(route, role))
        .map(Resolution::Allowed)
        .unwrap_or(Resolution::NotFound)
}
