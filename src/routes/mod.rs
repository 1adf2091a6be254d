/// Routes Module Index
///
/// Everything the portal can navigate to lives here, behind a single static
/// table. All navigation surfaces (sidebar, breadcrumbs, the root redirect)
/// are generated from this registry; role-based filtering is applied by the
/// access filter against the current session, never inside a view.
///
/// The registry is fixed at construction time. There is no mutation API:
/// adding a screen to the portal means adding a row to the table.

/// The route record, the validated registry container, and the Collab3PL
/// route table itself.
pub mod registry;

pub use registry::{RegistryError, Route, RouteRegistry, collab3pl_routes};
