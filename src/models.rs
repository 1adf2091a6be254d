use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

// --- Core Access-Control Schemas ---

/// Role
///
/// The closed set of roles known to the portal. A route's access list and the
/// signed-in identity both speak in terms of this enum, so an out-of-vocabulary
/// role value (the historical `'Manager'` typo in the clients rows) is a
/// compile-time error rather than a silently dead grant.
///
/// Roles are flat identifiers: there is no hierarchy or inheritance. The only
/// grouping the portal recognizes is internal vs. external staff, exposed via
/// [`Role::is_internal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Role {
    Admin,
    Finance,
    Ops,
    /// Customer Service. Serialized as "CS" for parity with the stored
    /// session records written by earlier portal versions.
    #[serde(rename = "CS")]
    Cs,
    AccountManager,
    WarehouseManager,
    WarehouseStaff,
    // External parties. Never covered by the AllInternal wildcard.
    Vendor,
    Investor,
}

impl Role {
    /// Every role, in the order the sign-in screen offers them.
    pub const ALL: [Role; 9] = [
        Role::Admin,
        Role::Finance,
        Role::Ops,
        Role::Cs,
        Role::AccountManager,
        Role::WarehouseManager,
        Role::WarehouseStaff,
        Role::Vendor,
        Role::Investor,
    ];

    /// is_internal
    ///
    /// Whether the role belongs to internal staff. `Vendor` and `Investor`
    /// are external parties; everything else is in-house.
    pub fn is_internal(&self) -> bool {
        !matches!(self, Role::Vendor | Role::Investor)
    }

    /// The wire/display name of the role (matches the serialized form).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Finance => "Finance",
            Role::Ops => "Ops",
            Role::Cs => "CS",
            Role::AccountManager => "AccountManager",
            Role::WarehouseManager => "WarehouseManager",
            Role::WarehouseStaff => "WarehouseStaff",
            Role::Vendor => "Vendor",
            Role::Investor => "Investor",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grant
///
/// A single entry in a route's access list. Routes either name concrete roles
/// or opt into the `AllInternal` wildcard, which covers every internal staff
/// role in one entry. The wildcard deliberately does not extend to `Vendor`
/// or `Investor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grant {
    Role(Role),
    AllInternal,
}

impl Grant {
    /// covers
    ///
    /// Whether this grant admits the given role.
    pub fn covers(&self, role: Role) -> bool {
        match self {
            Grant::Role(granted) => *granted == role,
            Grant::AllInternal => role.is_internal(),
        }
    }
}

impl From<Role> for Grant {
    fn from(role: Role) -> Self {
        Grant::Role(role)
    }
}

/// Identity
///
/// The signed-in user for one browser-profile-equivalent session. This is the
/// exact record the session provider persists (as JSON, under the namespaced
/// `authUser` key), so it carries only what survives a reload: id, display
/// name, and the currently active role.
///
/// The `role` field is mutable in place via the provider's `set_role`; a user
/// holds exactly one active role at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Identity {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl Identity {
    /// new
    ///
    /// Convenience constructor used by the sign-in flow: mints a fresh id the
    /// way the original gate did (a random UUID per session).
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            role,
        }
    }
}

/// NavEntry
///
/// One visible navigation item, as handed to the sidebar/menu layer. This is
/// the projection of a registry route that the UI is allowed to see: path,
/// label, and the optional decorative icon. Routes without a label never
/// produce a `NavEntry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NavEntry {
    pub path: String,
    pub label: String,
    pub icon: Option<String>,
}
