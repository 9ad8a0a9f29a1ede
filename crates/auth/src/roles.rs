use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Role identifier used for RBAC ("admin", "dispatcher", ...).
///
/// Roles are opaque strings at this layer; mapping roles to permissions is
/// done by the caller's policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

/// Full access.
pub const ADMIN: Role = Role(Cow::Borrowed("admin"));
/// Maintains the fleet: manufacturers, cars and the driver roster.
pub const DISPATCHER: Role = Role(Cow::Borrowed("dispatcher"));
/// A driver with no management rights.
pub const DRIVER: Role = Role(Cow::Borrowed("driver"));

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is(&self, other: &Role) -> bool {
        self.as_str() == other.as_str()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
