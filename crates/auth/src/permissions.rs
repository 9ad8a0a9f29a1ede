use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Permission identifier.
///
/// Permissions are opaque strings (e.g. "cars.write"). The wildcard `"*"`
/// grants everything.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(Cow<'static, str>);

/// Create, update and delete manufacturers.
pub const MANUFACTURERS_WRITE: Permission = Permission(Cow::Borrowed("manufacturers.write"));
/// Create, update and delete cars.
pub const CARS_WRITE: Permission = Permission(Cow::Borrowed("cars.write"));
/// Assign yourself to a car or leave it.
pub const CARS_ASSIGN: Permission = Permission(Cow::Borrowed("cars.assign"));
/// Register drivers, update licenses, delete drivers.
pub const DRIVERS_WRITE: Permission = Permission(Cow::Borrowed("drivers.write"));
pub const WILDCARD: Permission = Permission(Cow::Borrowed("*"));

impl Permission {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_wildcard(&self) -> bool {
        self.as_str() == "*"
    }
}

impl core::fmt::Display for Permission {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
