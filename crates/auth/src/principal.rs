use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use taxi_core::DriverId;

/// Identity of an authenticated principal.
///
/// Every principal of the fleet service is a driver, so a principal id and a
/// driver id share the same UUID.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The driver this principal acts as.
    pub fn driver_id(&self) -> DriverId {
        DriverId::from_uuid(self.0)
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<DriverId> for PrincipalId {
    fn from(value: DriverId) -> Self {
        Self(*value.as_uuid())
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}
