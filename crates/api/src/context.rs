use taxi_auth::{PrincipalId, Role};
use taxi_core::DriverId;

/// Principal context for a request (authenticated identity + roles).
///
/// Inserted by the auth middleware; present on every protected route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    roles: Vec<Role>,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>) -> Self {
        Self { principal_id, roles }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    /// The driver this principal acts as.
    pub fn driver_id(&self) -> DriverId {
        self.principal_id.driver_id()
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }
}
