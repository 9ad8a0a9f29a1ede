//! API-side authorization guard for writes.
//!
//! This enforces authorization at the HTTP boundary (before the registry is
//! touched), keeping the fleet domain and the stores auth-agnostic.

use taxi_auth::{
    AuthzError, CommandAuthorization, Permission, Principal, Role, authorize, permissions, roles,
};

use crate::context::PrincipalContext;

/// Check authorization for a write in the current request context.
pub fn authorize_command<C: CommandAuthorization>(
    principal: &PrincipalContext,
    command: &C,
) -> Result<(), AuthzError> {
    let principal = Principal {
        principal_id: principal.principal_id(),
        roles: principal.roles().to_vec(),
        permissions: permissions_from_roles(principal.roles()),
    };

    for perm in command.required_permissions() {
        authorize(&principal, perm)?;
    }

    Ok(())
}

/// Static role→permission policy.
///
/// Every authenticated principal may toggle its own car assignments.
pub fn permissions_from_roles(assigned: &[Role]) -> Vec<Permission> {
    if assigned.iter().any(|r| r.is(&roles::ADMIN)) {
        return vec![permissions::WILDCARD];
    }

    let mut granted = vec![permissions::CARS_ASSIGN];
    if assigned.iter().any(|r| r.is(&roles::DISPATCHER)) {
        granted.extend([
            permissions::MANUFACTURERS_WRITE,
            permissions::CARS_WRITE,
            permissions::DRIVERS_WRITE,
        ]);
    }
    granted
}
