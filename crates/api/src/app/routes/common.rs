use axum::http::StatusCode;
use axum::response::Response;

use taxi_auth::{CommandAuthorization, Permission};

use crate::app::errors;
use crate::context::PrincipalContext;

/// Small helper wrapper to associate required permissions with a write.
pub struct CmdAuth<C> {
    pub inner: C,
    pub required: Vec<Permission>,
}

impl<C> CommandAuthorization for CmdAuth<C> {
    fn required_permissions(&self) -> &[Permission] {
        &self.required
    }
}

/// Authorize `inner` for `permission`, answering `403` when the principal
/// lacks it.
pub fn authorized<C>(
    principal: &PrincipalContext,
    inner: C,
    permission: Permission,
) -> Result<C, Response> {
    let cmd_auth = CmdAuth {
        inner,
        required: vec![permission],
    };
    if let Err(e) = crate::authz::authorize_command(principal, &cmd_auth) {
        tracing::warn!(principal_id = %principal.principal_id(), error = %e, "write forbidden");
        return Err(errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()));
    }
    Ok(cmd_auth.inner)
}
