use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Identity, Role};

/// Authorization check for a route group. Must run behind the request gate.
///
/// The comparison is exact and flat: `SuperAdmin` does not satisfy a group
/// that requires `User`.
pub async fn require_role(
    State(required): State<Role>,
    request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let identity = request.extensions().get::<Identity>().ok_or_else(|| {
        tracing::error!(path = %request.uri().path(), "Role check reached without an identity");
        AuthError::MissingIdentity
    })?;

    if !identity.has_role(required) {
        tracing::warn!(
            path = %request.uri().path(),
            role = %identity.role,
            required = %required,
            "Role check failed"
        );
        return Err(AuthError::InsufficientRole {
            required: required.to_string(),
        });
    }

    Ok(next.run(request).await)
}
