// handlers/public/auth.rs - POST /login and POST /logout

use axum::{extract::State, http::header::SET_COOKIE, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::{verify_password, AuthError, Role, Subject};
use crate::database::models::User;
use crate::error::ApiError;
use crate::extract::Json;
use crate::middleware::ApiResponse;
use crate::services::UserService;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub role: Role,
    pub expires_at: DateTime<Utc>,
    pub user: User,
}

/// POST /login - verify credentials and set the `auth_token` cookie
///
/// The role embedded in the token is the one stored on the user record,
/// never one supplied by the caller.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = body.email.trim().to_lowercase();
    if email.is_empty() || body.password.is_empty() {
        return Err(AuthError::InvalidCredentials.into());
    }

    let users = UserService::new(state.pool.clone());
    let user = match users.find_by_email(&email).await? {
        Some(user) if verify_password(&body.password, &user.password_hash) => user,
        _ => {
            tracing::warn!("Failed login attempt for {}", email);
            return Err(AuthError::InvalidCredentials.into());
        }
    };

    let issued = state.issuer.issue_for(
        user.role(),
        Subject {
            username: Some(&user.email),
            user_id: Some(user.id),
        },
    )?;
    tracing::info!("User {} logged in as {}", user.id, issued.role);

    let cookie = state.cookies.session_cookie(&issued);
    let body = LoginResponse {
        role: issued.role,
        expires_at: issued.expires_at,
        user,
    };
    Ok(([(SET_COOKIE, cookie)], ApiResponse::success(body)))
}

/// POST /logout - clear the cookie
///
/// Nothing is recorded server-side; a copy of the old token keeps working
/// until it expires.
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, state.cookies.revoked_cookie())],
        ApiResponse::success(serde_json::json!({ "message": "Logged out" })),
    )
}
