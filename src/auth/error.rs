//! Authentication errors.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::error::ApiError;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No `auth_token` cookie on the request
    #[error("Missing auth_token cookie")]
    MissingToken,

    #[error("Token is malformed")]
    MalformedToken,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Access denied: role '{required}' is required")]
    InsufficientRole { required: String },

    /// Role gate mounted without the request gate in front of it
    #[error("Authenticated identity missing from request context")]
    MissingIdentity,

    #[error("Could not create token: {0}")]
    Signing(String),

    #[error("JWT secret is not configured")]
    MissingSecret,

    #[error("Token lifetime of {0} hours is out of range")]
    InvalidTtl(u64),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),
}

impl AuthError {
    /// Stable short name used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            AuthError::MissingToken => "missing_token",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::InsufficientRole { .. } => "insufficient_role",
            AuthError::MissingIdentity => "missing_identity",
            AuthError::Signing(_) => "signing_failure",
            AuthError::MissingSecret => "missing_secret",
            AuthError::InvalidTtl(_) => "invalid_ttl",
            AuthError::PasswordHash(_) => "password_hash",
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            _ => AuthError::MalformedToken,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
