use sqlx::SqlitePool;
use std::sync::Arc;

use crate::auth::{AuthError, CookiePolicy, TokenIssuer, TokenVerifier};
use crate::config::AppConfig;

/// Shared handler state. Key material is built once and shared read-only.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub issuer: Arc<TokenIssuer>,
    pub verifier: Arc<TokenVerifier>,
    pub cookies: CookiePolicy,
}

impl AppState {
    /// Fails when the JWT secret is empty.
    pub fn new(pool: SqlitePool, config: &AppConfig) -> Result<Self, AuthError> {
        let secret = &config.security.jwt_secret;
        Ok(Self {
            pool,
            issuer: Arc::new(TokenIssuer::new(secret, config.security.jwt_expiry_hours)?),
            verifier: Arc::new(TokenVerifier::new(secret)?),
            cookies: CookiePolicy::new(config.security.cookie_secure),
        })
    }
}
