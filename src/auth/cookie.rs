use axum::http::{header::COOKIE, HeaderMap};

use super::IssuedToken;

pub const AUTH_COOKIE_NAME: &str = "auth_token";

const EPOCH_HTTP_DATE: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Attributes shared by the session cookie and its revocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CookiePolicy {
    pub secure: bool,
}

impl CookiePolicy {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// `Set-Cookie` value carrying a freshly issued token.
    pub fn session_cookie(&self, issued: &IssuedToken) -> String {
        let expires = issued.expires_at.format("%a, %d %b %Y %H:%M:%S GMT");
        format!(
            "{}={}; Path=/; Expires={}; Max-Age={}; HttpOnly; SameSite=Lax{}",
            AUTH_COOKIE_NAME,
            issued.token,
            expires,
            issued.max_age(),
            self.secure_attr()
        )
    }

    /// `Set-Cookie` value that makes the client drop the token.
    pub fn revoked_cookie(&self) -> String {
        format!(
            "{}=; Path=/; Expires={}; Max-Age=0; HttpOnly; SameSite=Lax{}",
            AUTH_COOKIE_NAME,
            EPOCH_HTTP_DATE,
            self.secure_attr()
        )
    }

    fn secure_attr(&self) -> &'static str {
        if self.secure {
            "; Secure"
        } else {
            ""
        }
    }
}

/// Value of the `auth_token` cookie, if the request carries one.
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == AUTH_COOKIE_NAME)
        .map(|(_, value)| value.trim())
}
