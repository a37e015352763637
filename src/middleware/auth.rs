use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use crate::auth::{token_from_headers, AuthError, Identity, TokenVerifier};

/// Paths served without looking at the cookie at all
const PUBLIC_PATHS: [&str; 5] = ["/login", "/logout", "/submit", "/", "/health"];
const PUBLIC_PREFIX: &str = "/docs/";

pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || path.starts_with(PUBLIC_PREFIX)
}

/// Request gate: admits public paths untouched, otherwise requires a valid
/// `auth_token` cookie and attaches the caller's [`Identity`] to the request.
pub async fn request_gate(
    State(verifier): State<Arc<TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let path = request.uri().path();
    if is_public_path(path) {
        return Ok(next.run(request).await);
    }

    let identity = authenticate(&verifier, &request).map_err(|err| {
        tracing::debug!(path = %request.uri().path(), reason = err.reason(), "Request rejected by gate");
        err
    })?;

    tracing::debug!(role = %identity.role, "Request authenticated");
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

fn authenticate(verifier: &TokenVerifier, request: &Request) -> Result<Identity, AuthError> {
    let token = token_from_headers(request.headers()).ok_or(AuthError::MissingToken)?;
    let claims = verifier.verify(token)?;
    Ok(Identity::from(claims))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, Subject, TokenIssuer};
    use crate::config::JwtSecret;
    use axum::{
        body::{to_bytes, Body},
        http::{header::COOKIE, StatusCode},
        middleware::from_fn_with_state,
        routing::get,
        Extension, Router,
    };
    use chrono::{Duration, Utc};
    use tower::ServiceExt;

    const SECRET: &str = "gate-secret";

    fn router() -> Router {
        let verifier = Arc::new(TokenVerifier::new(&JwtSecret::new(SECRET)).unwrap());
        Router::new()
            .route("/health", get(|| async { "OK" }))
            .route("/docs/api", get(|| async { "docs" }))
            .route("/me", get(|Extension(identity): Extension<Identity>| async move { identity.role }))
            .layer(from_fn_with_state(verifier, request_gate))
    }

    fn token(secret: &str, role: Role) -> String {
        TokenIssuer::new(&JwtSecret::new(secret), 24).unwrap().issue(role).unwrap().token
    }

    async fn get_with_cookie(path: &str, cookie: Option<String>) -> (StatusCode, String) {
        let mut builder = Request::builder().uri(path);
        if let Some(cookie) = cookie {
            builder = builder.header(COOKIE, cookie);
        }
        let response = router().oneshot(builder.body(Body::empty()).unwrap()).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    #[test]
    fn public_allow_list() {
        for path in ["/login", "/logout", "/submit", "/", "/health", "/docs/", "/docs/api"] {
            assert!(is_public_path(path), "{path} should be public");
        }
        for path in ["/docs", "/healthz", "/me", "/SuperAdmin/restaurants", "/login/extra"] {
            assert!(!is_public_path(path), "{path} should be protected");
        }
    }

    #[tokio::test]
    async fn public_paths_ignore_garbage_cookie() {
        let (status, body) = get_with_cookie("/health", Some("auth_token=garbage".into())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "OK");

        let (status, _) = get_with_cookie("/docs/api", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn missing_cookie_is_401() {
        let (status, body) = get_with_cookie("/me", None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.contains("UNAUTHORIZED"));
    }

    #[tokio::test]
    async fn authorization_header_is_ignored() {
        let request = Request::builder()
            .uri("/me")
            .header("authorization", format!("Bearer {}", token(SECRET, Role::User)))
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_cookie_injects_identity() {
        let cookie = format!("auth_token={}", token(SECRET, Role::AdminRestaurant));
        let (status, body) = get_with_cookie("/me", Some(cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "AdminRestaurant");
    }

    #[tokio::test]
    async fn bad_tokens_are_401() {
        let foreign = format!("auth_token={}", token("another-secret", Role::SuperAdmin));
        assert_eq!(get_with_cookie("/me", Some(foreign)).await.0, StatusCode::UNAUTHORIZED);

        let empty = "auth_token=".to_string();
        assert_eq!(get_with_cookie("/me", Some(empty)).await.0, StatusCode::UNAUTHORIZED);

        let garbage = "auth_token=not-a-token".to_string();
        assert_eq!(get_with_cookie("/me", Some(garbage)).await.0, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_cookie_is_401() {
        let issuer = TokenIssuer::new(&JwtSecret::new(SECRET), 24).unwrap();
        let expired = issuer
            .issue_at(Role::SuperAdmin, Subject::default(), Utc::now() - Duration::hours(25))
            .unwrap();
        let (status, _) = get_with_cookie("/me", Some(format!("auth_token={}", expired.token))).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
