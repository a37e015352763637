#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{header::SET_COOKIE, Response, StatusCode};
use serde_json::{json, Value};

use caravane_api::auth::{Role, TokenIssuer};
use caravane_api::config::{AppConfig, SuperAdminSeed};
use caravane_api::database::DatabaseManager;
use caravane_api::router;
use caravane_api::services::ensure_super_admin;
use caravane_api::state::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const ROOT_EMAIL: &str = "root@caravane.dz";
pub const ROOT_PASSWORD: &str = "rootpass";

/// A server with its own in-memory database, running on the test's runtime
pub struct TestServer {
    pub base_url: String,
    pub issuer: TokenIssuer,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let config = AppConfig::for_tests(SECRET);
        let pool = DatabaseManager::connect(&config.database).await?;
        ensure_super_admin(
            &pool,
            &SuperAdminSeed {
                email: ROOT_EMAIL.to_string(),
                password: ROOT_PASSWORD.to_string(),
            },
        )
        .await?;

        let state = AppState::new(pool, &config)?;
        let app = router::app(state, &config);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let server = Self {
            base_url,
            issuer: TokenIssuer::new(&config.security.jwt_secret, config.security.jwt_expiry_hours)?,
            client: reqwest::Client::new(),
        };
        server.wait_ready(Duration::from_secs(5)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Cookie header value for a freshly issued token
    pub fn cookie_for(&self, role: Role) -> String {
        let issued = self.issuer.issue(role).expect("issue token");
        format!("auth_token={}", issued.token)
    }

    pub async fn get(&self, path: &str, cookie: Option<&str>) -> Result<Response> {
        let mut request = self.client.get(self.url(path));
        if let Some(cookie) = cookie {
            request = request.header("cookie", cookie);
        }
        Ok(request.send().await?)
    }

    pub async fn send_json(
        &self,
        method: reqwest::Method,
        path: &str,
        cookie: Option<&str>,
        body: Value,
    ) -> Result<Response> {
        let mut request = self.client.request(method, self.url(path)).json(&body);
        if let Some(cookie) = cookie {
            request = request.header("cookie", cookie);
        }
        Ok(request.send().await?)
    }

    /// Log in and return the `name=value` part of the session cookie.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let res = self
            .send_json(
                reqwest::Method::POST,
                "/login",
                None,
                json!({ "email": email, "password": password }),
            )
            .await?;
        anyhow::ensure!(res.status() == StatusCode::OK, "login failed: {}", res.status());
        session_cookie(&res).context("login response has no auth_token cookie")
    }
}

/// `auth_token=...` pair from a response's Set-Cookie header
pub fn session_cookie(res: &Response) -> Option<String> {
    res.headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("auth_token="))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub fn set_cookie_header(res: &Response) -> Option<String> {
    res.headers()
        .get(SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}
