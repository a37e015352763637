mod common;

use anyhow::Result;
use chrono::{Duration, Utc};
use reqwest::StatusCode;

use caravane_api::auth::{Role, Subject};
use common::TestServer;

#[tokio::test]
async fn health_needs_no_token() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server.get("/health", None).await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await?, "OK");
    Ok(())
}

#[tokio::test]
async fn public_paths_ignore_garbage_cookie() -> Result<()> {
    let server = TestServer::spawn().await?;
    let garbage = Some("auth_token=definitely.not.valid");

    for path in ["/health", "/", "/docs/", "/docs/api"] {
        let res = server.get(path, garbage).await?;
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn superadmin_routes_by_role() -> Result<()> {
    let server = TestServer::spawn().await?;

    let superadmin = server.cookie_for(Role::SuperAdmin);
    let res = server.get("/SuperAdmin/restaurants", Some(&superadmin)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["success"], true);

    let user = server.cookie_for(Role::User);
    let res = server.get("/SuperAdmin/restaurants", Some(&user)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["code"], "FORBIDDEN");

    let res = server.get("/SuperAdmin/restaurants", None).await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn every_role_reaches_authenticated_routes() -> Result<()> {
    let server = TestServer::spawn().await?;

    for role in Role::ALL {
        let cookie = server.cookie_for(role);
        let res = server.get("/me", Some(&cookie)).await?;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await?;
        assert_eq!(body["data"]["role"], role.as_str());
    }
    Ok(())
}

#[tokio::test]
async fn expired_token_is_rejected() -> Result<()> {
    let server = TestServer::spawn().await?;
    let expired = server
        .issuer
        .issue_at(Role::SuperAdmin, Subject::default(), Utc::now() - Duration::hours(25))?;
    let cookie = format!("auth_token={}", expired.token);

    for path in ["/me", "/SuperAdmin/restaurants", "/orders/1/payment"] {
        let res = server.get(path, Some(&cookie)).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED, "{path}");
    }
    Ok(())
}

#[tokio::test]
async fn bearer_header_is_not_a_transport() -> Result<()> {
    let server = TestServer::spawn().await?;
    let token = server.issuer.issue(Role::SuperAdmin)?.token;

    let res = server
        .client
        .get(server.url("/me"))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
