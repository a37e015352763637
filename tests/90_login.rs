mod common;

use anyhow::Result;
use reqwest::{Method, StatusCode};
use serde_json::json;

use common::{session_cookie, set_cookie_header, TestServer, ROOT_EMAIL, ROOT_PASSWORD};

#[tokio::test]
async fn login_sets_session_cookie_with_stored_role() -> Result<()> {
    let server = TestServer::spawn().await?;

    let res = server
        .send_json(
            Method::POST,
            "/login",
            None,
            json!({ "email": ROOT_EMAIL, "password": ROOT_PASSWORD, "role": "User" }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let header = set_cookie_header(&res).expect("Set-Cookie");
    assert!(header.starts_with("auth_token="));
    assert!(header.contains("HttpOnly"));
    assert!(header.contains("SameSite=Lax"));
    assert!(header.contains("Path=/"));
    assert!(header.contains("Max-Age=86400"));

    let cookie = session_cookie(&res).expect("auth_token");
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["data"]["role"], "SuperAdmin");
    assert!(body["data"]["user"].get("password_hash").is_none());

    let res = server.get("/SuperAdmin/admins", Some(&cookie)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_401() -> Result<()> {
    let server = TestServer::spawn().await?;

    for body in [
        json!({ "email": ROOT_EMAIL, "password": "wrong" }),
        json!({ "email": "nobody@caravane.dz", "password": ROOT_PASSWORD }),
        json!({}),
    ] {
        let res = server.send_json(Method::POST, "/login", None, body).await?;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie_header(&res).is_none());
    }
    Ok(())
}

#[tokio::test]
async fn logout_clears_cookie_but_old_token_still_works() -> Result<()> {
    let server = TestServer::spawn().await?;
    let cookie = server.login(ROOT_EMAIL, ROOT_PASSWORD).await?;

    let res = server.send_json(Method::POST, "/logout", Some(&cookie), json!({})).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let header = set_cookie_header(&res).expect("Set-Cookie");
    assert!(header.starts_with("auth_token=;"));
    assert!(header.contains("Max-Age=0"));
    assert!(header.contains("Expires=Thu, 01 Jan 1970 00:00:00 GMT"));

    // Revocation is client-side only: a replayed token is admitted until it expires
    let res = server.get("/SuperAdmin/restaurants", Some(&cookie)).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn created_admin_can_log_in_with_restricted_role() -> Result<()> {
    let server = TestServer::spawn().await?;
    let root = server.login(ROOT_EMAIL, ROOT_PASSWORD).await?;

    let res = server
        .send_json(
            Method::POST,
            "/SuperAdmin/admins",
            Some(&root),
            json!({
                "nom": "Meziane",
                "prenom": "Yacine",
                "email": " Yacine@Caravane.dz ",
                "password": "chefpass",
                "numero": "0550998877",
                "code": "<b>R12</b>"
            }),
        )
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: serde_json::Value = res.json().await?;
    assert_eq!(body["data"]["email"], "yacine@caravane.dz");
    assert_eq!(body["data"]["code"], "R12");

    let admin = server.login("yacine@caravane.dz", "chefpass").await?;
    let res = server.get("/me", Some(&admin)).await?;
    let me: serde_json::Value = res.json().await?;
    assert_eq!(me["data"]["role"], "AdminRestaurant");

    let res = server.get("/SuperAdmin/admins", Some(&admin)).await?;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
    Ok(())
}
