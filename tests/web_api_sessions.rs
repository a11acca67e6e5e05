//! Web API session tests.

mod common;

use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::{HeaderValue, StatusCode};
use common::{bearer, TestApp};
use serde_json::{json, Value};

#[tokio::test]
async fn test_sign_in_success() {
    let app = TestApp::new().await;
    let alice = app.sign_up("Alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/sessions")
        .json(&json!({ "email": "ALICE@example.com", "password": "foobar" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["user"]["id"], alice.id);
    assert_eq!(body["data"]["remember_token"], alice.token.as_str());
    assert_eq!(response.cookie("remember_token").value(), alice.token);
}

#[tokio::test]
async fn test_sign_in_wrong_password() {
    let app = TestApp::new().await;
    app.sign_up("Alice", "alice@example.com").await;

    let response = app
        .server
        .post("/api/sessions")
        .json(&json!({ "email": "alice@example.com", "password": "invalid" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_sign_in_unknown_email_same_error() {
    let app = TestApp::new().await;
    app.sign_up("Alice", "alice@example.com").await;

    let wrong_password: Value = app
        .server
        .post("/api/sessions")
        .json(&json!({ "email": "alice@example.com", "password": "invalid" }))
        .await
        .json();
    let unknown_email: Value = app
        .server
        .post("/api/sessions")
        .json(&json!({ "email": "nobody@example.com", "password": "foobar" }))
        .await
        .json();

    assert_eq!(wrong_password, unknown_email);
}

#[tokio::test]
async fn test_cookie_session() {
    let app = TestApp::new().await;
    let alice = app.sign_up("Alice", "alice@example.com").await;

    let cookie = HeaderValue::from_str(&format!("remember_token={}", alice.token)).unwrap();
    app.server
        .get("/api/users")
        .add_header(COOKIE, cookie)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_unknown_token_is_anonymous() {
    let app = TestApp::new().await;
    app.sign_up("Alice", "alice@example.com").await;

    app.server
        .get("/api/users")
        .add_header(AUTHORIZATION, bearer("not-a-real-token"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sign_out_rotates_token() {
    let app = TestApp::new().await;
    let alice = app.sign_up("Alice", "alice@example.com").await;

    app.server
        .delete("/api/sessions")
        .add_header(AUTHORIZATION, bearer(&alice.token))
        .await
        .assert_status(StatusCode::NO_CONTENT);

    app.server
        .get("/api/users")
        .add_header(AUTHORIZATION, bearer(&alice.token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let body: Value = app
        .server
        .post("/api/sessions")
        .json(&json!({ "email": "alice@example.com", "password": "foobar" }))
        .await
        .json();
    let new_token = body["data"]["remember_token"].as_str().unwrap();
    assert_ne!(new_token, alice.token);

    app.server
        .get("/api/users")
        .add_header(AUTHORIZATION, bearer(new_token))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_sign_out_requires_sign_in() {
    let app = TestApp::new().await;

    app.server
        .delete("/api/sessions")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
