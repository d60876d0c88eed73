//! Integration tests for login and the auth gate.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};

use tms_auth::jwt::JwtEncoder;
use tms_core::config::AuthConfig;

use crate::helpers::{TEST_SECRET, TestApp};

fn encoder(secret: &str) -> JwtEncoder {
    JwtEncoder::new(&AuthConfig {
        jwt_secret: secret.to_string(),
        ..Default::default()
    })
    .expect("encoder")
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::new().await;
    app.create_test_user("login@example.com", "CorrectPass1").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "email": "login@example.com",
                "password": "CorrectPass1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.message(), "Login successful");
    let token = response.body["token"].as_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.create_test_user("login@example.com", "CorrectPass1").await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "email": "login@example.com",
                "password": "WrongPass",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(response.body.get("token").is_none());
}

#[tokio::test]
async fn test_login_unknown_email_matches_wrong_password() {
    let app = TestApp::new().await;
    app.create_test_user("login@example.com", "CorrectPass1").await;

    let unknown = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "email": "nobody@example.com",
                "password": "CorrectPass1",
            })),
            None,
        )
        .await;
    let wrong = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({
                "email": "login@example.com",
                "password": "WrongPass",
            })),
            None,
        )
        .await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
}

#[tokio::test]
async fn test_login_malformed_body() {
    let app = TestApp::new().await;

    let req = Request::builder()
        .method("POST")
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_login_missing_password() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "email": "a@b.co", "password": "" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Password is required");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    for path in ["/current-user", "/private"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{path}");
    }
}

#[tokio::test]
async fn test_invalid_tokens_rejected_identically() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("gate@example.com", "CorrectPass1").await;

    let forged = encoder("some-other-secret")
        .issue(user_id, "gate@example.com")
        .unwrap()
        .token;
    let expired = encoder(TEST_SECRET)
        .issue_at(
            user_id,
            "gate@example.com",
            Utc::now() - Duration::days(400),
        )
        .unwrap()
        .token;

    let mut bodies = Vec::new();
    for token in [forged.as_str(), expired.as_str(), "not-a-token"] {
        let response = app.request("GET", "/private", None, Some(token)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.message(), "Invalid token");
        bodies.push(response.body);
    }
    assert!(bodies.windows(2).all(|w| w[0] == w[1]));
}

#[tokio::test]
async fn test_private_with_valid_token() {
    let app = TestApp::new().await;
    app.create_test_user("private@example.com", "CorrectPass1").await;
    let token = app.login("private@example.com", "CorrectPass1").await;

    let response = app.request("GET", "/private", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.message().contains("private@example.com"));
}

#[tokio::test]
async fn test_raw_token_header_accepted() {
    let app = TestApp::new().await;
    app.create_test_user("raw@example.com", "CorrectPass1").await;
    let token = app.login("raw@example.com", "CorrectPass1").await;

    let req = Request::builder()
        .method("GET")
        .uri("/private")
        .header(header::AUTHORIZATION, token)
        .body(Body::empty())
        .unwrap();
    let response = app.send(req).await;

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}
