//! Integration tests for registration and the current-user lookup.

use axum::http::StatusCode;

use tms_auth::password::PasswordHasher;
use tms_database::store::UserStore;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({
                "name": "Ada",
                "email": "ada@example.com",
                "password": "CorrectPass1",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["email"], "ada@example.com");
    assert!(response.body["avatar"].is_null());
    assert!(response.body.get("password_hash").is_none());
    assert!(response.body.get("password").is_none());

    let stored = app
        .users()
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_ne!(stored.password_hash, "CorrectPass1");
    assert!(PasswordHasher::new().verify_password("CorrectPass1", &stored.password_hash));

    app.login("ada@example.com", "CorrectPass1").await;
}

#[tokio::test]
async fn test_register_rejections() {
    let app = TestApp::new().await;
    app.create_test_user("taken@example.com", "CorrectPass1").await;

    let cases = [
        (
            serde_json::json!({ "email": "x@example.com", "password": "CorrectPass1" }),
            "Name, Email, and Password fields are required",
        ),
        (
            serde_json::json!({ "name": "X", "email": "not-an-email", "password": "CorrectPass1" }),
            "Invalid email address",
        ),
        (
            serde_json::json!({ "name": "X", "email": "taken@example.com", "password": "CorrectPass1" }),
            "Email already taken",
        ),
    ];

    for (body, message) in cases {
        let response = app.request("POST", "/users", Some(body), None).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{message}");
        assert_eq!(response.message(), message);
    }

    let weak = app
        .request(
            "POST",
            "/users",
            Some(serde_json::json!({ "name": "X", "email": "weak@example.com", "password": "Short1" })),
            None,
        )
        .await;
    assert_eq!(weak.status, StatusCode::BAD_REQUEST);
    assert!(weak.message().starts_with("Password must be at least 8 characters"));
    assert!(
        app.users()
            .find_by_email("weak@example.com")
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_current_user() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("me@example.com", "CorrectPass1").await;
    let token = app.login("me@example.com", "CorrectPass1").await;

    let response = app.request("GET", "/current-user", None, Some(&token)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], user_id);
    assert_eq!(response.body["email"], "me@example.com");
    assert!(response.body["avatar"].is_null());
    assert!(response.body["created"].is_string());
}

#[tokio::test]
async fn test_current_user_deleted_after_login() {
    let app = TestApp::new().await;
    let user_id = app.create_test_user("gone@example.com", "CorrectPass1").await;
    let token = app.login("gone@example.com", "CorrectPass1").await;

    sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(&app.db_pool)
        .await
        .unwrap();

    let response = app.request("GET", "/current-user", None, Some(&token)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
