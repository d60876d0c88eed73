//! Integration tests for the avatar upload pipeline.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use image::ImageFormat;

use tms_database::store::UserStore;

use crate::helpers::{TestApp, padded_png, sample_image};

async fn logged_in(app: &TestApp, email: &str) -> (i64, String) {
    let id = app.create_test_user(email, "CorrectPass1").await;
    let token = app.login(email, "CorrectPass1").await;
    (id, token)
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = TestApp::new().await;

    let response = app
        .upload_avatar("bogus", "me.png", &sample_image(ImageFormat::Png))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert!(app.stored_avatars().is_empty());
}

#[tokio::test]
async fn test_png_and_jpeg_accepted() {
    let app = TestApp::new().await;
    let (user_id, token) = logged_in(&app, "upload@example.com").await;

    for (format, name, ext) in [
        (ImageFormat::Png, "me.png", ".png"),
        (ImageFormat::Jpeg, "me.jpeg", ".jpeg"),
    ] {
        let response = app.upload_avatar(&token, name, &sample_image(format)).await;
        assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
        assert_eq!(response.message(), "Avatar uploaded");

        let avatar = response.body["avatar"].as_str().unwrap();
        let file = avatar.rsplit('/').next().unwrap();
        assert!(avatar.starts_with("http://localhost:8080/avatars/"));
        assert!(file.starts_with(&user_id.to_string()));
        assert!(file.ends_with(ext), "{file}");

        // Exactly one file per user survives a replacement.
        assert_eq!(app.stored_avatars(), vec![file.to_string()]);
    }
}

#[tokio::test]
async fn test_gif_rejected() {
    let app = TestApp::new().await;
    let (_, token) = logged_in(&app, "gif@example.com").await;

    let response = app
        .upload_avatar(&token, "anim.gif", &sample_image(ImageFormat::Gif))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.message().starts_with("Only JPEG and PNG images are supported"));
    assert!(app.stored_avatars().is_empty());
}

#[tokio::test]
async fn test_non_image_rejected() {
    let app = TestApp::new().await;
    let (user_id, token) = logged_in(&app, "junk@example.com").await;

    let response = app
        .upload_avatar(&token, "avatar.png", b"<?php echo 'hi'; ?>")
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.stored_avatars().is_empty());
    let user = app.users().find_by_id(user_id).await.unwrap().unwrap();
    assert!(user.avatar.is_none());
}

#[tokio::test]
async fn test_size_limit_boundary() {
    let app = TestApp::new().await;
    let (_, token) = logged_in(&app, "size@example.com").await;

    // At the limit the size gate passes and decoding fails instead.
    let at_limit = app
        .upload_avatar(&token, "a.png", &vec![0u8; 1024 * 1024])
        .await;
    assert_eq!(at_limit.status, StatusCode::BAD_REQUEST);
    assert_ne!(at_limit.message(), "image must be 1MB or smaller");

    let over = app
        .upload_avatar(&token, "a.png", &vec![0u8; 1024 * 1024 + 1])
        .await;
    assert_eq!(over.status, StatusCode::BAD_REQUEST);
    assert_eq!(over.message(), "image must be 1MB or smaller");
}

#[tokio::test]
async fn test_large_real_image_accepted() {
    let app = TestApp::new().await;
    let (user_id, token) = logged_in(&app, "large@example.com").await;

    for len in [1_048_000, 1024 * 1024] {
        let response = app.upload_avatar(&token, "big.png", &padded_png(len)).await;
        assert_eq!(response.status, StatusCode::OK, "{len}: {:?}", response.body);
    }

    let over = app
        .upload_avatar(&token, "big.png", &padded_png(1024 * 1024 + 1))
        .await;
    assert_eq!(over.status, StatusCode::BAD_REQUEST);
    assert_eq!(over.message(), "image must be 1MB or smaller");

    let user = app.users().find_by_id(user_id).await.unwrap().unwrap();
    let current = user.avatar_file_name().unwrap().to_string();
    assert_eq!(app.stored_avatars(), vec![current]);
}

#[tokio::test]
async fn test_missing_field_rejected() {
    let app = TestApp::new().await;
    let (_, token) = logged_in(&app, "field@example.com").await;

    let response = app
        .upload_field(&token, "picture", "me.png", &sample_image(ImageFormat::Png))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "avatar file is required");
}

#[tokio::test]
async fn test_non_multipart_rejected() {
    let app = TestApp::new().await;
    let (_, token) = logged_in(&app, "form@example.com").await;

    let response = app
        .request(
            "PATCH",
            "/users/update-avatar",
            Some(serde_json::json!({ "avatar": "x" })),
            Some(&token),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_replace_removes_old_file_and_serves_new() {
    let app = TestApp::new().await;
    let (user_id, token) = logged_in(&app, "replace@example.com").await;

    // Seed an existing avatar.
    let mut user = app.users().find_by_id(user_id).await.unwrap().unwrap();
    user.avatar = Some(app.config.avatar.public_url("old-avatar.png"));
    app.users().save(&user).await.unwrap();
    std::fs::write(app.avatar_dir.path().join("old-avatar.png"), b"old").unwrap();

    let response = app
        .upload_avatar(&token, "new.jpg", &sample_image(ImageFormat::Jpeg))
        .await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);

    let avatar = response.body["avatar"].as_str().unwrap().to_string();
    let file = avatar.rsplit('/').next().unwrap().to_string();
    assert!(!app.avatar_dir.path().join("old-avatar.png").exists());
    assert_eq!(app.stored_avatars(), vec![file.clone()]);

    let current = app.request("GET", "/current-user", None, Some(&token)).await;
    assert_eq!(current.body["avatar"], avatar.as_str());

    // The stored file is served from the static mount.
    let req = Request::builder()
        .uri(format!("/avatars/{file}"))
        .body(Body::empty())
        .unwrap();
    let served = app.send(req).await;
    assert_eq!(served.status, StatusCode::OK);
    assert_eq!(image::guess_format(&served.raw).unwrap(), ImageFormat::Jpeg);
}
