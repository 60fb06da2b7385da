mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_register_creates_user_and_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "Sara",
                        "lastName": "Haddad",
                        "email": "sara@example.com",
                        "password": "password123"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let set_cookie = response.headers().get(header::SET_COOKIE);
    assert!(set_cookie.is_some());
    assert!(set_cookie.unwrap().to_str().unwrap().contains("session="));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user"]["email"], "sara@example.com");
    assert_eq!(json["user"]["points"], 0);
    assert!(json["user"]["passwordHash"].is_null());
}

#[tokio::test]
async fn test_register_rejects_duplicate_email() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    common::create_test_user(&pool, "taken@example.com", "password123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "Other",
                        "lastName": "User",
                        "email": "taken@example.com",
                        "password": "password123"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["message"], "Email already used");
}

#[tokio::test]
async fn test_register_rejects_short_password() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({
                        "firstName": "Sara",
                        "lastName": "Haddad",
                        "email": "sara@example.com",
                        "password": "short"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_valid_credentials_sets_cookie() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    common::create_test_user(&pool, "user@example.com", "password123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "user@example.com", "password": "password123" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response.headers().get(header::SET_COOKIE);
    assert!(set_cookie.is_some());
    assert!(set_cookie.unwrap().to_str().unwrap().contains("session="));
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    common::create_test_user(&pool, "user@example.com", "password123").await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/login")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    json!({ "email": "user@example.com", "password": "wrongpassword" })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_requires_auth() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_returns_current_user() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "me@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user"]["id"], user.id.as_str());
    assert_eq!(json["user"]["email"], "me@example.com");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "out@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // The old token no longer resolves
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "edit@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/api/auth/profile")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(
                    json!({ "firstName": "Renamed", "bio": "Lifting since 2019" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["user"]["firstName"], "Renamed");
    assert_eq!(json["user"]["lastName"], "User");
    assert_eq!(json["user"]["bio"], "Lifting since 2019");
}

#[tokio::test]
async fn test_health_endpoint() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "ok");
}
