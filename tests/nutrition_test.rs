mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

#[tokio::test]
async fn test_ai_nutrition_falls_back_to_estimate() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "food@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai/nutrition")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(
                    json!({ "food": "2 eggs with rice and chicken" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["provider"], "fallback");

    let plan = &json["plan"];
    assert!(plan["targetCalories"].as_u64().unwrap() > 0);
    assert!(plan["macros"]["protein"].as_u64().unwrap() > 0);
    assert!(plan["macros"]["carbs"].as_u64().unwrap() > 0);
    assert!(plan["macros"]["fat"].is_u64());
}

#[tokio::test]
async fn test_ai_nutrition_rejects_empty_food() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "empty@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai/nutrition")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(json!({ "food": "   " }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_food_estimates_to_zero() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "mystery@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/ai/nutrition")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(
                    json!({ "food": "xyzzy surprise casserole" }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["provider"], "fallback");
    assert_eq!(json["plan"]["targetCalories"], 0);
    assert_eq!(json["plan"]["macros"]["protein"], 0);
}

#[tokio::test]
async fn test_nutrition_log_crud() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "log@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    // Create
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/nutrition/logs")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie.clone())
                .body(Body::from(
                    json!({
                        "description": "Grilled chicken with rice",
                        "calories": 550,
                        "protein": 45,
                        "carbs": 60,
                        "fat": 12
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["log"]["calories"], 550);
    let id = json["log"]["id"].as_str().unwrap().to_string();

    // List
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/nutrition/logs")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["logs"].as_array().unwrap().len(), 1);
    assert_eq!(json["logs"][0]["description"], "Grilled chicken with rice");

    // Delete
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/nutrition/logs/{id}"))
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Deleting again is a 404
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/nutrition/logs/{id}"))
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_nutrition_log_requires_description_and_calories() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let user = common::create_test_user(&pool, "bad@example.com", "password123").await;
    let cookie = common::create_session_cookie(&pool, &user).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/nutrition/logs")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, cookie)
                .body(Body::from(
                    json!({ "description": "", "calories": 0 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_nutrition_logs_scoped_to_owner() {
    let pool = common::setup_test_db();
    let app = common::create_test_app(pool.clone());

    let owner = common::create_test_user(&pool, "owner@example.com", "password123").await;
    let owner_cookie = common::create_session_cookie(&pool, &owner).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/nutrition/logs")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, owner_cookie)
                .body(Body::from(
                    json!({ "description": "Oats", "calories": 300 }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let other = common::create_test_user(&pool, "other@example.com", "password123").await;
    let other_cookie = common::create_session_cookie(&pool, &other).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/nutrition/logs")
                .header(header::COOKIE, other_cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["logs"].as_array().unwrap().is_empty());
}
