// tests/routing_tests.rs

mod common;

use axum::http::HeaderValue;
use common::{spawn_app, spawn_app_with, test_config};
use serde_json::Value;

#[tokio::test]
async fn unknown_path_is_json_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
    let data: Value = response.json().await.unwrap();
    assert_eq!(data["success"], false);
    assert_eq!(data["message"], "resource not found");
}

#[tokio::test]
async fn wrong_method_is_json_405() {
    let app = spawn_app().await;

    let response = app.client.patch(app.url("/questions")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 405);
    let data: Value = response.json().await.unwrap();
    assert_eq!(data["success"], false);
    assert_eq!(data["message"], "method not allowed");
}

#[tokio::test]
async fn cors_allows_any_origin_by_default() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/categories"))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn serves_the_openapi_document() {
    let app = spawn_app().await;

    let response = app.client.get(app.url("/openapi.json")).send().await.unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let doc: Value = response.json().await.unwrap();
    assert!(doc["paths"]["/questions"].is_object());
    assert!(doc["paths"]["/quizzes"]["post"].is_object());
    assert!(doc["components"]["schemas"]["Question"].is_object());
}

#[tokio::test]
async fn cors_echoes_only_configured_origins() {
    let mut config = test_config();
    config.cors_allowed_origins = vec![HeaderValue::from_static("http://allowed.test")];
    let app = spawn_app_with(config, true).await;

    let allowed = app
        .client
        .get(app.url("/categories"))
        .header("Origin", "http://allowed.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("http://allowed.test")
    );

    let other = app
        .client
        .get(app.url("/categories"))
        .header("Origin", "http://other.test")
        .send()
        .await
        .unwrap();
    assert_eq!(other.status().as_u16(), 200);
    assert!(other.headers().get("access-control-allow-origin").is_none());
}
