// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Telegram login endpoint tests.
//!
//! These tests verify that:
//! 1. Correctly signed payloads return the identity with `authenticated: true`
//! 2. Bad signatures, missing fields and bad JSON map to distinct client errors
//! 3. A missing bot token is a server error, never an authentication failure

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::json;
use slotsfight_backend::config::Config;
use tower::ServiceExt;

mod common;
use common::{body_json, json_request, sign_payload};

const BOT_TOKEN: &str = "BOT:SECRET";

#[tokio::test]
async fn test_valid_login() {
    let (app, _) = common::create_test_app();
    let payload = json!({"id": 42, "first_name": "Ann", "auth_date": 1000});
    let payload = sign_payload(payload, BOT_TOKEN);
    assert_eq!(
        payload["hash"],
        "e0402995a9bc5241697d1a4ad6516d654d2015a973dc3b06d3c650838d8ec211"
    );

    let response = app
        .oneshot(json_request("POST", "/auth/telegram", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({
            "user_id": 42,
            "first_name": "Ann",
            "last_name": "",
            "username": "",
            "photo_url": "",
            "authenticated": true
        })
    );
}

#[tokio::test]
async fn test_valid_login_with_nulls_and_extra_fields() {
    let (app, _) = common::create_test_app();
    let payload = sign_payload(
        json!({"id": 42, "first_name": "Ann", "auth_date": 1000}),
        BOT_TOKEN,
    );
    // Nulls are dropped from the data-check string, unknown keys are not signed.
    let mut payload = payload;
    payload["last_name"] = serde_json::Value::Null;
    payload["widget_version"] = json!("22");

    let response = app
        .oneshot(json_request("POST", "/auth/telegram", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["last_name"], "");
}

#[tokio::test]
async fn test_all_zero_hash_is_unauthorized() {
    let (app, _) = common::create_test_app();
    let payload = json!({
        "id": 42,
        "first_name": "Ann",
        "auth_date": 1000,
        "hash": "0".repeat(64)
    });

    let response = app
        .oneshot(json_request("POST", "/auth/telegram", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await, json!({"error": "Invalid hash"}));
}

#[tokio::test]
async fn test_tampered_username_is_unauthorized() {
    let (app, _) = common::create_test_app();
    let mut payload = sign_payload(
        json!({"id": 42, "first_name": "Ann", "username": "ann_t", "auth_date": 1000}),
        BOT_TOKEN,
    );
    payload["username"] = json!("admin");

    let response = app
        .oneshot(json_request("POST", "/auth/telegram", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_missing_id_or_hash() {
    for payload in [
        json!({"first_name": "Ann", "hash": "abc"}),
        json!({"id": 42, "first_name": "Ann"}),
        json!({"id": 42, "hash": ""}),
        json!({}),
    ] {
        let (app, _) = common::create_test_app();
        let response = app
            .oneshot(json_request("POST", "/auth/telegram", &payload))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", payload);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Invalid auth data"})
        );
    }
}

#[tokio::test]
async fn test_invalid_json() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/telegram")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await, json!({"error": "Invalid JSON"}));
}

#[tokio::test]
async fn test_bot_token_not_configured() {
    let config = Config {
        telegram_bot_token: None,
        ..Config::test_default()
    };
    let (app, _) = common::create_test_app_with_config(config);
    let payload = sign_payload(json!({"id": 42, "first_name": "Ann"}), BOT_TOKEN);

    let response = app
        .oneshot(json_request("POST", "/auth/telegram", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Bot token not configured"})
    );
}

#[tokio::test]
async fn test_get_not_allowed() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/auth/telegram")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_cors_preflight() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/auth/telegram")
                .header(header::ORIGIN, "https://slotsfight.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(), "*");
    assert!(headers.contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "86400");
}

#[tokio::test]
async fn test_health() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "ok");
}
