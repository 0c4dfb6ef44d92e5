// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::Value;
use slotsfight_backend::config::Config;
use slotsfight_backend::db::{MemoryPlayerStore, PgPlayerStore};
use slotsfight_backend::models::AuthAssertion;
use slotsfight_backend::routes::create_router;
use slotsfight_backend::services::TelegramVerifier;
use slotsfight_backend::AppState;
use std::sync::Arc;

/// Check if a Postgres test database is available via environment variable.
#[allow(dead_code)]
pub fn database_available() -> bool {
    std::env::var("TEST_DATABASE_URL").is_ok()
}

/// Skip test with message if no test database is configured.
#[macro_export]
macro_rules! require_database {
    () => {
        if !crate::common::database_available() {
            eprintln!("⚠️  Skipping: TEST_DATABASE_URL not set");
            return;
        }
    };
}

/// Connect to the test database and apply migrations.
#[allow(dead_code)]
pub async fn test_pg_store() -> PgPlayerStore {
    let url = std::env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL not set");
    let store = PgPlayerStore::connect(&url, 5)
        .await
        .expect("Failed to connect to test database");
    store
        .run_migrations()
        .await
        .expect("Failed to apply migrations");
    store
}

/// Generate a unique Telegram ID for test isolation.
#[allow(dead_code)]
pub fn unique_telegram_id() -> i64 {
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};
    static COUNTER: AtomicI64 = AtomicI64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    // Leave headroom below i64::MAX for the counter.
    (nanos % 1_000_000_000_000_000) as i64 + COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Create a test app backed by the in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_config(Config::test_default())
}

#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>) {
    let store = Arc::new(MemoryPlayerStore::new());
    let state = Arc::new(AppState::new(config, store));
    (create_router(state.clone()), state)
}

/// Attach a valid `hash` to a login payload for the given bot token.
#[allow(dead_code)]
pub fn sign_payload(mut payload: Value, bot_token: &str) -> Value {
    let assertion: AuthAssertion =
        serde_json::from_value(payload.clone()).expect("Payload should parse");
    let hash = TelegramVerifier::new(Some(bot_token))
        .compute_hash(&assertion)
        .expect("Verifier should be configured");
    payload["hash"] = Value::String(hash);
    payload
}

/// Build a request with a JSON body.
#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&body).expect("Response body should be JSON")
}
