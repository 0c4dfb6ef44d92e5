// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Telegram login route.

use axum::{body::Bytes, extract::State, routing::post, Json, Router};
use std::sync::Arc;

use crate::error::Result;
use crate::models::{AuthAssertion, VerifiedIdentity};
use crate::services::AuthError;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/auth/telegram", post(telegram_login))
}

/// Verify a Telegram Login Widget payload and echo back the trusted identity.
async fn telegram_login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<VerifiedIdentity>> {
    // A misconfigured server must not look like a bad login.
    if !state.verifier.is_configured() {
        return Err(AuthError::NotConfigured.into());
    }

    let assertion: AuthAssertion = super::parse_json(&body)?;

    let identity = state.verifier.verify(&assertion).map_err(|err| {
        tracing::warn!(error = %err, "Telegram login rejected");
        err
    })?;

    tracing::info!(user_id = %identity.user_id, "Telegram login verified");

    Ok(Json(identity))
}
