// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player profile routes.

use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::{
    AchievementRecord, BalanceUpdate, FieldValue, NewPlayer, PlayerBalances, PlayerProfile,
};
use crate::services::PlayerError;
use crate::AppState;

const TELEGRAM_ID_REQUIRED: &str = "telegram_id required";
const CREATE_FIELDS_REQUIRED: &str = "telegram_id and first_name required";
const INVALID_TELEGRAM_ID: &str = "Invalid telegram_id";

/// Player routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/players",
        get(get_player).post(create_or_login).put(update_balances),
    )
}

/// Resolve a required Telegram ID, reporting `missing` when absent or blank.
fn require_telegram_id(
    value: Option<&FieldValue>,
    missing: &str,
) -> std::result::Result<i64, PlayerError> {
    let value = value
        .filter(|v| !v.is_blank())
        .ok_or_else(|| PlayerError::Validation(missing.to_string()))?;
    value
        .as_i64()
        .ok_or_else(|| PlayerError::Validation(INVALID_TELEGRAM_ID.to_string()))
}

// ─── Fetch ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct PlayerQuery {
    telegram_id: Option<String>,
}

/// Full profile with achievement progress.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerResponse {
    #[serde(flatten)]
    pub profile: PlayerProfile,
    pub achievements: Vec<AchievementRecord>,
}

async fn get_player(
    State(state): State<Arc<AppState>>,
    query: std::result::Result<Query<PlayerQuery>, QueryRejection>,
) -> Result<Json<PlayerResponse>> {
    let Query(params) = query.map_err(|e| {
        tracing::debug!(error = %e, "Rejected query string");
        PlayerError::Validation(INVALID_TELEGRAM_ID.to_string())
    })?;

    let telegram_id = require_telegram_id(
        params.telegram_id.map(FieldValue::Text).as_ref(),
        TELEGRAM_ID_REQUIRED,
    )?;

    let details = state.players.fetch_profile(telegram_id).await?;

    Ok(Json(PlayerResponse {
        profile: details.profile,
        achievements: details.achievements,
    }))
}

// ─── Create or Login ─────────────────────────────────────────

#[derive(Deserialize)]
struct CreatePlayerRequest {
    telegram_id: Option<FieldValue>,
    first_name: Option<String>,
    username: Option<String>,
    last_name: Option<String>,
    photo_url: Option<String>,
}

impl CreatePlayerRequest {
    fn into_new_player(self) -> std::result::Result<NewPlayer, PlayerError> {
        let required = || PlayerError::Validation(CREATE_FIELDS_REQUIRED.to_string());

        let telegram_id = require_telegram_id(self.telegram_id.as_ref(), CREATE_FIELDS_REQUIRED)?;
        let first_name = self
            .first_name
            .filter(|name| !name.is_empty())
            .ok_or_else(required)?;

        Ok(NewPlayer {
            telegram_id,
            username: self.username.unwrap_or_default(),
            first_name,
            last_name: self.last_name.unwrap_or_default(),
            photo_url: self.photo_url.unwrap_or_default(),
        })
    }
}

/// Profile returned from create-or-login.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerSummary {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub coins: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rubies: i64,
    pub total_wins: i32,
    pub total_games: i32,
}

impl From<PlayerProfile> for PlayerSummary {
    fn from(profile: PlayerProfile) -> Self {
        Self {
            id: profile.id,
            telegram_id: profile.telegram_id,
            username: profile.username,
            first_name: profile.first_name,
            last_name: profile.last_name,
            photo_url: profile.photo_url,
            coins: profile.coins,
            rubies: profile.rubies,
            total_wins: profile.total_wins,
            total_games: profile.total_games,
        }
    }
}

/// 201 when the player was created, 200 when an existing player logged in.
async fn create_or_login(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<(StatusCode, Json<PlayerSummary>)> {
    let request: CreatePlayerRequest = super::parse_json(&body)?;
    let new_player = request.into_new_player()?;

    let outcome = state.players.upsert_profile(&new_player).await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((status, Json(outcome.player.into())))
}

// ─── Balances ────────────────────────────────────────────────

#[derive(Deserialize)]
struct UpdateBalancesRequest {
    telegram_id: Option<FieldValue>,
    #[serde(flatten)]
    balances: BalanceUpdate,
}

async fn update_balances(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<PlayerBalances>> {
    let request: UpdateBalancesRequest = super::parse_json(&body)?;
    let telegram_id = require_telegram_id(request.telegram_id.as_ref(), TELEGRAM_ID_REQUIRED)?;

    let balances = state
        .players
        .adjust_balances(telegram_id, request.balances)
        .await?;

    Ok(Json(balances))
}
