// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! SlotsFight backend: Telegram login verification and player profiles
//!
//! This crate provides the HTTP API that turns a signed Telegram Login
//! Widget payload into a trusted identity and keeps each player's balances
//! and achievement progress.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::PlayerStore;
use services::{PlayerRepository, TelegramVerifier};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub verifier: TelegramVerifier,
    pub players: PlayerRepository,
}

impl AppState {
    /// Wire the services for `config` on top of `store`.
    pub fn new(config: Config, store: Arc<dyn PlayerStore>) -> Self {
        let verifier = TelegramVerifier::new(config.telegram_bot_token.as_deref());
        Self {
            config,
            verifier,
            players: PlayerRepository::new(store),
        }
    }
}
