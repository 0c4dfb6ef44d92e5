// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod players;
pub mod telegram_auth;

pub use players::{PlayerError, PlayerRepository, ACHIEVEMENT_CATALOG};
pub use telegram_auth::{AuthError, TelegramVerifier};
