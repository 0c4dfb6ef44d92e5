// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Player profile repository: create-or-login, profile reads and balance writes.

use std::sync::Arc;

use crate::db::{PlayerStore, StorageError};
use crate::models::{BalanceUpdate, NewPlayer, PlayerBalances, PlayerDetails, UpsertOutcome};

/// Achievements every player starts with, at zero progress.
pub const ACHIEVEMENT_CATALOG: [&str; 4] = [
    "Первая победа",
    "Мастер колеса",
    "Коллекционер",
    "Везунчик",
];

/// Player repository errors.
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// Missing or invalid caller input, detected before touching storage
    #[error("{0}")]
    Validation(String),

    #[error("No fields to update")]
    NoFieldsToUpdate,

    #[error("Player not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Player operations on top of a [`PlayerStore`].
#[derive(Clone)]
pub struct PlayerRepository {
    store: Arc<dyn PlayerStore>,
}

impl PlayerRepository {
    pub fn new(store: Arc<dyn PlayerStore>) -> Self {
        Self { store }
    }

    /// Fetch a player and its achievements.
    pub async fn fetch_profile(&self, telegram_id: i64) -> Result<PlayerDetails, PlayerError> {
        self.store
            .load_player(telegram_id)
            .await?
            .ok_or(PlayerError::NotFound)
    }

    /// Create the player on first login, otherwise refresh `username` and
    /// `last_login` only. The achievement catalog is seeded in the same step;
    /// seeding an existing player leaves its rows alone.
    pub async fn upsert_profile(&self, player: &NewPlayer) -> Result<UpsertOutcome, PlayerError> {
        let outcome = self
            .store
            .upsert_player(player, &ACHIEVEMENT_CATALOG)
            .await?;

        if outcome.created {
            tracing::info!(
                telegram_id = player.telegram_id,
                player_id = outcome.player.id,
                "New player created"
            );
        } else {
            tracing::debug!(
                telegram_id = player.telegram_id,
                player_id = outcome.player.id,
                "Player logged in"
            );
        }

        Ok(outcome)
    }

    /// Overwrite the supplied balances.
    pub async fn adjust_balances(
        &self,
        telegram_id: i64,
        update: BalanceUpdate,
    ) -> Result<PlayerBalances, PlayerError> {
        if update.is_empty() {
            return Err(PlayerError::NoFieldsToUpdate);
        }

        let balances = self
            .store
            .update_balances(telegram_id, &update)
            .await?
            .ok_or(PlayerError::NotFound)?;

        tracing::info!(
            telegram_id,
            coins = balances.coins,
            rubies = balances.rubies,
            "Balances updated"
        );

        Ok(balances)
    }
}
