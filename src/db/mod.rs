// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer.
//!
//! [`PlayerStore`] is the seam between the player repository and storage.
//! Each method is one atomic unit from the caller's point of view.

pub mod memory;
pub mod postgres;

pub use memory::MemoryPlayerStore;
pub use postgres::PgPlayerStore;

use crate::models::{BalanceUpdate, NewPlayer, PlayerBalances, PlayerDetails, UpsertOutcome};

/// Failure inside a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Postgres error: {0}")]
    Postgres(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Persistent player storage.
#[async_trait::async_trait]
pub trait PlayerStore: Send + Sync {
    /// Load a player and its achievements by Telegram ID.
    async fn load_player(&self, telegram_id: i64) -> Result<Option<PlayerDetails>, StorageError>;

    /// Insert the player, or update `username` and `last_login` if it exists,
    /// then seed any missing `achievements` at zero progress.
    ///
    /// Both steps commit together. Concurrent calls for the same Telegram ID
    /// never produce a second row.
    async fn upsert_player(
        &self,
        player: &NewPlayer,
        achievements: &[&str],
    ) -> Result<UpsertOutcome, StorageError>;

    /// Overwrite the supplied balances. `None` when no player matches.
    async fn update_balances(
        &self,
        telegram_id: i64,
        update: &BalanceUpdate,
    ) -> Result<Option<PlayerBalances>, StorageError>;
}
