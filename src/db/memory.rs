// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process player store for local development and tests.
//!
//! A player row and its achievements share one map entry, so the entry lock
//! makes create-or-login and seeding a single atomic step, just like the
//! Postgres transaction.

use chrono::Utc;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use super::{PlayerStore, StorageError};
use crate::models::{
    AchievementRecord, BalanceUpdate, NewPlayer, PlayerBalances, PlayerDetails, PlayerProfile,
    UpsertOutcome,
};

/// Player store held entirely in memory, keyed by Telegram ID.
#[derive(Default)]
pub struct MemoryPlayerStore {
    players: DashMap<i64, PlayerDetails>,
    last_id: AtomicI64,
}

impl MemoryPlayerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored player rows.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}

#[async_trait::async_trait]
impl PlayerStore for MemoryPlayerStore {
    async fn load_player(&self, telegram_id: i64) -> Result<Option<PlayerDetails>, StorageError> {
        Ok(self.players.get(&telegram_id).map(|entry| entry.value().clone()))
    }

    async fn upsert_player(
        &self,
        player: &NewPlayer,
        achievements: &[&str],
    ) -> Result<UpsertOutcome, StorageError> {
        let now = Utc::now();
        let mut created = false;

        let mut entry = self
            .players
            .entry(player.telegram_id)
            .or_insert_with(|| {
                created = true;
                PlayerDetails {
                    profile: PlayerProfile {
                        id: self.last_id.fetch_add(1, Ordering::Relaxed) + 1,
                        telegram_id: player.telegram_id,
                        username: player.username.clone(),
                        first_name: player.first_name.clone(),
                        last_name: player.last_name.clone(),
                        photo_url: player.photo_url.clone(),
                        coins: 0,
                        rubies: 0,
                        total_wins: 0,
                        total_games: 0,
                        created_at: now,
                        last_login: now,
                    },
                    achievements: Vec::new(),
                }
            });

        if !created {
            entry.profile.username = player.username.clone();
            entry.profile.last_login = now;
        }

        for name in achievements {
            if !entry
                .achievements
                .iter()
                .any(|record| record.achievement_name == *name)
            {
                entry.achievements.push(AchievementRecord::seeded(name));
            }
        }

        Ok(UpsertOutcome {
            player: entry.profile.clone(),
            created,
        })
    }

    async fn update_balances(
        &self,
        telegram_id: i64,
        update: &BalanceUpdate,
    ) -> Result<Option<PlayerBalances>, StorageError> {
        let Some(mut entry) = self.players.get_mut(&telegram_id) else {
            return Ok(None);
        };

        if let Some(coins) = update.coins {
            entry.profile.coins = coins;
        }
        if let Some(rubies) = update.rubies {
            entry.profile.rubies = rubies;
        }

        Ok(Some(PlayerBalances {
            id: entry.profile.id,
            telegram_id: entry.profile.telegram_id,
            coins: entry.profile.coins,
            rubies: entry.profile.rubies,
        }))
    }
}
