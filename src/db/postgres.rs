// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Postgres player store.
//!
//! Create-or-login relies on the `telegram_id` unique constraint and
//! `ON CONFLICT` instead of a read-then-insert, so concurrent logins for the
//! same user collapse onto one row.

use sqlx::{postgres::PgPoolOptions, FromRow, PgPool};

use super::{PlayerStore, StorageError};
use crate::models::{
    AchievementRecord, BalanceUpdate, NewPlayer, PlayerBalances, PlayerDetails, PlayerProfile,
    UpsertOutcome,
};

const SELECT_PLAYER: &str = r#"
    SELECT id, telegram_id, username, first_name, last_name, photo_url,
           coins, rubies, total_wins, total_games, created_at, last_login
    FROM players
    WHERE telegram_id = $1
"#;

const SELECT_ACHIEVEMENTS: &str = r#"
    SELECT achievement_name, progress, completed, completed_at
    FROM achievements
    WHERE player_id = $1
    ORDER BY id
"#;

// `xmax = 0` only holds for a freshly inserted tuple.
const UPSERT_PLAYER: &str = r#"
    INSERT INTO players (telegram_id, username, first_name, last_name, photo_url)
    VALUES ($1, $2, $3, $4, $5)
    ON CONFLICT (telegram_id) DO UPDATE
    SET username   = EXCLUDED.username,
        last_login = NOW()
    RETURNING id, telegram_id, username, first_name, last_name, photo_url,
              coins, rubies, total_wins, total_games, created_at, last_login,
              (xmax = 0) AS inserted
"#;

const SEED_ACHIEVEMENTS: &str = r#"
    INSERT INTO achievements (player_id, achievement_name, progress, completed)
    SELECT $1, name, 0, FALSE
    FROM UNNEST($2::TEXT[]) AS name
    ON CONFLICT (player_id, achievement_name) DO NOTHING
"#;

const UPDATE_BALANCES: &str = r#"
    UPDATE players
    SET coins  = COALESCE($2, coins),
        rubies = COALESCE($3, rubies)
    WHERE telegram_id = $1
    RETURNING id, telegram_id, coins, rubies
"#;

#[derive(FromRow)]
struct UpsertedPlayer {
    #[sqlx(flatten)]
    player: PlayerProfile,
    inserted: bool,
}

/// Player store backed by a Postgres connection pool.
#[derive(Clone)]
pub struct PgPlayerStore {
    pool: PgPool,
}

impl PgPlayerStore {
    /// Connect a pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!(max_connections, "Connected to Postgres");

        Ok(Self { pool })
    }

    /// Apply the schema in `./migrations`.
    pub async fn run_migrations(&self) -> Result<(), StorageError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl PlayerStore for PgPlayerStore {
    async fn load_player(&self, telegram_id: i64) -> Result<Option<PlayerDetails>, StorageError> {
        let Some(profile) = sqlx::query_as::<_, PlayerProfile>(SELECT_PLAYER)
            .bind(telegram_id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };

        let achievements = sqlx::query_as::<_, AchievementRecord>(SELECT_ACHIEVEMENTS)
            .bind(profile.id)
            .fetch_all(&self.pool)
            .await?;

        Ok(Some(PlayerDetails {
            profile,
            achievements,
        }))
    }

    async fn upsert_player(
        &self,
        player: &NewPlayer,
        achievements: &[&str],
    ) -> Result<UpsertOutcome, StorageError> {
        // The transaction rolls back on drop if any step below fails.
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, UpsertedPlayer>(UPSERT_PLAYER)
            .bind(player.telegram_id)
            .bind(&player.username)
            .bind(&player.first_name)
            .bind(&player.last_name)
            .bind(&player.photo_url)
            .fetch_one(&mut *tx)
            .await?;

        let names: Vec<String> = achievements.iter().map(|name| name.to_string()).collect();
        let seeded = sqlx::query(SEED_ACHIEVEMENTS)
            .bind(row.player.id)
            .bind(&names)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;

        tracing::debug!(
            telegram_id = player.telegram_id,
            player_id = row.player.id,
            created = row.inserted,
            seeded,
            "Player upserted"
        );

        Ok(UpsertOutcome {
            player: row.player,
            created: row.inserted,
        })
    }

    async fn update_balances(
        &self,
        telegram_id: i64,
        update: &BalanceUpdate,
    ) -> Result<Option<PlayerBalances>, StorageError> {
        let balances = sqlx::query_as::<_, PlayerBalances>(UPDATE_BALANCES)
            .bind(telegram_id)
            .bind(update.coins)
            .bind(update.rubies)
            .fetch_optional(&self.pool)
            .await?;
        Ok(balances)
    }
}
