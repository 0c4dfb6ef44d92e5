//! Player profile and achievement models for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Player profile row, one per Telegram user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerProfile {
    /// Surrogate key assigned by storage
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    /// Telegram user ID (unique)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: String,
    /// Soft currency balance
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub coins: i64,
    /// Hard currency balance
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rubies: i64,
    pub total_wins: i32,
    pub total_games: i32,
    pub created_at: DateTime<Utc>,
    /// Bumped on every create-or-login
    pub last_login: DateTime<Utc>,
}

/// Progress on one catalog achievement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct AchievementRecord {
    pub achievement_name: String,
    pub progress: i32,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
}

impl AchievementRecord {
    /// Fresh zero-progress record for a newly seeded achievement.
    pub fn seeded(name: &str) -> Self {
        Self {
            achievement_name: name.to_string(),
            progress: 0,
            completed: false,
            completed_at: None,
        }
    }
}

/// A profile together with its achievements.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDetails {
    pub profile: PlayerProfile,
    pub achievements: Vec<AchievementRecord>,
}

/// Input for create-or-login. Optional fields are already defaulted to `""`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub telegram_id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub photo_url: String,
}

/// Result of create-or-login.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertOutcome {
    pub player: PlayerProfile,
    /// `true` when the row was inserted, `false` when an existing row was updated
    pub created: bool,
}

/// Balances to overwrite. `None` leaves a field untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct BalanceUpdate {
    pub coins: Option<i64>,
    pub rubies: Option<i64>,
}

impl BalanceUpdate {
    pub fn is_empty(&self) -> bool {
        self.coins.is_none() && self.rubies.is_none()
    }
}

/// Balances after an adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PlayerBalances {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub telegram_id: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub coins: i64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub rubies: i64,
}
