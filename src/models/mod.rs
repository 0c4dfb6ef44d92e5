// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod identity;
pub mod player;

pub use identity::{AuthAssertion, FieldValue, VerifiedIdentity};
pub use player::{
    AchievementRecord, BalanceUpdate, NewPlayer, PlayerBalances, PlayerDetails, PlayerProfile,
    UpsertOutcome,
};
