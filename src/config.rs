// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and shared read-only for the lifetime of the
//! process. The bot token is optional here: a missing token is reported per
//! request as a server misconfiguration rather than refusing to start.

use std::env;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Application configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Server port
    pub port: u16,
    /// Comma-separated list of allowed CORS origins, or `*`
    pub cors_allowed_origins: String,
    /// Upper bound for the Postgres connection pool
    pub database_max_connections: u32,

    // --- Secrets ---
    /// Telegram bot token used to derive the login signing key
    pub telegram_bot_token: Option<String>,
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
}

// Hand-written so secrets never end up in logs.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("database_max_connections", &self.database_max_connections)
            .field(
                "telegram_bot_token",
                &self.telegram_bot_token.as_ref().map(|_| "<redacted>"),
            )
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file in the working directory is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            port: parse_var("PORT", DEFAULT_PORT)?,
            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|_| "*".to_string()),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
            telegram_bot_token: secret_var("TELEGRAM_BOT_TOKEN"),
            database_url: secret_var("DATABASE_URL"),
        })
    }

    /// Deterministic config for tests.
    pub fn test_default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_allowed_origins: "*".to_string(),
            database_max_connections: 1,
            telegram_bot_token: Some("BOT:SECRET".to_string()),
            database_url: None,
        }
    }
}

/// Read a secret, trimming whitespace. Empty values count as unset.
fn secret_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
