// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Telegram Login Widget signature verification.
//!
//! The widget signs the user fields with HMAC-SHA256, keyed by the SHA-256
//! digest of the bot token, over the "data-check string": every present
//! field rendered as `key=value`, sorted by key and joined with `\n`.
//!
//! `auth_date` is signed but its age is not checked here; callers that want
//! to reject stale or replayed logins must do so themselves.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::models::{AuthAssertion, FieldValue, VerifiedIdentity};

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Why a login assertion was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// `id` or `hash` missing or empty
    #[error("Invalid auth data")]
    MalformedAssertion,

    /// Computed signature differs from the supplied one
    #[error("Invalid hash")]
    SignatureMismatch,

    /// No bot token configured on this server
    #[error("Bot token not configured")]
    NotConfigured,
}

/// Verifies login assertions against one bot's token.
#[derive(Clone)]
pub struct TelegramVerifier {
    /// HMAC keyed with SHA-256(bot token), cloned per verification
    mac: Option<HmacSha256>,
}

impl TelegramVerifier {
    /// Build a verifier. `None` yields a verifier that rejects every
    /// assertion with [`AuthError::NotConfigured`].
    pub fn new(bot_token: Option<&str>) -> Self {
        // HMAC accepts keys of any length, so keying never fails.
        let mac = bot_token
            .and_then(|token| HmacSha256::new_from_slice(&derive_secret_key(token)).ok());
        Self { mac }
    }

    pub fn is_configured(&self) -> bool {
        self.mac.is_some()
    }

    /// Lowercase hex signature the widget would attach to `assertion`.
    pub fn compute_hash(&self, assertion: &AuthAssertion) -> Result<String, AuthError> {
        let mut mac = self.mac.clone().ok_or(AuthError::NotConfigured)?;
        mac.update(data_check_string(assertion).as_bytes());
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    /// Check the assertion's signature and return the identity it carries.
    pub fn verify(&self, assertion: &AuthAssertion) -> Result<VerifiedIdentity, AuthError> {
        if !self.is_configured() {
            return Err(AuthError::NotConfigured);
        }

        let received_hash = assertion
            .hash
            .as_deref()
            .filter(|hash| !hash.is_empty())
            .ok_or(AuthError::MalformedAssertion)?;
        let user_id = assertion
            .id
            .as_ref()
            .filter(|id| !id.is_blank())
            .ok_or(AuthError::MalformedAssertion)?;

        let expected_hash = self.compute_hash(assertion)?;

        if !bool::from(expected_hash.as_bytes().ct_eq(received_hash.as_bytes())) {
            return Err(AuthError::SignatureMismatch);
        }

        let text = |field: &Option<FieldValue>| {
            field.as_ref().map(ToString::to_string).unwrap_or_default()
        };

        Ok(VerifiedIdentity {
            user_id: user_id.clone(),
            first_name: text(&assertion.first_name),
            last_name: text(&assertion.last_name),
            username: text(&assertion.username),
            photo_url: text(&assertion.photo_url),
            authenticated: true,
        })
    }
}

/// Build the data-check string: present fields as `key=value`, sorted by key,
/// joined with `\n` and no trailing newline. Absent fields are skipped rather
/// than rendered empty.
pub fn data_check_string(assertion: &AuthAssertion) -> String {
    let mut pairs: Vec<(&str, String)> = assertion
        .signed_fields()
        .into_iter()
        .filter_map(|(key, value)| value.map(|v| (key, v.to_string())))
        .collect();
    pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));

    pairs
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Signing key: SHA-256 of the raw bot token bytes.
pub fn derive_secret_key(bot_token: &str) -> [u8; 32] {
    Sha256::digest(bot_token.as_bytes()).into()
}
