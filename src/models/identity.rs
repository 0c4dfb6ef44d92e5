//! Telegram login payloads: the untrusted assertion and the verified identity.

use serde::{Deserialize, Serialize};
use std::fmt;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A scalar field value as sent by the Telegram login widget.
///
/// The widget sends numbers for `id` and `auth_date` and strings for the rest,
/// but the signature covers the textual rendering, so both are accepted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(serde_json::Number),
    Text(String),
}

impl FieldValue {
    /// Empty strings and zero count as missing for required fields.
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Number(n) => n.as_f64() == Some(0.0),
            FieldValue::Text(s) => s.is_empty(),
        }
    }

    /// Integer view of the value, accepting numeric strings.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(n) => n.as_i64(),
            FieldValue::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value.into())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

/// Login payload posted by the client. Nothing in here is trusted until verified.
///
/// Absent and `null` fields both deserialize to `None`; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthAssertion {
    pub id: Option<FieldValue>,
    pub first_name: Option<FieldValue>,
    pub last_name: Option<FieldValue>,
    pub username: Option<FieldValue>,
    pub photo_url: Option<FieldValue>,
    pub auth_date: Option<FieldValue>,
    /// Hex HMAC-SHA256 over the data-check string
    pub hash: Option<String>,
}

impl AuthAssertion {
    /// The signed fields, keyed by their wire names, in declaration order.
    pub fn signed_fields(&self) -> [(&'static str, Option<&FieldValue>); 6] {
        [
            ("id", self.id.as_ref()),
            ("first_name", self.first_name.as_ref()),
            ("last_name", self.last_name.as_ref()),
            ("username", self.username.as_ref()),
            ("photo_url", self.photo_url.as_ref()),
            ("auth_date", self.auth_date.as_ref()),
        ]
    }
}

/// Identity returned after a successful signature check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct VerifiedIdentity {
    #[cfg_attr(feature = "binding-generation", ts(type = "number | string"))]
    pub user_id: FieldValue,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub photo_url: String,
    /// Always `true`; failures never produce a `VerifiedIdentity`.
    pub authenticated: bool,
}
