//! OAuth tokens issued by the bank.
//!
//! This module provides the [`Token`] type held by clients and persisted by
//! token stores, and the parsing of token endpoint responses.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::clients::ProtocolError;

/// Token type assumed when the server omits `token_type`.
pub const DEFAULT_TOKEN_TYPE: &str = "Bearer";

/// Lifetime in seconds assumed when the server omits `expires_in`.
pub const DEFAULT_EXPIRES_IN: u64 = 3600;

/// An access token together with its refresh token and metadata.
///
/// The client never refreshes or discards a token on its own; [`Token::expired`]
/// is informational.
///
/// # Thread Safety
///
/// `Token` is `Send + Sync`, making it safe to share across threads.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::Token;
///
/// let token = Token::new("access")
///     .with_refresh_token("refresh")
///     .with_expires_in(600);
///
/// assert_eq!(token.token_type, "Bearer");
/// assert!(!token.expired());
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// The bearer credential sent with resource requests.
    pub access_token: String,

    /// The credential used to obtain a new access token, if issued.
    #[serde(default)]
    pub refresh_token: Option<String>,

    /// Lifetime of the access token in seconds, counted from `issued_at`.
    pub expires_in: u64,

    /// The token type, normally `Bearer`.
    pub token_type: String,

    /// The scope granted by the server, if reported.
    #[serde(default)]
    pub scope: Option<String>,

    /// When the token was received.
    pub issued_at: DateTime<Utc>,
}

impl Token {
    /// Creates a bearer token issued now with the default lifetime.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            expires_in: DEFAULT_EXPIRES_IN,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            scope: None,
            issued_at: Utc::now(),
        }
    }

    /// Sets the refresh token.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Sets the lifetime in seconds.
    #[must_use]
    pub const fn with_expires_in(mut self, expires_in: u64) -> Self {
        self.expires_in = expires_in;
        self
    }

    /// Sets the token type.
    #[must_use]
    pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
        self.token_type = token_type.into();
        self
    }

    /// Sets the granted scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// Returns when the access token stops being valid.
    #[must_use]
    pub fn expires_at(&self) -> DateTime<Utc> {
        let lifetime = i64::try_from(self.expires_in).unwrap_or(i64::MAX);
        Duration::try_seconds(lifetime)
            .and_then(|lifetime| self.issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// Returns `true` if the access token's lifetime has elapsed.
    #[must_use]
    pub fn expired(&self) -> bool {
        Utc::now() >= self.expires_at()
    }

    /// Returns `true` if a refresh token is available.
    #[must_use]
    pub const fn has_refresh_token(&self) -> bool {
        self.refresh_token.is_some()
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"*****")
            .field(
                "refresh_token",
                &self.refresh_token.as_ref().map(|_| "*****"),
            )
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}

// Verify Token is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Token>();
};

/// Successful token endpoint response body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default, deserialize_with = "deserialize_seconds")]
    expires_in: Option<u64>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    /// Interprets an already parsed body that carries no `error` field.
    pub(crate) fn from_body(body: Value, status: u16) -> Result<Self, ProtocolError> {
        if !body.is_object() {
            return Err(ProtocolError::UnexpectedShape {
                status,
                message: "token response is not a JSON object".to_string(),
            });
        }
        serde_json::from_value(body).map_err(|e| ProtocolError::UnexpectedShape {
            status,
            message: e.to_string(),
        })
    }

    /// Converts the response into a [`Token`] issued now.
    pub(crate) fn into_token(self, status: u16) -> Result<Token, ProtocolError> {
        let access_token = self
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ProtocolError::UnexpectedShape {
                status,
                message: "missing access_token".to_string(),
            })?;

        Ok(Token {
            access_token,
            refresh_token: self.refresh_token.filter(|token| !token.is_empty()),
            expires_in: self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN),
            token_type: self
                .token_type
                .unwrap_or_else(|| DEFAULT_TOKEN_TYPE.to_string()),
            scope: self.scope,
            issued_at: Utc::now(),
        })
    }
}

/// Accepts `expires_in` as a number or a numeric string.
fn deserialize_seconds<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_u64()
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid expires_in: {n}"))),
        Some(Value::String(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| D::Error::custom(format!("invalid expires_in: {s}"))),
        Some(other) => Err(D::Error::custom(format!("invalid expires_in: {other}"))),
    }
}
