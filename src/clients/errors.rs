//! Error types for the request pipeline.
//!
//! This module contains the error types shared by the authorization and
//! resource clients:
//!
//! - [`TransportError`]: the HTTP transport could not complete the exchange
//! - [`ProtocolError`]: a response arrived but its body is not usable JSON
//! - [`ApiResponseError`]: the server answered with an `error` object
//! - [`RequestError`]: unified error for resource API calls
//!
//! # Example
//!
//! ```rust,ignore
//! use tatrabanka_api::clients::RequestError;
//!
//! match accounts.get_accounts(&query).await {
//!     Ok(payload) => println!("{payload}"),
//!     Err(e) if e.is_unauthorized() => {
//!         accounts.client_mut().refresh_access_token().await?;
//!     }
//!     Err(RequestError::Api(e)) => println!("API error {}: {}", e.status, e.code),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

use crate::auth::store::PersistenceError;
use crate::validation::ValidationError;

/// Error returned when the HTTP exchange itself fails (DNS, connect, TLS,
/// timeout, broken connection).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Transport error: {message}")]
pub struct TransportError {
    /// Human readable description from the transport.
    pub message: String,
    /// Transport-specific error code, when the transport provides one.
    pub code: Option<u32>,
}

impl TransportError {
    /// Creates a transport error without a code.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self {
            message: error.to_string(),
            code: error.status().map(|status| u32::from(status.as_u16())),
        }
    }
}

/// Error returned when a response body cannot be interpreted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// The server returned no body at all.
    #[error("Empty response body (HTTP {status})")]
    EmptyBody {
        /// The HTTP status code of the response.
        status: u16,
    },

    /// The body is not valid JSON.
    #[error("Unable to read JSON response (HTTP {status}): {message}")]
    InvalidJson {
        /// The HTTP status code of the response.
        status: u16,
        /// The parser error.
        message: String,
    },

    /// The body is JSON but lacks required fields.
    #[error("Unexpected response shape (HTTP {status}): {message}")]
    UnexpectedShape {
        /// The HTTP status code of the response.
        status: u16,
        /// What was missing or malformed.
        message: String,
    },
}

/// An `{"error": ..., "error_description": ...}` body returned by the bank.
///
/// Both the authorization server and the resource API report failures this
/// way.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{code}{}: HTTP {status}", description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
pub struct ApiResponseError {
    /// The server-supplied error code (e.g. `invalid_token`).
    pub code: String,
    /// The server-supplied description, if any.
    pub description: Option<String>,
    /// The HTTP status code of the response.
    pub status: u16,
}

impl ApiResponseError {
    /// Extracts an error from a parsed body, if the body carries one.
    ///
    /// Only JSON objects with a non-null `error` field count as errors.
    #[must_use]
    pub fn from_body(body: &Value, status: u16) -> Option<Self> {
        let error = body.get("error").filter(|value| !value.is_null())?;
        let code = error
            .as_str()
            .map_or_else(|| error.to_string(), ToString::to_string);
        let description = body
            .get("error_description")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Some(Self {
            code,
            description,
            status,
        })
    }
}

/// Unified error type for resource API calls.
#[derive(Debug, Error)]
pub enum RequestError {
    /// A parameter failed validation; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No access token is cached or stored; nothing was sent.
    #[error("No access token available. Authorize the client before calling the API.")]
    Unauthorized,

    /// The API answered with an error object.
    #[error("API request failed: {0}")]
    Api(ApiResponseError),

    /// The response body could not be interpreted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The HTTP exchange failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The token store could not be read.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl RequestError {
    /// Returns `true` when refreshing the access token may fix the failure:
    /// the client has no token, or the API rejected the one it sent.
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        match self {
            Self::Unauthorized => true,
            Self::Api(error) => error.status == 401 || error.code == "invalid_token",
            _ => false,
        }
    }

    /// Returns the HTTP status code associated with this error, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => Some(error.status),
            Self::Protocol(
                ProtocolError::EmptyBody { status }
                | ProtocolError::InvalidJson { status, .. }
                | ProtocolError::UnexpectedShape { status, .. },
            ) => Some(*status),
            _ => None,
        }
    }
}

// Verify error types are Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<RequestError>();
    assert_send_sync::<TransportError>();
};
