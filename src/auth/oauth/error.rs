//! OAuth-specific error types for the Tatra banka API SDK.
//!
//! # Error Types
//!
//! - [`OAuthError::Rejected`]: the authorization server refused the grant
//! - [`OAuthError::MissingRefreshToken`]: a refresh was requested without a refresh token
//! - [`OAuthError::Transport`]: the token endpoint could not be reached
//! - [`OAuthError::Protocol`]: the token endpoint answered with an unusable body
//! - [`OAuthError::Persistence`]: the new token could not be stored
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::auth::oauth::OAuthError;
//!
//! let error = OAuthError::Rejected {
//!     code: "invalid_grant".to_string(),
//!     description: Some("code expired".to_string()),
//!     status: 400,
//! };
//! assert!(error.to_string().contains("invalid_grant"));
//! ```

use thiserror::Error;

use crate::auth::store::PersistenceError;
use crate::clients::{ApiResponseError, ProtocolError, TransportError};

/// Errors that can occur while obtaining or refreshing a token.
///
/// # Thread Safety
///
/// `OAuthError` is `Send + Sync`, making it safe to use across async boundaries.
#[derive(Debug, Error)]
pub enum OAuthError {
    /// The authorization server answered with an `error` object.
    #[error("Token request rejected with status {status}: {code}{}", description.as_deref().map(|d| format!(" ({d})")).unwrap_or_default())]
    Rejected {
        /// The OAuth error code (e.g. `invalid_grant`).
        code: String,
        /// The server-supplied description, if any.
        description: Option<String>,
        /// The HTTP status code returned.
        status: u16,
    },

    /// The current token carries no refresh token, or there is no token at all.
    ///
    /// No request is sent in this case.
    #[error("No refresh token available. Authorize the client again to obtain a new token.")]
    MissingRefreshToken,

    /// The token endpoint could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The token endpoint response could not be interpreted.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The token was issued but could not be stored.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl From<ApiResponseError> for OAuthError {
    fn from(error: ApiResponseError) -> Self {
        Self::Rejected {
            code: error.code,
            description: error.description,
            status: error.status,
        }
    }
}

// Verify OAuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<OAuthError>();
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_from_api_response_error() {
        let error: OAuthError = ApiResponseError {
            code: "invalid_client".to_string(),
            description: None,
            status: 401,
        }
        .into();

        assert!(matches!(
            &error,
            OAuthError::Rejected { code, description: None, status: 401 } if code == "invalid_client"
        ));
        assert_eq!(
            error.to_string(),
            "Token request rejected with status 401: invalid_client"
        );
    }

    #[test]
    fn test_missing_refresh_token_message() {
        let message = OAuthError::MissingRefreshToken.to_string();
        assert!(message.contains("No refresh token"));
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let error = OAuthError::from(TransportError::new("connection refused"));
        assert_eq!(error.to_string(), "Transport error: connection refused");
    }
}
