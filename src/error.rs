//! Error types for the Tatra banka API SDK.
//!
//! This module contains the configuration error type. Errors raised by the
//! other layers live next to the code that produces them:
//!
//! - [`ValidationError`](crate::validation::ValidationError): bad caller input
//! - [`OAuthError`](crate::auth::oauth::OAuthError): token endpoint failures
//! - [`PersistenceError`](crate::auth::store::PersistenceError): token store failures
//! - [`RequestError`](crate::clients::RequestError): resource API call failures
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::{ClientId, ConfigError};
//!
//! let result = ClientId::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyClientId)));
//! ```

use thiserror::Error;

/// Errors that can occur during SDK configuration.
///
/// All configuration constructors return `Result<T, ConfigError>` so that
/// invalid values are rejected before any client is built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Client ID cannot be empty.
    #[error("Client ID cannot be empty. Please provide the client ID issued by the bank.")]
    EmptyClientId,

    /// Client secret cannot be empty.
    #[error("Client secret cannot be empty. Please provide the client secret issued by the bank.")]
    EmptyClientSecret,

    /// Redirect URI is invalid.
    #[error("Invalid redirect URI '{url}'. Please provide an absolute URL (e.g., 'https://myapp.example.com/callback').")]
    InvalidRedirectUri {
        /// The invalid URL that was provided.
        url: String,
    },

    /// API base URL is invalid.
    #[error("Invalid API URL '{url}'. Expected an absolute http(s) URL without a trailing path.")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The default HTTP transport could not be created.
    #[error("Failed to initialize HTTP transport: {reason}")]
    TransportInit {
        /// Why the transport could not be built.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_client_id_error_message() {
        let message = ConfigError::EmptyClientId.to_string();
        assert!(message.contains("Client ID cannot be empty"));
    }

    #[test]
    fn test_invalid_redirect_uri_error_message() {
        let error = ConfigError::InvalidRedirectUri {
            url: "not a url".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("not a url"));
        assert!(message.contains("absolute URL"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "client_id" };
        let message = error.to_string();
        assert!(message.contains("client_id"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let _: &dyn std::error::Error = &ConfigError::EmptyClientSecret;
    }
}
