//! Configuration types for the Tatra banka API SDK.
//!
//! This module provides the configuration used to construct clients.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`BankConfig`]: The main configuration struct holding all SDK settings
//! - [`BankConfigBuilder`]: A builder for constructing [`BankConfig`] instances
//! - [`Credentials`]: The OAuth client credentials (identity basis for token storage)
//! - [`ClientId`] / [`ClientSecret`]: Validated credential newtypes
//! - [`RedirectUri`]: A validated OAuth redirect URI
//! - [`ApiUrl`]: The API host, production by default
//! - [`ClientCategory`]: Accounts or payments
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::{BankConfig, ClientId, ClientSecret, RedirectUri};
//!
//! let config = BankConfig::builder()
//!     .client_id(ClientId::new("my-client-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
//!     .sandbox(true)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_base_url(), "https://api.tatrabanka.sk/sandbox");
//! ```

mod category;
mod newtypes;

pub use category::ClientCategory;
pub use newtypes::{ApiUrl, ClientId, ClientSecret, RedirectUri};

use crate::error::ConfigError;
use std::path::{Path, PathBuf};

/// OAuth client credentials issued by the bank.
///
/// Credentials are immutable once a config is built. Together with the
/// [`ClientCategory`] they determine where a client's token is persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    /// The OAuth client ID.
    pub client_id: ClientId,
    /// The OAuth client secret.
    pub client_secret: ClientSecret,
    /// The redirect URI registered with the bank, if any.
    pub redirect_uri: Option<RedirectUri>,
}

/// Configuration for the Tatra banka API SDK.
///
/// # Thread Safety
///
/// `BankConfig` is `Clone`, `Send`, and `Sync`.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::{BankConfig, ClientId, ClientSecret};
///
/// let config = BankConfig::builder()
///     .client_id(ClientId::new("id").unwrap())
///     .client_secret(ClientSecret::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// assert!(!config.is_sandbox());
/// assert_eq!(config.api_base_url(), "https://api.tatrabanka.sk");
/// ```
#[derive(Clone, Debug)]
pub struct BankConfig {
    credentials: Credentials,
    api_url: ApiUrl,
    sandbox: bool,
    token_dir: PathBuf,
    user_agent_prefix: Option<String>,
}

impl BankConfig {
    /// Creates a new builder for constructing a `BankConfig`.
    #[must_use]
    pub fn builder() -> BankConfigBuilder {
        BankConfigBuilder::new()
    }

    /// Returns the client credentials.
    #[must_use]
    pub const fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Returns the client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.credentials.client_id
    }

    /// Returns the client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.credentials.client_secret
    }

    /// Returns the redirect URI, if configured.
    #[must_use]
    pub const fn redirect_uri(&self) -> Option<&RedirectUri> {
        self.credentials.redirect_uri.as_ref()
    }

    /// Returns the configured API host.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns whether requests go to the sandbox environment.
    #[must_use]
    pub const fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    /// Returns the API host with the `/sandbox` segment applied when
    /// sandbox mode is enabled.
    ///
    /// Both the authorization server and the resource API live under this
    /// prefix.
    #[must_use]
    pub fn api_base_url(&self) -> String {
        if self.sandbox {
            format!("{}/sandbox", self.api_url.as_ref())
        } else {
            self.api_url.as_ref().to_string()
        }
    }

    /// Returns the directory file-backed token stores write into.
    #[must_use]
    pub fn token_dir(&self) -> &Path {
        &self.token_dir
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify BankConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<BankConfig>();
};

/// Builder for constructing [`BankConfig`] instances.
///
/// Required fields are `client_id` and `client_secret`.
///
/// # Defaults
///
/// - `redirect_uri`: `None`
/// - `api_url`: `https://api.tatrabanka.sk`
/// - `sandbox`: `false`
/// - `token_dir`: the OS temporary directory
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct BankConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    redirect_uri: Option<RedirectUri>,
    api_url: Option<ApiUrl>,
    sandbox: Option<bool>,
    token_dir: Option<PathBuf>,
    user_agent_prefix: Option<String>,
}

impl BankConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the redirect URI registered with the bank.
    #[must_use]
    pub fn redirect_uri(mut self, uri: RedirectUri) -> Self {
        self.redirect_uri = Some(uri);
        self
    }

    /// Overrides the API host.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Enables or disables the sandbox environment.
    #[must_use]
    pub const fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = Some(sandbox);
        self
    }

    /// Sets the directory file-backed token stores write into.
    #[must_use]
    pub fn token_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.token_dir = Some(dir.into());
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`BankConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id` or
    /// `client_secret` are not set.
    pub fn build(self) -> Result<BankConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;

        Ok(BankConfig {
            credentials: Credentials {
                client_id,
                client_secret,
                redirect_uri: self.redirect_uri,
            },
            api_url: self.api_url.unwrap_or_default(),
            sandbox: self.sandbox.unwrap_or(false),
            token_dir: self.token_dir.unwrap_or_else(std::env::temp_dir),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal_builder() -> BankConfigBuilder {
        BankConfig::builder()
            .client_id(ClientId::new("id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
    }

    #[test]
    fn test_builder_requires_client_id() {
        let result = BankConfigBuilder::new()
            .client_secret(ClientSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "client_id" })
        ));
    }

    #[test]
    fn test_builder_requires_client_secret() {
        let result = BankConfigBuilder::new()
            .client_id(ClientId::new("id").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "client_secret"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = minimal_builder().build().unwrap();

        assert_eq!(config.api_url(), &ApiUrl::default());
        assert!(!config.is_sandbox());
        assert!(config.redirect_uri().is_none());
        assert!(config.user_agent_prefix().is_none());
        assert_eq!(config.token_dir(), std::env::temp_dir().as_path());
    }

    #[test]
    fn test_sandbox_inserts_path_segment() {
        let config = minimal_builder().sandbox(true).build().unwrap();
        assert_eq!(config.api_base_url(), "https://api.tatrabanka.sk/sandbox");
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let redirect = RedirectUri::new("https://myapp.example.com/cb").unwrap();
        let config = minimal_builder()
            .redirect_uri(redirect.clone())
            .api_url(ApiUrl::new("http://localhost:8080").unwrap())
            .token_dir("/var/lib/myapp/tokens")
            .user_agent_prefix("MyApp/1.0")
            .build()
            .unwrap();

        assert_eq!(config.redirect_uri(), Some(&redirect));
        assert_eq!(config.api_base_url(), "http://localhost:8080");
        assert_eq!(config.token_dir(), Path::new("/var/lib/myapp/tokens"));
        assert_eq!(config.user_agent_prefix(), Some("MyApp/1.0"));
    }

    #[test]
    fn test_config_debug_does_not_leak_secret() {
        let config = minimal_builder().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("BankConfig"));
        assert!(!debug_str.contains("\"secret\""));
    }
}
