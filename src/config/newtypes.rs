//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A validated OAuth client ID.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::ClientId;
///
/// let id = ClientId::new("my-client-id").unwrap();
/// assert_eq!(id.as_ref(), "my-client-id");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientId(String);

impl ClientId {
    /// Creates a new validated client ID.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientId`] if the ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ConfigError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigError::EmptyClientId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for ClientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated OAuth client secret.
///
/// The `Debug` implementation masks the value so the secret cannot leak
/// through logs or panic messages.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::ClientSecret;
///
/// let secret = ClientSecret::new("my-secret").unwrap();
/// assert_eq!(format!("{:?}", secret), "ClientSecret(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    /// Creates a new validated client secret.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyClientSecret`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, ConfigError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(ConfigError::EmptyClientSecret);
        }
        Ok(Self(secret))
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientSecret(*****)")
    }
}

/// Byte offsets of the scheme and host inside an absolute URL.
struct UrlParts {
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

/// Splits `url` into scheme and host, rejecting anything that is not an
/// absolute URL with an alphabetic scheme and a non-empty host.
fn split_absolute_url(url: &str) -> Option<UrlParts> {
    let scheme_end = url.find("://")?;
    let scheme = &url[..scheme_end];
    if scheme.is_empty() || !scheme.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let host_start = scheme_end + 3;
    if host_start >= url.len() {
        return None;
    }

    let remainder = &url[host_start..];
    let host_end = remainder
        .find([':', '/', '?', '#'])
        .map_or(url.len(), |i| host_start + i);

    let host = &url[host_start..host_end];
    if host.is_empty() || host.chars().any(char::is_whitespace) {
        return None;
    }

    Some(UrlParts {
        scheme_end,
        host_start,
        host_end,
    })
}

/// A validated OAuth redirect URI.
///
/// The bank redirects the user back to this URL after consent, so it must
/// be absolute.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::RedirectUri;
///
/// let uri = RedirectUri::new("https://myapp.example.com/callback").unwrap();
/// assert_eq!(uri.host_name(), "myapp.example.com");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RedirectUri {
    url: String,
    host_start: usize,
    host_end: usize,
}

impl RedirectUri {
    /// Creates a new validated redirect URI.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidRedirectUri`] if the URL is not absolute.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into().trim().to_string();
        let parts =
            split_absolute_url(&url).ok_or_else(|| ConfigError::InvalidRedirectUri {
                url: url.clone(),
            })?;

        Ok(Self {
            host_start: parts.host_start,
            host_end: parts.host_end,
            url,
        })
    }

    /// Returns the host name portion of the URI.
    #[must_use]
    pub fn host_name(&self) -> &str {
        &self.url[self.host_start..self.host_end]
    }
}

impl AsRef<str> for RedirectUri {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl Serialize for RedirectUri {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.url)
    }
}

impl<'de> Deserialize<'de> for RedirectUri {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(de::Error::custom)
    }
}

/// The base URL of the bank's API host.
///
/// Only `http` and `https` are accepted, and any trailing slash is removed so
/// paths can be appended directly.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::ApiUrl;
///
/// let url = ApiUrl::new("https://api.tatrabanka.sk/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.tatrabanka.sk");
/// assert_eq!(url.scheme(), "https");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
}

impl ApiUrl {
    /// Production API host.
    pub const PRODUCTION: &'static str = "https://api.tatrabanka.sk";

    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL is not an absolute
    /// `http`/`https` URL, or carries a query string or fragment.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let raw = url.into();
        let url = raw.trim().trim_end_matches('/').to_string();
        let invalid = || ConfigError::InvalidApiUrl { url: raw.clone() };

        let parts = split_absolute_url(&url).ok_or_else(invalid)?;
        let scheme = &url[..parts.scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(invalid());
        }
        if url.contains(['?', '#']) {
            return Err(invalid());
        }

        Ok(Self {
            scheme_end: parts.scheme_end,
            url,
        })
    }

    /// Returns the URL scheme (e.g., "https").
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self {
            url: Self::PRODUCTION.to_string(),
            scheme_end: 5,
        }
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}
