//! OAuth authorization URL generation.
//!
//! This module provides [`authorization_url`] and [`begin_auth`], the first
//! step of the authorization code flow. Neither performs a network call.
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::{BankConfig, ClientCategory, ClientId, ClientSecret, RedirectUri};
//! use tatrabanka_api::auth::oauth::begin_auth;
//!
//! let config = BankConfig::builder()
//!     .client_id(ClientId::new("my-id").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://myapp.example.com/callback").unwrap())
//!     .build()
//!     .unwrap();
//!
//! let result = begin_auth(&config, ClientCategory::Accounts);
//!
//! // Store result.state in the user's session, then redirect to result.auth_url
//! assert!(result.auth_url.contains(&format!("state={}", result.state)));
//! ```

use serde_json::Value;

use crate::auth::oauth::state::StateParam;
use crate::clients::transport::encode_form;
use crate::config::{BankConfig, ClientCategory};

/// Path of the authorization endpoint below the API base URL.
pub const AUTHORIZE_PATH: &str = "/auth/oauth/v2/authorize";

/// Result of initiating OAuth authorization.
///
/// The `state` value must be kept by the application and compared with the
/// `state` query parameter of the redirect using [`StateParam::verify`].
#[derive(Clone, Debug)]
pub struct BeginAuthResult {
    /// The full authorization URL to redirect the user to.
    pub auth_url: String,

    /// The state parameter generated for this authorization request.
    pub state: StateParam,
}

/// Builds the URL the user is sent to in order to grant consent.
///
/// The query carries `client_id`, `response_type=code`, the configured
/// `redirect_uri` (omitted when none is configured) and the category scope.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::{BankConfig, ClientCategory, ClientId, ClientSecret};
/// use tatrabanka_api::auth::oauth::authorization_url;
///
/// let config = BankConfig::builder()
///     .client_id(ClientId::new("my-id").unwrap())
///     .client_secret(ClientSecret::new("my-secret").unwrap())
///     .sandbox(true)
///     .build()
///     .unwrap();
///
/// assert_eq!(
///     authorization_url(&config, ClientCategory::Accounts),
///     "https://api.tatrabanka.sk/sandbox/auth/oauth/v2/authorize?client_id=my-id&response_type=code&scope=AISP"
/// );
/// ```
#[must_use]
pub fn authorization_url(config: &BankConfig, category: ClientCategory) -> String {
    build_url(config, category, None)
}

/// Builds the authorization URL with a fresh `state` parameter appended.
#[must_use]
pub fn begin_auth(config: &BankConfig, category: ClientCategory) -> BeginAuthResult {
    let state = StateParam::new();
    let auth_url = build_url(config, category, Some(&state));
    BeginAuthResult { auth_url, state }
}

fn build_url(config: &BankConfig, category: ClientCategory, state: Option<&StateParam>) -> String {
    let mut params: Vec<(String, Value)> = vec![
        ("client_id".to_string(), config.client_id().as_ref().into()),
        ("response_type".to_string(), "code".into()),
    ];
    if let Some(redirect_uri) = config.redirect_uri() {
        params.push(("redirect_uri".to_string(), redirect_uri.as_ref().into()));
    }
    params.push(("scope".to_string(), category.scope().into()));
    if let Some(state) = state {
        params.push(("state".to_string(), state.as_ref().into()));
    }

    format!(
        "{}{AUTHORIZE_PATH}?{}",
        config.api_base_url(),
        encode_form(&params)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret, RedirectUri};

    fn config(redirect: Option<&str>) -> BankConfig {
        let mut builder = BankConfig::builder()
            .client_id(ClientId::new("client id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap());
        if let Some(redirect) = redirect {
            builder = builder.redirect_uri(RedirectUri::new(redirect).unwrap());
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_url_contains_all_parameters_in_order() {
        let url = authorization_url(
            &config(Some("https://myapp.example.com/cb")),
            ClientCategory::Accounts,
        );

        assert_eq!(
            url,
            "https://api.tatrabanka.sk/auth/oauth/v2/authorize?client_id=client%20id&response_type=code&redirect_uri=https%3A%2F%2Fmyapp.example.com%2Fcb&scope=AISP"
        );
    }

    #[test]
    fn test_url_uses_category_scope() {
        let url = authorization_url(&config(None), ClientCategory::Payments);
        assert!(url.ends_with("&scope=payments"));
        assert!(!url.contains("redirect_uri"));
    }

    #[test]
    fn test_begin_auth_appends_state() {
        let result = begin_auth(&config(None), ClientCategory::Accounts);

        assert!(result
            .auth_url
            .ends_with(&format!("&state={}", result.state)));
        assert!(result
            .auth_url
            .starts_with(&authorization_url(&config(None), ClientCategory::Accounts)));
    }

    #[test]
    fn test_begin_auth_generates_new_state_each_time() {
        let config = config(None);
        let first = begin_auth(&config, ClientCategory::Accounts);
        let second = begin_auth(&config, ClientCategory::Accounts);
        assert_ne!(first.state, second.state);
    }
}
