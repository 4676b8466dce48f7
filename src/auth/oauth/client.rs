//! Token endpoint client.
//!
//! [`AuthClient`] performs the three grants the bank supports against
//! `{api_base_url}/auth/oauth/v2/token`. Every request is a form-encoded
//! POST authenticated with HTTP Basic auth built from the client
//! credentials. The client is stateless: it returns the new [`Token`] and
//! leaves persistence to the caller.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tatrabanka_api::auth::oauth::AuthClient;
//! use tatrabanka_api::clients::ReqwestTransport;
//! use tatrabanka_api::ClientCategory;
//!
//! let auth = AuthClient::new(
//!     Arc::new(config),
//!     ClientCategory::Payments,
//!     Arc::new(ReqwestTransport::new()?),
//! );
//! let token = auth.exchange_client_credentials().await?;
//! ```

use std::fmt;
use std::sync::Arc;

use base64::prelude::*;
use serde_json::Value;

use crate::auth::oauth::begin_auth::{authorization_url, begin_auth, BeginAuthResult};
use crate::auth::oauth::OAuthError;
use crate::auth::token::{Token, TokenResponse};
use crate::clients::http_client::user_agent;
use crate::clients::{ApiResponseError, HttpMethod, HttpTransport, TransportRequest};
use crate::config::{BankConfig, ClientCategory};

/// Path of the token endpoint below the API base URL.
pub const TOKEN_PATH: &str = "/auth/oauth/v2/token";

const AUTHORIZATION_CODE_GRANT_TYPE: &str = "authorization_code";
const CLIENT_CREDENTIALS_GRANT_TYPE: &str = "client_credentials";
const REFRESH_TOKEN_GRANT_TYPE: &str = "refresh_token";

/// Client for the bank's OAuth token endpoint.
///
/// # Thread Safety
///
/// `AuthClient` is `Send + Sync`; all operations take `&self`.
#[derive(Clone)]
pub struct AuthClient {
    config: Arc<BankConfig>,
    category: ClientCategory,
    transport: Arc<dyn HttpTransport>,
    user_agent: String,
}

// Verify AuthClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthClient>();
};

impl AuthClient {
    /// Creates a client for the given category.
    #[must_use]
    pub fn new(
        config: Arc<BankConfig>,
        category: ClientCategory,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let user_agent = user_agent(&config);
        Self {
            config,
            category,
            transport,
            user_agent,
        }
    }

    /// Returns the category this client requests scopes for.
    #[must_use]
    pub const fn category(&self) -> ClientCategory {
        self.category
    }

    /// Returns the absolute token endpoint URL.
    #[must_use]
    pub fn token_url(&self) -> String {
        format!("{}{TOKEN_PATH}", self.config.api_base_url())
    }

    /// Returns the consent URL for this client's category.
    ///
    /// See [`authorization_url`].
    #[must_use]
    pub fn authorization_url(&self) -> String {
        authorization_url(&self.config, self.category)
    }

    /// Returns the consent URL with a fresh CSRF `state` parameter.
    ///
    /// See [`begin_auth`].
    #[must_use]
    pub fn begin_auth(&self) -> BeginAuthResult {
        begin_auth(&self.config, self.category)
    }

    /// Exchanges an authorization code for a token.
    ///
    /// The configured redirect URI is sent along when present; it must match
    /// the one used to obtain the code.
    ///
    /// # Errors
    ///
    /// - [`OAuthError::Rejected`] if the server refuses the code
    /// - [`OAuthError::Transport`] / [`OAuthError::Protocol`] on network or body failures
    pub async fn exchange_authorization_code(&self, code: &str) -> Result<Token, OAuthError> {
        let mut params: Vec<(String, Value)> = vec![
            ("grant_type".to_string(), AUTHORIZATION_CODE_GRANT_TYPE.into()),
            ("code".to_string(), code.into()),
        ];
        if let Some(redirect_uri) = self.config.redirect_uri() {
            params.push(("redirect_uri".to_string(), redirect_uri.as_ref().into()));
        }

        self.request_token(AUTHORIZATION_CODE_GRANT_TYPE, params)
            .await
    }

    /// Obtains a token with the client credentials grant.
    ///
    /// The requested scope is the category scope. Tokens issued this way
    /// normally carry no refresh token.
    ///
    /// # Errors
    ///
    /// Same as [`exchange_authorization_code`](Self::exchange_authorization_code).
    pub async fn exchange_client_credentials(&self) -> Result<Token, OAuthError> {
        let params: Vec<(String, Value)> = vec![
            ("grant_type".to_string(), CLIENT_CREDENTIALS_GRANT_TYPE.into()),
            ("scope".to_string(), self.category.scope().into()),
        ];

        self.request_token(CLIENT_CREDENTIALS_GRANT_TYPE, params)
            .await
    }

    /// Exchanges the refresh token of `token` for a new token.
    ///
    /// The server may answer without a new refresh token, in which case the
    /// current one stays valid and is carried over to the returned token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingRefreshToken`] without contacting the
    /// server if `token` has no refresh token. Otherwise fails like
    /// [`exchange_authorization_code`](Self::exchange_authorization_code).
    pub async fn refresh(&self, token: &Token) -> Result<Token, OAuthError> {
        let refresh_token = token
            .refresh_token
            .as_deref()
            .ok_or(OAuthError::MissingRefreshToken)?;

        let params: Vec<(String, Value)> = vec![
            ("grant_type".to_string(), REFRESH_TOKEN_GRANT_TYPE.into()),
            ("refresh_token".to_string(), refresh_token.into()),
        ];

        let mut refreshed = self.request_token(REFRESH_TOKEN_GRANT_TYPE, params).await?;
        if refreshed.refresh_token.is_none() {
            refreshed.refresh_token = Some(refresh_token.to_string());
        }
        Ok(refreshed)
    }

    fn basic_auth(&self) -> String {
        let credentials = format!(
            "{}:{}",
            self.config.client_id().as_ref(),
            self.config.client_secret().as_ref()
        );
        format!("Basic {}", BASE64_STANDARD.encode(credentials))
    }

    async fn request_token(
        &self,
        grant_type: &'static str,
        params: Vec<(String, Value)>,
    ) -> Result<Token, OAuthError> {
        let request = TransportRequest::builder(HttpMethod::Post, self.token_url())
            .header("Authorization", self.basic_auth())
            .header("User-Agent", &self.user_agent)
            .params(params)
            .build();

        tracing::debug!(grant_type, category = %self.category, "Requesting token");

        let response = self.transport.send(request).await?;
        let status = response.status;
        let body = response.json()?;

        if let Some(error) = ApiResponseError::from_body(&body, status) {
            tracing::warn!(
                grant_type,
                status,
                code = %error.code,
                "Token request rejected"
            );
            return Err(error.into());
        }

        let token = TokenResponse::from_body(body, status)?.into_token(status)?;

        tracing::info!(
            grant_type,
            category = %self.category,
            has_refresh_token = token.has_refresh_token(),
            "Obtained access token"
        );

        Ok(token)
    }
}

impl fmt::Debug for AuthClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthClient")
            .field("category", &self.category)
            .field("token_url", &self.token_url())
            .field("transport", &self.transport)
            .finish_non_exhaustive()
    }
}
