//! Authenticated client for the resource API.
//!
//! [`ApiClient`] ties together the token store, the token endpoint client
//! and the HTTP transport. It owns a [`SessionState`] holding the cached
//! token and the last observed status code.
//!
//! # Request Pipeline
//!
//! For every [`ApiClient::send_api_request`] call the client:
//!
//! 1. loads the token from the store if none is cached, and fails with
//!    [`RequestError::Unauthorized`] without touching the network if there
//!    is still none
//! 2. builds `{api_base_url}/api/v1/{path}`
//! 3. attaches `Authorization`, a fresh `Request-ID`, `User-Agent` and
//!    `Content-Type`, in that order
//! 4. sends the request, records the status code and interprets the body
//!
//! Nothing is retried. When [`RequestError::is_unauthorized`] reports a
//! rejected token, call [`ApiClient::refresh_access_token`] and re-issue the
//! request.
//!
//! # Example
//!
//! ```rust,ignore
//! use tatrabanka_api::{ApiClient, ApiRequest, ClientCategory};
//!
//! let mut client = ApiClient::new(config, ClientCategory::Accounts)?;
//! let request = ApiRequest::get("accounts").param("page", 1);
//!
//! let accounts = match client.send_api_request(request.clone()).await {
//!     Err(e) if e.is_unauthorized() => {
//!         client.refresh_access_token().await?;
//!         client.send_api_request(request).await?
//!     }
//!     other => other?,
//! };
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::auth::oauth::{AuthClient, BeginAuthResult, OAuthError};
use crate::auth::store::{FileTokenStore, PersistenceError, TokenStore};
use crate::auth::Token;
use crate::clients::errors::{ApiResponseError, RequestError};
use crate::clients::http_client::{user_agent, ReqwestTransport};
use crate::clients::transport::{BodyEncoding, HttpMethod, HttpTransport, TransportRequest};
use crate::config::{BankConfig, ClientCategory};
use crate::error::ConfigError;

/// Path prefix of the resource API below the API base URL.
pub const API_PATH: &str = "/api/v1";

/// A resource API call before authentication headers are attached.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::{ApiRequest, BodyEncoding, HttpMethod};
///
/// let request = ApiRequest::post_json("accounts/information")
///     .param("iban", "SK3112000000198742637541");
///
/// assert_eq!(request.method, HttpMethod::Post);
/// assert_eq!(request.encoding, BodyEncoding::Json);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    /// Path relative to `/api/v1/`.
    pub path: String,
    /// The HTTP method.
    pub method: HttpMethod,
    /// Parameters in insertion order.
    pub params: Vec<(String, Value)>,
    /// How `params` are encoded.
    pub encoding: BodyEncoding,
}

impl ApiRequest {
    /// Creates a request with no parameters.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>, encoding: BodyEncoding) -> Self {
        Self {
            path: path.into(),
            method,
            params: Vec::new(),
            encoding,
        }
    }

    /// A form-encoded GET; parameters end up in the query string.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, BodyEncoding::Form)
    }

    /// A POST with a form-encoded body.
    #[must_use]
    pub fn post_form(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path, BodyEncoding::Form)
    }

    /// A POST with a JSON body.
    #[must_use]
    pub fn post_json(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path, BodyEncoding::Json)
    }

    /// Appends a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }
}

/// Mutable per-client state.
#[derive(Clone, Debug, Default)]
pub struct SessionState {
    token: Option<Token>,
    last_response_code: Option<u16>,
}

impl SessionState {
    /// Returns the cached token, if any.
    #[must_use]
    pub const fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Returns the status code of the last resource API response.
    #[must_use]
    pub const fn last_response_code(&self) -> Option<u16> {
        self.last_response_code
    }
}

/// Authenticated client for one [`ClientCategory`].
///
/// Operations that change the session take `&mut self`. To share a client
/// between tasks, wrap it in a `tokio::sync::Mutex`.
///
/// # Blocking I/O
///
/// [`TokenStore`] is synchronous. With the default [`FileTokenStore`], the
/// first token lookup and every successful grant read or write a small file
/// (the write is followed by an fsync) on the calling task. Callers that
/// cannot afford that on an async executor thread should pass a
/// non-blocking store to [`with_parts`](Self::with_parts), or run those
/// calls from a blocking context.
///
/// # Thread Safety
///
/// `ApiClient` is `Send + Sync`.
pub struct ApiClient {
    config: Arc<BankConfig>,
    category: ClientCategory,
    auth: AuthClient,
    transport: Arc<dyn HttpTransport>,
    store: Arc<dyn TokenStore>,
    session: SessionState,
    user_agent: String,
}

// Verify ApiClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiClient>();
};

impl ApiClient {
    /// Creates a client using [`ReqwestTransport`] and a [`FileTokenStore`]
    /// under the configured token directory.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP client cannot be
    /// created.
    pub fn new(config: BankConfig, category: ClientCategory) -> Result<Self, ConfigError> {
        let transport = Arc::new(ReqwestTransport::new()?);
        let store = Arc::new(FileTokenStore::for_client(
            config.token_dir(),
            category,
            config.credentials(),
        ));
        Ok(Self::with_parts(config, category, transport, store))
    }

    /// Creates a client with an explicit transport and token store.
    #[must_use]
    pub fn with_parts(
        config: BankConfig,
        category: ClientCategory,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn TokenStore>,
    ) -> Self {
        let config = Arc::new(config);
        let auth = AuthClient::new(Arc::clone(&config), category, Arc::clone(&transport));
        let user_agent = user_agent(&config);
        Self {
            config,
            category,
            auth,
            transport,
            store,
            session: SessionState::default(),
            user_agent,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Returns the client category.
    #[must_use]
    pub const fn category(&self) -> ClientCategory {
        self.category
    }

    /// Returns the token endpoint client.
    #[must_use]
    pub const fn auth(&self) -> &AuthClient {
        &self.auth
    }

    /// Returns the session state.
    #[must_use]
    pub const fn session(&self) -> &SessionState {
        &self.session
    }

    /// Returns the status code of the last resource API response.
    #[must_use]
    pub const fn last_response_code(&self) -> Option<u16> {
        self.session.last_response_code
    }

    /// Returns the consent URL for this client's category.
    #[must_use]
    pub fn authorization_url(&self) -> String {
        self.auth.authorization_url()
    }

    /// Returns the consent URL with a fresh CSRF `state` parameter.
    #[must_use]
    pub fn begin_auth(&self) -> BeginAuthResult {
        self.auth.begin_auth()
    }

    /// Returns the absolute URL of a resource path.
    #[must_use]
    pub fn resource_url(&self, path: &str) -> String {
        format!(
            "{}{API_PATH}/{}",
            self.config.api_base_url(),
            path.trim_start_matches('/')
        )
    }

    /// Returns the current token, reading the store if none is cached.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the store cannot be read.
    pub fn token(&mut self) -> Result<Option<&Token>, PersistenceError> {
        if self.session.token.is_none() {
            self.session.token = self.store.load()?;
        }
        Ok(self.session.token.as_ref())
    }

    /// Returns `true` if a token is cached or stored.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the store cannot be read.
    pub fn is_authorized(&mut self) -> Result<bool, PersistenceError> {
        Ok(self.token()?.is_some())
    }

    /// Stores a token obtained elsewhere and starts using it.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the token cannot be stored; the
    /// cached token is left unchanged.
    pub fn set_token(&mut self, token: Token) -> Result<&Token, PersistenceError> {
        self.store.save(&token)?;
        Ok(self.session.token.insert(token))
    }

    /// Exchanges an authorization code and starts using the new token.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError`] if the exchange or the store write fails; the
    /// cached token is left unchanged.
    pub async fn request_access_token(&mut self, code: &str) -> Result<&Token, OAuthError> {
        let token = self.auth.exchange_authorization_code(code).await?;
        Ok(self.set_token(token)?)
    }

    /// Obtains a token with the client credentials grant and starts using it.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError`] if the exchange or the store write fails; the
    /// cached token is left unchanged.
    pub async fn request_client_credentials_token(&mut self) -> Result<&Token, OAuthError> {
        let token = self.auth.exchange_client_credentials().await?;
        Ok(self.set_token(token)?)
    }

    /// Refreshes the current token and starts using the new one.
    ///
    /// # Errors
    ///
    /// Returns [`OAuthError::MissingRefreshToken`] without a network call if
    /// there is no token or it has no refresh token. Otherwise fails like
    /// [`request_access_token`](Self::request_access_token). On any failure
    /// the cached token is left unchanged.
    pub async fn refresh_access_token(&mut self) -> Result<&Token, OAuthError> {
        let current = self
            .token()?
            .cloned()
            .ok_or(OAuthError::MissingRefreshToken)?;
        let token = self.auth.refresh(&current).await?;
        Ok(self.set_token(token)?)
    }

    /// Sends an authenticated request to the resource API.
    ///
    /// Returns the parsed JSON body unchanged.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Unauthorized`] if no token is available (nothing is sent)
    /// - [`RequestError::Api`] if the body carries an `error` field
    /// - [`RequestError::Protocol`] if the body is empty or not JSON
    /// - [`RequestError::Transport`] if the exchange fails
    /// - [`RequestError::Persistence`] if the store cannot be read
    pub async fn send_api_request(&mut self, request: ApiRequest) -> Result<Value, RequestError> {
        let access_token = match self.token()? {
            Some(token) => token.access_token.clone(),
            None => return Err(RequestError::Unauthorized),
        };

        let request_id = Uuid::new_v4().to_string();
        let transport_request =
            TransportRequest::builder(request.method, self.resource_url(&request.path))
                .header("Authorization", format!("Bearer {access_token}"))
                .header("Request-ID", &request_id)
                .header("User-Agent", &self.user_agent)
                .params(request.params)
                .encoding(request.encoding)
                .build();

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            request_id = %request_id,
            "Sending API request"
        );

        self.session.last_response_code = None;
        let response = self.transport.send(transport_request).await?;
        self.session.last_response_code = Some(response.status);

        let body = response.json()?;
        if let Some(error) = ApiResponseError::from_body(&body, response.status) {
            tracing::debug!(
                path = %request.path,
                request_id = %request_id,
                status = response.status,
                code = %error.code,
                "API request failed"
            );
            return Err(RequestError::Api(error));
        }

        Ok(body)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("category", &self.category)
            .field("api_base_url", &self.config.api_base_url())
            .field("store", &self.store)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
