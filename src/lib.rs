//! # Tatra banka API Rust SDK
//!
//! A Rust SDK for the Tatra banka Open Banking API, providing type-safe
//! configuration, OAuth token handling and an authenticated request
//! pipeline for the account information and payment initiation services.
//!
//! ## Overview
//!
//! This SDK provides:
//! - Type-safe configuration via [`BankConfig`] and [`BankConfigBuilder`]
//! - Validated newtypes for credentials and URLs
//! - OAuth 2.0 authorization code, client credentials and refresh grants via [`auth::oauth`]
//! - Token persistence keyed by client identity via [`auth::store`]
//! - An authenticated request pipeline via [`ApiClient`]
//! - Parameter validation via [`validation`]
//! - Account and payment endpoint wrappers via [`services`]
//!
//! ## Quick Start
//!
//! ```rust
//! use tatrabanka_api::{BankConfig, ClientId, ClientSecret, RedirectUri};
//!
//! let config = BankConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .redirect_uri(RedirectUri::new("https://your-app.example.com/callback").unwrap())
//!     .sandbox(true)
//!     .build()
//!     .unwrap();
//! ```
//!
//! ## Account Information
//!
//! ```rust,ignore
//! use tatrabanka_api::services::{Accounts, AccountsQuery, TransactionsQuery};
//!
//! let mut accounts = Accounts::new(config)?;
//!
//! // First run: send the user to the bank, then exchange the returned code
//! if !accounts.client_mut().is_authorized()? {
//!     let auth = accounts.client().begin_auth();
//!     // Redirect user to auth.auth_url, keep auth.state
//!     accounts.client_mut().request_access_token(&code).await?;
//! }
//!
//! // Later runs reuse the persisted token
//! let list = accounts.get_accounts(&AccountsQuery::default()).await?;
//! let history = accounts
//!     .transactions(&TransactionsQuery::new("SK3112000000198742637541"))
//!     .await?;
//! ```
//!
//! ## Payment Initiation
//!
//! ```rust,ignore
//! use tatrabanka_api::services::Payments;
//!
//! let mut payments = Payments::new(config)?;
//! payments.client_mut().request_client_credentials_token().await?;
//! let status = payments.payment_status("ORDER-42").await?;
//! ```
//!
//! ## Expired Tokens
//!
//! Nothing is refreshed automatically. When a call fails with
//! [`RequestError::is_unauthorized`], refresh and retry:
//!
//! ```rust,ignore
//! let list = match accounts.get_accounts(&query).await {
//!     Err(e) if e.is_unauthorized() => {
//!         accounts.client_mut().refresh_access_token().await?;
//!         accounts.get_accounts(&query).await?
//!     }
//!     other => other?,
//! };
//! ```
//!
//! ## Logging
//!
//! The SDK emits [`tracing`] events and installs no subscriber. Tokens and
//! secrets are never logged.
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration and session state are per client
//! - **Fail-fast validation**: Newtypes and parameters are checked before any I/O
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime
//! - **Pluggable I/O**: Transport and token storage are traits

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod services;
pub mod validation;

// Re-export public types at crate root for convenience
pub use auth::Token;
pub use config::{
    ApiUrl, BankConfig, BankConfigBuilder, ClientCategory, ClientId, ClientSecret, Credentials,
    RedirectUri,
};
pub use error::ConfigError;

// Re-export request pipeline types
pub use clients::{
    ApiClient, ApiRequest, ApiResponseError, BodyEncoding, HttpMethod, HttpTransport,
    ProtocolError, RequestError, ReqwestTransport, SessionState, TransportError,
    TransportRequest, TransportResponse,
};

// Re-export token storage types
pub use auth::store::{FileTokenStore, MemoryTokenStore, PersistenceError, TokenKey, TokenStore};

// Re-export OAuth types for convenience
pub use auth::oauth::{
    authorization_url, begin_auth, AuthClient, BeginAuthResult, OAuthError, StateParam,
};

pub use validation::ValidationError;
