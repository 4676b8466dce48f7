//! Authentication types for the Tatra banka API SDK.
//!
//! # Overview
//!
//! - [`Token`]: an access token with its refresh token and lifetime
//! - [`oauth`]: the token endpoint client and consent URL helpers
//! - [`store`]: token persistence keyed by client identity
//!
//! # Token Lifecycle
//!
//! A client starts without a token. It obtains one either by loading it
//! from its [`TokenStore`](store::TokenStore) or through a grant, which
//! persists the new token before the client starts using it. Tokens are
//! never refreshed or discarded automatically; when the API rejects a
//! token, the caller refreshes it and retries.
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::Token;
//!
//! let token = Token::new("access-token").with_refresh_token("refresh-token");
//! assert!(token.has_refresh_token());
//! assert!(!token.expired());
//! ```

pub mod oauth;
pub mod store;
mod token;

pub use token::{Token, DEFAULT_EXPIRES_IN, DEFAULT_TOKEN_TYPE};
