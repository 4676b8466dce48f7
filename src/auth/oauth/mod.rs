//! OAuth 2.0 support for the Tatra banka API.
//!
//! The bank issues tokens through three grants, all handled by
//! [`AuthClient`]:
//!
//! - **Authorization code**: the user consents in the browser at
//!   [`authorization_url`] and the bank redirects back with a code, which
//!   [`AuthClient::exchange_authorization_code`] turns into a token.
//! - **Client credentials**: server-to-server, used for payment initiation
//!   ([`AuthClient::exchange_client_credentials`]).
//! - **Refresh token**: renews an expired access token
//!   ([`AuthClient::refresh`]).
//!
//! # CSRF Protection
//!
//! [`begin_auth`] attaches a random [`StateParam`] to the consent URL. Keep
//! it in the user's session and check the redirect with
//! [`StateParam::verify`], which compares in constant time.
//!
//! # Example: Authorization Code Flow
//!
//! ```rust,ignore
//! use tatrabanka_api::{ApiClient, ClientCategory};
//!
//! let mut client = ApiClient::new(config, ClientCategory::Accounts)?;
//!
//! // Step 1: send the user to the bank
//! let auth = client.begin_auth();
//! session.set("oauth_state", auth.state.as_ref());
//! redirect_to(&auth.auth_url);
//!
//! // Step 2: on the redirect, verify state and exchange the code
//! let expected = StateParam::from_raw(session.get("oauth_state"));
//! if !expected.verify(&query.state) {
//!     return Err("state mismatch");
//! }
//! client.request_access_token(&query.code).await?;
//! ```

mod begin_auth;
mod client;
mod error;
mod state;

pub use begin_auth::{authorization_url, begin_auth, BeginAuthResult, AUTHORIZE_PATH};
pub use client::{AuthClient, TOKEN_PATH};
pub use error::OAuthError;
pub use state::StateParam;
