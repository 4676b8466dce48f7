//! HTTP client types for Tatra banka API communication.
//!
//! This module provides the authenticated request pipeline and the
//! transport layer underneath it.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ApiClient`]: Authenticated client for one client category
//! - [`ApiRequest`]: A resource API call before authentication
//! - [`SessionState`]: Cached token and last status code of a client
//! - [`HttpTransport`]: The seam between the SDK and the HTTP stack
//! - [`ReqwestTransport`]: The default `reqwest` transport
//! - [`TransportRequest`] / [`TransportResponse`]: Raw exchange types
//! - [`RequestError`]: Errors returned by resource API calls
//!
//! # Example
//!
//! ```rust,ignore
//! use tatrabanka_api::{ApiClient, ApiRequest, ClientCategory};
//!
//! let mut client = ApiClient::new(config, ClientCategory::Accounts)?;
//! let accounts = client
//!     .send_api_request(ApiRequest::get("accounts").param("page", 1))
//!     .await?;
//! ```
//!
//! # Retry Behavior
//!
//! Nothing is retried automatically. On [`RequestError::is_unauthorized`]
//! the caller refreshes the token with
//! [`ApiClient::refresh_access_token`] and re-issues the call.

mod api_client;
mod errors;
pub(crate) mod http_client;
pub(crate) mod transport;

pub use api_client::{ApiClient, ApiRequest, SessionState, API_PATH};
pub use errors::{ApiResponseError, ProtocolError, RequestError, TransportError};
pub use http_client::{ReqwestTransport, DEFAULT_TIMEOUT, SDK_VERSION};
pub use transport::{
    BodyEncoding, HttpMethod, HttpTransport, TransportRequest, TransportRequestBuilder,
    TransportResponse,
};
