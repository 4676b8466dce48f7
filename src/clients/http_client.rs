//! Default HTTP transport backed by `reqwest`.
//!
//! This module provides [`ReqwestTransport`], the [`HttpTransport`] used by
//! clients unless another one is injected.

use std::time::Duration;

use async_trait::async_trait;

use crate::clients::errors::TransportError;
use crate::clients::transport::{HttpMethod, HttpTransport, TransportRequest, TransportResponse};
use crate::config::BankConfig;
use crate::error::ConfigError;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the `User-Agent` header value for a configuration.
pub(crate) fn user_agent(config: &BankConfig) -> String {
    let user_agent_prefix = config
        .user_agent_prefix()
        .map_or(String::new(), |prefix| format!("{prefix} | "));
    let rust_version = env!("CARGO_PKG_RUST_VERSION");
    format!("{user_agent_prefix}Tatra banka API Library v{SDK_VERSION} | Rust {rust_version}")
}

/// [`HttpTransport`] implementation over a shared `reqwest::Client`.
///
/// Uses rustls for TLS. The timeout covers the whole exchange, from connect
/// until the body has been read.
///
/// # Thread Safety
///
/// `ReqwestTransport` is `Send + Sync`, making it safe to share across async tasks.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use tatrabanka_api::clients::ReqwestTransport;
///
/// let transport = ReqwestTransport::with_timeout(Duration::from_secs(10)).unwrap();
/// assert_eq!(transport.timeout(), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

// Verify ReqwestTransport is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ReqwestTransport>();
};

impl ReqwestTransport {
    /// Creates a transport with the default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the TLS backend cannot be
    /// initialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    /// Creates a transport with a custom timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the TLS backend cannot be
    /// initialized.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::TransportInit {
                reason: e.to_string(),
            })?;

        Ok(Self { client, timeout })
    }

    /// Returns the configured timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        let body = request.body();

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
            HttpMethod::Post => self.client.post(&request.url),
        };

        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        if let Some(body) = body {
            req_builder = req_builder.body(body);
        }

        let res = req_builder.send().await?;
        let status = res.status().as_u16();
        let body = res.text().await?;

        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret};

    fn config(prefix: Option<&str>) -> BankConfig {
        let mut builder = BankConfig::builder()
            .client_id(ClientId::new("id").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_user_agent_header_format() {
        let user_agent = user_agent(&config(None));
        assert!(user_agent.starts_with("Tatra banka API Library v"));
        assert!(user_agent.contains(SDK_VERSION));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let user_agent = user_agent(&config(Some("MyApp/1.0")));
        assert!(user_agent.starts_with("MyApp/1.0 | Tatra banka API Library v"));
    }

    #[test]
    fn test_default_timeout() {
        let transport = ReqwestTransport::new().unwrap();
        assert_eq!(transport.timeout(), DEFAULT_TIMEOUT);
    }
}
