//! Payment initiation endpoints.

use chrono::NaiveDate;
use serde_json::Value;

use crate::clients::{ApiClient, ApiRequest, RequestError};
use crate::config::{BankConfig, ClientCategory};
use crate::error::ConfigError;
use crate::validation::validate_order_id;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Payment initiation service (scope `payments`).
///
/// Payments clients authenticate with the client credentials grant, so the
/// token has no refresh token; request a new one when it expires.
///
/// # Example
///
/// ```rust,ignore
/// use tatrabanka_api::services::Payments;
///
/// let mut payments = Payments::new(config)?;
/// payments.client_mut().request_client_credentials_token().await?;
/// let status = payments.payment_status("ORDER-42").await?;
/// ```
#[derive(Debug)]
pub struct Payments {
    client: ApiClient,
}

impl Payments {
    /// Creates the service with the default transport and file token store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP client cannot be
    /// created.
    pub fn new(config: BankConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: ApiClient::new(config, ClientCategory::Payments)?,
        })
    }

    /// Wraps an existing client. The client should have been created for
    /// [`ClientCategory::Payments`].
    #[must_use]
    pub const fn with_client(client: ApiClient) -> Self {
        Self { client }
    }

    /// Returns the underlying client.
    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }

    /// Returns the underlying client for token lifecycle operations.
    pub fn client_mut(&mut self) -> &mut ApiClient {
        &mut self.client
    }

    /// Consumes the service and returns the client.
    #[must_use]
    pub fn into_client(self) -> ApiClient {
        self.client
    }

    /// Returns the status of a payment order.
    ///
    /// The order ID is percent-encoded into the path.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Validation`] for a malformed order ID, or any
    /// error of [`ApiClient::send_api_request`].
    pub async fn payment_status(&mut self, order_id: &str) -> Result<Value, RequestError> {
        validate_order_id(order_id)?;

        let path = format!("payments/{}/status", urlencoding::encode(order_id));
        self.client.send_api_request(ApiRequest::get(path)).await
    }

    /// Submits the prepared payment.
    ///
    /// # Errors
    ///
    /// Any error of [`ApiClient::send_api_request`].
    pub async fn payment_submission(&mut self) -> Result<Value, RequestError> {
        self.client
            .send_api_request(ApiRequest::post_form("payments/submission"))
            .await
    }

    /// Initiates a standard SEPA payment for the given execution date.
    ///
    /// # Errors
    ///
    /// Any error of [`ApiClient::send_api_request`].
    pub async fn standard_sba(&mut self, execution_date: NaiveDate) -> Result<Value, RequestError> {
        self.sba("payments/standard/sba", execution_date).await
    }

    /// Initiates an e-commerce SEPA payment for the given execution date.
    ///
    /// # Errors
    ///
    /// Any error of [`ApiClient::send_api_request`].
    pub async fn ecomm_sba(&mut self, execution_date: NaiveDate) -> Result<Value, RequestError> {
        self.sba("payments/ecomm/sba", execution_date).await
    }

    async fn sba(&mut self, path: &str, execution_date: NaiveDate) -> Result<Value, RequestError> {
        let request = ApiRequest::post_json(path).param(
            "requestedExecutionDate",
            execution_date.format(DATE_FORMAT).to_string(),
        );
        self.client.send_api_request(request).await
    }
}
