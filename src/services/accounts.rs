//! Account information endpoints.

use chrono::NaiveDate;
use serde_json::Value;

use crate::clients::{ApiClient, ApiRequest, RequestError};
use crate::config::{BankConfig, ClientCategory};
use crate::error::ConfigError;
use crate::validation::{
    validate_date_range, validate_iban, validate_page, validate_page_count, validate_page_size,
    SortOrder, TransactionStatus,
};

/// Date format used in request bodies.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Paging and ordering for [`Accounts::get_accounts`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountsQuery {
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page; one of 10, 20, ..., 100.
    pub page_size: u32,
    /// Number of pages to return, if limited.
    pub page_count: Option<u32>,
    /// Sort order.
    pub order: SortOrder,
}

impl Default for AccountsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 50,
            page_count: None,
            order: SortOrder::Desc,
        }
    }
}

/// Filter and paging for [`Accounts::transactions`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionsQuery {
    /// The account IBAN.
    pub iban: String,
    /// Booking status filter.
    pub status: TransactionStatus,
    /// First day of the period, inclusive.
    pub date_from: Option<NaiveDate>,
    /// Last day of the period, inclusive.
    pub date_to: Option<NaiveDate>,
    /// Page number, starting at 1.
    pub page: u32,
    /// Items per page; one of 10, 20, ..., 100.
    pub page_size: u32,
}

impl TransactionsQuery {
    /// Creates a query for all transactions of `iban`, first page of 50.
    #[must_use]
    pub fn new(iban: impl Into<String>) -> Self {
        Self {
            iban: iban.into(),
            status: TransactionStatus::All,
            date_from: None,
            date_to: None,
            page: 1,
            page_size: 50,
        }
    }

    /// Restricts the query to a period.
    #[must_use]
    pub const fn between(mut self, date_from: NaiveDate, date_to: NaiveDate) -> Self {
        self.date_from = Some(date_from);
        self.date_to = Some(date_to);
        self
    }

    /// Sets the booking status filter.
    #[must_use]
    pub const fn status(mut self, status: TransactionStatus) -> Self {
        self.status = status;
        self
    }
}

/// Account information service (scope `AISP`).
///
/// # Example
///
/// ```rust,ignore
/// use tatrabanka_api::services::{Accounts, AccountsQuery};
///
/// let mut accounts = Accounts::new(config)?;
/// if !accounts.client_mut().is_authorized()? {
///     println!("Visit {}", accounts.client().authorization_url());
///     return Ok(());
/// }
/// let list = accounts.get_accounts(&AccountsQuery::default()).await?;
/// ```
#[derive(Debug)]
pub struct Accounts {
    client: ApiClient,
}

impl Accounts {
    /// Creates the service with the default transport and file token store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::TransportInit`] if the HTTP client cannot be
    /// created.
    pub fn new(config: BankConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: ApiClient::new(config, ClientCategory::Accounts)?,
        })
    }

    /// Wraps an existing client. The client should have been created for
    /// [`ClientCategory::Accounts`].
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

    /// Lists the customer's accounts.
    ///
    /// Sends `GET accounts?page=&pageSize=[&pageCount=]&order=`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Validation`] for out-of-range paging, or any
    /// error of [`ApiClient::send_api_request`].
    pub async fn get_accounts(&mut self, query: &AccountsQuery) -> Result<Value, RequestError> {
        validate_page(query.page)?;
        validate_page_size(query.page_size)?;
        if let Some(page_count) = query.page_count {
            validate_page_count(page_count)?;
        }

        let mut request = ApiRequest::get("accounts")
            .param("page", query.page)
            .param("pageSize", query.page_size);
        if let Some(page_count) = query.page_count {
            request = request.param("pageCount", page_count);
        }
        request = request.param("order", query.order.as_str());

        self.client.send_api_request(request).await
    }

    /// Returns details of the account identified by `iban`.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Validation`] for a malformed IBAN, or any
    /// error of [`ApiClient::send_api_request`].
    pub async fn account_information(&mut self, iban: &str) -> Result<Value, RequestError> {
        validate_iban(iban)?;

        let request = ApiRequest::post_json("accounts/information").param("iban", iban);
        self.client.send_api_request(request).await
    }

    /// Lists the transactions of an account.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::Validation`] for a malformed IBAN, a reversed
    /// date range or out-of-range paging, or any error of
    /// [`ApiClient::send_api_request`].
    pub async fn transactions(&mut self, query: &TransactionsQuery) -> Result<Value, RequestError> {
        validate_iban(&query.iban)?;
        validate_date_range(query.date_from, query.date_to)?;
        validate_page(query.page)?;
        validate_page_size(query.page_size)?;

        let mut request = ApiRequest::post_json("accounts/transactions")
            .param("iban", query.iban.as_str())
            .param("status", query.status.as_str())
            .param("page", query.page)
            .param("pageSize", query.page_size);
        if let Some(date_from) = query.date_from {
            request = request.param("dateFrom", date_from.format(DATE_FORMAT).to_string());
        }
        if let Some(date_to) = query.date_to {
            request = request.param("dateTo", date_to.format(DATE_FORMAT).to_string());
        }

        self.client.send_api_request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accounts_query_defaults() {
        let query = AccountsQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 50);
        assert_eq!(query.page_count, None);
        assert_eq!(query.order, SortOrder::Desc);
    }

    #[test]
    fn test_transactions_query_defaults() {
        let query = TransactionsQuery::new("SK3112000000198742637541");
        assert_eq!(query.status, TransactionStatus::All);
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 50);
        assert!(query.date_from.is_none() && query.date_to.is_none());
    }

    #[test]
    fn test_transactions_query_between() {
        let from = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let query = TransactionsQuery::new("SK3112000000198742637541")
            .between(from, to)
            .status(TransactionStatus::Book);

        assert_eq!(query.date_from, Some(from));
        assert_eq!(query.date_to, Some(to));
        assert_eq!(query.status, TransactionStatus::Book);
    }
}
