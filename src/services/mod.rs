//! Endpoint services.
//!
//! Each service wraps an [`ApiClient`](crate::ApiClient) of its category,
//! validates parameters and maps calls onto resource paths:
//!
//! | Service | Category | Endpoints |
//! |---------|----------|-----------|
//! | [`Accounts`] | `AISP` | `GET accounts`, `POST accounts/information`, `POST accounts/transactions` |
//! | [`Payments`] | `payments` | `GET payments/{orderId}/status`, `POST payments/submission`, `POST payments/standard/sba`, `POST payments/ecomm/sba` |
//!
//! Responses are returned as the parsed JSON body.

mod accounts;
mod payments;

pub use accounts::{Accounts, AccountsQuery, TransactionsQuery};
pub use payments::Payments;
