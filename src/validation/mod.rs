//! Parameter validation for API requests.
//!
//! Every endpoint wrapper runs its inputs through these guards before a
//! request is built, so invalid input never reaches the network. The guards
//! are pure functions returning [`ValidationError`] on failure.
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::validation::{validate_amount, validate_iban, validate_page_size};
//!
//! assert!(validate_iban("SK3112000000198742637541").is_ok());
//! assert!(validate_amount(9_999_999_999.99, "EUR").is_ok());
//! assert!(validate_page_size(25).is_err());
//! ```

mod errors;
mod rules;
mod types;

pub use errors::ValidationError;
pub use rules::{
    validate_amount, validate_currency, validate_date_range, validate_iban, validate_name,
    validate_order_id, validate_page, validate_page_count, validate_page_size,
    validate_sort_order, validate_status, MAX_AMOUNT, MAX_NAME_LENGTH, MAX_ORDER_ID_LENGTH,
    MAX_PAGE, MIN_PAGE, PAGE_SIZES,
};
pub use types::{PaymentAmount, PaymentParticipant, SortOrder, TransactionStatus};
