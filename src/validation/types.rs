//! Value types that are validated on construction.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use super::errors::ValidationError;
use super::rules::{validate_amount_value, validate_currency, validate_iban, validate_name};

/// Sort order for account listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortOrder {
    /// Oldest first.
    Asc,
    /// Newest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ValidationError::new(
                "order",
                format!("Sorting type '{other}' not found."),
            )),
        }
    }
}

/// Booking status filter for transaction listings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TransactionStatus {
    /// Booked and pending transactions.
    #[default]
    All,
    /// Booked transactions only.
    Book,
    /// Pending (informational) transactions only.
    Info,
}

impl TransactionStatus {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Book => "BOOK",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Self::All),
            "BOOK" => Ok(Self::Book),
            "INFO" => Ok(Self::Info),
            other => Err(ValidationError::new(
                "status",
                format!("Status '{other}' not found."),
            )),
        }
    }
}

/// A monetary amount in a given currency.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::validation::PaymentAmount;
///
/// let amount = PaymentAmount::new(12.50, "EUR").unwrap();
/// assert_eq!(amount.currency(), "EUR");
/// assert!(PaymentAmount::new(12.505, "EUR").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PaymentAmount {
    value: f64,
    currency: String,
}

impl PaymentAmount {
    /// Currency used by [`PaymentAmount::eur`].
    pub const DEFAULT_CURRENCY: &'static str = "EUR";

    /// Creates a validated amount.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the value or currency is invalid.
    pub fn new(value: f64, currency: impl Into<String>) -> Result<Self, ValidationError> {
        let currency = currency.into();
        validate_amount_value(value)?;
        validate_currency(&currency)?;
        Ok(Self { value, currency })
    }

    /// Creates a validated amount in euros.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the value is invalid.
    pub fn eur(value: f64) -> Result<Self, ValidationError> {
        Self::new(value, Self::DEFAULT_CURRENCY)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Returns the ISO 4217 currency code.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }
}

/// A payer or payee: a display name and an IBAN.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::validation::PaymentParticipant;
///
/// let payee = PaymentParticipant::new("Jan Novak", "SK3112000000198742637541").unwrap();
/// assert_eq!(payee.name(), "Jan Novak");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PaymentParticipant {
    name: String,
    iban: String,
}

impl PaymentParticipant {
    /// Creates a validated participant.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] if the name or IBAN is invalid.
    pub fn new(name: impl Into<String>, iban: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let iban = iban.into();
        validate_name(&name)?;
        validate_iban(&iban)?;
        Ok(Self { name, iban })
    }

    /// Returns the participant name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the participant IBAN.
    #[must_use]
    pub fn iban(&self) -> &str {
        &self.iban
    }
}

impl Serialize for SortOrder {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl Serialize for TransactionStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
