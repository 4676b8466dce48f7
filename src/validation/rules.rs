//! Guard functions for request parameters.

use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use super::errors::ValidationError;
use super::types::{SortOrder, TransactionStatus};

/// Smallest accepted page number.
pub const MIN_PAGE: u32 = 1;
/// Largest accepted page number and page count.
pub const MAX_PAGE: u32 = 99_999_999;
/// Accepted page sizes.
pub const PAGE_SIZES: [u32; 10] = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100];
/// Largest accepted monetary amount.
pub const MAX_AMOUNT: f64 = 9_999_999_999.99;
/// Maximum length of a participant name.
pub const MAX_NAME_LENGTH: usize = 140;
/// Maximum length of a payment order identifier.
pub const MAX_ORDER_ID_LENGTH: usize = 35;

fn iban_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Z]{2}[0-9]{2}[A-Z0-9]{1,30}$").expect("IBAN pattern is valid")
    })
}

fn currency_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]{3}$").expect("currency pattern is valid"))
}

fn free_text_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9/\-?:().,';+\s]*$").expect("free text pattern is valid")
    })
}

/// Checks that `iban` is a valid IBAN.
///
/// The IBAN must have the expected shape (country code, two check digits,
/// 1 to 30 uppercase alphanumerics) and pass the ISO 7064 mod-97 checksum.
///
/// # Errors
///
/// Returns [`ValidationError`] if the shape or the check digits are wrong.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::validation::validate_iban;
///
/// assert!(validate_iban("SK3112000000198742637541").is_ok());
/// assert!(validate_iban("SK1234").is_err());
/// ```
pub fn validate_iban(iban: &str) -> Result<(), ValidationError> {
    if !iban_pattern().is_match(iban) {
        return Err(ValidationError::new(
            "iban",
            "IBAN is not in the correct format.",
        ));
    }
    if iban_remainder(iban) != 1 {
        return Err(ValidationError::new(
            "iban",
            "IBAN check digits do not match.",
        ));
    }
    Ok(())
}

// Mod-97 remainder of the IBAN with the first four characters moved to the
// end and letters expanded to 10..=35. Input must already match the pattern.
fn iban_remainder(iban: &str) -> u32 {
    let (head, tail) = iban.split_at(4);
    tail.chars().chain(head.chars()).fold(0, |rem, c| {
        let value = c.to_digit(36).unwrap_or(0);
        if value < 10 {
            (rem * 10 + value) % 97
        } else {
            (rem * 100 + value) % 97
        }
    })
}

/// Checks a monetary amount and its currency.
///
/// The precision check runs first: the value is rounded to whole cents and
/// must equal the original, so `100.005` is rejected rather than silently
/// rounded. The rounded value must then lie within `0.00..=9999999999.99`.
///
/// # Errors
///
/// Returns [`ValidationError`] for non-finite values, more than two decimal
/// places, out-of-range values, or an invalid currency.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::validation::validate_amount;
///
/// assert!(validate_amount(9_999_999_999.99, "EUR").is_ok());
/// assert!(validate_amount(100.005, "EUR").is_err());
/// assert!(validate_amount(10_000_000_000.00, "EUR").is_err());
/// ```
pub fn validate_amount(value: f64, currency: &str) -> Result<(), ValidationError> {
    validate_amount_value(value)?;
    validate_currency(currency)
}

#[allow(clippy::float_cmp)]
pub(crate) fn validate_amount_value(value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::new("value", "The value must be a finite number."));
    }

    // Whole cents below 2^53 are exact, and dividing them by 100 yields the
    // nearest double to the two-decimal amount.
    let rounded = (value * 100.0).round() / 100.0;
    if rounded != value {
        return Err(ValidationError::new(
            "value",
            "The value must not have more than two decimal places.",
        ));
    }

    if !(0.0..=MAX_AMOUNT).contains(&rounded) {
        return Err(ValidationError::new(
            "value",
            "The value parameter must be within the range of 0.0 to 9999999999.99.",
        ));
    }

    Ok(())
}

/// Checks that `currency` is an ISO 4217 alphabetic code.
///
/// # Errors
///
/// Returns [`ValidationError`] unless the code is exactly three uppercase letters.
pub fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency_pattern().is_match(currency) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "currency",
            "Currency is not in the correct format. An alphabetic code within ISO 4217 must be used.",
        ))
    }
}

fn validate_free_text(
    field: &'static str,
    text: &str,
    min: usize,
    max: usize,
) -> Result<(), ValidationError> {
    let length = text.chars().count();
    if length < min || length > max {
        return Err(ValidationError::new(
            field,
            format!("Length must be between {min} and {max} characters."),
        ));
    }
    if !free_text_pattern().is_match(text) {
        return Err(ValidationError::new(
            field,
            "Only letters, digits, spaces and / - ? : ( ) . , ' ; + are allowed.",
        ));
    }
    Ok(())
}

/// Checks a payment participant name (at most 140 allow-listed characters).
///
/// # Errors
///
/// Returns [`ValidationError`] if the name is too long or contains
/// disallowed characters.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    validate_free_text("name", name, 0, MAX_NAME_LENGTH)
}

/// Checks a payment order identifier (1 to 35 allow-listed characters).
///
/// # Errors
///
/// Returns [`ValidationError`] if the identifier is empty, too long, or
/// contains disallowed characters.
pub fn validate_order_id(order_id: &str) -> Result<(), ValidationError> {
    validate_free_text("orderId", order_id, 1, MAX_ORDER_ID_LENGTH)
}

/// Checks that `page` lies within `1..=99999999`.
///
/// # Errors
///
/// Returns [`ValidationError`] when out of range.
pub fn validate_page(page: u32) -> Result<(), ValidationError> {
    if (MIN_PAGE..=MAX_PAGE).contains(&page) {
        Ok(())
    } else {
        Err(ValidationError::new(
            "page",
            "The page parameter must be within the range of 1 to 99999999.",
        ))
    }
}

/// Checks that `page_count` lies within `0..=99999999`.
///
/// # Errors
///
/// Returns [`ValidationError`] when out of range.
pub fn validate_page_count(page_count: u32) -> Result<(), ValidationError> {
    if page_count <= MAX_PAGE {
        Ok(())
    } else {
        Err(ValidationError::new(
            "pageCount",
            "The pageCount parameter must be within the range of 0 to 99999999.",
        ))
    }
}

/// Checks that `page_size` is a multiple of ten between 10 and 100.
///
/// # Errors
///
/// Returns [`ValidationError`] for any other value.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::validation::validate_page_size;
///
/// assert!(validate_page_size(50).is_ok());
/// assert!(validate_page_size(25).is_err());
/// ```
pub fn validate_page_size(page_size: u32) -> Result<(), ValidationError> {
    if PAGE_SIZES.contains(&page_size) {
        Ok(())
    } else {
        let allowed: Vec<String> = PAGE_SIZES.iter().map(ToString::to_string).collect();
        Err(ValidationError::new(
            "pageSize",
            format!(
                "The pageSize parameter can only have values of {}.",
                allowed.join(", ")
            ),
        ))
    }
}

/// Checks that `status` names a [`TransactionStatus`].
///
/// # Errors
///
/// Returns [`ValidationError`] for unknown statuses.
pub fn validate_status(status: &str) -> Result<(), ValidationError> {
    status.parse::<TransactionStatus>().map(|_| ())
}

/// Checks that `order` names a [`SortOrder`].
///
/// # Errors
///
/// Returns [`ValidationError`] unless the order is `asc` or `desc`.
pub fn validate_sort_order(order: &str) -> Result<(), ValidationError> {
    order.parse::<SortOrder>().map(|_| ())
}

/// Checks that `date_from` is not after `date_to` when both are given.
///
/// # Errors
///
/// Returns [`ValidationError`] if the range is inverted.
pub fn validate_date_range(
    date_from: Option<NaiveDate>,
    date_to: Option<NaiveDate>,
) -> Result<(), ValidationError> {
    match (date_from, date_to) {
        (Some(from), Some(to)) if from > to => Err(ValidationError::new(
            "dateFrom",
            format!("Date from ({from}) must not be after date to ({to})."),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iban_accepts_valid_ibans() {
        assert!(validate_iban("SK3112000000198742637541").is_ok());
        assert!(validate_iban("DE89370400440532013000").is_ok());
        assert!(validate_iban("GB82WEST12345698765432").is_ok());
    }

    #[test]
    fn test_iban_rejects_bad_check_digits() {
        let error = validate_iban("SK1234").unwrap_err();
        assert_eq!(error.field, "iban");
        assert!(validate_iban("SK3212000000198742637541").is_err());
    }

    #[test]
    fn test_iban_rejects_invalid_shapes() {
        assert!(validate_iban("sk3112000000198742637541").is_err());
        assert!(validate_iban("SKAB12000000198742637541").is_err());
        assert!(validate_iban("SK31 1200 0000 1987 4263 7541").is_err());
        assert!(validate_iban("").is_err());
        assert!(validate_iban(&format!("SK31{}", "1".repeat(31))).is_err());
    }

    #[test]
    fn test_amount_boundaries() {
        assert!(validate_amount(0.0, "EUR").is_ok());
        assert!(validate_amount(0.01, "EUR").is_ok());
        assert!(validate_amount(100.10, "EUR").is_ok());
        assert!(validate_amount(9_999_999_999.99, "EUR").is_ok());
        assert!(validate_amount(10_000_000_000.00, "EUR").is_err());
        assert!(validate_amount(-0.01, "EUR").is_err());
    }

    #[test]
    fn test_amount_rejects_sub_cent_precision() {
        let error = validate_amount(100.005, "EUR").unwrap_err();
        assert_eq!(error.field, "value");
        assert!(error.reason.contains("two decimal places"));
        assert!(validate_amount(0.001, "EUR").is_err());
        assert!(validate_amount(100.000_001, "EUR").is_err());
        assert!(validate_amount(0.000_009, "EUR").is_err());
        assert!(validate_amount(9_999_999_999.989, "EUR").is_err());
    }

    #[test]
    fn test_amount_accepts_two_decimal_literals() {
        for value in [0.1, 0.29, 1.15, 19.99, 100.01, 123_456.78] {
            assert!(validate_amount(value, "EUR").is_ok(), "{value} rejected");
        }
    }

    #[test]
    fn test_amount_rejects_non_finite() {
        assert!(validate_amount(f64::NAN, "EUR").is_err());
        assert!(validate_amount(f64::INFINITY, "EUR").is_err());
    }

    #[test]
    fn test_currency_format() {
        assert!(validate_currency("EUR").is_ok());
        assert!(validate_currency("CZK").is_ok());
        assert!(validate_currency("eur").is_err());
        assert!(validate_currency("EURO").is_err());
        assert!(validate_amount(10.0, "EU").is_err());
    }

    #[test]
    fn test_name_allow_list_and_length() {
        assert!(validate_name("").is_ok());
        assert!(validate_name("John O'Neil, s.r.o. (HQ) +421/2").is_ok());
        assert!(validate_name(&"a".repeat(140)).is_ok());
        assert!(validate_name(&"a".repeat(141)).is_err());
        assert!(validate_name("name<script>").is_err());
        assert!(validate_name("price: 10€").is_err());
    }

    #[test]
    fn test_order_id_length() {
        assert!(validate_order_id("ORDER-2024/001").is_ok());
        assert!(validate_order_id(&"1".repeat(35)).is_ok());
        assert!(validate_order_id(&"1".repeat(36)).is_err());
        assert!(validate_order_id("").is_err());
        assert!(validate_order_id("id#1").is_err());
    }

    #[test]
    fn test_pagination_bounds() {
        assert!(validate_page(0).is_err());
        assert!(validate_page(1).is_ok());
        assert!(validate_page(99_999_999).is_ok());
        assert!(validate_page(100_000_000).is_err());

        assert!(validate_page_count(0).is_ok());
        assert!(validate_page_count(99_999_999).is_ok());
        assert!(validate_page_count(100_000_000).is_err());
    }

    #[test]
    fn test_page_size_steps() {
        for size in PAGE_SIZES {
            assert!(validate_page_size(size).is_ok());
        }
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(25).is_err());
        assert!(validate_page_size(110).is_err());
    }

    #[test]
    fn test_enum_membership() {
        assert!(validate_status("ALL").is_ok());
        assert!(validate_status("BOOK").is_ok());
        assert!(validate_status("INFO").is_ok());
        assert!(validate_status("PENDING").is_err());

        assert!(validate_sort_order("asc").is_ok());
        assert!(validate_sort_order("desc").is_ok());
        assert!(validate_sort_order("random").is_err());
    }

    #[test]
    fn test_date_range() {
        let earlier = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let later = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

        assert!(validate_date_range(Some(earlier), Some(later)).is_ok());
        assert!(validate_date_range(Some(earlier), Some(earlier)).is_ok());
        assert!(validate_date_range(Some(later), None).is_ok());
        assert!(validate_date_range(None, Some(earlier)).is_ok());
        assert!(validate_date_range(Some(later), Some(earlier)).is_err());
    }
}
