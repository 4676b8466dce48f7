//! Client category definitions.
//!
//! The bank issues separate consents for account information and for payment
//! initiation. [`ClientCategory`] selects which one a client works with.

use std::fmt;

/// The API surface a client talks to.
///
/// The category fixes the OAuth scope requested from the authorization
/// server and is part of the token store identity, so an accounts client and
/// a payments client never share a persisted token even when they use the
/// same credentials.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::ClientCategory;
///
/// assert_eq!(ClientCategory::Accounts.scope(), "AISP");
/// assert_eq!(ClientCategory::Payments.scope(), "payments");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ClientCategory {
    /// Account information service (balances, transactions).
    Accounts,
    /// Payment initiation service.
    Payments,
}

impl ClientCategory {
    /// Returns the OAuth scope requested for this category.
    #[must_use]
    pub const fn scope(&self) -> &'static str {
        match self {
            Self::Accounts => "AISP",
            Self::Payments => "payments",
        }
    }

    /// Returns the stable discriminant used when deriving token store keys.
    ///
    /// Changing these values orphans every persisted token.
    #[must_use]
    pub const fn discriminant(&self) -> &'static str {
        match self {
            Self::Accounts => "accounts",
            Self::Payments => "payments",
        }
    }
}

impl fmt::Display for ClientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.discriminant())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scopes_match_bank_consents() {
        assert_eq!(ClientCategory::Accounts.scope(), "AISP");
        assert_eq!(ClientCategory::Payments.scope(), "payments");
    }

    #[test]
    fn test_discriminants_are_distinct() {
        assert_ne!(
            ClientCategory::Accounts.discriminant(),
            ClientCategory::Payments.discriminant()
        );
    }

    #[test]
    fn test_display_uses_discriminant() {
        assert_eq!(ClientCategory::Accounts.to_string(), "accounts");
        assert_eq!(ClientCategory::Payments.to_string(), "payments");
    }
}
