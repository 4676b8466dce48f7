//! State parameter handling for OAuth CSRF protection.
//!
//! [`begin_auth`](super::begin_auth) attaches a random [`StateParam`] to the
//! authorization URL. The bank echoes it back on the redirect, and the caller
//! checks it with [`StateParam::verify`] before exchanging the code.
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::auth::oauth::StateParam;
//!
//! let state = StateParam::new();
//! assert_eq!(state.as_ref().len(), 15);
//! assert!(state.verify(state.as_ref()));
//! assert!(!state.verify("forged"));
//! ```

use rand::distributions::Alphanumeric;
use rand::Rng;
use std::fmt;
use subtle::ConstantTimeEq;

/// OAuth state parameter for CSRF protection.
///
/// # Thread Safety
///
/// `StateParam` is `Send + Sync`, making it safe to share across threads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateParam {
    value: String,
}

// Verify StateParam is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<StateParam>();
};

impl StateParam {
    /// The length of generated values.
    const LENGTH: usize = 15;

    /// Creates a state parameter from a cryptographically secure random
    /// alphanumeric string.
    #[must_use]
    pub fn new() -> Self {
        let value: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(Self::LENGTH)
            .map(char::from)
            .collect();

        Self { value }
    }

    /// Wraps a previously generated value, e.g. one restored from a session
    /// cookie.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self { value: raw.into() }
    }

    /// Returns `true` if `received` equals this state.
    ///
    /// The comparison runs in constant time.
    #[must_use]
    pub fn verify(&self, received: &str) -> bool {
        self.value.as_bytes().ct_eq(received.as_bytes()).into()
    }
}

impl Default for StateParam {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for StateParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl AsRef<str> for StateParam {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
