//! Token persistence.
//!
//! A [`TokenStore`] keeps exactly one [`Token`] per credential identity. The
//! identity is a [`TokenKey`] derived from the client category and the
//! client credentials, so two clients configured identically share a token
//! across process restarts while different categories never do.
//!
//! # Overview
//!
//! - [`TokenStore`]: the storage trait used by [`ApiClient`](crate::ApiClient)
//! - [`TokenKey`]: deterministic identity of a stored token
//! - [`FileTokenStore`]: one JSON file per identity, written atomically
//! - [`MemoryTokenStore`]: in-process storage for tests and short-lived use
//!
//! # Example
//!
//! ```rust
//! use tatrabanka_api::auth::store::{MemoryTokenStore, TokenStore};
//! use tatrabanka_api::Token;
//!
//! let store = MemoryTokenStore::new();
//! assert!(store.load().unwrap().is_none());
//!
//! store.save(&Token::new("access")).unwrap();
//! assert_eq!(store.load().unwrap().unwrap().access_token, "access");
//! ```

mod errors;
mod file;
mod memory;

pub use errors::PersistenceError;
pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use std::fmt;

use sha2::{Digest, Sha256};

use crate::auth::Token;
use crate::config::{ClientCategory, Credentials};

/// Persists and loads the token of one credential identity.
///
/// Implementations must be safe to share between threads. A missing or
/// unreadable-as-token entry is reported as `Ok(None)`; only failures to
/// access the storage itself are errors.
///
/// Both methods are called directly from the async methods of
/// [`ApiClient`](crate::ApiClient), so they should return quickly.
pub trait TokenStore: Send + Sync + fmt::Debug {
    /// Replaces the stored token.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the token could not be written.
    fn save(&self, token: &Token) -> Result<(), PersistenceError>;

    /// Returns the stored token, if there is one.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] if the storage location cannot be read.
    fn load(&self) -> Result<Option<Token>, PersistenceError>;
}

/// Deterministic identity of a stored token.
///
/// The key is the hex-encoded SHA-256 digest of the length-prefixed tuple
/// `(category, client_id, client_secret, redirect_uri)`, with an absent
/// redirect URI hashed as the empty string. It is safe to use as a file name
/// and reveals nothing about the secret.
///
/// # Example
///
/// ```rust
/// use tatrabanka_api::auth::store::TokenKey;
/// use tatrabanka_api::{ClientCategory, ClientId, ClientSecret, Credentials};
///
/// let credentials = Credentials {
///     client_id: ClientId::new("id").unwrap(),
///     client_secret: ClientSecret::new("secret").unwrap(),
///     redirect_uri: None,
/// };
///
/// let accounts = TokenKey::derive(ClientCategory::Accounts, &credentials);
/// let payments = TokenKey::derive(ClientCategory::Payments, &credentials);
///
/// assert_eq!(accounts, TokenKey::derive(ClientCategory::Accounts, &credentials));
/// assert_ne!(accounts, payments);
/// assert_eq!(accounts.as_ref().len(), 64);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TokenKey(String);

impl TokenKey {
    /// Derives the key for a category and set of credentials.
    #[must_use]
    pub fn derive(category: ClientCategory, credentials: &Credentials) -> Self {
        let redirect_uri = credentials
            .redirect_uri
            .as_ref()
            .map_or("", |uri| uri.as_ref());

        let mut hasher = Sha256::new();
        for field in [
            category.discriminant(),
            credentials.client_id.as_ref(),
            credentials.client_secret.as_ref(),
            redirect_uri,
        ] {
            hasher.update((field.len() as u64).to_be_bytes());
            hasher.update(field.as_bytes());
        }

        Self(format!("{:x}", hasher.finalize()))
    }
}

impl AsRef<str> for TokenKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
