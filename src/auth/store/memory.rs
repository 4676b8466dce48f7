//! In-process token storage.

use std::sync::RwLock;

use super::{PersistenceError, TokenStore};
use crate::auth::Token;

/// A [`TokenStore`] that keeps the token in memory.
///
/// Nothing survives the process. Useful in tests and for callers that manage
/// persistence themselves through [`ApiClient::set_token`](crate::ApiClient::set_token).
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<Token>>,
}

impl MemoryTokenStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `token`.
    #[must_use]
    pub fn with_token(token: Token) -> Self {
        Self {
            token: RwLock::new(Some(token)),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn save(&self, token: &Token) -> Result<(), PersistenceError> {
        let mut slot = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *slot = Some(token.clone());
        Ok(())
    }

    fn load(&self) -> Result<Option<Token>, PersistenceError> {
        let slot = self
            .token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(slot.clone())
    }
}
