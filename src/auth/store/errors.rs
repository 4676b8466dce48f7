//! Token store error types.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised when a token store cannot be accessed.
///
/// A missing or unreadable-as-token entry is not an error; see
/// [`TokenStore::load`](super::TokenStore::load).
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the storage location failed.
    #[error("Token store I/O error at '{}': {source}", path.display())]
    Io {
        /// The path that could not be accessed.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The token could not be serialized.
    #[error("Failed to serialize token: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PersistenceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// Verify PersistenceError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PersistenceError>();
};
