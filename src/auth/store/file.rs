//! File-backed token storage.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{PersistenceError, TokenKey, TokenStore};
use crate::auth::Token;
use crate::config::{ClientCategory, Credentials};

/// A [`TokenStore`] that writes one JSON file per identity.
///
/// The token for key `K` lives at `<root>/K.json`. Writes go to a temporary
/// file in `root` that is then renamed over the target, so a concurrent
/// reader sees either the old token or the new one. On Unix the file is
/// readable by its owner only.
///
/// # Example
///
/// ```rust,no_run
/// use tatrabanka_api::auth::store::{FileTokenStore, TokenStore};
/// use tatrabanka_api::{ClientCategory, ClientId, ClientSecret, Credentials};
///
/// let credentials = Credentials {
///     client_id: ClientId::new("id").unwrap(),
///     client_secret: ClientSecret::new("secret").unwrap(),
///     redirect_uri: None,
/// };
///
/// let store = FileTokenStore::for_client("/var/lib/myapp/tokens", ClientCategory::Accounts, &credentials);
/// if let Some(token) = store.load().unwrap() {
///     println!("token expires at {}", token.expires_at());
/// }
/// ```
#[derive(Clone, Debug)]
pub struct FileTokenStore {
    root: PathBuf,
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store for `key` under `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, key: &TokenKey) -> Self {
        let root = root.into();
        let path = root.join(format!("{key}.json"));
        Self { root, path }
    }

    /// Creates a store for the identity of a client.
    #[must_use]
    pub fn for_client(
        root: impl Into<PathBuf>,
        category: ClientCategory,
        credentials: &Credentials,
    ) -> Self {
        Self::new(root, &TokenKey::derive(category, credentials))
    }

    /// Returns the path of the token file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_root(&self) -> Result<(), PersistenceError> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder
            .create(&self.root)
            .map_err(|e| PersistenceError::io(&self.root, e))
    }
}

impl TokenStore for FileTokenStore {
    fn save(&self, token: &Token) -> Result<(), PersistenceError> {
        let contents = serde_json::to_vec(token)?;
        self.ensure_root()?;

        let mut file =
            NamedTempFile::new_in(&self.root).map_err(|e| PersistenceError::io(&self.root, e))?;
        file.write_all(&contents)
            .and_then(|()| file.as_file().sync_all())
            .map_err(|e| PersistenceError::io(file.path(), e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600))
                .map_err(|e| PersistenceError::io(file.path(), e))?;
        }

        file.persist(&self.path)
            .map_err(|e| PersistenceError::io(&self.path, e.error))?;

        tracing::debug!(path = %self.path.display(), "Persisted token");
        Ok(())
    }

    fn load(&self) -> Result<Option<Token>, PersistenceError> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(PersistenceError::io(&self.path, e)),
        };

        match serde_json::from_slice(&contents) {
            Ok(token) => Ok(Some(token)),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Ignoring unreadable token file"
                );
                Ok(None)
            }
        }
    }
}

// Verify FileTokenStore is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FileTokenStore>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ClientId, ClientSecret};

    fn credentials() -> Credentials {
        Credentials {
            client_id: ClientId::new("id").unwrap(),
            client_secret: ClientSecret::new("secret").unwrap(),
            redirect_uri: None,
        }
    }

    #[test]
    fn test_path_is_key_json_under_root() {
        let creds = credentials();
        let store = FileTokenStore::for_client("/tmp/tokens", ClientCategory::Accounts, &creds);
        let key = TokenKey::derive(ClientCategory::Accounts, &creds);
        assert_eq!(
            store.path(),
            Path::new("/tmp/tokens").join(format!("{key}.json"))
        );
    }

    #[test]
    fn test_missing_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::for_client(dir.path(), ClientCategory::Accounts, &credentials());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::for_client(dir.path(), ClientCategory::Payments, &credentials());
        let token = Token::new("X").with_refresh_token("R").with_scope("payments");

        store.save(&token).unwrap();

        assert_eq!(store.load().unwrap(), Some(token));
    }

    #[test]
    fn test_save_creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("nested").join("tokens");
        let store = FileTokenStore::for_client(&root, ClientCategory::Accounts, &credentials());

        store.save(&Token::new("X")).unwrap();

        assert!(store.path().exists());
    }

    #[test]
    fn test_corrupt_file_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::for_client(dir.path(), ClientCategory::Accounts, &credentials());
        fs::write(store.path(), b"{not json").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_overwrites_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::for_client(dir.path(), ClientCategory::Accounts, &credentials());

        store.save(&Token::new("first")).unwrap();
        store.save(&Token::new("second")).unwrap();

        assert_eq!(store.load().unwrap().unwrap().access_token, "second");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::for_client(dir.path(), ClientCategory::Accounts, &credentials());
        store.save(&Token::new("X")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
