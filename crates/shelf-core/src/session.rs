//! Session state and credential storage.
//!
//! Stores the bearer token in `<home>/credentials.json` with restricted
//! permissions (0600). The token is opaque: nothing here inspects it, and it
//! is never logged in full.
//!
//! The session is an explicit value threaded through the view and the CLI
//! rather than ambient global state, so tests can back it with a temporary
//! directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::paths;

/// On-disk credential format.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredCredential {
    access_token: String,
}

/// Storage location for the persisted credential.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Creates a store backed by a specific file path.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Creates a store backed by the default credentials path.
    pub fn at_default_path() -> Self {
        Self::new(paths::credentials_path())
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Loads the saved token, if any.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read credentials from {}", self.path.display()))?;
        let stored: StoredCredential = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse credentials from {}", self.path.display()))?;
        Ok(Some(stored.access_token))
    }

    /// Saves the token with restricted permissions (0600).
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        let stored = StoredCredential {
            access_token: token.to_string(),
        };
        let contents =
            serde_json::to_string_pretty(&stored).context("Failed to serialize credentials")?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&self.path)
                .with_context(|| format!("Failed to open {} for writing", self.path.display()))?;
            file.write_all(contents.as_bytes())
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        #[cfg(not(unix))]
        {
            fs::write(&self.path, contents)
                .with_context(|| format!("Failed to write to {}", self.path.display()))?;
        }

        Ok(())
    }

    /// Removes the saved token. Missing file is not an error.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be removed.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove credentials {}", self.path.display())),
        }
    }
}

/// The session context: the active credential plus its storage.
#[derive(Debug)]
pub struct Session {
    credential: Option<String>,
    store: CredentialStore,
}

impl Session {
    /// Restores a session from storage. A saved token becomes the active
    /// credential as-is; its structure is not validated.
    ///
    /// # Errors
    /// Returns an error if the credentials file is unreadable.
    pub fn restore(store: CredentialStore) -> Result<Self> {
        let credential = store.load()?;
        Ok(Self { credential, store })
    }

    /// Restores a session from the default credentials path.
    pub fn restore_default() -> Result<Self> {
        Self::restore(CredentialStore::at_default_path())
    }

    /// Makes `token` the active credential, in memory and on disk.
    ///
    /// The in-memory credential is set even when persistence fails; the
    /// session just won't survive a restart.
    ///
    /// # Errors
    /// Returns an error if the token cannot be persisted.
    pub fn establish(&mut self, token: &str) -> Result<()> {
        self.credential = Some(token.to_string());
        self.store.save(token)
    }

    /// Drops the active credential from memory and storage.
    ///
    /// Callers are responsible for clearing dependent user/item state.
    ///
    /// # Errors
    /// Returns an error if the stored credential cannot be removed.
    pub fn clear(&mut self) -> Result<()> {
        self.credential = None;
        self.store.clear()
    }

    /// Returns the active credential, if any.
    pub fn credential(&self) -> Option<&str> {
        self.credential.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CredentialStore {
        CredentialStore::new(dir.path().join("credentials.json"))
    }

    #[test]
    fn test_restore_without_saved_token_is_unauthenticated() {
        let dir = tempdir().unwrap();
        let session = Session::restore(store_in(&dir)).unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.credential(), None);
    }

    #[test]
    fn test_establish_persists_across_restore() {
        let dir = tempdir().unwrap();
        let mut session = Session::restore(store_in(&dir)).unwrap();
        session.establish("tok-123").unwrap();
        assert_eq!(session.credential(), Some("tok-123"));

        let restored = Session::restore(store_in(&dir)).unwrap();
        assert_eq!(restored.credential(), Some("tok-123"));
    }

    #[test]
    fn test_clear_removes_memory_and_file() {
        let dir = tempdir().unwrap();
        let mut session = Session::restore(store_in(&dir)).unwrap();
        session.establish("tok-123").unwrap();
        session.clear().unwrap();

        assert!(!session.is_authenticated());
        assert!(!dir.path().join("credentials.json").exists());

        // Clearing again is fine.
        session.clear().unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_credentials_file_mode_is_0600() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = store_in(&dir);
        store.save("tok-123").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
