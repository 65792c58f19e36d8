use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Duration;
use tracing::{debug, warn};

use super::store::{lock, CredentialStore, Credentials, StoredToken};

/// Session file name in cache directory
const SESSION_FILE: &str = "session.json";

/// Credential store persisted to a session file, the CLI's equivalent of
/// browser cookies.
///
/// The file is read once when the store is opened and rewritten on every
/// change. Disk failures are logged and otherwise ignored: the in-memory
/// state stays authoritative for the running process.
pub struct FileCredentialStore {
    path: PathBuf,
    state: Mutex<Credentials>,
}

impl FileCredentialStore {
    /// Open the session file inside `cache_dir`.
    pub fn open(cache_dir: &Path) -> Self {
        Self::at_path(cache_dir.join(SESSION_FILE))
    }

    /// Open a session file at an explicit location.
    pub fn at_path(path: PathBuf) -> Self {
        let credentials = match Self::load(&path) {
            Ok(credentials) => credentials,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring unreadable session file");
                Credentials::default()
            }
        };

        Self {
            path,
            state: Mutex::new(credentials),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Credentials> {
        if !path.exists() {
            return Ok(Credentials::default());
        }

        let contents = std::fs::read_to_string(path).context("Failed to read session file")?;
        let mut credentials: Credentials =
            serde_json::from_str(&contents).context("Failed to parse session file")?;
        credentials.prune_expired();
        debug!(path = %path.display(), "Loaded session file");
        Ok(credentials)
    }

    fn save(&self, credentials: &Credentials) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(credentials)?;
        std::fs::write(&self.path, contents).context("Failed to write session file")?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).context("Failed to remove session file")?;
        }
        Ok(())
    }

    fn update(&self, apply: impl FnOnce(&mut Credentials)) {
        let mut state = lock(&self.state);
        apply(&mut state);
        if let Err(e) = self.save(&state) {
            warn!(path = %self.path.display(), error = %e, "Failed to persist session");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn set_access_token(&self, token: &str, ttl: Duration) {
        self.update(|c| c.access = Some(StoredToken::new(token, ttl)));
    }

    fn set_refresh_token(&self, token: &str, ttl: Duration) {
        self.update(|c| c.refresh = Some(StoredToken::new(token, ttl)));
    }

    fn access_token(&self) -> Option<String> {
        lock(&self.state).access_token().map(str::to_string)
    }

    fn refresh_token(&self) -> Option<String> {
        lock(&self.state).refresh_token().map(str::to_string)
    }

    fn clear(&self) {
        let mut state = lock(&self.state);
        *state = Credentials::default();
        if let Err(e) = self.remove() {
            warn!(path = %self.path.display(), error = %e, "Failed to remove session file");
        }
    }

    fn credentials(&self) -> Credentials {
        lock(&self.state).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_tokens_survive_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileCredentialStore::open(dir.path());
            store.set_access_token("access-1", Duration::days(7));
            store.set_refresh_token("refresh-1", Duration::days(30));
        }

        let reopened = FileCredentialStore::open(dir.path());
        assert_eq!(reopened.access_token().as_deref(), Some("access-1"));
        assert_eq!(reopened.refresh_token().as_deref(), Some("refresh-1"));
        assert!(reopened.is_authenticated());
    }

    #[test]
    fn test_expired_entries_dropped_on_load() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileCredentialStore::open(dir.path());
            store.set_access_token("expired", Duration::seconds(-10));
            store.set_refresh_token("refresh-1", Duration::days(30));
        }

        let reopened = FileCredentialStore::open(dir.path());
        let creds = reopened.credentials();
        assert!(creds.access.is_none());
        assert_eq!(creds.refresh_token(), Some("refresh-1"));
    }

    #[test]
    fn test_clear_removes_file_and_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = FileCredentialStore::open(dir.path());
        store.set_access_token("a", Duration::days(7));
        assert!(store.path().exists());

        store.clear();
        assert!(!store.path().exists());
        assert!(!store.is_authenticated());

        store.clear();
        assert!(!store.path().exists());
        assert!(store.credentials().is_empty());
    }

    #[test]
    fn test_corrupt_session_file_starts_empty() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(SESSION_FILE), "not json").unwrap();

        let store = FileCredentialStore::open(dir.path());
        assert!(store.credentials().is_empty());

        // Writing replaces the corrupt file
        store.set_refresh_token("r", Duration::days(30));
        let reopened = FileCredentialStore::open(dir.path());
        assert_eq!(reopened.refresh_token().as_deref(), Some("r"));
    }
}
