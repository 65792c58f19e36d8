use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default access token lifetime in days.
const ACCESS_TOKEN_TTL_DAYS: i64 = 7;

/// Default refresh token lifetime in days.
const REFRESH_TOKEN_TTL_DAYS: i64 = 30;

/// Lifetimes applied when the client stores tokens after login or refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenPolicy {
    pub access_ttl: Duration,
    pub refresh_ttl: Duration,
}

impl Default for TokenPolicy {
    fn default() -> Self {
        Self {
            access_ttl: Duration::days(ACCESS_TOKEN_TTL_DAYS),
            refresh_ttl: Duration::days(REFRESH_TOKEN_TTL_DAYS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredToken {
    /// Expiry saturates instead of overflowing for lifetimes past chrono's range.
    pub fn new(value: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).unwrap_or(if ttl < Duration::zero() {
            now
        } else {
            DateTime::<Utc>::MAX_UTC
        });
        Self {
            value: value.to_string(),
            expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now() >= self.expires_at
    }

    pub fn time_until_expiry(&self) -> Duration {
        self.expires_at - Utc::now()
    }

    /// Get minutes remaining until expiry (for display)
    pub fn minutes_until_expiry(&self) -> i64 {
        self.time_until_expiry().num_minutes().max(0)
    }
}

/// The access/refresh token pair with independent expirations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub access: Option<StoredToken>,
    pub refresh: Option<StoredToken>,
}

impl Credentials {
    pub fn access_token(&self) -> Option<&str> {
        self.access
            .as_ref()
            .filter(|t| !t.is_expired())
            .map(|t| t.value.as_str())
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh
            .as_ref()
            .filter(|t| !t.is_expired())
            .map(|t| t.value.as_str())
    }

    /// Drop entries whose expiry has passed.
    pub fn prune_expired(&mut self) {
        if self.access.as_ref().is_some_and(StoredToken::is_expired) {
            self.access = None;
        }
        if self.refresh.as_ref().is_some_and(StoredToken::is_expired) {
            self.refresh = None;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.access.is_none() && self.refresh.is_none()
    }
}

/// Holds the credentials the API client attaches to outgoing requests.
///
/// Absence is a normal state: getters return `None` for unset or expired
/// tokens and no operation fails. Implementations serialize their own writes
/// so a store can be shared between concurrent requests.
pub trait CredentialStore: Send + Sync {
    /// Store the access token, replacing any previous value.
    fn set_access_token(&self, token: &str, ttl: Duration);

    /// Store the refresh token, replacing any previous value.
    fn set_refresh_token(&self, token: &str, ttl: Duration);

    fn access_token(&self) -> Option<String>;

    fn refresh_token(&self) -> Option<String>;

    /// Remove both tokens.
    fn clear(&self);

    /// Snapshot of the stored pair, including expiry times.
    fn credentials(&self) -> Credentials;

    fn is_authenticated(&self) -> bool {
        self.access_token().is_some()
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Credential store that lives only as long as the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    state: Mutex<Credentials>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn set_access_token(&self, token: &str, ttl: Duration) {
        lock(&self.state).access = Some(StoredToken::new(token, ttl));
    }

    fn set_refresh_token(&self, token: &str, ttl: Duration) {
        lock(&self.state).refresh = Some(StoredToken::new(token, ttl));
    }

    fn access_token(&self) -> Option<String> {
        lock(&self.state).access_token().map(str::to_string)
    }

    fn refresh_token(&self) -> Option<String> {
        lock(&self.state).refresh_token().map(str::to_string)
    }

    fn clear(&self) {
        *lock(&self.state) = Credentials::default();
    }

    fn credentials(&self) -> Credentials {
        lock(&self.state).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get_tokens() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.access_token(), None);
        assert!(!store.is_authenticated());

        store.set_access_token("access-1", Duration::days(7));
        store.set_refresh_token("refresh-1", Duration::days(30));

        assert_eq!(store.access_token().as_deref(), Some("access-1"));
        assert_eq!(store.refresh_token().as_deref(), Some("refresh-1"));
        assert!(store.is_authenticated());
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let store = MemoryCredentialStore::new();
        store.set_access_token("old", Duration::days(7));
        store.set_access_token("new", Duration::days(7));
        assert_eq!(store.access_token().as_deref(), Some("new"));
    }

    #[test]
    fn test_huge_ttl_saturates_expiry() {
        let token = StoredToken::new("forever", Duration::MAX);
        assert_eq!(token.expires_at, DateTime::<Utc>::MAX_UTC);
        assert!(!token.is_expired());

        let token = StoredToken::new("gone", Duration::MIN);
        assert!(token.is_expired());

        let store = MemoryCredentialStore::new();
        store.set_access_token("access-1", Duration::MAX);
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
    }

    #[test]
    fn test_expired_access_token_is_absent() {
        let store = MemoryCredentialStore::new();
        store.set_access_token("stale", Duration::seconds(-1));
        store.set_refresh_token("still-good", Duration::days(30));

        assert_eq!(store.access_token(), None);
        assert!(!store.is_authenticated());
        // Expirations are independent
        assert_eq!(store.refresh_token().as_deref(), Some("still-good"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let store = MemoryCredentialStore::new();
        store.set_access_token("a", Duration::days(7));
        store.set_refresh_token("r", Duration::days(30));

        store.clear();
        assert!(store.credentials().is_empty());
        assert!(!store.is_authenticated());

        store.clear();
        assert!(store.credentials().is_empty());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_prune_expired() {
        let mut creds = Credentials {
            access: Some(StoredToken::new("a", Duration::seconds(-5))),
            refresh: Some(StoredToken::new("r", Duration::days(1))),
        };
        creds.prune_expired();
        assert!(creds.access.is_none());
        assert_eq!(creds.refresh_token(), Some("r"));
    }

    #[test]
    fn test_default_policy() {
        let policy = TokenPolicy::default();
        assert_eq!(policy.access_ttl, Duration::days(7));
        assert_eq!(policy.refresh_ttl, Duration::days(30));
    }

    #[test]
    fn test_minutes_until_expiry_never_negative() {
        let token = StoredToken::new("t", Duration::minutes(-30));
        assert_eq!(token.minutes_until_expiry(), 0);
    }
}
