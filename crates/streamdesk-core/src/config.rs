//! Client configuration management.
//!
//! This module handles loading and saving the configuration: which API to
//! talk to, request timeout, token lifetimes, and the last login email.
//!
//! Configuration is stored at `~/.config/streamdesk/config.json`. The API URL
//! can be overridden with the `STREAMDESK_API_URL` environment variable.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::api::{ClientSettings, DEFAULT_API_BASE_URL};
use crate::auth::TokenPolicy;

/// Application name used for config/cache directory paths
const APP_NAME: &str = "streamdesk";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Longest token lifetime accepted from the config file (100 years)
const MAX_TOKEN_TTL_DAYS: i64 = 36_500;

/// Environment variable overriding the API base URL
pub const API_URL_ENV: &str = "STREAMDESK_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token_ttl_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_ttl_days: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory holding the session file.
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Resolve the API URL: explicit override, then environment, then file, then default.
    pub fn api_base_url(&self, override_url: Option<&str>) -> String {
        let from_env = std::env::var(API_URL_ENV).ok();
        resolve_base_url(override_url, from_env.as_deref(), self.api_base_url.as_deref())
    }

    pub fn token_policy(&self) -> TokenPolicy {
        let defaults = TokenPolicy::default();
        TokenPolicy {
            access_ttl: ttl_days(self.access_token_ttl_days, defaults.access_ttl),
            refresh_ttl: ttl_days(self.refresh_token_ttl_days, defaults.refresh_ttl),
        }
    }

    pub fn client_settings(&self, override_url: Option<&str>) -> ClientSettings {
        let defaults = ClientSettings::default();
        ClientSettings {
            base_url: self.api_base_url(override_url),
            timeout: self
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            token_policy: self.token_policy(),
        }
    }
}

/// Configured lifetime in days, capped at `MAX_TOKEN_TTL_DAYS`. Non-positive
/// values fall back to `default`.
fn ttl_days(days: Option<i64>, default: chrono::Duration) -> chrono::Duration {
    days.filter(|days| *days > 0)
        .and_then(|days| chrono::Duration::try_days(days.min(MAX_TOKEN_TTL_DAYS)))
        .unwrap_or(default)
}

fn resolve_base_url(override_url: Option<&str>, from_env: Option<&str>, from_file: Option<&str>) -> String {
    [override_url, from_env, from_file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|url| !url.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CredentialStore, MemoryCredentialStore};

    #[test]
    fn test_base_url_precedence() {
        assert_eq!(
            resolve_base_url(Some("http://cli"), Some("http://env"), Some("http://file")),
            "http://cli"
        );
        assert_eq!(
            resolve_base_url(None, Some("http://env"), Some("http://file")),
            "http://env"
        );
        assert_eq!(resolve_base_url(None, Some("  "), Some("http://file")), "http://file");
        assert_eq!(resolve_base_url(None, None, None), DEFAULT_API_BASE_URL);
    }

    #[test]
    fn test_token_policy_from_config() {
        let config = Config {
            access_token_ttl_days: Some(1),
            refresh_token_ttl_days: Some(0),
            ..Config::default()
        };
        let policy = config.token_policy();
        assert_eq!(policy.access_ttl, chrono::Duration::days(1));
        // Non-positive values fall back to the default
        assert_eq!(policy.refresh_ttl, chrono::Duration::days(30));
    }

    #[test]
    fn test_token_policy_caps_large_ttls() {
        let config = Config {
            access_token_ttl_days: Some(200_000_000),
            refresh_token_ttl_days: Some(i64::MAX),
            ..Config::default()
        };
        let policy = config.token_policy();
        assert_eq!(policy.access_ttl, chrono::Duration::days(MAX_TOKEN_TTL_DAYS));
        assert_eq!(policy.refresh_ttl, chrono::Duration::days(MAX_TOKEN_TTL_DAYS));

        let store = MemoryCredentialStore::new();
        store.set_access_token("access-1", policy.access_ttl);
        assert_eq!(store.access_token().as_deref(), Some("access-1"));
    }

    #[test]
    fn test_zero_timeout_falls_back_to_default() {
        let settings = Config {
            request_timeout_secs: Some(0),
            ..Config::default()
        }
        .client_settings(None);
        assert_eq!(settings.timeout, Duration::from_secs(30));

        let settings = Config {
            request_timeout_secs: Some(5),
            ..Config::default()
        }
        .client_settings(None);
        assert_eq!(settings.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_client_settings_defaults() {
        let settings = Config {
            api_base_url: Some("http://localhost:3000/api/v1".to_string()),
            ..Config::default()
        }
        .client_settings(Some("http://localhost:3000/api/v1"));
        assert_eq!(settings.base_url, "http://localhost:3000/api/v1");
        assert_eq!(settings.timeout, Duration::from_secs(30));
        assert_eq!(settings.token_policy, TokenPolicy::default());
    }

    #[test]
    fn test_config_round_trips_sparse_json() {
        let config: Config = serde_json::from_str(r#"{"last_email":"admin@example.com"}"#).unwrap();
        assert_eq!(config.last_email.as_deref(), Some("admin@example.com"));
        assert_eq!(serde_json::to_string(&config).unwrap(), r#"{"last_email":"admin@example.com"}"#);
    }
}
