//! Authentication module for holding credentials between requests.
//!
//! This module provides:
//! - `CredentialStore`: the injectable token store the API client reads before every request
//! - `MemoryCredentialStore`: in-process store, used by tests and embedders
//! - `FileCredentialStore`: session file persisted in the cache directory
//! - `Keychain`: optional OS keychain storage for a remembered admin password
//!
//! Access tokens live 7 days and refresh tokens 30 days unless configured otherwise.

pub mod keychain;
pub mod session;
pub mod store;

pub use keychain::Keychain;
pub use session::FileCredentialStore;
pub use store::{CredentialStore, Credentials, MemoryCredentialStore, StoredToken, TokenPolicy};
