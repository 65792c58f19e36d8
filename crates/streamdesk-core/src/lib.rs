//! Core library for the streamdesk admin console.
//!
//! Provides the authenticated REST client for the livestream gifting
//! platform's admin API:
//!
//! - `auth`: credential stores holding the access/refresh token pair
//! - `api`: the `ApiClient`, its transport seam, and every admin endpoint
//! - `models`: typed query and request body builders
//! - `config`: persisted client configuration

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError, AuthEvent, ClientSettings, ErrorKind};
pub use auth::{CredentialStore, FileCredentialStore, MemoryCredentialStore, TokenPolicy};
pub use config::Config;
