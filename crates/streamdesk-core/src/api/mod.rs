//! REST API client module for the platform's admin API.
//!
//! This module provides the `ApiClient` used for every admin call. The
//! client attaches the bearer token from its `CredentialStore`, refreshes an
//! expired token once per request, and normalizes failures into `ApiError`.
//!
//! Endpoint wrappers live in `endpoints`, one file per admin area.

pub mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod events;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{ApiClient, ClientSettings, DEFAULT_API_BASE_URL};
pub use error::{ApiError, ErrorKind, TransportError};
pub use events::AuthEvent;
pub use transport::{ApiRequest, HttpResponse, ReqwestTransport, Transport};
