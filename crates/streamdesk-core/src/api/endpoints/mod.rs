//! Admin endpoint wrappers, grouped by dashboard area.
//!
//! Each method builds one `ApiRequest`, sends it through the authenticated
//! client and returns the response body unchanged. Failures carry the
//! operation's fallback message when the server does not supply one.

use std::borrow::Cow;

pub mod admin;
pub mod analytics;
pub mod gifts;
pub mod moderation;
pub mod notifications;
pub mod streams;
pub mod support;
pub mod tools;
pub mod transactions;
pub mod users;
pub mod wallet;

/// Percent-encode an id for use as a path segment.
pub(crate) fn segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}
