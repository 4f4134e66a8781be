//! Inertia.js protocol vocabulary and request classification.
//!
//! # Data Flow
//! ```text
//! inbound request headers
//!     → classify.rs (protocol marker, version token, partial scoping)
//!     → render / middleware decide JSON vs HTML, full vs partial
//! ```
//!
//! # Design Decisions
//! - Classification is pure functions over headers, no side effects
//! - Header lists split on commas and trim per field; an absent header is
//!   `None`, never an empty list
//! - A partial request scoped to a different component is a full request

pub mod classify;
pub mod header;

use axum::http::Uri;

/// The raw request target (path plus query) stamped into the page document.
pub(crate) fn request_target(uri: &Uri) -> &str {
    uri.path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
}
