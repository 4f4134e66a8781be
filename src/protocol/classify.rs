//! Request classification predicates.
//!
//! Everything here is a pure function over request headers. Classification
//! governs the JSON-vs-HTML branch, the version-mismatch interception, and
//! the full-vs-partial resolution mode downstream.

use axum::http::HeaderMap;

use crate::protocol::header::{
    X_INERTIA, X_INERTIA_ERROR_BAG, X_INERTIA_PARTIAL_COMPONENT, X_INERTIA_VERSION,
};

/// True iff the request was made by the Inertia.js client framework.
pub fn is_inertia_request(headers: &HeaderMap) -> bool {
    header_str(headers, X_INERTIA) == "true"
}

/// The asset version token the client rendered against, or `""`.
pub fn client_version(headers: &HeaderMap) -> &str {
    header_str(headers, X_INERTIA_VERSION)
}

/// True iff the request is a partial reload scoped to `component`.
///
/// A partial request naming a different component is treated as a full
/// render; the whitelist/blacklist headers apply only on a name match.
pub fn is_partial_request(headers: &HeaderMap, component: &str) -> bool {
    header_str(headers, X_INERTIA_PARTIAL_COMPONENT) == component
}

/// The error bag requested by the client, or the default (empty) bag.
pub fn error_bag(headers: &HeaderMap) -> String {
    header_str(headers, X_INERTIA_ERROR_BAG).to_string()
}

/// Extract a comma-separated header value as a list of trimmed fields.
///
/// An absent (or empty) header yields `None`. A trailing comma yields a
/// trailing empty-string field; clients depend on that extraction shape.
pub fn header_value_list(headers: &HeaderMap, name: &str) -> Option<Vec<String>> {
    let raw = header_str(headers, name);
    if raw.is_empty() {
        return None;
    }

    Some(raw.split(',').map(|field| field.trim().to_string()).collect())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> &'a str {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
