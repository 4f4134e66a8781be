//! Header names exchanged with the Inertia.js client.

/// Protocol marker; `"true"` on both protocol requests and JSON responses.
pub const X_INERTIA: &str = "x-inertia";

/// Asset version token sent by the client.
pub const X_INERTIA_VERSION: &str = "x-inertia-version";

/// Redirect target for navigation performed by the client-side router.
pub const X_INERTIA_LOCATION: &str = "x-inertia-location";

/// Partial reload whitelist (comma-separated prop keys).
pub const X_INERTIA_PARTIAL_DATA: &str = "x-inertia-partial-data";

/// Partial reload blacklist (comma-separated prop keys).
pub const X_INERTIA_PARTIAL_EXCEPT: &str = "x-inertia-partial-except";

/// Component a partial reload is scoped to.
pub const X_INERTIA_PARTIAL_COMPONENT: &str = "x-inertia-partial-component";

/// Merge-prop keys the client wants replaced rather than merged this response.
pub const X_INERTIA_RESET: &str = "x-inertia-reset";

/// Error bag requested by the submitting form.
pub const X_INERTIA_ERROR_BAG: &str = "x-inertia-error-bag";

pub const CONTENT_TYPE_HTML: &str = "text/html";
pub const CONTENT_TYPE_JSON: &str = "application/json";
