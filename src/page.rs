//! The canonical page document sent to the Inertia.js client.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A page document, serialized as JSON for protocol requests and embedded
/// in the root view's `data-page` attribute for full HTML loads.
///
/// Field names are fixed by the protocol; the client depends on them.
/// Created once per request and immutable after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub component: String,
    pub props: Map<String, Value>,
    pub url: String,
    pub version: String,

    /// Deferred-group index, advertised on full renders only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deferred_props: Option<BTreeMap<String, Vec<String>>>,

    /// Keys the client merges instead of replacing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_props: Option<Vec<String>>,

    pub encrypt_history: bool,
    pub clear_history: bool,
}
