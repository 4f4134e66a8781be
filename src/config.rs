//! Renderer configuration.

/// Default ID of the root HTML element the client app mounts into.
pub const DEFAULT_ROOT_VIEW_ID: &str = "app";

/// Configuration for [`Renderer`](crate::render::Renderer) construction.
#[derive(Debug, Clone)]
pub struct Config {
    /// Asset version token compared against the client's version header.
    pub version: String,

    /// ID of the root HTML element the client app mounts into.
    pub root_view_id: String,

    /// Extra attributes rendered on the root element. A `data-page` entry
    /// is skipped; that attribute carries the page document.
    pub root_view_attrs: Vec<(String, String)>,

    /// Worker-pool size for concurrent prop resolution.
    ///
    /// `0` derives the default from available host parallelism at
    /// construction; a negative value forces sequential resolution.
    pub concurrency: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: String::new(),
            root_view_id: DEFAULT_ROOT_VIEW_ID.to_string(),
            root_view_attrs: Vec::new(),
            concurrency: 0,
        }
    }
}
