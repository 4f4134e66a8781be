//! Server-side adapter for the Inertia.js protocol.
//!
//! Inertia.js front ends request either a full HTML document or a JSON
//! "page" document describing the component to render and its props. This
//! crate implements the server half of that exchange on top of axum:
//! request classification, prop resolution, response negotiation, and the
//! protocol's redirect/empty-response interception rules.
//!
//! # Architecture Overview
//!
//! ```text
//! inbound request
//!     → middleware (protocol marker, version token, response buffering)
//!     → handler extracts Inertia, builds a RenderContext
//!     → render (prop resolution, deferred/merge indexes, Page assembly)
//!     → JSON page document, or HTML via the Template / SsrClient seams
//! ```
//!
//! For detailed protocol documentation, visit <https://inertiajs.com/the-protocol>

pub mod config;
pub mod error;
pub mod middleware;
pub mod page;
pub mod props;
pub mod protocol;
pub mod render;
pub mod response;

pub use config::{Config, DEFAULT_ROOT_VIEW_ID};
pub use error::{BoxError, Error};
pub use middleware::{Inertia, MiddlewareConfig, MiddlewareState};
pub use page::Page;
pub use props::{Prop, ValidationError, ValidationErrorer, DEFAULT_ERROR_BAG};
pub use render::{RenderContext, Renderer};
pub use response::PageResponse;
