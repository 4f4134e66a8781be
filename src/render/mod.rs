//! Page assembly and response negotiation.
//!
//! # Data Flow
//! ```text
//! handler calls render(component, context)
//!     → context props + synthetic validation-error prop
//!     → resolution engine (full or partial mode)
//!     → deferred-group index + merge-key list
//!     → Page document
//!     → JSON response (protocol request)
//!       or HTML document via Template / SsrClient (full page load)
//! ```
//!
//! # Design Decisions
//! - Template execution and SSR are trait seams; the host application
//!   supplies the implementations
//! - An SSR failure fails the whole render; there is no fallback to
//!   client-side rendering

mod context;
mod renderer;
pub mod ssr;
mod template;

pub use context::RenderContext;
pub use renderer::Renderer;
pub use ssr::{HttpSsrClient, SsrClient, SsrTemplateData};
pub use template::{ShellTemplate, Template, TemplateData};
