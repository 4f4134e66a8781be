//! Page property model and resolution.
//!
//! # Data Flow
//! ```text
//! handler props + synthetic validation-error prop
//!     → resolve.rs (full or partial mode, bounded worker pool)
//!     → key → value mapping for the page document
//!     → index.rs (deferred-group index, merge-key list)
//! ```
//!
//! # Design Decisions
//! - A prop is exactly one of four kinds, enforced by constructors
//! - Lazy values are resolved per request, never memoized; they typically
//!   read live external state
//! - The first resolution error aborts the render; no partial mappings

pub(crate) mod index;
mod prop;
pub(crate) mod resolve;
mod validation;

pub use prop::{LazyFuture, Prop, DEFAULT_DEFERRED_GROUP};
pub use validation::{ValidationError, ValidationErrorer, DEFAULT_ERROR_BAG};

pub(crate) use validation::validation_errors_prop;
