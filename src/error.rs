//! Error taxonomy for page assembly and response negotiation.
//!
//! # Design Decisions
//! - Lazy prop failures abort the whole render; the first error observed in a
//!   concurrent group wins and the rest are discarded
//! - Errors map to HTTP 500 via `IntoResponse`; they are never converted to
//!   redirects on the caller's behalf
//! - No retry policy; every failure is terminal for the current render

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Boxed error used at collaborator seams (lazy props, SSR, templates).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced while assembling or sending an Inertia response.
#[derive(Debug, Error)]
pub enum Error {
    /// Renderer construction rejected the configuration.
    #[error("invalid renderer configuration: {0}")]
    Config(&'static str),

    /// A prop value failed to resolve, naming the offending key.
    #[error("failed to resolve prop {key}: {source}")]
    Prop {
        key: String,
        #[source]
        source: BoxError,
    },

    /// A concurrent resolution task panicked or was aborted.
    #[error("prop resolution task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// The server-side rendering service failed to render the page.
    #[error("failed to render page with the SSR service: {0}")]
    Ssr(#[source] BoxError),

    /// The HTML template failed to execute.
    #[error("failed to execute HTML template: {0}")]
    Template(#[source] BoxError),

    /// The page document could not be encoded as JSON.
    #[error("failed to encode page document: {0}")]
    Json(#[from] serde_json::Error),

    /// A render was attempted without the middleware installed.
    #[error("renderer not found in request extensions - is the Inertia middleware installed?")]
    RendererMissing,
}

impl Error {
    pub(crate) fn prop(key: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Prop {
            key: key.into(),
            source: source.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "inertia render failed");
        (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
    }
}
