//! Inertia.js protocol middleware.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → renderer installed into request extensions
//!     → not a protocol request? pass through, stamp Vary
//!     → asset version mismatch? version-mismatch hook (default: same-URL
//!       location response), skip the handler
//!     → run handler, buffer the response
//!     → rewrite 302 → 303 for PUT/PATCH/DELETE
//!     → empty output? empty-response hook (default: 204)
//!     → flush
//! ```
//!
//! # Design Decisions
//! - Only protocol requests are buffered; plain requests stream through
//! - Every response varies on the protocol marker, except location
//!   responses, which carry no negotiation headers
//! - The buffered response is single-owner for the request lifetime
//!
//! Attach with `axum::middleware::from_fn_with_state`:
//!
//! ```ignore
//! let state = MiddlewareState::new(renderer);
//! let app = Router::new()
//!     .route("/", get(index))
//!     .layer(axum::middleware::from_fn_with_state(state, middleware::handle));
//! ```

mod buffer;
mod extract;
pub mod redirect;

pub use extract::Inertia;

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::header::VARY;
use axum::http::request::Parts;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::protocol::classify::{client_version, is_inertia_request};
use crate::protocol::header::{X_INERTIA, X_INERTIA_LOCATION};
use crate::protocol::request_target;
use crate::render::Renderer;
use buffer::BufferedResponse;
use redirect::location;

/// Hook invoked with the request head when the middleware intercepts a
/// response on the handler's behalf.
pub type Hook = Arc<dyn Fn(&Parts) -> Response + Send + Sync>;

/// Configures interception behavior of the middleware.
#[derive(Clone)]
pub struct MiddlewareConfig {
    /// Runs when a handler produces no response body.
    ///
    /// Defaults to a 204 with a diagnostic message.
    pub on_empty_response: Hook,

    /// Runs when the client's asset version does not match the server's.
    ///
    /// Defaults to a same-URL location response so the client reloads the
    /// page with fresh assets.
    pub on_version_mismatch: Hook,
}

impl Default for MiddlewareConfig {
    fn default() -> Self {
        Self {
            on_empty_response: Arc::new(default_empty_response),
            on_version_mismatch: Arc::new(default_version_mismatch),
        }
    }
}

fn default_empty_response(_head: &Parts) -> Response {
    (StatusCode::NO_CONTENT, "Empty response").into_response()
}

fn default_version_mismatch(head: &Parts) -> Response {
    location(&head.headers, &head.method, request_target(&head.uri))
}

/// State handed to [`handle`] via `from_fn_with_state`.
#[derive(Clone)]
pub struct MiddlewareState {
    renderer: Arc<Renderer>,
    config: MiddlewareConfig,
}

impl MiddlewareState {
    pub fn new(renderer: Arc<Renderer>) -> Self {
        Self::with_config(renderer, MiddlewareConfig::default())
    }

    pub fn with_config(renderer: Arc<Renderer>, config: MiddlewareConfig) -> Self {
        Self { renderer, config }
    }
}

/// The protocol middleware function.
pub async fn handle(
    State(state): State<MiddlewareState>,
    mut request: Request,
    next: Next,
) -> Response {
    request.extensions_mut().insert(Arc::clone(&state.renderer));

    if !is_inertia_request(request.headers()) {
        let mut response = next.run(request).await;
        finalize(&mut response);
        return response;
    }

    let (parts, body) = request.into_parts();
    let head = parts.clone();
    let request = Request::from_parts(parts, body);

    let client = client_version(&head.headers);
    let server = state.renderer.version();
    if client != server {
        tracing::debug!(
            client_version = client,
            server_version = server,
            "asset version mismatch"
        );
        let mut response = (state.config.on_version_mismatch)(&head);
        finalize(&mut response);
        return response;
    }

    let response = next.run(request).await;
    let buffered = match BufferedResponse::capture(response).await {
        Ok(buffered) => buffered,
        Err(err) => {
            tracing::error!(error = %err, "failed to buffer handler response");
            let mut response =
                (StatusCode::INTERNAL_SERVER_ERROR, "failed to buffer response").into_response();
            finalize(&mut response);
            return response;
        }
    };

    let buffered = buffered.rewrite_for(&head.method);
    let mut response = if buffered.is_empty() {
        tracing::debug!(path = %head.uri.path(), "handler produced an empty response");
        (state.config.on_empty_response)(&head)
    } else {
        buffered.flush()
    };

    finalize(&mut response);
    response
}

/// Stamp cache-negotiation headers. Every response varies on the protocol
/// marker, except location responses, which must not carry negotiation
/// headers at all.
fn finalize(response: &mut Response) {
    let headers = response.headers_mut();

    if headers.contains_key(X_INERTIA_LOCATION) {
        headers.remove(VARY);
        headers.remove(X_INERTIA);
        return;
    }

    headers.insert(VARY, HeaderValue::from_static("X-Inertia"));
}
