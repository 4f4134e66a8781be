//! Buffered-response state machine.
//!
//! # Responsibilities
//! - Hold the downstream handler's status, headers, and body before any
//!   byte reaches the client
//! - Rewrite the generic 302 redirect to 303 for methods that must not
//!   replay with a different method
//! - Detect handlers that produced no output at all
//!
//! # Design Decisions
//! - States progress `Recording → Rewriting → Flushed`; the transitions are
//!   linear and `flush` consumes the buffer, so a double flush does not
//!   typecheck
//! - A 200 with no body bytes is treated as unwritten output

use axum::body::{to_bytes, Body, Bytes};
use axum::http::{response::Parts, Method, StatusCode};
use axum::response::Response;

/// Methods whose redirects must not silently replay with the original
/// method; a 302 issued for them is rewritten to 303.
const SEE_OTHER_METHODS: [Method; 3] = [Method::PUT, Method::PATCH, Method::DELETE];

enum BufferState {
    Recording,
    Rewriting,
}

/// A fully buffered downstream response awaiting rewrite and flush.
pub(crate) struct BufferedResponse {
    state: BufferState,
    parts: Parts,
    body: Bytes,
}

impl BufferedResponse {
    /// Buffer the downstream response. Entry point of the `Recording` state.
    pub(crate) async fn capture(response: Response) -> Result<Self, axum::Error> {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX).await?;

        Ok(Self {
            state: BufferState::Recording,
            parts,
            body,
        })
    }

    /// Apply the redirect status rewrite for the originating method and
    /// transition to `Rewriting`. A repeated call is a no-op; the rewrite
    /// happens exactly once.
    pub(crate) fn rewrite_for(mut self, method: &Method) -> Self {
        if matches!(self.state, BufferState::Rewriting) {
            return self;
        }

        if self.parts.status == StatusCode::FOUND && SEE_OTHER_METHODS.contains(method) {
            tracing::debug!(%method, "rewriting 302 redirect to 303");
            self.parts.status = StatusCode::SEE_OTHER;
        }

        self.state = BufferState::Rewriting;
        self
    }

    /// True when the handler wrote no bytes and left the default status.
    pub(crate) fn is_empty(&self) -> bool {
        self.body.is_empty() && self.parts.status == StatusCode::OK
    }

    /// Copy the buffered head and body to the final response. Terminal
    /// state; consuming `self` makes the transition linear.
    pub(crate) fn flush(self) -> Response {
        Response::from_parts(self.parts, Body::from(self.body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::LOCATION;
    use axum::response::IntoResponse;

    async fn buffered(response: Response) -> BufferedResponse {
        BufferedResponse::capture(response).await.unwrap()
    }

    fn found_redirect() -> Response {
        (StatusCode::FOUND, [(LOCATION, "/somewhere")]).into_response()
    }

    #[tokio::test]
    async fn test_found_is_rewritten_for_unsafe_methods() {
        for method in [Method::PUT, Method::PATCH, Method::DELETE] {
            let response = buffered(found_redirect()).await.rewrite_for(&method).flush();
            assert_eq!(response.status(), StatusCode::SEE_OTHER);
            assert_eq!(response.headers()[LOCATION], "/somewhere");
        }
    }

    #[tokio::test]
    async fn test_found_is_kept_for_safe_methods() {
        for method in [Method::GET, Method::POST] {
            let response = buffered(found_redirect()).await.rewrite_for(&method).flush();
            assert_eq!(response.status(), StatusCode::FOUND);
        }
    }

    #[tokio::test]
    async fn test_other_statuses_are_untouched() {
        let response = buffered((StatusCode::CREATED, "done").into_response())
            .await
            .rewrite_for(&Method::PUT)
            .flush();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    #[tokio::test]
    async fn test_empty_detection() {
        let empty = buffered(().into_response()).await.rewrite_for(&Method::GET);
        assert!(empty.is_empty());

        let with_body = buffered("hi".into_response()).await.rewrite_for(&Method::GET);
        assert!(!with_body.is_empty());

        // An explicit non-default status is not "unwritten".
        let no_content = buffered(StatusCode::NO_CONTENT.into_response())
            .await
            .rewrite_for(&Method::GET);
        assert!(!no_content.is_empty());
    }

    #[tokio::test]
    async fn test_flush_preserves_buffered_bytes() {
        let response = buffered((StatusCode::OK, "payload").into_response())
            .await
            .rewrite_for(&Method::GET)
            .flush();

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"payload");
    }
}
