//! Request extractor giving handlers access to the installed renderer.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;

use crate::error::Error;
use crate::middleware::redirect;
use crate::protocol::classify;
use crate::render::{RenderContext, Renderer};
use crate::response::PageResponse;

/// Extractor for rendering Inertia responses from a handler.
///
/// Captures the request data the renderer classifies against (method, URI,
/// headers) together with the renderer installed by the middleware.
/// Extraction fails with [`Error::RendererMissing`] when the middleware is
/// not in the request chain.
pub struct Inertia {
    renderer: Arc<Renderer>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
}

impl<S> FromRequestParts<S> for Inertia
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let renderer = parts
            .extensions
            .get::<Arc<Renderer>>()
            .cloned()
            .ok_or(Error::RendererMissing)?;

        Ok(Self {
            renderer,
            method: parts.method.clone(),
            uri: parts.uri.clone(),
            headers: parts.headers.clone(),
        })
    }
}

impl Inertia {
    /// Render `component` with the given context, negotiating JSON or HTML
    /// from the request headers.
    pub async fn render(&self, component: &str, context: RenderContext) -> Result<Response, Error> {
        self.renderer
            .render(&self.headers, &self.uri, component, context)
            .await
    }

    /// In-app redirect (302 for GET, 303 otherwise).
    pub fn redirect(&self, url: &str) -> Response {
        redirect::redirect(&self.method, url)
    }

    /// Navigate out of the app via the location protocol.
    pub fn location(&self, url: &str) -> Response {
        redirect::location(&self.headers, &self.method, url)
    }

    /// Redirect to the previous page.
    pub fn back(&self) -> Response {
        redirect::redirect_back(&self.method, &self.headers)
    }

    /// The error bag requested by the submitting form.
    pub fn error_bag(&self) -> String {
        classify::error_bag(&self.headers)
    }

    /// Write a [`PageResponse`], dispatching on its kind.
    pub async fn dispatch(&self, response: PageResponse) -> Result<Response, Error> {
        response.write(self).await
    }
}
