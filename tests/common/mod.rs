//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use serde_json::Value;

use inertia_axum::render::ShellTemplate;
use inertia_axum::{Config, MiddlewareState, Renderer};

pub const TEMPLATE: &str = "<!doctype html>\
<html><head>{{ inertia_head }}</head><body>{{ inertia_body }}</body></html>";

/// A renderer around the test template shell.
pub fn renderer(config: Config) -> Arc<Renderer> {
    Arc::new(Renderer::new(ShellTemplate::new(TEMPLATE), config).unwrap())
}

pub fn versioned_renderer(version: &str) -> Arc<Renderer> {
    renderer(Config {
        version: version.to_string(),
        ..Config::default()
    })
}

/// Wrap a router with the protocol middleware.
pub fn with_middleware(router: Router, renderer: Arc<Renderer>) -> Router {
    router.layer(axum::middleware::from_fn_with_state(
        MiddlewareState::new(renderer),
        inertia_axum::middleware::handle,
    ))
}

/// Request builder pre-marked as a protocol request.
pub fn inertia_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Inertia", "true")
}

pub fn plain_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder().method(method).uri(uri)
}

pub fn empty_body() -> Body {
    Body::empty()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_string(response: Response) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}

/// Parse the response body as a page document.
pub async fn page_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
