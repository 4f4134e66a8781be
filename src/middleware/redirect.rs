//! Redirect and external-location helpers.

use axum::http::header::{LOCATION, REFERER};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::protocol::classify::is_inertia_request;
use crate::protocol::header::X_INERTIA_LOCATION;

/// Redirect the client to `url`.
///
/// GET navigations use 302; everything else uses 303 so the follow-up is a
/// GET rather than a replay of the submitting method.
pub fn redirect(method: &Method, url: &str) -> Response {
    let status = if method == Method::GET {
        StatusCode::FOUND
    } else {
        StatusCode::SEE_OTHER
    };

    let Ok(location) = HeaderValue::try_from(url) else {
        tracing::warn!(url, "redirect target is not a valid header value");
        return (StatusCode::INTERNAL_SERVER_ERROR, "invalid redirect target").into_response();
    };

    tracing::debug!(%status, url, "redirecting");
    (status, [(LOCATION, location)]).into_response()
}

/// Guide the client to a URL outside the Inertia app.
///
/// For protocol requests this is not an HTTP redirect: the response is a
/// 409 carrying the target in `x-inertia-location`, and the client-side
/// router performs the navigation itself. Plain requests get an ordinary
/// redirect.
pub fn location(headers: &HeaderMap, method: &Method, url: &str) -> Response {
    if !is_inertia_request(headers) {
        return redirect(method, url);
    }

    let Ok(target) = HeaderValue::try_from(url) else {
        tracing::warn!(url, "location target is not a valid header value");
        return (StatusCode::INTERNAL_SERVER_ERROR, "invalid location target").into_response();
    };

    tracing::debug!(url, "answering with external location");
    let mut response = StatusCode::CONFLICT.into_response();
    response.headers_mut().insert(X_INERTIA_LOCATION, target);
    response
}

/// Redirect to the previous page using the `Referer` header, falling back
/// to `/` when it is absent.
pub fn redirect_back(method: &Method, headers: &HeaderMap) -> Response {
    let target = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .unwrap_or("/");

    redirect(method, target)
}
