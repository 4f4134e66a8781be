//! The closed set of response kinds an endpoint can produce.

use axum::response::Response;

use crate::error::Error;
use crate::middleware::Inertia;
use crate::render::RenderContext;

/// What an endpoint answers with: a rendered component, one of the redirect
/// shapes, or a raw response bypassing page rendering.
///
/// Kinds are told apart in exactly one place, [`PageResponse::write`].
pub enum PageResponse {
    /// Render a page component.
    Component {
        component: String,
        context: RenderContext,
    },

    /// In-app redirect.
    Redirect { url: String },

    /// Redirect to the previous page (`Referer`, falling back to `/`).
    RedirectBack,

    /// Navigate out of the app via the location protocol.
    Location { url: String },

    /// Bypass page rendering entirely; useful for downloads and raw APIs.
    Raw(Response),
}

impl PageResponse {
    pub fn component(component: impl Into<String>, context: RenderContext) -> Self {
        Self::Component {
            component: component.into(),
            context,
        }
    }

    pub fn redirect(url: impl Into<String>) -> Self {
        Self::Redirect { url: url.into() }
    }

    pub fn redirect_back() -> Self {
        Self::RedirectBack
    }

    pub fn location(url: impl Into<String>) -> Self {
        Self::Location { url: url.into() }
    }

    pub fn raw(response: Response) -> Self {
        Self::Raw(response)
    }

    /// Write the response for this request. The single dispatch point over
    /// response kinds.
    pub(crate) async fn write(self, inertia: &Inertia) -> Result<Response, Error> {
        match self {
            Self::Component { component, context } => inertia.render(&component, context).await,
            Self::Redirect { url } => Ok(inertia.redirect(&url)),
            Self::RedirectBack => Ok(inertia.back()),
            Self::Location { url } => Ok(inertia.location(&url)),
            Self::Raw(response) => Ok(response),
        }
    }
}
