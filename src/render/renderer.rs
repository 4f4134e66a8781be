//! The page renderer.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};

use crate::config::Config;
use crate::error::Error;
use crate::page::Page;
use crate::props::resolve::{resolve_full, resolve_partial, PartialFilter};
use crate::props::{index, validation_errors_prop, Prop};
use crate::protocol::classify::{header_value_list, is_inertia_request, is_partial_request};
use crate::protocol::header::{
    CONTENT_TYPE_HTML, CONTENT_TYPE_JSON, X_INERTIA, X_INERTIA_PARTIAL_DATA,
    X_INERTIA_PARTIAL_EXCEPT, X_INERTIA_RESET,
};
use crate::protocol::request_target;
use crate::render::context::RenderContext;
use crate::render::ssr::SsrClient;
use crate::render::template::{Template, TemplateData};

/// Renders Inertia.js responses: JSON page documents for protocol requests,
/// full HTML documents otherwise.
///
/// Construct once at startup and share behind an `Arc`; the middleware
/// installs it into request extensions for handlers to pick up.
pub struct Renderer {
    template: Box<dyn Template>,
    ssr: Option<Arc<dyn SsrClient>>,
    version: String,
    root_view_id: String,
    root_view_attrs: Vec<(String, String)>,
    concurrency: i32,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("version", &self.version)
            .field("root_view_id", &self.root_view_id)
            .field("root_view_attrs", &self.root_view_attrs)
            .field("concurrency", &self.concurrency)
            .field("ssr", &self.ssr.is_some())
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Create a renderer around the given HTML template shell.
    ///
    /// Fails when the configuration is unusable; configuration errors are
    /// fatal at construction, never at request time.
    pub fn new(template: impl Template + 'static, config: Config) -> Result<Self, Error> {
        if config.root_view_id.is_empty() {
            return Err(Error::Config("root view id must not be empty"));
        }

        let concurrency = if config.concurrency == 0 {
            default_concurrency()
        } else {
            config.concurrency
        };

        Ok(Self {
            template: Box::new(template),
            ssr: None,
            version: config.version,
            root_view_id: config.root_view_id,
            root_view_attrs: config.root_view_attrs,
            concurrency,
        })
    }

    /// Enable server-side rendering through the given client.
    pub fn with_ssr_client(mut self, client: Arc<dyn SsrClient>) -> Self {
        self.ssr = Some(client);
        self
    }

    /// The asset version token of this build.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Render `component` with the given context.
    ///
    /// Protocol requests receive the page document as JSON; everything else
    /// receives a full HTML document with the page embedded in the root
    /// view container.
    pub async fn render(
        &self,
        headers: &HeaderMap,
        uri: &Uri,
        component: &str,
        context: RenderContext,
    ) -> Result<Response, Error> {
        let page = self.new_page(headers, uri, component, &context).await?;

        if is_inertia_request(headers) {
            tracing::debug!(component, url = %page.url, "serving page document as JSON");

            let body = serde_json::to_vec(&page)?;
            return Ok((
                StatusCode::OK,
                [(X_INERTIA, "true"), ("content-type", CONTENT_TYPE_JSON)],
                body,
            )
                .into_response());
        }

        let mut data = TemplateData {
            custom: context.template_data,
            inertia_head: String::new(),
            inertia_body: String::new(),
        };

        if let Some(ssr) = &self.ssr {
            let fragments = ssr.render(&page).await.map_err(Error::Ssr)?;
            data.inertia_head = fragments.head;
            data.inertia_body = fragments.body;
        } else {
            data.inertia_body = self.root_view(&page)?;
        }

        let html = self.template.render(&data).map_err(Error::Template)?;

        Ok((StatusCode::OK, [("content-type", CONTENT_TYPE_HTML)], html).into_response())
    }

    /// Assemble the page document for this request.
    async fn new_page(
        &self,
        headers: &HeaderMap,
        uri: &Uri,
        component: &str,
        context: &RenderContext,
    ) -> Result<Page, Error> {
        let mut props: Vec<Prop> = Vec::with_capacity(context.props.len() + 1);
        props.extend(context.props.iter().cloned());
        props.push(validation_errors_prop(
            &context.validation_errors,
            &context.error_bag,
        ));

        let partial = is_partial_request(headers, component);

        let resolved = if partial {
            let filter = PartialFilter {
                whitelist: header_value_list(headers, X_INERTIA_PARTIAL_DATA),
                blacklist: header_value_list(headers, X_INERTIA_PARTIAL_EXCEPT),
            };
            let concurrency = self.effective_concurrency(context.concurrency);
            resolve_partial(&props, &filter, concurrency).await?
        } else {
            resolve_full(&props).await?
        };

        let deferred_props = if partial {
            None
        } else {
            let deferred = index::deferred_index(&props);
            (!deferred.is_empty()).then_some(deferred)
        };

        let reset = header_value_list(headers, X_INERTIA_RESET);
        let merge = index::merge_keys(&props, reset.as_deref());
        let merge_props = (!merge.is_empty()).then_some(merge);

        Ok(Page {
            component: component.to_string(),
            props: resolved,
            url: request_target(uri).to_string(),
            version: self.version.clone(),
            deferred_props,
            merge_props,
            encrypt_history: context.encrypt_history,
            clear_history: context.clear_history,
        })
    }

    /// The worker-pool size for this page: the context override when set,
    /// otherwise the renderer default; anything below one is sequential.
    fn effective_concurrency(&self, context_concurrency: i32) -> usize {
        let n = if context_concurrency == 0 {
            self.concurrency
        } else {
            context_concurrency
        };

        if n < 1 {
            0
        } else {
            n as usize
        }
    }

    /// The root view element carrying the page document for client mount.
    fn root_view(&self, page: &Page) -> Result<String, Error> {
        let page_json = serde_json::to_string(page)?;

        let mut html = String::with_capacity(page_json.len() + 64);
        html.push_str("<div id=\"");
        html.push_str(&self.root_view_id);
        html.push_str("\" data-page=\"");
        escape_attr(&mut html, &page_json);
        html.push('"');

        for (key, value) in &self.root_view_attrs {
            // data-page already carries the page document.
            if key == "data-page" {
                continue;
            }

            html.push(' ');
            html.push_str(key);
            html.push_str("=\"");
            escape_attr(&mut html, value);
            html.push('"');
        }

        html.push_str("></div>");
        Ok(html)
    }
}

/// Default worker-pool size, captured from host parallelism at construction.
fn default_concurrency() -> i32 {
    std::thread::available_parallelism()
        .map(|n| n.get() as i32)
        .unwrap_or(1)
}

/// HTML-escape `src` for use inside a double-quoted attribute value.
fn escape_attr(dst: &mut String, src: &str) {
    for ch in src.chars() {
        match ch {
            '&' => dst.push_str("&amp;"),
            '\'' => dst.push_str("&#39;"),
            '<' => dst.push_str("&lt;"),
            '>' => dst.push_str("&gt;"),
            '"' => dst.push_str("&#34;"),
            _ => dst.push(ch),
        }
    }
}
