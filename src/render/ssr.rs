//! Server-side rendering seam.
//!
//! # Responsibilities
//! - Send the page document to a rendering service
//! - Return the pre-rendered head and body fragments
//!
//! # Design Decisions
//! - An SSR failure fails the whole render; the adapter never silently
//!   falls back to client-side rendering

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::page::Page;

/// Head and body HTML fragments returned by the SSR service.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SsrTemplateData {
    pub head: String,
    pub body: String,
}

/// Client for a service that pre-renders page documents.
#[async_trait]
pub trait SsrClient: Send + Sync {
    async fn render(&self, page: &Page) -> Result<SsrTemplateData, BoxError>;
}

/// HTTP client sending page documents to an SSR endpoint.
pub struct HttpSsrClient {
    client: reqwest::Client,
    url: String,
}

impl HttpSsrClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Use a preconfigured HTTP client (timeouts, proxies, connection pool).
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SsrClient for HttpSsrClient {
    async fn render(&self, page: &Page) -> Result<SsrTemplateData, BoxError> {
        let response = self.client.get(&self.url).json(page).send().await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(format!("unexpected SSR status code: {status}").into());
        }

        let data = response.json::<SsrTemplateData>().await?;
        Ok(data)
    }
}
