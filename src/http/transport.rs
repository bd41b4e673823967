//! Transport abstraction
//!
//! The collector only needs `GET url -> (status, body)`; anything that can
//! answer that (a real HTTP client, a scripted test double) is a transport.

use crate::error::Result;
use async_trait::async_trait;
use url::Url;

/// Raw response of a GET request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Create a response
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a 200 OK response
    pub fn ok(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }

    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET transport used for page requests
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue one GET request and return its status and body.
    ///
    /// Network-level failures are returned as errors; non-2xx statuses may be
    /// returned either way, the caller checks [`HttpResponse::is_success`].
    async fn get(&self, url: &Url) -> Result<HttpResponse>;
}
