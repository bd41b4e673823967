//! Decoder types and traits
//!
//! Defines the decoded page model and the decoder abstraction.

use crate::error::{Error, Result};
use crate::types::Feature;
use serde::{Deserialize, Serialize};

/// Error object returned by a feature service in place of features
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceError {
    /// Service error code (usually an HTTP-like status)
    #[serde(default)]
    pub code: Option<i64>,
    /// Human-readable message
    pub message: String,
    /// Additional detail lines
    #[serde(default)]
    pub details: Vec<String>,
}

impl ServiceError {
    /// Create a service error with just a message
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Set the error code
    #[must_use]
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a detail line
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Message and details joined into one line
    pub fn full_message(&self) -> String {
        if self.details.is_empty() {
            self.message.clone()
        } else {
            format!("{} ({})", self.message, self.details.join("; "))
        }
    }
}

impl From<ServiceError> for Error {
    fn from(err: ServiceError) -> Self {
        Error::service(err.code, err.full_message())
    }
}

/// One page of features
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Page {
    /// Features in server order
    pub features: Vec<Feature>,
    /// The server capped this page at its transfer limit
    pub exceeded_transfer_limit: bool,
}

impl Page {
    /// Create an uncapped page
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            features,
            exceeded_transfer_limit: false,
        }
    }

    /// Create a page capped by the transfer limit
    pub fn capped(features: Vec<Feature>) -> Self {
        Self {
            features,
            exceeded_transfer_limit: true,
        }
    }

    /// Number of features on this page
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the page carries no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A decoded `/query` response
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    /// The service rejected the request
    ServiceError(ServiceError),
    /// The service returned features
    Page(Page),
}

impl PageResponse {
    /// Check if this is an error response
    pub fn is_error(&self) -> bool {
        matches!(self, Self::ServiceError(_))
    }
}

/// Trait for decoding response bodies into pages
pub trait PageDecoder: Send + Sync {
    /// Decode a response body
    fn decode(&self, body: &str) -> Result<PageResponse>;
}
