//! Error types for feature-harvest
//!
//! This module defines the error hierarchy for the entire crate.
//! Fallible public APIs return `Result<T, Error>` where Error is defined here.
//! The collector itself never returns `Err`; it reports failures through
//! [`crate::collector::CollectStatus::Partial`], and [`Error::kind`] tells
//! callers which class of failure cut the fetch short.

use thiserror::Error;

/// The main error type for feature-harvest
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Transport Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Collection deadline of {deadline_ms}ms exceeded")]
    DeadlineExceeded { deadline_ms: u64 },

    // ============================================================================
    // Feature Service Errors
    // ============================================================================
    #[error("Feature service error{}: {message}", .code.map(|c| format!(" {c}")).unwrap_or_default())]
    Service { code: Option<i64>, message: String },

    #[error("Service reported exceededTransferLimit but does not support pagination ({collected} features collected)")]
    TransferLimitMismatch { collected: usize },

    #[error("Service returned an empty page flagged exceededTransferLimit at offset {offset}")]
    StalledPagination { offset: usize },

    #[error("Unexpected response shape: {message}")]
    UnexpectedShape { message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Output error: {message}")]
    Output { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Classification of a failure that ends a collection early
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network or HTTP-level failure reaching the server
    Transport,
    /// The service answered with an error unrelated to pagination support
    ServerLogical,
    /// A capped page arrived while offset paging is unavailable
    TransferLimitMismatch,
    /// The body matched neither the error nor the feature schema
    UnexpectedResponseShape,
    /// A capped page carried no features, so the offset cannot advance
    StalledPagination,
    /// Configuration, endpoint URL, I/O or output failures on the local side
    Local,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a feature service error
    pub fn service(code: Option<i64>, message: impl Into<String>) -> Self {
        Self::Service {
            code,
            message: message.into(),
        }
    }

    /// Create an unexpected shape error
    pub fn unexpected_shape(message: impl Into<String>) -> Self {
        Self::UnexpectedShape {
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Timeout { .. }
            | Error::DeadlineExceeded { .. } => FailureKind::Transport,
            Error::Service { .. } => FailureKind::ServerLogical,
            Error::TransferLimitMismatch { .. } => FailureKind::TransferLimitMismatch,
            Error::StalledPagination { .. } => FailureKind::StalledPagination,
            Error::UnexpectedShape { .. } | Error::Decode { .. } | Error::JsonParse(_) => {
                FailureKind::UnexpectedResponseShape
            }
            _ => FailureKind::Local,
        }
    }

    /// Check if this error is retryable at the transport level
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(e) => e.is_connect() || e.is_timeout(),
            Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(
        status,
        429 | 500 | 502 | 503 | 504 | 520 | 521 | 522 | 523 | 524
    )
}

/// Result type alias for feature-harvest
pub type Result<T> = std::result::Result<T, Error>;
