//! HTTP client module
//!
//! Provides the transport the collector issues page requests through.
//!
//! # Features
//!
//! - **Transport trait**: `get(url) -> status + body`, swappable in tests
//! - **Timeouts**: per-request and connect timeouts
//! - **Optional Retries**: configurable retry logic with backoff (off by default)
//! - **Rate Limiting**: token bucket rate limiter using governor

mod client;
mod rate_limit;
mod transport;

pub use client::{HttpClient, HttpClientConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
pub use transport::{HttpResponse, Transport};
