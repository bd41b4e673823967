// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # Feature Harvest
//!
//! Collects every feature of a paged feature-service layer into a single
//! GeoJSON `FeatureCollection`.
//!
//! ## Features
//!
//! - **Offset Pagination**: Follows `exceededTransferLimit` with `resultOffset`
//! - **Automatic Downgrade**: Retries once without pagination when the service refuses it
//! - **Explicit Partial Results**: Failures keep what was collected and say why
//! - **HTTP Transport**: Timeouts, optional retry with backoff, rate limiting
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use feature_harvest::{FetchOptions, PaginatedCollector, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let collector = PaginatedCollector::with_http_client()?;
//!     let outcome = collector
//!         .collect("https://example.com/arcgis/rest/services/Gauges/FeatureServer/0", &FetchOptions::new())
//!         .await;
//!
//!     let collection = outcome.into_complete()?;
//!     println!("{} features", collection.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │        PaginatedCollector::collect(endpoint, options)        │
//! │                 → CollectOutcome { collection, status }      │
//! └──────────────────────────────────────────────────────────────┘
//!                                │
//! ┌───────────┬───────────┬──────┴───────┬──────────────┬─────────┐
//! │  Query    │   HTTP    │   Decode     │  Pagination  │ Output  │
//! ├───────────┼───────────┼──────────────┼──────────────┼─────────┤
//! │ Params    │ Transport │ GeoJSON page │ FetchMachine │ GeoJSON │
//! │ URL       │ Retry     │ Service error│ Offset/Unpaged│ file   │
//! │           │ Rate Limit│              │ Downgrade    │ stdout  │
//! └───────────┴───────────┴──────────────┴──────────────┴─────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types and failure classification
pub mod error;

/// Common types and type aliases
pub mod types;

/// Fetch options and source configuration
pub mod config;

/// Query parameters and URL construction
pub mod query;

/// HTTP transport with retry and rate limiting
pub mod http;

/// Page response decoding
pub mod decode;

/// Pagination mode and fetch state machine
pub mod pagination;

/// Paginated feature collection
pub mod collector;

/// GeoJSON output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, FailureKind, Result};
pub use types::*;

pub use collector::{CollectOutcome, CollectStatus, CollectorConfig, PaginatedCollector};
pub use config::{load_source_config, FetchOptions, SourceConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
