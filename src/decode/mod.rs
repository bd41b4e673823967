//! Response decoder module
//!
//! Supports: GeoJSON feature pages and feature service error bodies
//!
//! # Overview
//!
//! Every `/query` response is decoded into a [`PageResponse`]: either the
//! service's error object or a page of features plus its transfer-limit
//! flag. Bodies matching neither schema are reported as
//! [`Error::UnexpectedShape`](crate::error::Error::UnexpectedShape).

mod decoders;
mod types;

pub use decoders::GeoJsonDecoder;
pub use types::{Page, PageDecoder, PageResponse, ServiceError};

#[cfg(test)]
mod tests;
