//! Output module
//!
//! Persists a collected [`FeatureCollection`](crate::types::FeatureCollection)
//! as a GeoJSON document, either to a file or to stdout.

mod writer;

pub use writer::{Destination, GeoJsonWriter};

#[cfg(test)]
mod tests;
