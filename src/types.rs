//! Common types used throughout feature-harvest
//!
//! This module contains the feature collection model and the JSON type
//! aliases shared across modules.

use serde::{Deserialize, Serialize};

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// A single geographic record (geometry + properties).
///
/// Features are opaque to the collector; it only counts and orders them.
pub type Feature = JsonValue;

/// Type tag carried by every GeoJSON feature collection
pub const FEATURE_COLLECTION_TYPE: &str = "FeatureCollection";

// ============================================================================
// Feature Collection
// ============================================================================

/// An append-only, ordered collection of features
///
/// Serializes as a GeoJSON `FeatureCollection`. Features can only be added
/// at the end; nothing removes or reorders them once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    features: Vec<Feature>,
}

impl Default for FeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self {
            kind: FEATURE_COLLECTION_TYPE.to_string(),
            features: Vec::new(),
        }
    }

    /// The type tag (always `FeatureCollection`)
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Append a page of features, preserving their order
    pub fn extend(&mut self, page: impl IntoIterator<Item = Feature>) {
        self.features.extend(page);
    }

    /// Features collected so far, in insertion order
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Consume the collection and return its features
    pub fn into_features(self) -> Vec<Feature> {
        self.features
    }

    /// Number of features collected
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if no features have been collected
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

// ============================================================================
// Backoff Type
// ============================================================================

/// Type of backoff for transport retries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Constant delay between retries
    Constant,
    /// Linear increase in delay
    Linear,
    /// Exponential increase in delay
    #[default]
    Exponential,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_backoff_type_serde() {
        let backoff: BackoffType = serde_json::from_str("\"linear\"").unwrap();
        assert_eq!(backoff, BackoffType::Linear);
        assert_eq!(BackoffType::default(), BackoffType::Exponential);
    }

    #[test]
    fn test_feature_collection_default() {
        let collection = FeatureCollection::default();
        assert_eq!(collection.kind(), "FeatureCollection");
        assert!(collection.is_empty());
        assert_eq!(collection.len(), 0);
    }

    #[test]
    fn test_feature_collection_extend_preserves_order() {
        let mut collection = FeatureCollection::new();
        collection.extend(vec![json!({"id": 1}), json!({"id": 2})]);
        collection.extend(vec![json!({"id": 3})]);

        let ids: Vec<_> = collection.features().iter().map(|f| f["id"].clone()).collect();
        assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
    }

    #[test]
    fn test_feature_collection_serde() {
        let mut collection = FeatureCollection::new();
        collection.extend(vec![json!({"type": "Feature", "properties": {}})]);

        let value = serde_json::to_value(&collection).unwrap();
        assert_eq!(value["type"], "FeatureCollection");
        assert_eq!(value["features"].as_array().unwrap().len(), 1);

        let back: FeatureCollection = serde_json::from_value(value).unwrap();
        assert_eq!(back, collection);
    }
}
