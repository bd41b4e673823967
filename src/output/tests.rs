//! Tests for output module

use super::*;
use crate::types::FeatureCollection;
use serde_json::{json, Value};
use std::path::Path;

fn sample() -> FeatureCollection {
    let mut collection = FeatureCollection::new();
    collection.extend(vec![
        json!({"type": "Feature", "id": 1, "geometry": null, "properties": {"name": "Trinity"}}),
        json!({"type": "Feature", "id": 2, "geometry": null, "properties": {"name": "Brazos"}}),
    ]);
    collection
}

#[test]
fn test_destination_from_path() {
    assert_eq!(Destination::from_path(None), Destination::Stdout);
    assert_eq!(
        Destination::from_path(Some(Path::new("out.geojson"))),
        Destination::File("out.geojson".into())
    );
}

#[test]
fn test_to_bytes_compact_and_pretty() {
    let compact = GeoJsonWriter::new().to_bytes(&sample()).unwrap();
    let pretty = GeoJsonWriter::new().with_pretty(true).to_bytes(&sample()).unwrap();

    assert!(!compact.contains(&b'\n'));
    assert!(pretty.contains(&b'\n'));

    let a: Value = serde_json::from_slice(&compact).unwrap();
    let b: Value = serde_json::from_slice(&pretty).unwrap();
    assert_eq!(a, b);
    assert_eq!(a["type"], "FeatureCollection");
}

#[tokio::test]
async fn test_write_file_creates_parents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("gauge.geojson");

    let written = GeoJsonWriter::new()
        .write(&sample(), &Destination::File(path.clone()))
        .await
        .unwrap();

    let content = std::fs::read(&path).unwrap();
    assert_eq!(content.len(), written);

    let back: FeatureCollection = serde_json::from_slice(&content).unwrap();
    assert_eq!(back, sample());
}

#[tokio::test]
async fn test_write_empty_collection() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.geojson");

    GeoJsonWriter::new()
        .write(&FeatureCollection::new(), &Destination::File(path.clone()))
        .await
        .unwrap();

    let value: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value, json!({"type": "FeatureCollection", "features": []}));
}
