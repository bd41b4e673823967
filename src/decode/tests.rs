//! Tests for decoder module

use super::*;
use crate::error::{Error, FailureKind};
use serde_json::json;

fn decode(body: &serde_json::Value) -> crate::error::Result<PageResponse> {
    GeoJsonDecoder::new().decode(&body.to_string())
}

// ============================================================================
// Feature Pages
// ============================================================================

#[test]
fn test_decode_capped_page() {
    let body = json!({
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "id": 1, "geometry": {"type": "Point", "coordinates": [-97.1, 32.7]}, "properties": {"name": "a"}},
            {"type": "Feature", "id": 2, "geometry": null, "properties": {"name": "b"}}
        ],
        "properties": {"exceededTransferLimit": true}
    });

    let PageResponse::Page(page) = decode(&body).unwrap() else {
        panic!("Expected Page");
    };
    assert_eq!(page.len(), 2);
    assert!(page.exceeded_transfer_limit);
    assert_eq!(page.features[0]["id"], 1);
    assert_eq!(page.features[1]["properties"]["name"], "b");
}

#[test]
fn test_decode_uncapped_page_without_properties() {
    let body = json!({"type": "FeatureCollection", "features": [{"id": 1}]});

    let PageResponse::Page(page) = decode(&body).unwrap() else {
        panic!("Expected Page");
    };
    assert_eq!(page, Page::new(vec![json!({"id": 1})]));
}

#[test]
fn test_decode_empty_page() {
    let body = json!({"type": "FeatureCollection", "features": []});
    let response = decode(&body).unwrap();
    assert_eq!(response, PageResponse::Page(Page::default()));
}

#[test]
fn test_decode_top_level_transfer_limit() {
    let body = json!({"features": [{"id": 7}], "exceededTransferLimit": true});

    let PageResponse::Page(page) = decode(&body).unwrap() else {
        panic!("Expected Page");
    };
    assert!(page.exceeded_transfer_limit);
}

#[test]
fn test_decode_non_bool_transfer_limit_is_ignored() {
    let body = json!({"features": [], "properties": {"exceededTransferLimit": "yes"}});

    let PageResponse::Page(page) = decode(&body).unwrap() else {
        panic!("Expected Page");
    };
    assert!(!page.exceeded_transfer_limit);
}

// ============================================================================
// Service Errors
// ============================================================================

#[test]
fn test_decode_service_error() {
    let body = json!({
        "error": {
            "code": 400,
            "message": "Pagination is not supported.",
            "details": ["'resultOffset' is not allowed"]
        }
    });

    let response = decode(&body).unwrap();
    assert!(response.is_error());
    assert_eq!(
        response,
        PageResponse::ServiceError(
            ServiceError::new("Pagination is not supported.")
                .with_code(400)
                .with_detail("'resultOffset' is not allowed")
        )
    );
}

#[test]
fn test_decode_service_error_null_details() {
    let body = json!({"error": {"code": 500, "message": "Internal error", "details": null}});

    let PageResponse::ServiceError(err) = decode(&body).unwrap() else {
        panic!("Expected ServiceError");
    };
    assert_eq!(err.code, Some(500));
    assert!(err.details.is_empty());
    assert_eq!(err.full_message(), "Internal error");
}

#[test]
fn test_service_error_into_error() {
    let err: Error = ServiceError::new("Invalid query")
        .with_code(400)
        .with_detail("where clause")
        .into();
    assert_eq!(err.kind(), FailureKind::ServerLogical);
    assert_eq!(
        err.to_string(),
        "Feature service error 400: Invalid query (where clause)"
    );
}

// ============================================================================
// Shape Errors
// ============================================================================

#[test]
fn test_decode_neither_schema() {
    let err = decode(&json!({"type": "FeatureCollection"})).unwrap_err();
    assert!(matches!(err, Error::UnexpectedShape { .. }));
}

#[test]
fn test_decode_features_not_array() {
    let err = decode(&json!({"features": {"id": 1}})).unwrap_err();
    assert!(matches!(err, Error::UnexpectedShape { .. }));
}

#[test]
fn test_decode_error_without_message() {
    let err = decode(&json!({"error": {"code": 400}})).unwrap_err();
    assert!(matches!(err, Error::UnexpectedShape { .. }));
}

#[test]
fn test_decode_non_object() {
    let err = decode(&json!([1, 2, 3])).unwrap_err();
    assert_eq!(err.kind(), FailureKind::UnexpectedResponseShape);
    assert!(err.to_string().contains("array"));
}

#[test]
fn test_decode_invalid_json() {
    let err = GeoJsonDecoder::new().decode("<html>502 Bad Gateway</html>").unwrap_err();
    assert!(matches!(err, Error::Decode { .. }));
    assert_eq!(err.kind(), FailureKind::UnexpectedResponseShape);
}
