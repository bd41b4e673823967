//! Decoder implementations

use super::types::{Page, PageDecoder, PageResponse, ServiceError};
use crate::error::{Error, Result};
use crate::types::JsonObject;
use serde_json::Value;

const TRANSFER_LIMIT_FIELD: &str = "exceededTransferLimit";

// ============================================================================
// GeoJSON Decoder
// ============================================================================

/// Decoder for `f=geojson` query responses
///
/// Accepts two schemas:
/// - `{"error": {"code": 400, "message": "...", "details": [...]}}`
/// - `{"type": "FeatureCollection", "features": [...], "properties": {"exceededTransferLimit": true}}`
///
/// The transfer-limit flag is also honored at the top level, where Esri JSON
/// responses carry it.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoJsonDecoder;

impl GeoJsonDecoder {
    /// Create a new GeoJSON decoder
    pub fn new() -> Self {
        Self
    }
}

impl PageDecoder for GeoJsonDecoder {
    fn decode(&self, body: &str) -> Result<PageResponse> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

        let Value::Object(mut map) = value else {
            return Err(Error::unexpected_shape(format!(
                "expected a JSON object, got {}",
                json_type_name(&value)
            )));
        };

        if let Some(error) = map.remove("error") {
            return decode_service_error(error).map(PageResponse::ServiceError);
        }

        let exceeded_transfer_limit = transfer_limit_flag(&map);
        let features = match map.remove("features") {
            Some(Value::Array(features)) => features,
            Some(other) => {
                return Err(Error::unexpected_shape(format!(
                    "'features' must be an array, got {}",
                    json_type_name(&other)
                )))
            }
            None => {
                return Err(Error::unexpected_shape(
                    "response has neither 'error' nor 'features'",
                ))
            }
        };

        Ok(PageResponse::Page(Page {
            features,
            exceeded_transfer_limit,
        }))
    }
}

fn decode_service_error(error: Value) -> Result<ServiceError> {
    let Value::Object(mut map) = error else {
        return Err(Error::unexpected_shape("'error' must be an object"));
    };

    let message = match map.remove("message") {
        Some(Value::String(message)) => message,
        _ => {
            return Err(Error::unexpected_shape(
                "'error' object has no string 'message'",
            ))
        }
    };

    let code = map.get("code").and_then(Value::as_i64);

    // Some servers send `details: null`
    let details = match map.remove("details") {
        Some(Value::Array(lines)) => lines
            .into_iter()
            .filter_map(|line| match line {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };

    Ok(ServiceError {
        code,
        message,
        details,
    })
}

/// Read `exceededTransferLimit` from `properties` or the top level
fn transfer_limit_flag(map: &JsonObject) -> bool {
    let in_properties = map
        .get("properties")
        .and_then(|p| p.get(TRANSFER_LIMIT_FIELD))
        .and_then(Value::as_bool);
    let top_level = map.get(TRANSFER_LIMIT_FIELD).and_then(Value::as_bool);

    in_properties.or(top_level).unwrap_or(false)
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
