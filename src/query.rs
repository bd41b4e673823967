//! Feature query construction
//!
//! Builds the `/query` request issued on every iteration of a collection.
//! All parameters except the offset are fixed for the duration of a call.

use crate::config::FetchOptions;
use crate::error::{Error, Result};
use crate::pagination::PaginationMode;
use url::Url;

/// Spatial reference used for both input and output geometry (WGS 84)
pub const SPATIAL_REFERENCE: &str = "4326";

/// Record filter matching every row
pub const WHERE_ALL: &str = "1>0";

/// Response format requested from the service
pub const RESPONSE_FORMAT: &str = "geojson";

/// Name of the offset paging parameter
pub const OFFSET_PARAM: &str = "resultOffset";

/// Parameters owned by the collector; an endpoint's own values for these are dropped
const MANAGED_PARAMS: &[&str] = &[
    "inSR",
    "outSR",
    "where",
    "outFields",
    "returnGeometry",
    "geometryPrecision",
    "returnIdsOnly",
    "f",
    OFFSET_PARAM,
];

/// Ordered query parameters for one page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Build the parameters for the next request.
    ///
    /// `resultOffset` is included only while the mode is [`PaginationMode::Offset`],
    /// and is then always the number of features collected so far.
    pub fn for_page(options: &FetchOptions, mode: PaginationMode, collected: usize) -> Self {
        let mut pairs = vec![
            ("inSR", SPATIAL_REFERENCE.to_string()),
            ("outSR", SPATIAL_REFERENCE.to_string()),
            ("where", WHERE_ALL.to_string()),
            ("outFields", options.out_fields.clone()),
            ("returnGeometry", "true".to_string()),
            ("geometryPrecision", options.geometry_precision.to_string()),
            ("returnIdsOnly", "false".to_string()),
            ("f", RESPONSE_FORMAT.to_string()),
        ];

        if mode.is_offset() {
            pairs.push((OFFSET_PARAM, collected.to_string()));
        }

        Self { pairs }
    }

    /// Look up a parameter value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// The offset parameter, if present
    pub fn offset(&self) -> Option<usize> {
        self.get(OFFSET_PARAM).and_then(|v| v.parse().ok())
    }

    /// Iterate over the parameters in request order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Parse and normalize a feature layer endpoint
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint.trim())?;
    if url.cannot_be_a_base() {
        return Err(Error::config(format!(
            "Feature layer endpoint cannot take a path: {endpoint}"
        )));
    }
    Ok(url)
}

/// Build the full query URL: `{endpoint}/query?{params}`
///
/// Query pairs already on the endpoint (e.g. `token`) are kept ahead of the
/// collector's own parameters.
pub fn build_query_url(endpoint: &Url, params: &QueryParams) -> Result<Url> {
    let carried: Vec<(String, String)> = endpoint
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !MANAGED_PARAMS.contains(&key.as_str()))
        .collect();

    let mut url = endpoint.clone();
    url.set_query(None);
    url.path_segments_mut()
        .map_err(|()| Error::config(format!("Feature layer endpoint cannot take a path: {endpoint}")))?
        .pop_if_empty()
        .push("query");

    url.query_pairs_mut()
        .extend_pairs(carried)
        .extend_pairs(params.iter());
    Ok(url)
}
