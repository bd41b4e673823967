//! Collector module
//!
//! The paged fetch loop.
//!
//! # Overview
//!
//! [`PaginatedCollector::collect`] issues one `/query` request at a time,
//! feeds each decoded response to a [`FetchMachine`], and returns a
//! [`CollectOutcome`] once the machine reaches a final phase. It never
//! returns an error: failures end the loop and are reported through
//! [`CollectStatus::Partial`] alongside everything collected up to that
//! point.

mod types;

pub use types::{CollectOutcome, CollectStats, CollectStatus, CollectorConfig};

use crate::config::FetchOptions;
use crate::decode::{GeoJsonDecoder, PageDecoder, PageResponse};
use crate::error::{Error, Result};
use crate::http::{HttpClient, Transport};
use crate::pagination::{FetchMachine, Phase};
use crate::query::{build_query_url, parse_endpoint, QueryParams};
use chrono::Utc;
use tokio::time::Instant;
use tracing::{debug, info, warn};
use url::Url;

/// Collects every feature of a paged feature layer
pub struct PaginatedCollector {
    /// Transport for page requests
    transport: Box<dyn Transport>,
    /// Response decoder
    decoder: Box<dyn PageDecoder>,
    /// Collector configuration
    config: CollectorConfig,
}

impl PaginatedCollector {
    /// Create a collector over any transport, decoding GeoJSON pages
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Box::new(transport),
            decoder: Box::new(GeoJsonDecoder::new()),
            config: CollectorConfig::default(),
        }
    }

    /// Create a collector backed by a default [`HttpClient`]
    pub fn with_http_client() -> Result<Self> {
        Ok(Self::new(HttpClient::new()?))
    }

    /// Replace the response decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: impl PageDecoder + 'static) -> Self {
        self.decoder = Box::new(decoder);
        self
    }

    /// Set collector configuration
    #[must_use]
    pub fn with_config(mut self, config: CollectorConfig) -> Self {
        self.config = config;
        self
    }

    /// Get the collector configuration
    pub fn config(&self) -> &CollectorConfig {
        &self.config
    }

    /// Fetch every feature from `endpoint`.
    ///
    /// `endpoint` is the feature layer URL (`.../FeatureServer/0`); requests
    /// go to its `/query` child. Only one request is in flight at a time.
    pub async fn collect(&self, endpoint: &str, options: &FetchOptions) -> CollectOutcome {
        let started_at = Utc::now();
        let start = Instant::now();
        // A budget past the clock's range means no deadline at all
        let deadline = self
            .config
            .deadline
            .and_then(|budget| start.checked_add(budget));
        let mut machine = FetchMachine::new(options);

        match parse_endpoint(endpoint).and_then(|url| options.validate().map(|()| url)) {
            Ok(endpoint) => {
                info!(endpoint = %endpoint, mode = ?machine.mode(), "Starting feature collection");
                self.run(&endpoint, options, deadline, &mut machine).await;
            }
            Err(err) => machine.fail(err),
        }

        let requests = machine.requests();
        let pages = machine.pages();
        let downgraded = machine.downgraded();
        let final_mode = machine.mode();
        let (collection, phase) = machine.into_parts();

        let status = match phase {
            Phase::Terminating => CollectStatus::Complete,
            Phase::Failed(err) => {
                warn!(
                    error = %err,
                    collected = collection.len(),
                    "Feature collection stopped early, returning partial result"
                );
                CollectStatus::Partial(err)
            }
            other => CollectStatus::Partial(Error::Other(format!(
                "collection stopped while {}",
                other.name()
            ))),
        };

        let stats = CollectStats {
            requests,
            pages,
            features: collection.len(),
            downgraded,
            final_mode,
            started_at,
            finished_at: Utc::now(),
            duration_ms: start.elapsed().as_millis() as u64,
        };

        CollectOutcome {
            collection,
            status,
            stats,
        }
    }

    /// Drive the machine until it reaches a final phase
    async fn run(
        &self,
        endpoint: &Url,
        options: &FetchOptions,
        deadline: Option<Instant>,
        machine: &mut FetchMachine,
    ) {
        while !machine.is_finished() {
            if !machine.is_requesting() {
                machine.step();
                continue;
            }

            let params =
                QueryParams::for_page(options, machine.mode(), machine.collection().len());
            let url = match build_query_url(endpoint, &params) {
                Ok(url) => url,
                Err(err) => {
                    machine.fail(err);
                    continue;
                }
            };

            debug!(url = %url, offset = ?params.offset(), "Requesting page");
            machine.record_request();
            let response = self.fetch_page(&url, deadline).await;
            machine.on_response(response);
        }
    }

    /// Request and decode one page
    async fn fetch_page(&self, url: &Url, deadline: Option<Instant>) -> Result<PageResponse> {
        let request = self.transport.get(url);
        let response = match deadline {
            Some(at) => tokio::time::timeout_at(at, request)
                .await
                .map_err(|_| Error::DeadlineExceeded {
                    deadline_ms: self
                        .config
                        .deadline
                        .map_or(0, |d| d.as_millis() as u64),
                })??,
            None => request.await?,
        };

        if !response.is_success() {
            return Err(Error::http_status(response.status, response.body));
        }

        self.decoder.decode(&response.body)
    }
}

impl std::fmt::Debug for PaginatedCollector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedCollector")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
