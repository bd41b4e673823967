//! Collection state machine
//!
//! ```text
//!              ┌──────────── capped, offset mode ────────────┐
//!              ▼                                             │
//!        Requesting ──page──► Appending ──not capped──► Terminating
//!          │    ▲                 │
//!          │    └── Downgrading   └──capped, unpaged / empty──► Failed
//!          │           ▲
//!          ├── "pagination" error (offset mode only)
//!          └── transport / service / shape error ──────────────► Failed
//! ```

use super::types::{indicates_pagination_unsupported, PaginationMode};
use crate::config::FetchOptions;
use crate::decode::{Page, PageResponse, ServiceError};
use crate::error::{Error, Result};
use crate::types::FeatureCollection;
use tracing::{info, warn};

/// Current phase of a collection
#[derive(Debug)]
pub enum Phase {
    /// A request for the next page must be issued
    Requesting,
    /// The service refused offset paging; switch to unpaged and re-request
    Downgrading,
    /// A page arrived and must be appended
    Appending(Page),
    /// Every feature has been collected
    Terminating,
    /// The call stopped early; accumulated features are kept
    Failed(Error),
}

impl Phase {
    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Requesting => "requesting",
            Self::Downgrading => "downgrading",
            Self::Appending(_) => "appending",
            Self::Terminating => "terminating",
            Self::Failed(_) => "failed",
        }
    }

    /// Check if no further transitions are possible
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Terminating | Self::Failed(_))
    }
}

/// Call-scoped state of one collection
#[derive(Debug)]
pub struct FetchMachine {
    mode: PaginationMode,
    collection: FeatureCollection,
    phase: Phase,
    downgraded: bool,
    requests: usize,
    pages: usize,
    show_progress: bool,
}

impl FetchMachine {
    /// Start a collection in the `Requesting` phase
    pub fn new(options: &FetchOptions) -> Self {
        Self {
            mode: PaginationMode::from_supported(options.supports_pagination),
            collection: FeatureCollection::new(),
            phase: Phase::Requesting,
            downgraded: false,
            requests: 0,
            pages: 0,
            show_progress: options.display_incomplete_feature_collections,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    /// Whether the mode was downgraded during this call
    pub fn downgraded(&self) -> bool {
        self.downgraded
    }

    /// Requests issued so far
    pub fn requests(&self) -> usize {
        self.requests
    }

    /// Pages appended so far
    pub fn pages(&self) -> usize {
        self.pages
    }

    /// Offset for the next request, if offset paging is active
    pub fn next_offset(&self) -> Option<usize> {
        self.mode.is_offset().then(|| self.collection.len())
    }

    /// Check if the machine is waiting for a response
    pub fn is_requesting(&self) -> bool {
        matches!(self.phase, Phase::Requesting)
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_final()
    }

    /// Count a request about to be sent
    pub fn record_request(&mut self) {
        self.requests += 1;
    }

    /// Feed the outcome of a request
    pub fn on_response(&mut self, response: Result<PageResponse>) {
        match response {
            Ok(PageResponse::Page(page)) => self.on_page(page),
            Ok(PageResponse::ServiceError(err)) => self.on_service_error(err),
            Err(err) => self.fail(err),
        }
    }

    /// A page of features arrived
    pub fn on_page(&mut self, page: Page) {
        debug_assert!(self.is_requesting(), "page received in {}", self.phase.name());
        self.phase = Phase::Appending(page);
    }

    /// The service answered with an error object
    pub fn on_service_error(&mut self, err: ServiceError) {
        debug_assert!(self.is_requesting(), "error received in {}", self.phase.name());
        if self.mode.is_offset() && indicates_pagination_unsupported(&err) {
            warn!(
                message = %err.message,
                "Service does not support pagination, retrying without resultOffset"
            );
            self.phase = Phase::Downgrading;
        } else {
            self.fail(err.into());
        }
    }

    /// Stop the collection with an error
    pub fn fail(&mut self, err: Error) {
        self.phase = Phase::Failed(err);
    }

    /// Advance through a phase that needs no I/O.
    ///
    /// `Downgrading` and `Appending` move on; every other phase is left as is.
    pub fn step(&mut self) {
        match std::mem::replace(&mut self.phase, Phase::Requesting) {
            Phase::Downgrading => {
                self.downgraded |= self.mode.downgrade();
            }
            Phase::Appending(page) => self.append(page),
            other => self.phase = other,
        }
    }

    fn append(&mut self, page: Page) {
        let page_len = page.len();
        let offset = self.collection.len();
        self.collection.extend(page.features);
        self.pages += 1;

        self.phase = if !page.exceeded_transfer_limit {
            info!(
                total = self.collection.len(),
                pages = self.pages,
                "Finished fetching all features"
            );
            Phase::Terminating
        } else if !self.mode.is_offset() {
            Phase::Failed(Error::TransferLimitMismatch {
                collected: self.collection.len(),
            })
        } else if page_len == 0 {
            Phase::Failed(Error::StalledPagination { offset })
        } else {
            if self.show_progress {
                info!(
                    fetched = page_len,
                    total = self.collection.len(),
                    "Fetched page, more features remain"
                );
            }
            Phase::Requesting
        };
    }

    /// Consume the machine, returning the features and the final phase
    pub fn into_parts(self) -> (FeatureCollection, Phase) {
        (self.collection, self.phase)
    }
}
