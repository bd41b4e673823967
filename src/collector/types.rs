//! Collector types
//!
//! Outcome, status and statistics of a collection call.

use crate::error::{Error, FailureKind};
use crate::pagination::PaginationMode;
use crate::types::FeatureCollection;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Configuration for the collector
#[derive(Debug, Clone, Default)]
pub struct CollectorConfig {
    /// Wall-clock budget for one `collect` call
    pub deadline: Option<Duration>,
}

impl CollectorConfig {
    /// Create a new collector config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the deadline
    #[must_use]
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Whether a collection retrieved everything
#[derive(Debug)]
pub enum CollectStatus {
    /// The last page was not capped; the collection is complete
    Complete,
    /// The fetch stopped early; the collection holds what arrived before the error
    Partial(Error),
}

impl CollectStatus {
    /// Check if the collection is complete
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Statistics from a collection call
#[derive(Debug, Clone)]
pub struct CollectStats {
    /// Requests issued (including the one re-issued after a downgrade)
    pub requests: usize,
    /// Pages appended
    pub pages: usize,
    /// Features collected
    pub features: usize,
    /// Whether offset paging was abandoned mid-fetch
    pub downgraded: bool,
    /// Paging mode in effect when the call ended
    pub final_mode: PaginationMode,
    /// When the call started
    pub started_at: DateTime<Utc>,
    /// When the call ended
    pub finished_at: DateTime<Utc>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Result of [`PaginatedCollector::collect`](super::PaginatedCollector::collect)
#[derive(Debug)]
pub struct CollectOutcome {
    /// Features collected, in page order
    pub collection: FeatureCollection,
    /// Completeness of `collection`
    pub status: CollectStatus,
    /// Call statistics
    pub stats: CollectStats,
}

impl CollectOutcome {
    /// Check if every feature was retrieved
    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    /// The error that cut the fetch short, if any
    pub fn error(&self) -> Option<&Error> {
        match &self.status {
            CollectStatus::Complete => None,
            CollectStatus::Partial(err) => Some(err),
        }
    }

    /// Failure class of a partial result
    pub fn failure_kind(&self) -> Option<FailureKind> {
        self.error().map(Error::kind)
    }

    /// Return the collection only if it is complete
    pub fn into_complete(self) -> crate::error::Result<FeatureCollection> {
        match self.status {
            CollectStatus::Complete => Ok(self.collection),
            CollectStatus::Partial(err) => Err(err),
        }
    }
}
