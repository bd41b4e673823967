//! Pagination types
//!
//! The paging mode of a call and the predicate that recognizes a service
//! refusing offset paging.

use crate::decode::ServiceError;
use serde::{Deserialize, Serialize};

/// How the next page is requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Send `resultOffset` = features collected so far
    Offset,
    /// Omit `resultOffset`; the service must return everything in one page
    Unpaged,
}

impl PaginationMode {
    /// Initial mode from the caller's `supportsPagination` option
    pub fn from_supported(supported: bool) -> Self {
        if supported {
            Self::Offset
        } else {
            Self::Unpaged
        }
    }

    /// Check if offset paging is active
    pub fn is_offset(self) -> bool {
        matches!(self, Self::Offset)
    }

    /// Switch from `Offset` to `Unpaged`.
    ///
    /// Returns `true` if the mode changed. There is no way back to `Offset`.
    pub fn downgrade(&mut self) -> bool {
        match self {
            Self::Offset => {
                *self = Self::Unpaged;
                true
            }
            Self::Unpaged => false,
        }
    }
}

/// Lowercase fragments that mark an error as "offset paging unsupported"
pub const PAGINATION_HINTS: &[&str] = &["pagination", "resultoffset"];

/// Does this service error say the server cannot page by offset?
///
/// Case-insensitive substring match over the message and every detail line.
pub fn indicates_pagination_unsupported(error: &ServiceError) -> bool {
    std::iter::once(&error.message)
        .chain(error.details.iter())
        .any(|text| {
            let text = text.to_lowercase();
            PAGINATION_HINTS.iter().any(|hint| text.contains(hint))
        })
}
