//! Pagination module
//!
//! Supports: offset paging via `resultOffset`, with a one-way downgrade to
//! unpaged requests for services that reject the parameter.
//!
//! # Overview
//!
//! A collection call starts in [`PaginationMode::Offset`] (unless the caller
//! says otherwise) and drives a [`FetchMachine`] through its [`Phase`]s.
//! The machine owns the accumulated features and decides, one response at a
//! time, whether to request again, downgrade, finish, or fail. It does no
//! I/O itself, so every transition can be tested without a server.

mod machine;
mod types;

pub use machine::{FetchMachine, Phase};
pub use types::{indicates_pagination_unsupported, PaginationMode, PAGINATION_HINTS};
