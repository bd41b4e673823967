//! CLI module
//!
//! Command-line interface for collecting feature layers.
//!
//! # Commands
//!
//! - `fetch` - Collect every feature and write a GeoJSON file
//! - `validate` - Check a source configuration file

mod commands;
mod runner;

pub use commands::{Cli, Commands, FetchArgs};
pub use runner::{resolve_source, Runner};
