//! CLI commands and argument parsing

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Collect every feature from a paged feature service
#[derive(Parser, Debug)]
#[command(name = "feature-harvest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbose output (logs every query URL)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch all features and write them as GeoJSON
    Fetch(FetchArgs),

    /// Validate a source configuration file
    Validate {
        /// Source configuration file (YAML or JSON)
        #[arg(short = 'C', long)]
        config: PathBuf,
    },
}

/// Arguments of the `fetch` command
///
/// Flags override values from `--config`.
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Feature layer URL (e.g. .../FeatureServer/0)
    #[arg(short, long)]
    pub url: Option<String>,

    /// Source configuration file (YAML or JSON)
    #[arg(short = 'C', long)]
    pub config: Option<PathBuf>,

    /// Comma-separated fields to return
    #[arg(long)]
    pub out_fields: Option<String>,

    /// Never send resultOffset
    #[arg(long)]
    pub no_pagination: bool,

    /// Decimal places for returned coordinates
    #[arg(long)]
    pub geometry_precision: Option<u32>,

    /// Suppress per-page progress notices
    #[arg(long)]
    pub no_progress: bool,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print the GeoJSON
    #[arg(long)]
    pub pretty: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Transport retries per request
    #[arg(long)]
    pub retries: Option<u32>,

    /// Overall deadline in seconds
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Exit successfully even when the fetch stopped early
    #[arg(long)]
    pub allow_partial: bool,
}
