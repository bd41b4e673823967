//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, FetchArgs};
use crate::collector::{CollectStatus, CollectorConfig, PaginatedCollector};
use crate::config::{load_source_config, SourceConfig};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::{Destination, GeoJsonWriter};
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Fetch(args) => self.fetch(args).await,
            Commands::Validate { config } => {
                let source = load_source_config(config)?;
                println!("{} is valid (url: {})", config.display(), source.url);
                Ok(())
            }
        }
    }

    async fn fetch(&self, args: &FetchArgs) -> Result<()> {
        let source = resolve_source(args)?;

        let client = HttpClient::with_config(HttpClientConfig::from(&source.http))?;
        let mut collector_config = CollectorConfig::new();
        if let Some(deadline) = source.collector.deadline() {
            collector_config = collector_config.with_deadline(deadline);
        }
        let collector = PaginatedCollector::new(client).with_config(collector_config);

        let outcome = collector.collect(&source.url, &source.options).await;
        info!(
            features = outcome.stats.features,
            requests = outcome.stats.requests,
            downgraded = outcome.stats.downgraded,
            duration_ms = outcome.stats.duration_ms,
            "Collection finished"
        );

        // Salvaged features are written even when the fetch stopped early
        let destination = Destination::from_path(source.output.path.as_deref());
        GeoJsonWriter::new()
            .with_pretty(source.output.pretty)
            .write(&outcome.collection, &destination)
            .await?;

        match outcome.status {
            CollectStatus::Complete => Ok(()),
            CollectStatus::Partial(err) if args.allow_partial => {
                warn!(error = %err, "Wrote partial feature collection");
                Ok(())
            }
            CollectStatus::Partial(err) => Err(Error::Other(format!(
                "partial result ({} features): {err}",
                outcome.stats.features
            ))),
        }
    }
}

/// Merge the config file (if any) with command-line overrides
pub fn resolve_source(args: &FetchArgs) -> Result<SourceConfig> {
    let mut source = match (&args.config, &args.url) {
        (Some(path), _) => load_source_config(path)?,
        (None, Some(url)) => SourceConfig::new(url.clone()),
        (None, None) => {
            return Err(Error::config(
                "No feature layer given (use --url or --config)",
            ))
        }
    };

    if let Some(url) = &args.url {
        source.url.clone_from(url);
    }
    if let Some(out_fields) = &args.out_fields {
        source.options.out_fields.clone_from(out_fields);
    }
    if args.no_pagination {
        source.options.supports_pagination = false;
    }
    if let Some(precision) = args.geometry_precision {
        source.options.geometry_precision = precision;
    }
    if args.no_progress {
        source.options.display_incomplete_feature_collections = false;
    }
    if let Some(output) = &args.output {
        source.output.path = Some(output.clone());
    }
    if args.pretty {
        source.output.pretty = true;
    }
    if let Some(timeout) = args.timeout {
        source.http.timeout_seconds = timeout;
    }
    if let Some(retries) = args.retries {
        source.http.max_retries = retries;
    }
    if let Some(deadline) = args.deadline {
        source.collector.deadline_seconds = Some(deadline);
    }

    source.validate()?;
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;

    #[test]
    fn test_parse_fetch_command() {
        let cli = Cli::parse_from([
            "feature-harvest",
            "fetch",
            "--url",
            "https://example.com/FeatureServer/0",
            "--out-fields",
            "OBJECTID,name",
            "--geometry-precision",
            "5",
            "-o",
            "gauge.geojson",
        ]);

        let Commands::Fetch(args) = cli.command else {
            panic!("Expected fetch");
        };
        let source = resolve_source(&args).unwrap();
        assert_eq!(source.url, "https://example.com/FeatureServer/0");
        assert_eq!(source.options.out_fields, "OBJECTID,name");
        assert_eq!(source.options.geometry_precision, 5);
        assert!(source.options.supports_pagination);
        assert_eq!(
            source.output.path.as_deref(),
            Some(std::path::Path::new("gauge.geojson"))
        );
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(
            file,
            "url: https://example.com/FeatureServer/1\noptions:\n  geometryPrecision: 3\n  outFields: name"
        )
        .unwrap();

        let args = FetchArgs {
            config: Some(file.path().to_path_buf()),
            no_pagination: true,
            deadline: Some(120),
            ..FetchArgs::default()
        };

        let source = resolve_source(&args).unwrap();
        assert_eq!(source.url, "https://example.com/FeatureServer/1");
        assert_eq!(source.options.geometry_precision, 3);
        assert_eq!(source.options.out_fields, "name");
        assert!(!source.options.supports_pagination);
        assert_eq!(source.collector.deadline_seconds, Some(120));
    }

    #[test]
    fn test_resolve_source_requires_url() {
        let result = resolve_source(&FetchArgs::default());
        assert!(matches!(result, Err(Error::Config { .. })));
    }
}
