//! GeoJSON file writer

use crate::error::{Error, Result};
use crate::types::FeatureCollection;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where a collection is written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Standard output
    Stdout,
    /// A file path (parent directories are created)
    File(PathBuf),
}

impl Destination {
    /// File destination when a path is given, stdout otherwise
    pub fn from_path(path: Option<&Path>) -> Self {
        path.map_or(Self::Stdout, |p| Self::File(p.to_path_buf()))
    }
}

/// Serializes feature collections as GeoJSON
#[derive(Debug, Clone, Default)]
pub struct GeoJsonWriter {
    pretty: bool,
}

impl GeoJsonWriter {
    /// Create a compact writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable pretty printing
    #[must_use]
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Serialize a collection to GeoJSON bytes
    pub fn to_bytes(&self, collection: &FeatureCollection) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(collection)?
        } else {
            serde_json::to_vec(collection)?
        };
        Ok(bytes)
    }

    /// Write a collection to a destination, returning the bytes written
    pub async fn write(
        &self,
        collection: &FeatureCollection,
        destination: &Destination,
    ) -> Result<usize> {
        let bytes = self.to_bytes(collection)?;

        match destination {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&bytes)?;
                stdout.write_all(b"\n")?;
                stdout.flush()?;
            }
            Destination::File(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await.map_err(|e| {
                        Error::output(format!("Failed to create {}: {e}", parent.display()))
                    })?;
                }
                tokio::fs::write(path, &bytes).await.map_err(|e| {
                    Error::output(format!("Failed to write {}: {e}", path.display()))
                })?;
                info!(
                    path = %path.display(),
                    features = collection.len(),
                    bytes = bytes.len(),
                    "Wrote feature collection"
                );
            }
        }

        Ok(bytes.len())
    }
}
