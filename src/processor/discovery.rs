//! File discovery module for record directories
//!
//! Lists the per-entity record files of an input directory and derives
//! each entity identifier from its file name.

use crate::error::{Result, StratifyError};
use crate::models::SourceItem;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File discovery component for record directories
#[derive(Debug)]
pub struct FileDiscovery {
    input_path: PathBuf,
    extension: String,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(input_path: PathBuf, extension: impl Into<String>) -> Self {
        Self {
            input_path,
            extension: extension.into(),
        }
    }

    /// Discover all record files directly inside the input directory
    ///
    /// Files are returned sorted by name. The identifier is the file name
    /// with the extension removed, so `HMDB0000001.xml` becomes
    /// `HMDB0000001`. Sub-directories are not searched.
    pub async fn discover_record_files(&self) -> Result<Vec<SourceItem>> {
        if !self.input_path.is_dir() {
            return Err(StratifyError::InputNotFound {
                path: self.input_path.clone(),
            });
        }

        debug!("Searching for record files in: {}", self.input_path.display());

        let mut items = Vec::new();
        let mut dir = fs::read_dir(&self.input_path).await?;

        while let Some(entry) = dir.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }

            let path = entry.path();
            if let Some(id) = record_id(&path, &self.extension) {
                items.push(SourceItem { id, path });
            }
        }

        items.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));

        debug!("Found {} record files", items.len());
        Ok(items)
    }
}

/// Identifier for a record file, or `None` if the extension does not match
fn record_id(path: &Path, extension: &str) -> Option<String> {
    if path.extension()? != extension {
        return None;
    }
    path.file_stem().map(|stem| stem.to_string_lossy().into_owned())
}
