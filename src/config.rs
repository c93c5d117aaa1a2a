//! Configuration management and validation.
//!
//! Provides the configuration structure for a stratification run: the
//! recognized taxonomy fields, the group ranking used by the sorted views,
//! record layout, worker pool sizing and output naming. Configuration can
//! be loaded from a YAML file and then refined with the `with_*` builders.

use crate::constants::{
    DEFAULT_FIELDS, DEFAULT_OUTPUT_PREFIX, DEFAULT_RECORD_PATH, DEFAULT_WORKERS,
    RECORD_FILE_EXTENSION, TAXONOMY_KEY,
};
use crate::error::{Result, StratifyError};
use crate::models::GroupOrder;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Global configuration for a stratification run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StratifyConfig {
    /// Number of concurrent extraction workers (0 = one per CPU)
    pub workers: usize,

    /// Recognized taxonomy fields, in extraction order
    pub fields: Vec<String>,

    /// Explicit group ranks; derived from `fields` order when absent
    pub group_order: Option<GroupOrder>,

    /// Element path from the document root to the entity record
    pub record_path: Vec<String>,

    /// Key of the taxonomy sub-document inside a record
    pub taxonomy_key: String,

    /// Extension of record files to discover
    pub file_extension: String,

    /// Prefix for every output file name
    pub output_prefix: String,

    /// Also persist the identifier to classification mapping as JSON
    pub save_classifications: bool,

    /// Show a progress bar while extracting
    pub show_progress: bool,
}

impl Default for StratifyConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            fields: DEFAULT_FIELDS.iter().map(|f| f.to_string()).collect(),
            group_order: None,
            record_path: DEFAULT_RECORD_PATH.iter().map(|s| s.to_string()).collect(),
            taxonomy_key: TAXONOMY_KEY.to_string(),
            file_extension: RECORD_FILE_EXTENSION.to_string(),
            output_prefix: DEFAULT_OUTPUT_PREFIX.to_string(),
            save_classifications: false,
            show_progress: true,
        }
    }
}

impl StratifyConfig {
    /// Load configuration from a YAML file; missing keys take defaults
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&text)?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Replace the recognized field list
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Set explicit group ranks
    pub fn with_group_order(mut self, group_order: GroupOrder) -> Self {
        self.group_order = Some(group_order);
        self
    }

    pub fn with_output_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.output_prefix = prefix.into();
        self
    }

    pub fn with_save_classifications(mut self) -> Self {
        self.save_classifications = true;
        self
    }

    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Worker count with the automatic setting resolved
    pub fn effective_workers(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    /// Group ranks, explicit or derived from field order
    pub fn group_ranks(&self) -> GroupOrder {
        match &self.group_order {
            Some(order) => order.clone(),
            None => self
                .fields
                .iter()
                .enumerate()
                .map(|(rank, field)| (field.clone(), rank))
                .collect(),
        }
    }

    /// Reject configurations that could only fail later in the run
    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(StratifyError::configuration(
                "at least one taxonomy field is required",
            ));
        }

        if self.record_path.is_empty() {
            return Err(StratifyError::configuration("record path must not be empty"));
        }

        if self.output_prefix.trim().is_empty() {
            return Err(StratifyError::configuration("output prefix must not be empty"));
        }

        let ranks = self.group_ranks();
        let unranked: Vec<&str> = self
            .fields
            .iter()
            .filter(|field| !ranks.contains_key(field.as_str()))
            .map(String::as_str)
            .collect();
        if !unranked.is_empty() {
            return Err(StratifyError::configuration(format!(
                "fields without a group rank: {}",
                unranked.join(", ")
            )));
        }

        Ok(())
    }
}
