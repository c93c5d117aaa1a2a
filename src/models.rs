//! Core data structures and types for taxonomy stratification.
//!
//! Defines the per-entity classification records, the aggregated
//! group/subgroup counts, flattened table rows and processing statistics.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Sparse classification of one entity: every recognized field, in
/// configured order, with the observed value or `None`.
pub type ClassificationRecord = IndexMap<String, Option<String>>;

/// Identifier to classification mapping. `None` marks an entity whose
/// record carried no taxonomy at all.
pub type Classifications = IndexMap<String, Option<ClassificationRecord>>;

/// Subgroup value to occurrence count
pub type SubgroupCounts = IndexMap<String, u64>;

/// Group rank lookup used to order the top level of a view
pub type GroupOrder = IndexMap<String, usize>;

/// One record file picked up by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceItem {
    pub id: String,
    pub path: PathBuf,
}

/// Group to subgroup to count. Iteration order is meaningful once the
/// structure has been through the sorter; equality ignores order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregatedTaxonomy {
    groups: IndexMap<String, SubgroupCounts>,
}

impl AggregatedTaxonomy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one observation of `subgroup` under `group`
    pub fn increment(&mut self, group: &str, subgroup: &str) {
        let counts = self.groups.entry(group.to_string()).or_default();
        *counts.entry(subgroup.to_string()).or_insert(0) += 1;
    }

    pub fn get(&self, group: &str) -> Option<&SubgroupCounts> {
        self.groups.get(group)
    }

    pub fn groups(&self) -> impl Iterator<Item = (&String, &SubgroupCounts)> {
        self.groups.iter()
    }

    pub fn group_names(&self) -> Vec<&str> {
        self.groups.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of (group, subgroup) pairs
    pub fn subgroup_count(&self) -> usize {
        self.groups.values().map(IndexMap::len).sum()
    }

    pub(crate) fn groups_mut(&mut self) -> &mut IndexMap<String, SubgroupCounts> {
        &mut self.groups
    }
}

impl From<IndexMap<String, SubgroupCounts>> for AggregatedTaxonomy {
    fn from(groups: IndexMap<String, SubgroupCounts>) -> Self {
        Self { groups }
    }
}

/// One line of the flattened table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRow {
    #[serde(rename = "Group")]
    pub group: String,
    #[serde(rename = "Subgroup")]
    pub subgroup: String,
    #[serde(rename = "Count")]
    pub count: u64,
}

/// How many entities and distinct subgroups a group covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub group: String,
    pub entities: u64,
    pub subgroups: usize,
}

/// Processing statistics
#[derive(Debug, Default)]
pub struct ProcessingStats {
    pub files_discovered: usize,
    pub records_classified: usize,
    pub records_without_taxonomy: usize,
    pub groups: usize,
    pub rows_written: usize,
    pub output_files: Vec<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Count classified and unclassified entities
    pub fn tally(&mut self, classifications: &Classifications) {
        self.records_classified = classifications.values().filter(|r| r.is_some()).count();
        self.records_without_taxonomy = classifications.len() - self.records_classified;
    }
}
