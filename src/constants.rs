//! Application constants for the taxonomy stratifier
//!
//! Default field lists, record layout, output naming and worker pool
//! sizing used throughout the pipeline.

// =============================================================================
// Classification Fields
// =============================================================================

/// Recognized taxonomy fields, in default group rank order
pub const DEFAULT_FIELDS: &[&str] = &[
    "direct_parent",
    "kingdom",
    "super_class",
    "class",
    "sub_class",
];

/// Name of the nested classification sub-document inside a record
pub const TAXONOMY_KEY: &str = "taxonomy";

/// Element path from the XML document root to the per-entity record
pub const DEFAULT_RECORD_PATH: &[&str] = &["hmdb", "metabolite"];

/// Extension of record files picked up by discovery
pub const RECORD_FILE_EXTENSION: &str = "xml";

// =============================================================================
// Worker Pool
// =============================================================================

/// Default extraction pool size
pub const DEFAULT_WORKERS: usize = 14;

// =============================================================================
// Output Naming
// =============================================================================

/// Output prefix for the full stratification
pub const DEFAULT_OUTPUT_PREFIX: &str = "hmdb_stratification";

/// Output prefix for the subset stratification
pub const SUBSET_OUTPUT_PREFIX: &str = "lipid_stratification";

/// File name suffixes appended to the output prefix
pub mod output_suffixes {
    pub const ALPHABETIC: &str = "_alphabetic.yaml";
    pub const NUMERIC: &str = "_numeric.yaml";
    pub const TABLE: &str = "_tsv.tsv";
    pub const CLASSIFICATIONS: &str = "_classifications.json";
}

// =============================================================================
// Subset Defaults
// =============================================================================

/// Field used to pick the subset when none is given
pub const DEFAULT_SUBSET_FIELD: &str = "super_class";

/// Value used to pick the subset when none is given
pub const DEFAULT_SUBSET_VALUE: &str = "Lipids and lipid-like molecules";

// =============================================================================
// Progress Display
// =============================================================================

pub const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}";
pub const PROGRESS_CHARS: &str = "#>-";
