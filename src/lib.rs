//! Taxonomy Stratifier Library
//!
//! Counts how metabolites distribute over the levels of their chemical
//! taxonomy. Each record in a directory of per-metabolite XML files is
//! decoded, its taxonomy fields are extracted on a bounded worker pool,
//! and the results are aggregated into per-level subgroup counts.
//!
//! This library provides tools for:
//! - Decoding XML records into generic nested values
//! - Extracting classification fields, distinguishing "no taxonomy" from
//!   "field missing"
//! - Parallel extraction with a join barrier before aggregation
//! - Alphabetic and count-sorted views with a configurable group order
//! - Flattening a view into `Group / Subgroup / Count` rows
//! - Writing YAML and TSV outputs only when the whole run succeeded
//! - Stratifying a single branch (for example lipids) of a saved run

pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod models;
pub mod processor;
pub mod report;
pub mod subset;
pub mod taxonomy;

pub use config::StratifyConfig;
pub use error::{Result, StratifyError};
pub use models::{AggregatedTaxonomy, ClassificationRecord, Classifications, TaxonomyRow};
pub use processor::StratificationProcessor;
pub use report::TaxonomyReport;
