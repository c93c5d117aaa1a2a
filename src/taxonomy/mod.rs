//! Taxonomy stratification core.
//!
//! Extraction of classification fields from decoded records, aggregation
//! into per-group subgroup counts, the alphabetic and numeric views, and
//! flattening of a view into table rows.

pub mod aggregate;
pub mod extract;
pub mod flatten;
pub mod sort;

pub use aggregate::aggregate;
pub use extract::extract;
pub use flatten::flatten;
pub use sort::{SortedViews, sort_views};
