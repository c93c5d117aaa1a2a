//! Flattening of a view into (group, subgroup, count) rows.

use crate::models::{AggregatedTaxonomy, TaxonomyRow};

/// One row per (group, subgroup) pair, in the view's iteration order
pub fn flatten(tax: &AggregatedTaxonomy) -> Vec<TaxonomyRow> {
    tax.groups()
        .flat_map(|(group, counts)| {
            counts.iter().map(move |(subgroup, count)| TaxonomyRow {
                group: group.clone(),
                subgroup: subgroup.clone(),
                count: *count,
            })
        })
        .collect()
}
