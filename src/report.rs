//! Assembly of the stratification outputs from a classification mapping.

use crate::error::Result;
use crate::models::{
    AggregatedTaxonomy, Classifications, GroupOrder, GroupSummary, TaxonomyRow,
};
use crate::taxonomy::{aggregate, flatten, sort_views};
use tracing::info;

/// Everything derived from one classification mapping
#[derive(Debug, Clone)]
pub struct TaxonomyReport {
    pub alphabetic: AggregatedTaxonomy,
    pub numeric: AggregatedTaxonomy,
    /// Flattened numeric view
    pub rows: Vec<TaxonomyRow>,
    /// Per-group totals, in group rank order
    pub summaries: Vec<GroupSummary>,
}

impl TaxonomyReport {
    /// Aggregate, sort and flatten
    pub fn build(classifications: &Classifications, group_order: &GroupOrder) -> Result<Self> {
        let tax = aggregate(classifications);
        let views = sort_views(&tax, group_order)?;
        let rows = flatten(&views.numeric);

        let summaries: Vec<GroupSummary> = views
            .alphabetic
            .groups()
            .map(|(group, counts)| GroupSummary {
                group: group.clone(),
                entities: counts.values().sum(),
                subgroups: counts.len(),
            })
            .collect();

        for summary in &summaries {
            info!(
                "Group {}: {} entities across {} subgroups",
                summary.group, summary.entities, summary.subgroups
            );
        }

        Ok(Self {
            alphabetic: views.alphabetic,
            numeric: views.numeric,
            rows,
            summaries,
        })
    }
}
