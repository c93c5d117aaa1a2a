//! Per-group subgroup counting.

use crate::models::{AggregatedTaxonomy, Classifications};
use tracing::debug;

/// Count every non-null field value across all entities.
///
/// Entities without a taxonomy are skipped. Groups appear only once a
/// non-null value has been seen for them. Counts do not depend on the
/// order entities arrive in.
pub fn aggregate(records: &Classifications) -> AggregatedTaxonomy {
    let mut result = AggregatedTaxonomy::new();

    for classification in records.values().flatten() {
        for (field, value) in classification {
            if let Some(value) = value {
                result.increment(field, value);
            }
        }
    }

    debug!(
        "Aggregated {} entities into {} groups / {} subgroups",
        records.len(),
        result.len(),
        result.subgroup_count()
    );

    result
}
