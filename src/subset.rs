//! Restriction of a classification mapping to one subgroup.
//!
//! Used to stratify a single branch of the taxonomy (for example all
//! lipids) from a previously saved identifier to classification dump.

use crate::models::Classifications;
use tracing::debug;

/// Keep the entities whose `field` equals `value`, in input order
pub fn filter_by_field(classifications: &Classifications, field: &str, value: &str) -> Classifications {
    let subset: Classifications = classifications
        .iter()
        .filter(|(_, record)| {
            record
                .as_ref()
                .and_then(|r| r.get(field))
                .and_then(Option::as_deref)
                == Some(value)
        })
        .map(|(id, record)| (id.clone(), record.clone()))
        .collect();

    debug!(
        "Subset {} = {:?}: {} of {} entities",
        field,
        value,
        subset.len(),
        classifications.len()
    );

    subset
}
