//! Classification field extraction from one decoded record.

use crate::error::{Result, StratifyError};
use crate::models::ClassificationRecord;
use serde_json::Value;

/// Pull `fields` out of the record's taxonomy sub-document.
///
/// Returns `Ok(None)` when the record has no taxonomy (missing key, or an
/// empty element decoded as `null`). Otherwise every requested field is
/// present in the result, with `None` for fields the taxonomy lacks.
pub fn extract(
    record: &Value,
    taxonomy_key: &str,
    fields: &[String],
) -> Result<Option<ClassificationRecord>> {
    let taxonomy = match record.get(taxonomy_key) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(taxonomy)) => taxonomy,
        Some(other) => {
            return Err(StratifyError::InvalidRecord {
                field: taxonomy_key.to_string(),
                reason: format!("expected nested fields, found {}", kind(other)),
            });
        }
    };

    let mut classification = ClassificationRecord::with_capacity(fields.len());
    for field in fields {
        let value = match taxonomy.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(Value::Bool(b)) => Some(b.to_string()),
            Some(other) => {
                return Err(StratifyError::InvalidRecord {
                    field: field.clone(),
                    reason: format!("expected a single value, found {}", kind(other)),
                });
            }
        };
        classification.insert(field.clone(), value);
    }

    Ok(Some(classification))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "text",
        Value::Array(_) => "a repeated element",
        Value::Object(_) => "nested elements",
    }
}
