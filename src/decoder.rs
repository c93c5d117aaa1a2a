//! XML record decoding.
//!
//! Decodes a per-entity XML document into a generic `serde_json::Value`
//! tree and walks down to the entity record. The mapping follows the usual
//! dict-style XML conventions:
//!
//! - an element with neither attributes nor child elements becomes its
//!   trimmed text, or `null` when that text is empty
//! - attributes become `"@name"` keys
//! - child elements become object keys, repeated siblings an array
//! - text next to attributes or children is kept under `"#text"`

use crate::error::{Result, StratifyError};
use roxmltree::{Document, Node};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Decode an XML document; the root element becomes the single top-level key
pub fn decode_xml(text: &str) -> std::result::Result<Value, roxmltree::Error> {
    let document = Document::parse(text)?;
    let root = document.root_element();

    let mut top = Map::new();
    top.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(Value::Object(top))
}

fn element_to_value(node: Node) -> Value {
    let mut map = Map::new();

    for attribute in node.attributes() {
        map.insert(
            format!("@{}", attribute.name()),
            Value::String(attribute.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in node.children() {
        if child.is_element() {
            let key = child.tag_name().name().to_string();
            let value = element_to_value(child);
            match map.get_mut(&key) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(key, value);
                }
            }
        } else if child.is_text() {
            if let Some(fragment) = child.text() {
                text.push_str(fragment);
            }
        }
    }

    let text = text.trim();
    if map.is_empty() {
        return if text.is_empty() {
            Value::Null
        } else {
            Value::String(text.to_string())
        };
    }

    if !text.is_empty() {
        map.insert("#text".to_string(), Value::String(text.to_string()));
    }
    Value::Object(map)
}

/// Read a record file and return the entity record found at `record_path`
pub fn read_record(path: &Path, record_path: &[String]) -> Result<Value> {
    let text = fs::read_to_string(path).map_err(|e| StratifyError::decode(path, e.to_string()))?;
    let document = decode_xml(&text).map_err(|e| StratifyError::decode(path, e.to_string()))?;

    let record = select_record(document, record_path)
        .map_err(|reason| StratifyError::decode(path, reason))?;

    debug!("Decoded record from {}", path.display());
    Ok(record)
}

/// Walk `record_path` down a decoded document; the target must be an element
/// with content
pub fn select_record(document: Value, record_path: &[String]) -> std::result::Result<Value, String> {
    let mut current = document;

    for step in record_path {
        current = match current {
            Value::Object(mut map) => map
                .remove(step)
                .ok_or_else(|| format!("missing element <{}>", step))?,
            Value::Array(_) => {
                return Err(format!("expected a single element above <{}>", step));
            }
            _ => return Err(format!("element above <{}> has no children", step)),
        };
    }

    match current {
        Value::Object(_) => Ok(current),
        Value::Array(_) => Err("record element occurs more than once".to_string()),
        _ => Err("record element has no children".to_string()),
    }
}
