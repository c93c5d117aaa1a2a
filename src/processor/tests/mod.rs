//! Integration tests for the processor module
//!
//! Tests the complete stratification pipeline using small record directories.

pub mod error_handling;

use std::fs;
use std::path::{Path, PathBuf};

/// Metabolite document with the given taxonomy fields, or none at all
pub fn metabolite_xml(accession: &str, taxonomy: Option<&[(&str, &str)]>) -> String {
    let taxonomy = match taxonomy {
        None => String::new(),
        Some(fields) => {
            let body: String = fields
                .iter()
                .map(|(k, v)| {
                    if v.is_empty() {
                        format!("      <{}/>\n", k)
                    } else {
                        format!("      <{k}>{v}</{k}>\n")
                    }
                })
                .collect();
            format!("    <taxonomy>\n{}    </taxonomy>\n", body)
        }
    };

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<hmdb xmlns=\"http://www.hmdb.ca\">\n  <metabolite>\n    <accession>{}</accession>\n{}  </metabolite>\n</hmdb>\n",
        accession, taxonomy
    )
}

/// Write one record file per (accession, taxonomy) pair
pub fn create_record_directory(
    root: &Path,
    records: &[(&str, Option<&[(&str, &str)]>)],
) -> PathBuf {
    let input_path = root.join("hmdb_metabolites");
    fs::create_dir_all(&input_path).unwrap();

    for (accession, taxonomy) in records {
        fs::write(
            input_path.join(format!("{}.xml", accession)),
            metabolite_xml(accession, *taxonomy),
        )
        .unwrap();
    }

    input_path
}
