//! Output writing module for stratification results
//!
//! Renders the alphabetic and numeric views as YAML, the flattened numeric
//! view as TSV and optionally the classification mapping as JSON. Every
//! document is rendered in memory and staged in a temporary file before the
//! first output is moved into place.

use crate::constants::output_suffixes;
use crate::error::{Result, StratifyError};
use crate::models::{Classifications, TaxonomyRow};
use crate::report::TaxonomyReport;

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

const TSV_HEADER: [&str; 3] = ["Group", "Subgroup", "Count"];

/// A fully rendered output document waiting to be persisted
#[derive(Debug, Clone)]
pub struct RenderedOutput {
    pub path: PathBuf,
    pub contents: Vec<u8>,
}

/// Writer for the stratification output files
#[derive(Debug)]
pub struct OutputWriter {
    output_dir: PathBuf,
    prefix: String,
}

impl OutputWriter {
    pub fn new(output_dir: PathBuf, prefix: impl Into<String>) -> Self {
        Self {
            output_dir,
            prefix: prefix.into(),
        }
    }

    /// Path of the output file with the given suffix
    pub fn output_path(&self, suffix: &str) -> PathBuf {
        self.output_dir.join(format!("{}{}", self.prefix, suffix))
    }

    /// Render and persist a report, returning the written paths
    pub fn write_report(
        &self,
        report: &TaxonomyReport,
        classifications: Option<&Classifications>,
    ) -> Result<Vec<PathBuf>> {
        let outputs = self.render(report, classifications)?;
        self.persist(outputs)
    }

    /// Render every output document without touching the filesystem
    pub fn render(
        &self,
        report: &TaxonomyReport,
        classifications: Option<&Classifications>,
    ) -> Result<Vec<RenderedOutput>> {
        let mut outputs = vec![
            RenderedOutput {
                path: self.output_path(output_suffixes::ALPHABETIC),
                contents: serde_yaml::to_string(&report.alphabetic)?.into_bytes(),
            },
            RenderedOutput {
                path: self.output_path(output_suffixes::NUMERIC),
                contents: serde_yaml::to_string(&report.numeric)?.into_bytes(),
            },
            RenderedOutput {
                path: self.output_path(output_suffixes::TABLE),
                contents: render_tsv(&report.rows)?,
            },
        ];

        if let Some(classifications) = classifications {
            outputs.push(RenderedOutput {
                path: self.output_path(output_suffixes::CLASSIFICATIONS),
                contents: serde_json::to_vec_pretty(classifications)?,
            });
        }

        Ok(outputs)
    }

    /// Write rendered documents into the output directory.
    ///
    /// Every document is staged in a temporary file before the first one is
    /// moved into place. If a move fails, files already moved by this call
    /// are removed so the directory never holds a partial set.
    pub fn persist(&self, outputs: Vec<RenderedOutput>) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let mut staged = Vec::with_capacity(outputs.len());
        for output in outputs {
            let file = stage(&self.output_dir, &output.contents)?;
            staged.push((file, output));
        }

        let mut written: Vec<PathBuf> = Vec::with_capacity(staged.len());
        for (file, output) in staged {
            if let Err(e) = file.persist(&output.path) {
                warn!(
                    "Failed to write {}: {}; removing {} completed outputs",
                    output.path.display(),
                    e.error,
                    written.len()
                );
                for path in &written {
                    if let Err(cleanup) = fs::remove_file(path) {
                        warn!("Could not remove {}: {}", path.display(), cleanup);
                    }
                }
                return Err(StratifyError::Io(e.error));
            }
            debug!(
                "Wrote {} bytes to {}",
                output.contents.len(),
                output.path.display()
            );
            written.push(output.path);
        }

        Ok(written)
    }
}

/// Tab separated table with a header line and `\n` after every row
pub fn render_tsv(rows: &[TaxonomyRow]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(TSV_HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| StratifyError::Io(e.into_error()))
}

fn stage(dir: &Path, contents: &[u8]) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.flush()?;
    Ok(file)
}
