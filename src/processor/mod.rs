//! Main processing engine with modular architecture.
//!
//! Orchestrates the stratification workflow: record file discovery,
//! parallel taxonomy extraction, aggregation into sorted views, and output
//! writing. Aggregation only starts once every record has been extracted,
//! and nothing is written unless every stage succeeded.

pub mod discovery;
pub mod dispatch;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::FileDiscovery, dispatch::ParallelDispatcher, writer::OutputWriter};

use crate::config::StratifyConfig;
use crate::decoder::read_record;
use crate::error::{Result, StratifyError};
use crate::models::{Classifications, ProcessingStats};
use crate::report::TaxonomyReport;
use crate::subset::filter_by_field;
use crate::taxonomy::extract;

use colored::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::{fs, task};
use tracing::{debug, info};

/// Main processor for a directory of record files
#[derive(Debug)]
pub struct StratificationProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: StratifyConfig,
}

impl StratificationProcessor {
    /// Create a new processor; output defaults to the input's parent directory
    pub fn new(input_path: PathBuf, output_path: Option<PathBuf>) -> Result<Self> {
        if !input_path.is_dir() {
            return Err(StratifyError::InputNotFound { path: input_path });
        }

        let output_path = output_path.unwrap_or_else(|| default_output_dir(&input_path));

        Ok(Self {
            input_path,
            output_path,
            config: StratifyConfig::default(),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: StratifyConfig) -> Self {
        self.config = config;
        self
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        println!(
            "{}",
            "Starting taxonomy stratification".bright_green().bold()
        );
        println!(
            "  {} {}",
            "Records:".bright_cyan(),
            self.input_path.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.output_path.display()
        );

        // Step 1: Discover record files
        println!("\n{}", "Searching for record files...".bright_yellow());
        let discovery = FileDiscovery::new(
            self.input_path.clone(),
            self.config.file_extension.clone(),
        );
        let items = discovery.discover_record_files().await?;
        println!(
            "  {} {} record files",
            "Found".bright_green(),
            items.len().to_string().bright_white().bold()
        );

        // Step 2: Extract taxonomy from every record in parallel
        let workers = self.config.effective_workers();
        println!(
            "\n{} ({} workers)",
            "Extracting taxonomy...".bright_yellow(),
            workers
        );
        let dispatcher =
            ParallelDispatcher::new(workers)?.with_progress(self.config.show_progress);
        let files_discovered = items.len();
        let work: Vec<(String, PathBuf)> =
            items.into_iter().map(|item| (item.id, item.path)).collect();
        let record_path = self.config.record_path.clone();
        let taxonomy_key = self.config.taxonomy_key.clone();
        let fields = self.config.fields.clone();
        let classifications: Classifications = dispatcher
            .dispatch(work, move |id, path: PathBuf| {
                let record = read_record(&path, &record_path)?;
                let classification = extract(&record, &taxonomy_key, &fields)?;
                if classification.is_none() {
                    debug!("No taxonomy in {}", path.display());
                }
                Ok((id, classification))
            })
            .await?;

        // Step 3: Aggregate and sort
        println!("\n{}", "Arranging collected data...".bright_yellow());
        let report = TaxonomyReport::build(&classifications, &self.config.group_ranks())?;

        // Step 4: Write every output
        println!("\n{}", "Writing output files...".bright_yellow());
        let writer = OutputWriter::new(self.output_path.clone(), self.config.output_prefix.clone());
        let mut stats = ProcessingStats {
            files_discovered,
            groups: report.summaries.len(),
            rows_written: report.rows.len(),
            ..Default::default()
        };
        stats.tally(&classifications);

        let saved = self.config.save_classifications.then_some(classifications);
        let (output_files, report) = write_report(writer, report, saved).await?;
        stats.output_files = output_files;
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Stratified {} records into {} groups",
            stats.files_discovered, stats.groups
        );
        print_summary(&report, &stats);
        Ok(stats)
    }
}

/// Stratify the subset of a saved classification dump where `field == value`
pub async fn process_subset(
    classifications_path: &Path,
    output_path: &Path,
    field: &str,
    value: &str,
    config: &StratifyConfig,
) -> Result<ProcessingStats> {
    let start_time = Instant::now();
    config.validate()?;

    println!("{}", "Starting subset stratification".bright_green().bold());
    println!(
        "  {} {}",
        "Classifications:".bright_cyan(),
        classifications_path.display()
    );
    println!("  {} {} = {}", "Subset:".bright_cyan(), field, value);

    println!("\n{}", "Reading classifications...".bright_yellow());
    let text = fs::read_to_string(classifications_path).await?;
    let all: Classifications = serde_json::from_str(&text)?;

    println!("\n{}", "Selecting subset...".bright_yellow());
    let subset = filter_by_field(&all, field, value);
    println!(
        "  {} {} of {} records",
        "Kept".bright_green(),
        subset.len().to_string().bright_white().bold(),
        all.len()
    );

    println!("\n{}", "Arranging collected data...".bright_yellow());
    let report = TaxonomyReport::build(&subset, &config.group_ranks())?;

    println!("\n{}", "Writing output files...".bright_yellow());
    let writer = OutputWriter::new(output_path.to_path_buf(), config.output_prefix.clone());
    let mut stats = ProcessingStats {
        files_discovered: all.len(),
        groups: report.summaries.len(),
        rows_written: report.rows.len(),
        ..Default::default()
    };
    stats.tally(&subset);

    let (output_files, report) = write_report(writer, report, None).await?;
    stats.output_files = output_files;
    stats.processing_time_ms = start_time.elapsed().as_millis();

    print_summary(&report, &stats);
    Ok(stats)
}

/// Write on the blocking pool, handing the report back for the summary
async fn write_report(
    writer: OutputWriter,
    report: TaxonomyReport,
    classifications: Option<Classifications>,
) -> Result<(Vec<PathBuf>, TaxonomyReport)> {
    task::spawn_blocking(move || -> Result<_> {
        let written = writer.write_report(&report, classifications.as_ref())?;
        Ok((written, report))
    })
    .await
    .map_err(|e| StratifyError::WorkerFailed {
        reason: format!("output writer stopped: {}", e),
    })?
}

/// `<input>/..` when the input has a parent, else the input itself
fn default_output_dir(input_path: &Path) -> PathBuf {
    input_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf()
}

fn print_summary(report: &TaxonomyReport, stats: &ProcessingStats) {
    println!("\n{}", "Stratification Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {}",
        "Records classified:".bright_cyan(),
        stats.records_classified.to_string().bright_white()
    );
    if stats.records_without_taxonomy > 0 {
        println!(
            "  {} {}",
            "Records without taxonomy:".bright_yellow(),
            stats.records_without_taxonomy.to_string().bright_yellow()
        );
    }
    for summary in &report.summaries {
        println!(
            "  {} {} entities, {} subgroups",
            format!("{}:", summary.group).bright_cyan(),
            summary.entities.to_string().bright_white().bold(),
            summary.subgroups.to_string().bright_white()
        );
    }
    for path in &stats.output_files {
        println!("  {} {}", "Wrote".bright_green(), path.display());
    }
}
