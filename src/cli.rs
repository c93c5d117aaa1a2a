//! Command-line interface components.

use crate::config::StratifyConfig;
use crate::constants::{DEFAULT_SUBSET_FIELD, DEFAULT_SUBSET_VALUE, SUBSET_OUTPUT_PREFIX};
use crate::processor::{StratificationProcessor, process_subset};

use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "taxonomy-stratifier")]
#[command(about = "Count metabolites per taxonomy level and write sorted YAML and TSV summaries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stratify a directory of per-metabolite XML records
    Stratify(StratifyArgs),
    /// Stratify one branch of a saved classification dump
    Subset(SubsetArgs),
}

#[derive(ClapArgs, Debug)]
pub struct StratifyArgs {
    /// Directory containing one XML record per metabolite
    #[arg(value_name = "INPUT_DIR")]
    pub input_path: PathBuf,

    /// Output directory (defaults to the parent of INPUT_DIR)
    #[arg(short, long = "output-dir")]
    pub output_path: Option<PathBuf>,

    /// Number of extraction workers (0 = one per CPU)
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Comma-separated taxonomy fields, in group rank order
    #[arg(short, long, value_delimiter = ',')]
    pub fields: Option<Vec<String>>,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prefix for output file names
    #[arg(long)]
    pub prefix: Option<String>,

    /// Also write the per-metabolite classifications as JSON
    #[arg(long)]
    pub save_classifications: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(ClapArgs, Debug)]
pub struct SubsetArgs {
    /// Classification dump written by `stratify --save-classifications`
    #[arg(value_name = "CLASSIFICATIONS_JSON")]
    pub classifications_path: PathBuf,

    /// Output directory (defaults to the dump's directory)
    #[arg(short, long = "output-dir")]
    pub output_path: Option<PathBuf>,

    /// Taxonomy field to select on
    #[arg(long, default_value = DEFAULT_SUBSET_FIELD)]
    pub field: String,

    /// Value the field must have
    #[arg(long, default_value = DEFAULT_SUBSET_VALUE)]
    pub value: String,

    /// YAML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Prefix for output file names
    #[arg(long, default_value = SUBSET_OUTPUT_PREFIX)]
    pub prefix: String,
}

impl StratifyArgs {
    /// Build the run configuration: file first, then flags
    pub fn to_config(&self) -> Result<StratifyConfig> {
        let mut config = load_config(self.config.as_deref())?;

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(fields) = &self.fields {
            config = config.with_fields(fields.iter().map(|f| f.trim().to_string()).collect());
        }
        if let Some(prefix) = &self.prefix {
            config = config.with_output_prefix(prefix.clone());
        }
        if self.save_classifications {
            config = config.with_save_classifications();
        }
        if self.no_progress {
            config = config.without_progress();
        }

        Ok(config)
    }
}

impl SubsetArgs {
    pub fn to_config(&self) -> Result<StratifyConfig> {
        Ok(load_config(self.config.as_deref())?.with_output_prefix(self.prefix.clone()))
    }

    /// Output directory, defaulting to the directory of the dump
    pub fn get_output_path(&self) -> PathBuf {
        match &self.output_path {
            Some(path) => path.clone(),
            None => self
                .classifications_path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."))
                .to_path_buf(),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<StratifyConfig> {
    match path {
        Some(path) => StratifyConfig::from_yaml_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(StratifyConfig::default()),
    }
}

/// Run the selected command
pub async fn run(args: Args) -> Result<()> {
    match args.command {
        Command::Stratify(stratify) => {
            let config = stratify.to_config()?;
            debug!("Stratify configuration: {:?}", config);

            let processor =
                StratificationProcessor::new(stratify.input_path.clone(), stratify.output_path.clone())
                    .context("Cannot stratify input directory")?
                    .with_config(config);
            processor.process().await.context("Stratification failed")?;
        }
        Command::Subset(subset) => {
            let config = subset.to_config()?;
            debug!("Subset configuration: {:?}", config);

            process_subset(
                &subset.classifications_path,
                &subset.get_output_path(),
                &subset.field,
                &subset.value,
                &config,
            )
            .await
            .context("Subset stratification failed")?;
        }
    }

    Ok(())
}

/// Set up structured logging
pub fn setup_logging(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("taxonomy_stratifier={}", log_level)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .init();

    debug!("Logging initialized at level: {}", log_level);
}
