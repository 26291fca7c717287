//! Command-line arguments

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use super::job::HubSpec;
use super::{DEFAULT_COUNT, DEFAULT_DATASET, DEFAULT_SAMPLE_OUTPUT, DEFAULT_SPLIT};
use crate::archiver::{default_output_dir, ArchiveOptions};
use crate::hub::{DatasetRequest, DEFAULT_REVISION};
use crate::sampler::SampleOptions;

/// Ingesta: sample or archive HuggingFace Hub datasets
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "ingesta")]
#[command(version)]
#[command(about = "Sample a dataset split to JSON or archive every split to disk")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Also write every log line to this file (truncated first)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Write the first records of one split to a JSON file
    Sample(SampleArgs),

    /// Save every split of a dataset to a directory
    Archive(ArchiveArgs),

    /// Run the sample and/or archive steps of a YAML job file
    Run(RunArgs),

    /// Show a saved dataset directory
    Info(InfoArgs),
}

/// Where datasets come from
#[derive(Args, Debug, Clone, PartialEq)]
pub struct HubArgs {
    /// Git revision (branch, tag, or commit)
    #[arg(long, default_value = DEFAULT_REVISION)]
    pub revision: String,

    /// HuggingFace cache directory
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Read checked-out dataset repositories under DIR instead of the hub
    #[arg(long, value_name = "DIR")]
    pub repo_root: Option<PathBuf>,
}

impl HubArgs {
    /// Build a request for `dataset_id`
    #[must_use]
    pub fn request(&self, dataset_id: &str, config_name: Option<String>) -> DatasetRequest {
        DatasetRequest::new(dataset_id)
            .config_name(config_name)
            .revision(self.revision.clone())
    }
}

impl From<&HubArgs> for HubSpec {
    fn from(args: &HubArgs) -> Self {
        Self {
            revision: args.revision.clone(),
            cache_dir: args.cache_dir.clone(),
            repo_root: args.repo_root.clone(),
        }
    }
}

/// Arguments for the sample command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct SampleArgs {
    /// Dataset ID
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Dataset configuration (subset) name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Split to sample
    #[arg(short, long, default_value = DEFAULT_SPLIT)]
    pub split: String,

    /// Index of the last record to write (COUNT + 1 records)
    #[arg(short, long, default_value_t = DEFAULT_COUNT)]
    pub count: usize,

    /// Output JSON file
    #[arg(short, long, default_value = DEFAULT_SAMPLE_OUTPUT)]
    pub output: PathBuf,

    /// Fail instead of creating missing parent directories of the output
    #[arg(long)]
    pub no_create_dirs: bool,

    #[command(flatten)]
    pub hub: HubArgs,
}

impl SampleArgs {
    /// Sampler options for these arguments
    #[must_use]
    pub fn to_options(&self) -> SampleOptions {
        SampleOptions::new(
            self.hub.request(&self.dataset, self.name.clone()),
            self.split.clone(),
            self.count,
            self.output.clone(),
        )
        .create_parent_dirs(!self.no_create_dirs)
    }
}

/// Arguments for the archive command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ArchiveArgs {
    /// Dataset ID
    #[arg(short, long, default_value = DEFAULT_DATASET)]
    pub dataset: String,

    /// Dataset configuration (subset) name
    #[arg(short, long)]
    pub name: Option<String>,

    /// Output directory [default: corpus/<DATASET>]
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    #[command(flatten)]
    pub hub: HubArgs,
}

impl ArchiveArgs {
    /// Archiver options for these arguments
    #[must_use]
    pub fn to_options(&self) -> ArchiveOptions {
        ArchiveOptions::new(
            self.hub.request(&self.dataset, self.name.clone()),
            self.output_dir
                .clone()
                .unwrap_or_else(|| default_output_dir(&self.dataset)),
        )
    }
}

/// Arguments for the run command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct RunArgs {
    /// Path to YAML job file
    #[arg(value_name = "JOB")]
    pub job: PathBuf,

    /// Override the archive output directory
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Override the sample output file
    #[arg(long)]
    pub sample_output: Option<PathBuf>,

    /// Override the sample count
    #[arg(long)]
    pub count: Option<usize>,

    /// Validate the job file without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for the info command
#[derive(Args, Debug, Clone, PartialEq)]
pub struct InfoArgs {
    /// Saved dataset directory
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Output format (text, json, yaml)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Recompute shard checksums
    #[arg(long)]
    pub verify: bool,
}

/// Output format for info
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Parse CLI arguments from a string slice (for testing)
pub fn parse_args<I, T>(args: I) -> Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::try_parse_from(args)
}
