//! YAML job manifests
//!
//! A job names the hub settings plus a `sample:` and/or `archive:` step:
//!
//! ```yaml
//! hub:
//!   revision: main
//! sample:
//!   dataset: trl-lib/ultrafeedback_binarized
//!   split: test
//!   count: 5
//!   output: data/ultrafeedback_binarized.json
//! archive:
//!   dataset: trl-lib/ultrafeedback_binarized
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::args::RunArgs;
use super::{DEFAULT_COUNT, DEFAULT_DATASET, DEFAULT_SAMPLE_OUTPUT, DEFAULT_SPLIT};
use crate::archiver::{default_output_dir, ArchiveOptions};
use crate::error::{IngestError, Result};
use crate::hub::{validate_dataset_id, DatasetRequest, DEFAULT_REVISION};
use crate::sampler::SampleOptions;

/// Complete job manifest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobSpec {
    /// Where datasets come from
    #[serde(default)]
    pub hub: HubSpec,

    /// Sampler step
    #[serde(default)]
    pub sample: Option<SampleSpec>,

    /// Archiver step
    #[serde(default)]
    pub archive: Option<ArchiveSpec>,
}

/// Provider selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HubSpec {
    /// Git revision (branch, tag, or commit)
    #[serde(default = "default_revision")]
    pub revision: String,

    /// HuggingFace cache directory
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// Checked-out repositories to read instead of the hub
    #[serde(default)]
    pub repo_root: Option<PathBuf>,
}

impl Default for HubSpec {
    fn default() -> Self {
        Self {
            revision: default_revision(),
            cache_dir: None,
            repo_root: None,
        }
    }
}

/// Sampler step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleSpec {
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// Configuration name
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default = "default_split")]
    pub split: String,

    /// Index of the last record written
    #[serde(default = "default_count")]
    pub count: usize,

    #[serde(default = "default_sample_output")]
    pub output: PathBuf,

    #[serde(default = "default_true")]
    pub create_parent_dirs: bool,
}

/// Archiver step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArchiveSpec {
    #[serde(default = "default_dataset")]
    pub dataset: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Defaults to `corpus/<dataset>`
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_revision() -> String {
    DEFAULT_REVISION.to_string()
}

fn default_dataset() -> String {
    DEFAULT_DATASET.to_string()
}

fn default_split() -> String {
    DEFAULT_SPLIT.to_string()
}

fn default_count() -> usize {
    DEFAULT_COUNT
}

fn default_sample_output() -> PathBuf {
    PathBuf::from(DEFAULT_SAMPLE_OUTPUT)
}

fn default_true() -> bool {
    true
}

impl HubSpec {
    fn request(&self, dataset_id: &str, config_name: Option<String>) -> DatasetRequest {
        DatasetRequest::new(dataset_id)
            .config_name(config_name)
            .revision(self.revision.clone())
    }
}

impl JobSpec {
    /// Sampler options for the `sample:` step, if any
    #[must_use]
    pub fn sample_options(&self) -> Option<SampleOptions> {
        self.sample.as_ref().map(|s| {
            SampleOptions::new(
                self.hub.request(&s.dataset, s.name.clone()),
                s.split.clone(),
                s.count,
                s.output.clone(),
            )
            .create_parent_dirs(s.create_parent_dirs)
        })
    }

    /// Archiver options for the `archive:` step, if any
    #[must_use]
    pub fn archive_options(&self) -> Option<ArchiveOptions> {
        self.archive.as_ref().map(|a| {
            ArchiveOptions::new(
                self.hub.request(&a.dataset, a.name.clone()),
                a.output_dir
                    .clone()
                    .unwrap_or_else(|| default_output_dir(&a.dataset)),
            )
        })
    }
}

/// Load and validate a job manifest
pub fn load_job<P: AsRef<Path>>(path: P) -> Result<JobSpec> {
    let path = path.as_ref();
    let yaml = fs::read_to_string(path).map_err(|e| IngestError::Config {
        message: format!("Failed to read job file {}: {e}", path.display()),
    })?;
    parse_job(&yaml)
}

/// Parse and validate a job manifest from YAML text
pub fn parse_job(yaml: &str) -> Result<JobSpec> {
    let job: JobSpec = serde_yaml::from_str(yaml).map_err(|e| IngestError::Config {
        message: format!("Failed to parse YAML job: {e}"),
    })?;
    validate_job(&job)?;
    Ok(job)
}

/// Check a job before anything is fetched
pub fn validate_job(job: &JobSpec) -> Result<()> {
    let invalid = |message: String| IngestError::Config {
        message: format!("Invalid job: {message}"),
    };

    if job.sample.is_none() && job.archive.is_none() {
        return Err(invalid(
            "nothing to do → add a `sample:` or `archive:` section".into(),
        ));
    }
    if job.hub.revision.trim().is_empty() {
        return Err(invalid("hub.revision must not be empty".into()));
    }
    if let Some(sample) = &job.sample {
        validate_dataset_id(&sample.dataset)
            .map_err(|e| invalid(format!("sample.dataset: {e}")))?;
        if sample.split.trim().is_empty() {
            return Err(invalid("sample.split must not be empty".into()));
        }
        if sample.output.as_os_str().is_empty() {
            return Err(invalid("sample.output must not be empty".into()));
        }
    }
    if let Some(archive) = &job.archive {
        validate_dataset_id(&archive.dataset)
            .map_err(|e| invalid(format!("archive.dataset: {e}")))?;
    }
    Ok(())
}

/// Apply command-line overrides to a job
pub fn apply_overrides(job: &mut JobSpec, args: &RunArgs) {
    if let Some(sample) = job.sample.as_mut() {
        if let Some(count) = args.count {
            sample.count = count;
        }
        if let Some(output) = &args.sample_output {
            sample.output = output.clone();
        }
    }
    if let Some(archive) = job.archive.as_mut() {
        if let Some(output_dir) = &args.output_dir {
            archive.output_dir = Some(output_dir.clone());
        }
    }
}
