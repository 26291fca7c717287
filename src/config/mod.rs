//! Command-line and job-file configuration

mod args;
mod job;

pub use args::{
    parse_args, ArchiveArgs, Cli, Command, HubArgs, InfoArgs, OutputFormat, RunArgs, SampleArgs,
};
pub use job::{
    apply_overrides, load_job, parse_job, validate_job, ArchiveSpec, HubSpec, JobSpec, SampleSpec,
};

/// Dataset used when none is given
pub const DEFAULT_DATASET: &str = "trl-lib/ultrafeedback_binarized";

/// Split sampled when none is given
pub const DEFAULT_SPLIT: &str = "test";

/// Default sample count (index of the last record written)
pub const DEFAULT_COUNT: usize = 5;

/// Default sampler output file
pub const DEFAULT_SAMPLE_OUTPUT: &str = "data/ultrafeedback_binarized.json";
