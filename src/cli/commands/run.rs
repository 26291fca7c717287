//! Run command implementation

use super::archive::execute_archive;
use super::sample::execute_sample;
use super::{build_provider, describe};
use crate::cli::Logger;
use crate::config::{apply_overrides, load_job, validate_job, RunArgs};

pub fn run_job(args: &RunArgs, logger: &mut Logger) -> Result<(), String> {
    logger.verbose(&format!("Loading job: {}", args.job.display()));

    let mut job = load_job(&args.job).map_err(describe)?;
    apply_overrides(&mut job, args);
    validate_job(&job).map_err(describe)?;

    let sample = job.sample_options();
    let archive = job.archive_options();

    if args.dry_run {
        logger.info("✓ Job is valid");
        if let Some(options) = &sample {
            logger.info(&format!(
                "  sample: {} [{}] → {}",
                options.request.dataset_id,
                options.split,
                options.output.display()
            ));
        }
        if let Some(options) = &archive {
            logger.info(&format!(
                "  archive: {} → {}",
                options.request.dataset_id,
                options.output_dir.display()
            ));
        }
        return Ok(());
    }

    let provider = build_provider(&job.hub, logger.level())?;
    if let Some(options) = &sample {
        execute_sample(&*provider, options, logger)?;
    }
    if let Some(options) = &archive {
        execute_archive(&*provider, options, logger)?;
    }
    Ok(())
}
