//! Archive command implementation

use super::{build_provider, describe};
use crate::archiver::{archive, ArchiveOptions, ArchiveReport};
use crate::cli::Logger;
use crate::config::{ArchiveArgs, HubSpec};
use crate::hub::{DatasetProvider, DEFAULT_CONFIG};

pub fn run_archive(args: &ArchiveArgs, logger: &mut Logger) -> Result<(), String> {
    let provider = build_provider(&HubSpec::from(&args.hub), logger.level())?;
    execute_archive(&*provider, &args.to_options(), logger).map(|_| ())
}

pub(super) fn execute_archive<P: DatasetProvider + ?Sized>(
    provider: &P,
    options: &ArchiveOptions,
    logger: &mut Logger,
) -> Result<ArchiveReport, String> {
    let request = &options.request;
    logger.verbose(&format!(
        "Archiving {} ({}) at {}",
        request.dataset_id,
        request.config_name.as_deref().unwrap_or(DEFAULT_CONFIG),
        request.revision
    ));

    let report = archive(provider, options).map_err(describe)?;

    logger.info(&report.summary);
    for (split, rows) in &report.num_rows {
        logger.verbose(&format!("  {split}: {rows} rows"));
    }
    logger.info(&format!("✓ Saved to {}", report.output_dir.display()));
    Ok(report)
}
