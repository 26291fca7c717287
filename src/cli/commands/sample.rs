//! Sample command implementation

use super::{build_provider, describe};
use crate::cli::Logger;
use crate::config::{HubSpec, SampleArgs};
use crate::hub::DatasetProvider;
use crate::sampler::{sample, SampleOptions, SampleReport};

pub fn run_sample(args: &SampleArgs, logger: &mut Logger) -> Result<(), String> {
    let provider = build_provider(&HubSpec::from(&args.hub), logger.level())?;
    execute_sample(&*provider, &args.to_options(), logger).map(|_| ())
}

pub(super) fn execute_sample<P: DatasetProvider + ?Sized>(
    provider: &P,
    options: &SampleOptions,
    logger: &mut Logger,
) -> Result<SampleReport, String> {
    let request = &options.request;
    logger.verbose(&format!(
        "Sampling {} split '{}' at {}",
        request.dataset_id, options.split, request.revision
    ));

    let report = sample(provider, options).map_err(describe)?;

    logger.info(&format!("len(split) = {}", report.split_len));
    for (i, fields) in report.fields.iter().enumerate() {
        logger.verbose(&format!("  record {i}: {{{}}}", fields.join(", ")));
    }
    logger.info(&format!(
        "✓ Wrote {} records to {}",
        report.written,
        report.output.display()
    ));
    Ok(report)
}
