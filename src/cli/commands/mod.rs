//! CLI command implementations

mod archive;
mod info;
mod run;
mod sample;

#[cfg(test)]
mod tests;

use crate::cli::{LogLevel, Logger};
use crate::config::{Cli, Command, HubSpec};
use crate::error::IngestError;
use crate::hub::{DatasetProvider, HfDatasetFetcher, LocalRepoProvider};

/// Execute a CLI command based on the parsed arguments
pub fn run_command(cli: Cli) -> Result<(), String> {
    let level = LogLevel::from_flags(cli.quiet, cli.verbose);
    let mut logger = match &cli.log_file {
        Some(path) => Logger::with_file(level, path)?,
        None => Logger::new(level),
    };

    let result = match cli.command {
        Command::Sample(args) => sample::run_sample(&args, &mut logger),
        Command::Archive(args) => archive::run_archive(&args, &mut logger),
        Command::Run(args) => run::run_job(&args, &mut logger),
        Command::Info(args) => info::run_info(&args, &mut logger),
    };

    if let Err(e) = &result {
        logger.error(e);
    }
    logger.flush()?;
    result
}

/// Select the provider named by the hub settings
///
/// `repo_root` switches to checked-out repositories; otherwise the hub is
/// used, with progress bars unless quiet.
pub fn build_provider(hub: &HubSpec, level: LogLevel) -> Result<Box<dyn DatasetProvider>, String> {
    if let Some(root) = &hub.repo_root {
        return Ok(Box::new(LocalRepoProvider::new(root)));
    }

    let mut fetcher = HfDatasetFetcher::new()
        .map_err(describe)?
        .progress(level != LogLevel::Quiet);
    if let Some(dir) = &hub.cache_dir {
        fetcher = fetcher.cache_dir(dir);
    }
    Ok(Box::new(fetcher))
}

/// Render an error with its code for the console
fn describe(e: IngestError) -> String {
    format!("{e} [{}]", e.code())
}
