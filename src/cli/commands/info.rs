//! Info command implementation

use super::describe;
use crate::cli::Logger;
use crate::config::{InfoArgs, OutputFormat};
use crate::dataset::{verify_archive, DatasetDict};

pub fn run_info(args: &InfoArgs, logger: &mut Logger) -> Result<(), String> {
    let dataset = DatasetDict::load_from_disk(&args.dir).map_err(describe)?;

    if args.verify {
        let checked = verify_archive(&args.dir).map_err(describe)?;
        logger.info(&format!("✓ {checked} shards verified"));
    }

    match args.format {
        OutputFormat::Text => {
            logger.info("Archive Info:");
            println!();
            println!("Dataset: {}", dataset.dataset_id());
            if let Some(config) = dataset.config_name() {
                println!("Config: {config}");
            }
            if let Some(revision) = dataset.revision() {
                println!("Revision: {revision}");
            }
            println!("{dataset}");
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&dataset.summary())
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&dataset.summary())
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
