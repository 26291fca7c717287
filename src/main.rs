//! Ingesta CLI
//!
//! # Usage
//!
//! ```bash
//! # Write records 0..=5 of the test split to data/ultrafeedback_binarized.json
//! ingesta sample
//!
//! # Sample another dataset and split
//! ingesta sample --dataset HuggingFaceH4/ultrafeedback_binarized --split test_prefs --count 10
//!
//! # Save every split to corpus/trl-lib/ultrafeedback_binarized
//! ingesta archive --log-file archive.log
//!
//! # Run the steps of a job file
//! ingesta run job.yaml
//!
//! # Show a saved dataset
//! ingesta info corpus/trl-lib/ultrafeedback_binarized --verify
//! ```

use clap::Parser;
use ingesta::cli::{run_command, Cli};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run_command(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
