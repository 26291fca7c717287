//! CLI module for ingesta
//!
//! This module contains the command handlers and logging utilities.

mod commands;
mod logging;

pub use commands::{build_provider, run_command};
pub use logging::{LogLevel, Logger};

// Re-export Cli from config for convenience
pub use crate::config::Cli;
