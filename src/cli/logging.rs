//! Logging utilities for CLI output
//!
//! Console output is gated by [`LogLevel`]. A [`Logger`] can additionally
//! tee every message, whatever the console level, into a log file.

use chrono::Local;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Log level for CLI output
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Suppress all output
    Quiet,
    /// Normal output level
    Normal,
    /// Verbose output with additional details
    Verbose,
}

impl LogLevel {
    /// Level selected by the `--quiet` / `--verbose` flags; quiet wins
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Quiet => "QUIET",
            Self::Normal => "INFO",
            Self::Verbose => "DEBUG",
        }
    }
}

/// Log a message if the current level permits it
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

/// Leveled console logger with an optional log file
pub struct Logger {
    level: LogLevel,
    file: Option<BufWriter<File>>,
}

impl Logger {
    /// Console-only logger
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self { level, file: None }
    }

    /// Logger that also writes to `path`, truncating it first
    pub fn with_file(level: LogLevel, path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create log directory {}: {e}", parent.display()))?;
        }
        let file = File::create(path)
            .map_err(|e| format!("Failed to open log file {}: {e}", path.display()))?;
        Ok(Self {
            level,
            file: Some(BufWriter::new(file)),
        })
    }

    /// Console level
    #[must_use]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Log at `required` level
    pub fn log(&mut self, required: LogLevel, msg: &str) {
        log(self.level, required, msg);
        self.write_line(required.label(), msg);
    }

    /// Append a timestamped line to the log file; a failed write disables it
    fn write_line(&mut self, label: &str, msg: &str) {
        if let Some(file) = self.file.as_mut() {
            let stamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
            if let Err(e) = writeln!(file, "{stamp} | {label:<5} | {msg}") {
                eprintln!("Warning: log file disabled: {e}");
                self.file = None;
            }
        }
    }

    /// Log at normal level
    pub fn info(&mut self, msg: &str) {
        self.log(LogLevel::Normal, msg);
    }

    /// Log at verbose level
    pub fn verbose(&mut self, msg: &str) {
        self.log(LogLevel::Verbose, msg);
    }

    /// Record a failure in the log file only; `main` reports it on stderr
    pub fn error(&mut self, msg: &str) {
        self.write_line("ERROR", msg);
    }

    /// Flush the log file, if any
    pub fn flush(&mut self) -> Result<(), String> {
        match self.file.as_mut() {
            Some(file) => file.flush().map_err(|e| format!("Failed to flush log file: {e}")),
            None => Ok(()),
        }
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Some(file) = self.file.as_mut() {
            if let Err(e) = file.flush() {
                eprintln!("Warning: failed to flush log file: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(LogLevel::from_flags(false, false), LogLevel::Normal);
        assert_eq!(LogLevel::from_flags(false, true), LogLevel::Verbose);
        assert_eq!(LogLevel::from_flags(true, true), LogLevel::Quiet);
    }

    #[test]
    fn test_file_receives_all_levels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/run.log");

        let mut logger = Logger::with_file(LogLevel::Quiet, &path).unwrap();
        logger.info("len(split) = 6");
        logger.verbose("record 0: prompt, chosen");
        logger.flush().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("| INFO  | len(split) = 6"));
        assert!(lines[1].contains("| DEBUG | record 0"));
    }

    #[test]
    fn test_file_is_truncated() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "stale\n").unwrap();

        let mut logger = Logger::with_file(LogLevel::Normal, &path).unwrap();
        logger.info("fresh");
        drop(logger);

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("stale"));
        assert!(text.contains("fresh"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_write_disables_log_file() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let mut logger = Logger::with_file(LogLevel::Quiet, full).unwrap();
        logger.error(&"x".repeat(64 * 1024));
        assert!(logger.file.is_none());
        assert!(logger.flush().is_ok());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_flush_is_reported() {
        let full = Path::new("/dev/full");
        if !full.exists() {
            return;
        }
        let mut logger = Logger::with_file(LogLevel::Quiet, full).unwrap();
        logger.info("buffered");
        assert!(logger.flush().is_err());
    }

    #[test]
    fn test_unopenable_log_file() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, b"x").unwrap();
        assert!(Logger::with_file(LogLevel::Normal, &blocker.join("run.log")).is_err());
    }
}
