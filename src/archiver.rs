//! Archiver: every split of a dataset, saved to a directory
//!
//! The directory re-loads with [`DatasetDict::load_from_disk`].

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::DatasetDict;
use crate::error::{IngestError, Result};
use crate::hub::{DatasetProvider, DatasetRequest};

/// Root of the default archive location
pub const DEFAULT_ARCHIVE_ROOT: &str = "corpus";

/// Default output directory for a dataset: `corpus/<dataset_id>`
#[must_use]
pub fn default_output_dir(dataset_id: &str) -> PathBuf {
    Path::new(DEFAULT_ARCHIVE_ROOT).join(dataset_id)
}

/// Archiver options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveOptions {
    /// Dataset to fetch
    pub request: DatasetRequest,
    /// Directory to save into; created with missing parents
    pub output_dir: PathBuf,
}

impl ArchiveOptions {
    /// Create options
    #[must_use]
    pub fn new(request: DatasetRequest, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            request,
            output_dir: output_dir.into(),
        }
    }
}

/// Outcome of an archive run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    /// Directory written
    pub output_dir: PathBuf,
    /// Record count per split
    pub num_rows: BTreeMap<String, usize>,
    /// Printable summary of the fetched dataset
    pub summary: String,
}

/// Fetch every split and save them under `options.output_dir`
///
/// # Errors
///
/// Provider resolution errors and `Io` when the directory cannot be created
/// or written. Nothing is rolled back on failure.
pub fn archive<P: DatasetProvider + ?Sized>(
    provider: &P,
    options: &ArchiveOptions,
) -> Result<ArchiveReport> {
    let dataset = provider.load(&options.request)?;

    fs::create_dir_all(&options.output_dir)
        .map_err(|e| IngestError::io(&options.output_dir, e))?;
    dataset.save_to_disk(&options.output_dir)?;

    Ok(ArchiveReport {
        output_dir: options.output_dir.clone(),
        num_rows: dataset.num_rows(),
        summary: dataset.to_string(),
    })
}
