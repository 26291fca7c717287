//! Dataset providers
//!
//! A provider resolves `(dataset_id, config_name, revision)` to a
//! [`DatasetDict`] whose splits are backed by local parquet shards.
//!
//! - [`HfDatasetFetcher`] downloads shards from the HuggingFace Hub
//! - [`LocalRepoProvider`] reads a checked-out dataset repository
//!
//! # Example
//!
//! ```ignore
//! use ingesta::hub::{DatasetProvider, DatasetRequest, HfDatasetFetcher};
//!
//! let fetcher = HfDatasetFetcher::new()?;
//! let dataset = fetcher.load(&DatasetRequest::new("trl-lib/ultrafeedback_binarized"))?;
//! println!("{dataset}");
//! ```

mod fetcher;
pub mod layout;
mod local;

use std::path::PathBuf;

use crate::dataset::{DatasetDict, Split};
use crate::error::{IngestError, Result};

pub use fetcher::HfDatasetFetcher;
pub use layout::{resolve_layout, SplitFiles, DEFAULT_CONFIG, PARQUET_EXTENSION};
pub use local::LocalRepoProvider;

/// Revision used when none is given
pub const DEFAULT_REVISION: &str = "main";

/// What to fetch from a provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetRequest {
    /// Dataset ID (`name` or `org/name`)
    pub dataset_id: String,
    /// Configuration (subset) name; `None` selects the default
    pub config_name: Option<String>,
    /// Git revision (branch, tag, or commit)
    pub revision: String,
}

impl DatasetRequest {
    /// Request the default configuration at `main`
    #[must_use]
    pub fn new(dataset_id: impl Into<String>) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            config_name: None,
            revision: DEFAULT_REVISION.into(),
        }
    }

    /// Set configuration name
    #[must_use]
    pub fn config_name(mut self, name: Option<String>) -> Self {
        self.config_name = name;
        self
    }

    /// Set revision
    #[must_use]
    pub fn revision(mut self, rev: impl Into<String>) -> Self {
        self.revision = rev.into();
        self
    }
}

/// Source of dataset handles
pub trait DatasetProvider {
    /// Fetch every split of the requested dataset
    fn load(&self, request: &DatasetRequest) -> Result<DatasetDict>;

    /// Fetch a single split
    ///
    /// Implementations override this to avoid fetching the other splits.
    fn load_split(&self, request: &DatasetRequest, split: &str) -> Result<Split> {
        self.load(request)?.into_split(split)
    }
}

impl<P: DatasetProvider + ?Sized> DatasetProvider for Box<P> {
    fn load(&self, request: &DatasetRequest) -> Result<DatasetDict> {
        (**self).load(request)
    }

    fn load_split(&self, request: &DatasetRequest, split: &str) -> Result<Split> {
        (**self).load_split(request, split)
    }
}

/// Validate a dataset ID (`name` or `org/name`)
pub fn validate_dataset_id(dataset_id: &str) -> Result<()> {
    let parts: Vec<&str> = dataset_id.split('/').collect();
    let valid = parts.len() <= 2
        && parts
            .iter()
            .all(|p| !p.is_empty() && !p.chars().any(char::is_whitespace) && *p != "..");
    if valid {
        Ok(())
    } else {
        Err(IngestError::InvalidDatasetId {
            dataset_id: dataset_id.to_string(),
        })
    }
}

/// Build splits from a resolved layout, fetching each shard through `fetch`
pub(crate) fn materialize_splits<F>(layout: SplitFiles, mut fetch: F) -> Result<Vec<Split>>
where
    F: FnMut(&str) -> Result<PathBuf>,
{
    layout
        .into_iter()
        .map(|(name, files)| {
            let paths = files.iter().map(|f| fetch(f)).collect::<Result<Vec<_>>>()?;
            Split::from_shards(name, paths)
        })
        .collect()
}
