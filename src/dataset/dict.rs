//! Dataset handle: named splits of one dataset configuration

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::split::Split;
use crate::error::{IngestError, Result};

/// Dataset handle returned by a provider
#[derive(Debug, Clone)]
pub struct DatasetDict {
    dataset_id: String,
    config_name: Option<String>,
    revision: Option<String>,
    splits: BTreeMap<String, Split>,
}

impl DatasetDict {
    /// Create a handle from its splits
    #[must_use]
    pub fn new(
        dataset_id: impl Into<String>,
        config_name: Option<String>,
        revision: Option<String>,
        splits: Vec<Split>,
    ) -> Self {
        Self {
            dataset_id: dataset_id.into(),
            config_name,
            revision,
            splits: splits.into_iter().map(|s| (s.name().to_string(), s)).collect(),
        }
    }

    /// Dataset ID
    #[must_use]
    pub fn dataset_id(&self) -> &str {
        &self.dataset_id
    }

    /// Configuration name, if one was requested
    #[must_use]
    pub fn config_name(&self) -> Option<&str> {
        self.config_name.as_deref()
    }

    /// Commit the data was fetched at, when the provider knows it
    #[must_use]
    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    /// Number of splits
    #[must_use]
    pub fn len(&self) -> usize {
        self.splits.len()
    }

    /// Check if there are no splits
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.splits.is_empty()
    }

    /// Split names, sorted
    #[must_use]
    pub fn split_names(&self) -> Vec<String> {
        self.splits.keys().cloned().collect()
    }

    /// Iterate splits in name order
    pub fn splits(&self) -> impl Iterator<Item = &Split> {
        self.splits.values()
    }

    /// Look up a split by name
    pub fn split(&self, name: &str) -> Result<&Split> {
        self.splits.get(name).ok_or_else(|| self.split_not_found(name))
    }

    /// Take a split by name, dropping the others
    pub fn into_split(mut self, name: &str) -> Result<Split> {
        match self.splits.remove(name) {
            Some(split) => Ok(split),
            None => Err(self.split_not_found(name)),
        }
    }

    fn split_not_found(&self, name: &str) -> IngestError {
        IngestError::SplitNotFound {
            split: name.to_string(),
            available: self.split_names(),
        }
    }

    /// Record count per split
    #[must_use]
    pub fn num_rows(&self) -> BTreeMap<String, usize> {
        self.splits.iter().map(|(name, s)| (name.clone(), s.len())).collect()
    }

    /// Serializable summary of the handle
    #[must_use]
    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary {
            dataset_id: self.dataset_id.clone(),
            config_name: self.config_name.clone(),
            revision: self.revision.clone(),
            splits: self
                .splits
                .values()
                .map(|s| SplitSummary {
                    name: s.name().to_string(),
                    num_rows: s.len(),
                    num_shards: s.shards().len(),
                    features: s.features().to_vec(),
                })
                .collect(),
        }
    }
}

/// Summary of a dataset handle for display and structured output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    /// Dataset ID (`name` or `org/name`)
    pub dataset_id: String,
    /// Configuration name, if one was requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_name: Option<String>,
    /// Resolved revision (commit sha when known)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// Splits in name order
    pub splits: Vec<SplitSummary>,
}

/// Summary of one split
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitSummary {
    /// Split name
    pub name: String,
    /// Number of records
    pub num_rows: usize,
    /// Number of parquet shard files
    pub num_shards: usize,
    /// Field names in schema order
    pub features: Vec<String>,
}

impl fmt::Display for DatasetDict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "DatasetDict({{")?;
        for split in self.splits.values() {
            let features: Vec<String> = split.features().iter().map(|n| format!("'{n}'")).collect();
            writeln!(f, "    {}: Dataset({{", split.name())?;
            writeln!(f, "        features: [{}],", features.join(", "))?;
            writeln!(f, "        num_rows: {}", split.len())?;
            writeln!(f, "    }})")?;
        }
        write!(f, "}})")
    }
}
