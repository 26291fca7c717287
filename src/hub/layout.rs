//! Data-file layout resolution
//!
//! Maps the parquet files of a dataset repository onto configurations and
//! splits. Recognised layouts:
//!
//! - `data/train-00000-of-00001.parquet` (default config, split from file stem)
//! - `<config>/test-00000-of-00002.parquet` (named config)
//! - `data/<subdir>/test-00000-of-00001.parquet` (split still from file stem)
//! - `<config>/<split>/0000.parquet` (parquet-conversion branch)
//! - `train.parquet` at the repository root

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{IngestError, Result};

/// Extension of the data files this tool reads
pub const PARQUET_EXTENSION: &str = ".parquet";

/// Name of the configuration used when none is given
pub const DEFAULT_CONFIG: &str = "default";

/// Split used for data files that carry no split name
const UNNAMED_SPLIT: &str = "train";

/// Split name -> repository-relative shard paths, in shard order
pub type SplitFiles = BTreeMap<String, Vec<String>>;

/// Location of one parquet file within the repository layout
#[derive(Debug, Clone, PartialEq, Eq)]
struct DataFile<'a> {
    config: &'a str,
    split: String,
    path: &'a str,
}

fn parse_data_file(path: &str) -> Option<DataFile<'_>> {
    if !path.ends_with(PARQUET_EXTENSION) {
        return None;
    }
    let parts: Vec<&str> = path.split('/').collect();
    let (config, rest) = match parts.as_slice() {
        [file] => (DEFAULT_CONFIG, vec![*file]),
        [first, rest @ ..] if *first == "data" || *first == DEFAULT_CONFIG => {
            (DEFAULT_CONFIG, rest.to_vec())
        }
        [first, rest @ ..] => (*first, rest.to_vec()),
        [] => return None,
    };
    if config.starts_with('.') {
        return None;
    }

    let file_name = rest.last()?;
    let split = match split_from_file_name(file_name) {
        Some(name) => name.to_string(),
        None if rest.len() >= 2 => rest[rest.len() - 2].to_string(),
        None => UNNAMED_SPLIT.to_string(),
    };
    if split.is_empty() || split.starts_with("partial-") {
        return None;
    }

    Some(DataFile { config, split, path })
}

/// Split name from `train-00000-of-00001.parquet` or `test.parquet`
///
/// Split names may contain dots (`train.clean.100`), so only `-` ends the
/// name. `None` for purely numeric shard names such as `0000.parquet`.
fn split_from_file_name(file_name: &str) -> Option<&str> {
    let stem = file_name.strip_suffix(PARQUET_EXTENSION).unwrap_or(file_name);
    let name = stem.split('-').next().unwrap_or(stem);
    if name.chars().all(|c| c.is_ascii_digit()) {
        None
    } else {
        Some(name)
    }
}

/// Configurations present in a repository file listing
#[must_use]
pub fn available_configs<S: AsRef<str>>(files: &[S]) -> Vec<String> {
    files
        .iter()
        .filter_map(|f| parse_data_file(f.as_ref()))
        .map(|f| f.config.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Resolve the split layout of one configuration
///
/// With no config name the default configuration is used; a repository that
/// has a single named configuration and no default one resolves to that
/// configuration.
///
/// # Errors
///
/// `UnsupportedLayout` when the listing has no parquet data files,
/// `ConfigNotFound` when the requested configuration has none.
pub fn resolve_layout<S: AsRef<str>>(
    dataset_id: &str,
    files: &[S],
    config_name: Option<&str>,
) -> Result<SplitFiles> {
    let data_files: Vec<DataFile<'_>> =
        files.iter().filter_map(|f| parse_data_file(f.as_ref())).collect();
    if data_files.is_empty() {
        return Err(IngestError::UnsupportedLayout {
            dataset_id: dataset_id.to_string(),
            message: "no parquet data files in repository".into(),
        });
    }

    let available = available_configs(files);
    let wanted = match config_name {
        Some(name) => name,
        None if available.len() == 1 => available[0].as_str(),
        None => DEFAULT_CONFIG,
    };

    let mut layout = SplitFiles::new();
    for file in data_files.iter().filter(|f| f.config == wanted) {
        layout.entry(file.split.clone()).or_default().push(file.path.to_string());
    }
    if layout.is_empty() {
        return Err(IngestError::ConfigNotFound {
            dataset_id: dataset_id.to_string(),
            config_name: wanted.to_string(),
            available,
        });
    }
    for shards in layout.values_mut() {
        shards.sort();
    }
    Ok(layout)
}

/// Remove one split's shard list from a resolved layout
///
/// # Errors
///
/// `SplitNotFound` listing the splits that do exist.
pub fn take_split(layout: &mut SplitFiles, split: &str) -> Result<Vec<String>> {
    layout.remove(split).ok_or_else(|| IngestError::SplitNotFound {
        split: split.to_string(),
        available: layout.keys().cloned().collect(),
    })
}
