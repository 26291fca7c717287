//! On-disk dataset format
//!
//! ```text
//! <dir>/
//!   dataset_dict.json          split list + provenance
//!   <split>/
//!     state.json               row count, features, shard list with SHA-256
//!     data-00000-of-00001.parquet
//! ```
//!
//! Shards are copied byte-for-byte from the provider, so a saved dataset
//! re-loads with exactly the records it was fetched with.

use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::dict::DatasetDict;
use super::split::Split;
use crate::error::{IngestError, Result};

/// Top-level manifest file name
pub const DATASET_DICT_FILE: &str = "dataset_dict.json";

/// Per-split manifest file name
pub const STATE_FILE: &str = "state.json";

/// `dataset_dict.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DictManifest {
    splits: Vec<String>,
    dataset_id: String,
    #[serde(default)]
    config_name: Option<String>,
    #[serde(default)]
    revision: Option<String>,
}

/// `<split>/state.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct SplitState {
    num_rows: usize,
    features: Vec<String>,
    data_files: Vec<DataFileEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct DataFileEntry {
    filename: String,
    num_rows: usize,
    sha256: String,
}

/// Shard file name inside a saved split
fn shard_file_name(index: usize, total: usize) -> String {
    format!("data-{index:05}-of-{total:05}.parquet")
}

/// Hex SHA-256 of a file
pub(crate) fn sha256_file(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    let mut reader = BufReader::new(file);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = reader.read(&mut buf).map_err(|e| IngestError::io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    fs::write(path, json).map_err(|e| IngestError::io(path, e))
}

fn read_json<T: DeserializeOwned>(dir: &Path, path: &Path) -> Result<T> {
    if !path.is_file() {
        return Err(IngestError::InvalidArchive {
            path: dir.to_path_buf(),
            message: format!("missing {}", path.display()),
        });
    }
    let bytes = fs::read(path).map_err(|e| IngestError::io(path, e))?;
    serde_json::from_slice(&bytes).map_err(|e| IngestError::InvalidArchive {
        path: dir.to_path_buf(),
        message: format!("unreadable {}: {e}", path.display()),
    })
}

/// Whether `a` and `b` name the same existing file
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

impl DatasetDict {
    /// Save every split under `dir`, creating it and any missing parents
    ///
    /// A failure part-way leaves whatever was already written.
    pub fn save_to_disk(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| IngestError::io(dir, e))?;

        for split in self.splits() {
            save_split(split, &dir.join(split.name()))?;
        }

        write_json(
            &dir.join(DATASET_DICT_FILE),
            &DictManifest {
                splits: self.split_names(),
                dataset_id: self.dataset_id().to_string(),
                config_name: self.config_name().map(str::to_string),
                revision: self.revision().map(str::to_string),
            },
        )
    }

    /// Load a dataset saved with [`DatasetDict::save_to_disk`]
    ///
    /// # Errors
    ///
    /// `InvalidArchive` when a manifest is missing or a shard's row count
    /// disagrees with the one recorded at save time.
    pub fn load_from_disk(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let manifest: DictManifest = read_json(dir, &dir.join(DATASET_DICT_FILE))?;

        let mut splits = Vec::with_capacity(manifest.splits.len());
        for name in &manifest.splits {
            let split_dir = dir.join(name);
            let state: SplitState = read_json(dir, &split_dir.join(STATE_FILE))?;
            let paths: Vec<PathBuf> =
                state.data_files.iter().map(|f| split_dir.join(&f.filename)).collect();
            let split = Split::from_shards(name.clone(), paths)?;
            if split.len() != state.num_rows {
                return Err(IngestError::InvalidArchive {
                    path: dir.to_path_buf(),
                    message: format!(
                        "split '{name}' has {} rows, state.json records {}",
                        split.len(),
                        state.num_rows
                    ),
                });
            }
            splits.push(split);
        }

        Ok(Self::new(manifest.dataset_id, manifest.config_name, manifest.revision, splits))
    }
}

fn save_split(split: &Split, split_dir: &Path) -> Result<()> {
    fs::create_dir_all(split_dir).map_err(|e| IngestError::io(split_dir, e))?;

    let total = split.shards().len();
    let mut data_files = Vec::with_capacity(total);
    for (index, shard) in split.shards().iter().enumerate() {
        let filename = shard_file_name(index, total);
        let dest = split_dir.join(&filename);
        if !same_file(&shard.path, &dest) {
            fs::copy(&shard.path, &dest).map_err(|e| IngestError::io(&dest, e))?;
        }
        data_files.push(DataFileEntry {
            filename,
            num_rows: shard.num_rows,
            sha256: sha256_file(&dest)?,
        });
    }

    write_json(
        &split_dir.join(STATE_FILE),
        &SplitState {
            num_rows: split.len(),
            features: split.features().to_vec(),
            data_files,
        },
    )
}

/// Recompute shard digests of a saved dataset
///
/// Returns the number of shard files checked.
///
/// # Errors
///
/// `CorruptFile` on the first digest mismatch.
pub fn verify_archive(dir: impl AsRef<Path>) -> Result<usize> {
    let dir = dir.as_ref();
    let manifest: DictManifest = read_json(dir, &dir.join(DATASET_DICT_FILE))?;

    let mut checked = 0;
    for name in &manifest.splits {
        let split_dir = dir.join(name);
        let state: SplitState = read_json(dir, &split_dir.join(STATE_FILE))?;
        for entry in &state.data_files {
            let path = split_dir.join(&entry.filename);
            let actual_hash = sha256_file(&path)?;
            if actual_hash != entry.sha256 {
                return Err(IngestError::CorruptFile {
                    path,
                    expected_hash: entry.sha256.clone(),
                    actual_hash,
                });
            }
            checked += 1;
        }
    }
    Ok(checked)
}
