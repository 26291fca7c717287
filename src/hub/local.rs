//! Provider backed by checked-out dataset repositories
//!
//! `root/<org>/<name>/` is read as a clone of the hub repository
//! `<org>/<name>` (for example `git clone https://huggingface.co/datasets/<org>/<name>`).
//! The request's revision is ignored: whatever is checked out is used.

use std::fs;
use std::path::{Path, PathBuf};

use super::layout::{resolve_layout, take_split};
use super::{materialize_splits, validate_dataset_id, DatasetProvider, DatasetRequest};
use crate::dataset::{DatasetDict, Split};
use crate::error::{IngestError, Result};

/// Dataset provider over a directory of repository checkouts
#[derive(Debug, Clone)]
pub struct LocalRepoProvider {
    root: PathBuf,
}

impl LocalRepoProvider {
    /// Create provider rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory holding the repository checkouts
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn repo_dir(&self, request: &DatasetRequest) -> Result<PathBuf> {
        validate_dataset_id(&request.dataset_id)?;
        let dir = self.root.join(&request.dataset_id);
        if dir.is_dir() {
            Ok(dir)
        } else {
            Err(IngestError::DatasetNotFound {
                dataset_id: request.dataset_id.clone(),
            })
        }
    }

    /// Repository-relative file paths with `/` separators, sorted
    fn list_files(repo_dir: &Path) -> Result<Vec<String>> {
        let mut files = Vec::new();
        let mut pending = vec![repo_dir.to_path_buf()];
        while let Some(dir) = pending.pop() {
            let entries = fs::read_dir(&dir).map_err(|e| IngestError::io(&dir, e))?;
            for entry in entries {
                let entry = entry.map_err(|e| IngestError::io(&dir, e))?;
                let path = entry.path();
                if entry.file_name() == ".git" {
                    continue;
                }
                let file_type = entry.file_type().map_err(|e| IngestError::io(&path, e))?;
                if file_type.is_dir() {
                    pending.push(path);
                } else if file_type.is_symlink() && path.is_dir() {
                    continue;
                } else if let Ok(relative) = path.strip_prefix(repo_dir) {
                    let parts: Vec<String> = relative
                        .components()
                        .map(|c| c.as_os_str().to_string_lossy().into_owned())
                        .collect();
                    files.push(parts.join("/"));
                }
            }
        }
        files.sort();
        Ok(files)
    }
}

impl DatasetProvider for LocalRepoProvider {
    fn load(&self, request: &DatasetRequest) -> Result<DatasetDict> {
        let repo_dir = self.repo_dir(request)?;
        let files = Self::list_files(&repo_dir)?;
        let layout = resolve_layout(&request.dataset_id, &files, request.config_name.as_deref())?;
        let splits = materialize_splits(layout, |file| Ok(repo_dir.join(file)))?;

        Ok(DatasetDict::new(
            request.dataset_id.clone(),
            request.config_name.clone(),
            None,
            splits,
        ))
    }

    fn load_split(&self, request: &DatasetRequest, split: &str) -> Result<Split> {
        let repo_dir = self.repo_dir(request)?;
        let files = Self::list_files(&repo_dir)?;
        let mut layout =
            resolve_layout(&request.dataset_id, &files, request.config_name.as_deref())?;
        let files = take_split(&mut layout, split)?;
        Split::from_shards(split, files.iter().map(|f| repo_dir.join(f)).collect())
    }
}
