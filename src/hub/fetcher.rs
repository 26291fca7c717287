//! HuggingFace Hub dataset fetcher
//!
//! Lists a dataset repository, resolves its parquet layout, and downloads the
//! selected shards into the hf-hub cache.

use std::path::PathBuf;

use hf_hub::api::sync::{Api, ApiBuilder, ApiError, ApiRepo};
use hf_hub::{Repo, RepoType};

use super::layout::{resolve_layout, take_split, SplitFiles};
use super::{materialize_splits, validate_dataset_id, DatasetProvider, DatasetRequest};
use crate::dataset::{DatasetDict, Split};
use crate::error::{IngestError, Result};

/// HuggingFace dataset fetcher
#[derive(Debug, Clone)]
pub struct HfDatasetFetcher {
    /// Authentication token
    pub(crate) token: Option<String>,
    /// Cache directory
    pub(crate) cache_dir: PathBuf,
    /// Show download progress bars
    pub(crate) progress: bool,
}

impl HfDatasetFetcher {
    /// Create new fetcher using HF_TOKEN environment variable
    ///
    /// # Errors
    ///
    /// Does not error on missing token (allows anonymous pulls).
    pub fn new() -> Result<Self> {
        Ok(Self {
            token: Self::resolve_token(),
            cache_dir: Self::default_cache_dir(),
            progress: true,
        })
    }

    /// Create fetcher with explicit token
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            cache_dir: Self::default_cache_dir(),
            progress: true,
        }
    }

    /// Set cache directory
    #[must_use]
    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = dir.into();
        self
    }

    /// Enable or disable download progress bars
    #[must_use]
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Resolve token from multiple sources
    ///
    /// Priority:
    /// 1. HF_TOKEN environment variable
    /// 2. ~/.huggingface/token file
    #[must_use]
    pub fn resolve_token() -> Option<String> {
        if let Ok(token) = std::env::var("HF_TOKEN") {
            if !token.is_empty() {
                return Some(token);
            }
        }

        if let Some(home) = dirs::home_dir() {
            let token_path = home.join(".huggingface").join("token");
            if let Ok(token) = std::fs::read_to_string(token_path) {
                let token = token.trim().to_string();
                if !token.is_empty() {
                    return Some(token);
                }
            }
        }

        None
    }

    /// Get default cache directory
    pub(crate) fn default_cache_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(|| PathBuf::from(".cache"))
            .join("huggingface")
            .join("hub")
    }

    /// Check if client has authentication
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build the hf-hub sync API client with optional authentication.
    fn build_api(&self) -> Result<Api> {
        let mut api_builder = ApiBuilder::new()
            .with_cache_dir(self.cache_dir.clone())
            .with_progress(self.progress);

        if let Some(token) = &self.token {
            api_builder = api_builder.with_token(Some(token.clone()));
        }

        api_builder.build().map_err(|e| IngestError::Hub {
            message: format!("Failed to initialize HF API: {e}"),
        })
    }

    fn repo(api: &Api, request: &DatasetRequest) -> ApiRepo {
        api.repo(Repo::with_revision(
            request.dataset_id.clone(),
            RepoType::Dataset,
            request.revision.clone(),
        ))
    }

    /// List the repository and resolve its split layout.
    ///
    /// Returns the commit sha the listing was taken at.
    fn resolve(repo: &ApiRepo, request: &DatasetRequest) -> Result<(String, SplitFiles)> {
        let info = repo
            .info()
            .map_err(|e| Self::listing_error(e, &request.dataset_id))?;
        let files: Vec<String> = info.siblings.into_iter().map(|s| s.rfilename).collect();
        let layout = resolve_layout(&request.dataset_id, &files, request.config_name.as_deref())?;
        Ok((info.sha, layout))
    }

    /// Map a repository listing failure; 401/404 mean the dataset cannot be resolved.
    fn listing_error(err: ApiError, dataset_id: &str) -> IngestError {
        match err {
            ApiError::RequestError(e) => {
                let message = e.to_string();
                if message.contains("404") || message.contains("401") {
                    IngestError::DatasetNotFound {
                        dataset_id: dataset_id.to_string(),
                    }
                } else {
                    IngestError::Hub {
                        message: format!("Listing {dataset_id} failed: {message}"),
                    }
                }
            }
            e => IngestError::Hub {
                message: format!("Listing {dataset_id} failed: {e}"),
            },
        }
    }

    /// Download a single shard, returning its path in the cache
    fn download_file(repo: &ApiRepo, dataset_id: &str, file: &str) -> Result<PathBuf> {
        repo.get(file).map_err(|e| IngestError::Hub {
            message: format!("Download of {dataset_id}/{file} failed: {e}"),
        })
    }
}

impl Default for HfDatasetFetcher {
    fn default() -> Self {
        Self {
            token: Self::resolve_token(),
            cache_dir: Self::default_cache_dir(),
            progress: true,
        }
    }
}

impl DatasetProvider for HfDatasetFetcher {
    fn load(&self, request: &DatasetRequest) -> Result<DatasetDict> {
        validate_dataset_id(&request.dataset_id)?;
        let api = self.build_api()?;
        let repo = Self::repo(&api, request);

        let (sha, layout) = Self::resolve(&repo, request)?;
        let splits = materialize_splits(layout, |file| {
            Self::download_file(&repo, &request.dataset_id, file)
        })?;

        Ok(DatasetDict::new(
            request.dataset_id.clone(),
            request.config_name.clone(),
            Some(sha),
            splits,
        ))
    }

    fn load_split(&self, request: &DatasetRequest, split: &str) -> Result<Split> {
        validate_dataset_id(&request.dataset_id)?;
        let api = self.build_api()?;
        let repo = Self::repo(&api, request);

        let (_, mut layout) = Self::resolve(&repo, request)?;
        let files = take_split(&mut layout, split)?;
        let paths = files
            .iter()
            .map(|f| Self::download_file(&repo, &request.dataset_id, f))
            .collect::<Result<Vec<_>>>()?;
        Split::from_shards(split, paths)
    }
}
