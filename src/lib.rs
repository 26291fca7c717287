//! # Ingesta
//!
//! Fetch datasets from the HuggingFace Hub and keep them locally.
//!
//! - [`sampler`]: write the head of one split to a JSON file
//! - [`archiver`]: save every split to a re-loadable directory
//!
//! Datasets come from a [`hub::DatasetProvider`]: the Hub itself
//! ([`hub::HfDatasetFetcher`]) or checked-out dataset repositories
//! ([`hub::LocalRepoProvider`]).
//!
//! # Example
//!
//! ```no_run
//! use ingesta::hub::{DatasetRequest, HfDatasetFetcher};
//! use ingesta::sampler::{sample, SampleOptions};
//!
//! let fetcher = HfDatasetFetcher::new()?;
//! let request = DatasetRequest::new("trl-lib/ultrafeedback_binarized");
//! let report = sample(&fetcher, &SampleOptions::new(request, "test", 5, "data/sample.json"))?;
//! println!("wrote {} of {} records", report.written, report.split_len);
//! # Ok::<(), ingesta::IngestError>(())
//! ```

pub mod archiver;
pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod hub;
pub mod sampler;

#[cfg(test)]
pub(crate) mod test_support;

pub use archiver::{archive, ArchiveOptions, ArchiveReport};
pub use dataset::{DatasetDict, Record, Split};
pub use error::{IngestError, Result};
pub use hub::{DatasetProvider, DatasetRequest, HfDatasetFetcher, LocalRepoProvider};
pub use sampler::{sample, SampleOptions, SampleReport};
