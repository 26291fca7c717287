//! Dataset handles, splits, and records
//!
//! Splits are sequences of parquet shards on local disk; records are decoded
//! lazily into JSON maps in schema column order.
//!
//! # Features
//!
//! - Split lengths and field names from parquet footers
//! - Incremental record iteration and indexed access
//! - Split-aware save/load with per-shard SHA-256

mod dict;
mod disk;
mod record;
mod split;


pub use dict::{DatasetDict, DatasetSummary, SplitSummary};
pub use disk::{verify_archive, DATASET_DICT_FILE, STATE_FILE};
pub use record::{field_names, Record};
pub use split::{Records, Shard, Split};
