//! Sampler: the head of one split as a JSON file
//!
//! Records at indices `0..=count` are taken in iteration order, so `count = 5`
//! writes six records. A split shorter than that is written whole.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::dataset::{field_names, Record, Split};
use crate::error::{IngestError, Result};
use crate::hub::{DatasetProvider, DatasetRequest};

/// JSON indentation of the sample file
const JSON_INDENT: &[u8] = b"    ";

/// Sampler options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleOptions {
    /// Dataset to fetch
    pub request: DatasetRequest,
    /// Split to sample
    pub split: String,
    /// Index of the last record to include
    pub count: usize,
    /// Output JSON file (created or overwritten)
    pub output: PathBuf,
    /// Create missing parent directories of `output`
    pub create_parent_dirs: bool,
}

impl SampleOptions {
    /// Create options that create missing parent directories
    #[must_use]
    pub fn new(
        request: DatasetRequest,
        split: impl Into<String>,
        count: usize,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            request,
            split: split.into(),
            count,
            output: output.into(),
            create_parent_dirs: true,
        }
    }

    /// Set parent directory creation
    #[must_use]
    pub fn create_parent_dirs(mut self, enabled: bool) -> Self {
        self.create_parent_dirs = enabled;
        self
    }
}

/// Outcome of a sampling run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleReport {
    /// Split that was sampled
    pub split: String,
    /// Number of records in the split
    pub split_len: usize,
    /// Number of records written
    pub written: usize,
    /// File written
    pub output: PathBuf,
    /// Field names of each written record
    pub fields: Vec<Vec<String>>,
}

/// Fetch a split and write its first `count + 1` records to `options.output`
///
/// # Errors
///
/// Provider resolution errors (`DatasetNotFound`, `ConfigNotFound`,
/// `SplitNotFound`), decode errors, and `Io` when the file cannot be written.
/// A failed write is not cleaned up.
pub fn sample<P: DatasetProvider + ?Sized>(
    provider: &P,
    options: &SampleOptions,
) -> Result<SampleReport> {
    let split = provider.load_split(&options.request, &options.split)?;
    let records = take_records(&split, options.count)?;

    if options.create_parent_dirs {
        if let Some(parent) = options.output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| IngestError::io(parent, e))?;
        }
    }
    write_json_array(&records, &options.output)?;

    Ok(SampleReport {
        split: split.name().to_string(),
        split_len: split.len(),
        written: records.len(),
        output: options.output.clone(),
        fields: records.iter().map(field_names).collect(),
    })
}

/// Collect records in order up to and including index `count`
pub fn take_records(split: &Split, count: usize) -> Result<Vec<Record>> {
    let mut buffer = Vec::new();
    for (i, record) in split.records().enumerate() {
        buffer.push(record?);
        if i == count {
            break;
        }
    }
    Ok(buffer)
}

/// Render records as a 4-space indented JSON array, non-ASCII unescaped
pub fn to_json_pretty(records: &[Record]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(JSON_INDENT));
    records.serialize(&mut serializer)?;
    Ok(buf)
}

/// Write records to `path` as a JSON array
pub fn write_json_array(records: &[Record], path: &Path) -> Result<()> {
    let json = to_json_pretty(records)?;
    fs::write(path, json).map_err(|e| IngestError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::LocalRepoProvider;
    use crate::test_support::{write_preference_shard, PreferenceRow};
    use proptest::prelude::*;
    use serde_json::Value;
    use tempfile::TempDir;

    const DATASET: &str = "trl-lib/ultrafeedback_binarized";

    fn fixture(test_rows: usize) -> TempDir {
        let root = TempDir::new().unwrap();
        let data = root.path().join(DATASET).join("data");
        fs::create_dir_all(&data).unwrap();
        write_preference_shard(
            &data.join("test-00000-of-00001.parquet"),
            &PreferenceRow::numbered(test_rows),
        );
        write_preference_shard(
            &data.join("train-00000-of-00001.parquet"),
            &PreferenceRow::numbered(20),
        );
        root
    }

    fn options(count: usize, output: PathBuf) -> SampleOptions {
        SampleOptions::new(DatasetRequest::new(DATASET), "test", count, output)
    }

    fn read_array(path: &Path) -> Vec<Value> {
        serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
    }

    #[test]
    fn test_sample_writes_count_plus_one() {
        let root = fixture(10);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("out.json");

        let report = sample(&provider, &options(5, output.clone())).unwrap();
        assert_eq!(report.split_len, 10);
        assert_eq!(report.written, 6);
        assert_eq!(read_array(&output).len(), 6);
    }

    #[test]
    fn test_sample_count_zero_writes_one() {
        let root = fixture(10);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("out.json");

        sample(&provider, &options(0, output.clone())).unwrap();
        assert_eq!(read_array(&output).len(), 1);
    }

    #[test]
    fn test_sample_count_beyond_split_writes_all() {
        let root = fixture(3);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("out.json");

        let report = sample(&provider, &options(100, output.clone())).unwrap();
        assert_eq!(report.written, 3);
        assert_eq!(read_array(&output).len(), 3);
    }

    #[test]
    fn test_sample_keeps_fields_of_source_records() {
        let root = fixture(10);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("out.json");

        let report = sample(&provider, &options(5, output.clone())).unwrap();
        let first = provider
            .load_split(&DatasetRequest::new(DATASET), "test")
            .unwrap()
            .get(0)
            .unwrap()
            .unwrap();
        for (written, fields) in read_array(&output).iter().zip(&report.fields) {
            let keys: Vec<&String> = written.as_object().unwrap().keys().collect();
            assert_eq!(keys, first.keys().collect::<Vec<_>>());
            assert_eq!(fields, &field_names(&first));
        }
    }

    #[test]
    fn test_sample_output_format() {
        let root = fixture(2);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("out.json");

        sample(&provider, &options(0, output.clone())).unwrap();
        let text = fs::read_to_string(&output).unwrap();
        assert!(text.starts_with("[\n    {\n        \"prompt\": \"prompt 0: café ☕\","));
        assert!(!text.contains("\\u"));
        assert!(text.ends_with(']'));
    }

    #[test]
    fn test_sample_is_deterministic() {
        let root = fixture(10);
        let provider = LocalRepoProvider::new(root.path());
        let first = root.path().join("a.json");
        let second = root.path().join("b.json");

        sample(&provider, &options(5, first.clone())).unwrap();
        sample(&provider, &options(5, second.clone())).unwrap();
        assert_eq!(fs::read(first).unwrap(), fs::read(second).unwrap());
    }

    #[test]
    fn test_sample_creates_parent_dirs() {
        let root = fixture(4);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("app/scripts/data/sample.json");

        sample(&provider, &options(1, output.clone())).unwrap();
        assert!(output.is_file());
    }

    #[test]
    fn test_sample_without_parent_dir_creation_fails() {
        let root = fixture(4);
        let provider = LocalRepoProvider::new(root.path());
        let output = root.path().join("missing/sample.json");

        let err = sample(&provider, &options(1, output).create_parent_dirs(false)).unwrap_err();
        assert!(matches!(err, IngestError::Io { .. }));
    }

    #[test]
    fn test_sample_missing_split() {
        let root = fixture(4);
        let provider = LocalRepoProvider::new(root.path());
        let mut opts = options(1, root.path().join("out.json"));
        opts.split = "validation".into();

        let err = sample(&provider, &opts).unwrap_err();
        assert!(matches!(err, IngestError::SplitNotFound { .. }));
        assert!(!root.path().join("out.json").exists());
    }

    #[test]
    fn test_sample_missing_dataset() {
        let root = fixture(4);
        let provider = LocalRepoProvider::new(root.path());
        let mut opts = options(1, root.path().join("out.json"));
        opts.request = DatasetRequest::new("nobody/nothing");

        let err = sample(&provider, &opts).unwrap_err();
        assert!(matches!(err, IngestError::DatasetNotFound { .. }));
    }

    #[test]
    fn test_to_json_pretty_empty() {
        assert_eq!(to_json_pretty(&[]).unwrap(), b"[]");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn prop_take_records_len(rows in 0usize..40, count in 0usize..60) {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join("test.parquet");
            write_preference_shard(&path, &PreferenceRow::numbered(rows));
            let split = Split::from_shards("test", vec![path]).unwrap();

            let taken = take_records(&split, count).unwrap();
            prop_assert_eq!(taken.len(), (count + 1).min(rows));
        }
    }
}
