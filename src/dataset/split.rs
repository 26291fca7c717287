//! Dataset split backed by parquet shards

use std::collections::VecDeque;
use std::fs::File;
use std::path::{Path, PathBuf};

use parquet::arrow::arrow_reader::{ParquetRecordBatchReader, ParquetRecordBatchReaderBuilder};

use super::record::{batch_to_records, Record};
use crate::error::{IngestError, Result};

/// Rows decoded per record batch while iterating
const READ_BATCH_SIZE: usize = 256;

/// One parquet file of a split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    /// Local path of the parquet file
    pub path: PathBuf,
    /// Row count from the parquet footer
    pub num_rows: usize,
}

fn open_reader(path: &Path) -> Result<ParquetRecordBatchReaderBuilder<File>> {
    let file = File::open(path).map_err(|e| IngestError::io(path, e))?;
    Ok(ParquetRecordBatchReaderBuilder::try_new(file)?)
}

/// Ordered, finite sequence of records
///
/// Lengths and field names come from the parquet footers; record data is only
/// read while iterating.
#[derive(Debug, Clone)]
pub struct Split {
    name: String,
    shards: Vec<Shard>,
    features: Vec<String>,
}

impl Split {
    /// Open a split from its shard files, in order
    ///
    /// Field names are taken from the first shard's schema.
    pub fn from_shards(name: impl Into<String>, paths: Vec<PathBuf>) -> Result<Self> {
        let mut shards = Vec::with_capacity(paths.len());
        let mut features = None;
        for path in paths {
            let builder = open_reader(&path)?;
            let num_rows =
                usize::try_from(builder.metadata().file_metadata().num_rows()).unwrap_or_default();
            if features.is_none() {
                features = Some(
                    builder
                        .schema()
                        .fields()
                        .iter()
                        .map(|f| f.name().clone())
                        .collect(),
                );
            }
            shards.push(Shard { path, num_rows });
        }

        Ok(Self {
            name: name.into(),
            shards,
            features: features.unwrap_or_default(),
        })
    }

    /// Split name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.num_rows).sum()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field names in schema order
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Shard files in order
    #[must_use]
    pub fn shards(&self) -> &[Shard] {
        &self.shards
    }

    /// Iterate records in order
    #[must_use]
    pub fn records(&self) -> Records<'_> {
        Records {
            shards: self.shards.iter(),
            reader: None,
            pending: VecDeque::new(),
            done: false,
        }
    }

    /// Record at `index`, reading only the shard that holds it
    pub fn get(&self, index: usize) -> Result<Option<Record>> {
        let mut offset = index;
        for shard in &self.shards {
            if offset < shard.num_rows {
                let reader = open_reader(&shard.path)?
                    .with_offset(offset)
                    .with_limit(1)
                    .with_batch_size(1)
                    .build()?;
                for batch in reader {
                    if let Some(record) = batch_to_records(&batch?)?.into_iter().next() {
                        return Ok(Some(record));
                    }
                }
                return Ok(None);
            }
            offset -= shard.num_rows;
        }
        Ok(None)
    }
}

/// Iterator over the records of a [`Split`]
///
/// Yields at most one error, then stops.
pub struct Records<'a> {
    shards: std::slice::Iter<'a, Shard>,
    reader: Option<ParquetRecordBatchReader>,
    pending: VecDeque<Record>,
    done: bool,
}

impl Records<'_> {
    /// Decode the next non-exhausted batch into `pending`; false once all shards are read.
    fn fill(&mut self) -> Result<bool> {
        loop {
            if let Some(reader) = self.reader.as_mut() {
                match reader.next() {
                    Some(batch) => {
                        self.pending.extend(batch_to_records(&batch?)?);
                        return Ok(true);
                    }
                    None => self.reader = None,
                }
            }
            match self.shards.next() {
                Some(shard) => {
                    let reader = open_reader(&shard.path)?
                        .with_batch_size(READ_BATCH_SIZE)
                        .build()?;
                    self.reader = Some(reader);
                }
                None => return Ok(false),
            }
        }
    }
}

impl Iterator for Records<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            if let Some(record) = self.pending.pop_front() {
                return Some(Ok(record));
            }
            match self.fill() {
                Ok(true) => {}
                Ok(false) => self.done = true,
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
        None
    }
}
