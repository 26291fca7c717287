//! Record decoding
//!
//! Arrow record batches are rendered through the arrow JSON writer so every
//! column type it supports (nested lists and structs included) passes through
//! unchanged.

use arrow::json::writer::JsonArray;
use arrow::json::WriterBuilder;
use arrow::record_batch::RecordBatch;
use serde_json::{Map, Value};

use crate::error::Result;

/// A single row: field name to value, in schema column order
pub type Record = Map<String, Value>;

/// Decode every row of a record batch
///
/// Null fields are kept as explicit `null`s so each record carries the full
/// field set of the schema.
pub(crate) fn batch_to_records(batch: &RecordBatch) -> Result<Vec<Record>> {
    if batch.num_rows() == 0 {
        return Ok(Vec::new());
    }

    let mut writer = WriterBuilder::new()
        .with_explicit_nulls(true)
        .build::<_, JsonArray>(Vec::new());
    writer.write(batch)?;
    writer.finish()?;

    let buf = writer.into_inner();
    Ok(serde_json::from_slice(&buf)?)
}

/// Field names of a record, in order
#[must_use]
pub fn field_names(record: &Record) -> Vec<String> {
    record.keys().cloned().collect()
}
