//! Parquet fixtures shaped like a binarized preference dataset

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, ListBuilder, StringArray, StringBuilder};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

/// One fixture row: a prompt, the chosen conversation, and an optional score
#[derive(Debug, Clone)]
pub(crate) struct PreferenceRow {
    pub prompt: String,
    pub chosen: Vec<String>,
    pub score_chosen: Option<f64>,
}

impl PreferenceRow {
    /// `n` rows with non-ASCII prompts and every third score missing
    pub fn numbered(n: usize) -> Vec<Self> {
        (0..n)
            .map(|i| Self {
                prompt: format!("prompt {i}: café ☕"),
                chosen: vec![format!("question {i}"), format!("answer {i}")],
                score_chosen: (i % 3 != 2).then(|| i as f64 + 0.5),
            })
            .collect()
    }
}

/// Write `rows` as a single-row-group parquet file
pub(crate) fn write_preference_shard(path: &Path, rows: &[PreferenceRow]) {
    let prompts = StringArray::from_iter_values(rows.iter().map(|r| r.prompt.as_str()));

    let mut chosen = ListBuilder::new(StringBuilder::new());
    for row in rows {
        for message in &row.chosen {
            chosen.values().append_value(message);
        }
        chosen.append(true);
    }

    let scores: Float64Array = rows.iter().map(|r| r.score_chosen).collect();

    let batch = RecordBatch::try_from_iter(vec![
        ("prompt", Arc::new(prompts) as ArrayRef),
        ("chosen", Arc::new(chosen.finish()) as ArrayRef),
        ("score_chosen", Arc::new(scores) as ArrayRef),
    ])
    .unwrap();

    let file = File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}
