//! Shared fixtures: dataset repositories built from JSON lines

#![allow(dead_code)]

use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use arrow::json::reader::{infer_json_schema_from_seekable, ReaderBuilder};
use parquet::arrow::ArrowWriter;
use serde_json::{json, Value};
use tempfile::TempDir;

pub const DATASET: &str = "trl-lib/ultrafeedback_binarized";

/// Rows shaped like a binarized preference dataset with chat messages
pub fn preference_rows(n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| {
            let score_chosen = if i % 4 == 3 { Value::Null } else { json!(i as f64 + 0.5) };
            let score_rejected = i as i64;
            json!({
                "prompt": format!("Translate «{i}» into 日本語"),
                "chosen": [
                    {"content": format!("Translate «{i}» into 日本語"), "role": "user"},
                    {"content": format!("答え {i}"), "role": "assistant"}
                ],
                "rejected": [
                    {"content": format!("Translate «{i}» into 日本語"), "role": "user"},
                    {"content": "no", "role": "assistant"}
                ],
                "score_chosen": score_chosen,
                "score_rejected": score_rejected,
            })
        })
        .collect()
}

/// Write `rows` to a parquet file, inferring the schema from the JSON
pub fn write_shard(path: &Path, rows: &[Value]) {
    let mut lines = Vec::new();
    for row in rows {
        serde_json::to_writer(&mut lines, row).unwrap();
        lines.push(b'\n');
    }

    let mut cursor = Cursor::new(lines);
    let (schema, _) = infer_json_schema_from_seekable(&mut cursor, None).unwrap();
    cursor.set_position(0);
    let schema = Arc::new(schema);
    let reader = ReaderBuilder::new(schema.clone()).build(cursor).unwrap();

    fs::create_dir_all(path.parent().unwrap()).unwrap();
    let mut writer = ArrowWriter::try_new(File::create(path).unwrap(), schema, None).unwrap();
    for batch in reader {
        writer.write(&batch.unwrap()).unwrap();
    }
    writer.close().unwrap();
}

/// Mirror root with `DATASET` holding a `test` split and a two-shard `train` split
pub fn preference_repo(test_rows: usize) -> (TempDir, Vec<Value>) {
    let root = TempDir::new().unwrap();
    let data = root.path().join(DATASET).join("data");

    let test = preference_rows(test_rows);
    write_shard(&data.join("test-00000-of-00001.parquet"), &test);

    let train = preference_rows(30);
    write_shard(&data.join("train-00000-of-00002.parquet"), &train[..18]);
    write_shard(&data.join("train-00001-of-00002.parquet"), &train[18..]);

    (root, test)
}
