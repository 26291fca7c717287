//! CLI command tests
//!
//! Commands run against checked-out repositories via `--repo-root`.

use super::*;
use crate::config::parse_args;
use crate::dataset::DatasetDict;
use crate::test_support::{write_preference_shard, PreferenceRow};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const DATASET: &str = "trl-lib/ultrafeedback_binarized";

/// Mirror root holding one dataset with `test` (8 rows) and `train` (12 rows)
fn create_repo_root() -> TempDir {
    let root = TempDir::new().unwrap();
    let data = root.path().join(DATASET).join("data");
    fs::create_dir_all(&data).unwrap();
    write_preference_shard(
        &data.join("test-00000-of-00001.parquet"),
        &PreferenceRow::numbered(8),
    );
    write_preference_shard(
        &data.join("train-00000-of-00001.parquet"),
        &PreferenceRow::numbered(12),
    );
    root
}

fn run(args: &[&str]) -> Result<(), String> {
    let mut argv = vec!["ingesta"];
    argv.extend_from_slice(args);
    run_command(parse_args(argv).unwrap())
}

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

// =========================================================================
// Sample Command Tests
// =========================================================================

#[test]
fn test_sample_command_writes_file() {
    let root = create_repo_root();
    let output = root.path().join("out/sample.json");

    run(&[
        "sample",
        "-q",
        "--repo-root",
        &path_arg(root.path()),
        "--output",
        &path_arg(&output),
    ])
    .unwrap();

    let written: Vec<serde_json::Value> =
        serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(written.len(), 6);
}

#[test]
fn test_sample_command_missing_split() {
    let root = create_repo_root();
    let err = run(&[
        "sample",
        "-q",
        "--repo-root",
        &path_arg(root.path()),
        "--split",
        "validation",
        "--output",
        &path_arg(&root.path().join("out.json")),
    ])
    .unwrap_err();
    assert!(err.contains("validation"));
    assert!(err.contains("[E012]"));
}

#[test]
fn test_sample_command_log_file() {
    let root = create_repo_root();
    let log = root.path().join("logs/sample.log");

    run(&[
        "sample",
        "-q",
        "-v",
        "--log-file",
        &path_arg(&log),
        "--repo-root",
        &path_arg(root.path()),
        "--count",
        "1",
        "--output",
        &path_arg(&root.path().join("out.json")),
    ])
    .unwrap();

    let text = fs::read_to_string(&log).unwrap();
    assert!(text.contains("len(split) = 8"));
    assert!(text.contains("record 1: {prompt, chosen, score_chosen}"));
    assert!(text.contains("Wrote 2 records"));
}

#[test]
fn test_failure_is_logged_to_file() {
    let root = create_repo_root();
    let log = root.path().join("fail.log");

    let result = run(&[
        "sample",
        "-q",
        "--log-file",
        &path_arg(&log),
        "--repo-root",
        &path_arg(root.path()),
        "--dataset",
        "nobody/nothing",
    ]);
    assert!(result.is_err());
    assert!(fs::read_to_string(&log).unwrap().contains("| ERROR |"));
}

// =========================================================================
// Archive Command Tests
// =========================================================================

#[test]
fn test_archive_command_round_trip() {
    let root = create_repo_root();
    let out = root.path().join("corpus").join(DATASET);

    run(&[
        "archive",
        "-q",
        "--repo-root",
        &path_arg(root.path()),
        "--output-dir",
        &path_arg(&out),
    ])
    .unwrap();

    let loaded = DatasetDict::load_from_disk(&out).unwrap();
    assert_eq!(loaded.num_rows()["test"], 8);
    assert_eq!(loaded.num_rows()["train"], 12);
}

#[test]
fn test_archive_command_missing_config() {
    let root = create_repo_root();
    let err = run(&[
        "archive",
        "-q",
        "--repo-root",
        &path_arg(root.path()),
        "--name",
        "fr",
        "--output-dir",
        &path_arg(&root.path().join("never")),
    ])
    .unwrap_err();
    assert!(err.contains("[E011]"));
}

// =========================================================================
// Run Command Tests
// =========================================================================

fn write_job(dir: &Path, root: &Path) -> PathBuf {
    let job = dir.join("job.yaml");
    let yaml = format!(
        "hub:\n  repo_root: {}\nsample:\n  count: 2\n  output: {}\narchive:\n  output_dir: {}\n",
        root.display(),
        dir.join("sample.json").display(),
        dir.join("archive").display(),
    );
    fs::write(&job, yaml).unwrap();
    job
}

#[test]
fn test_run_command_executes_both_steps() {
    let root = create_repo_root();
    let work = TempDir::new().unwrap();
    let job = write_job(work.path(), root.path());

    run(&["run", "-q", &path_arg(&job)]).unwrap();

    let written: Vec<serde_json::Value> =
        serde_json::from_slice(&fs::read(work.path().join("sample.json")).unwrap()).unwrap();
    assert_eq!(written.len(), 3);
    assert!(work.path().join("archive/dataset_dict.json").is_file());
}

#[test]
fn test_run_command_overrides() {
    let root = create_repo_root();
    let work = TempDir::new().unwrap();
    let job = write_job(work.path(), root.path());
    let other = work.path().join("elsewhere");

    run(&[
        "run",
        "-q",
        &path_arg(&job),
        "--count",
        "0",
        "--output-dir",
        &path_arg(&other),
    ])
    .unwrap();

    let written: Vec<serde_json::Value> =
        serde_json::from_slice(&fs::read(work.path().join("sample.json")).unwrap()).unwrap();
    assert_eq!(written.len(), 1);
    assert!(other.join("dataset_dict.json").is_file());
    assert!(!work.path().join("archive").exists());
}

#[test]
fn test_run_command_dry_run_fetches_nothing() {
    let root = create_repo_root();
    let work = TempDir::new().unwrap();
    let job = write_job(work.path(), root.path());

    run(&["run", "-q", &path_arg(&job), "--dry-run"]).unwrap();
    assert!(!work.path().join("sample.json").exists());
    assert!(!work.path().join("archive").exists());
}

#[test]
fn test_run_command_invalid_job() {
    let work = TempDir::new().unwrap();
    let job = work.path().join("job.yaml");
    fs::write(&job, "hub: {}\n").unwrap();

    let err = run(&["run", "-q", &path_arg(&job)]).unwrap_err();
    assert!(err.contains("[E050]"));
}

// =========================================================================
// Info Command Tests
// =========================================================================

#[test]
fn test_info_command_all_formats() {
    let root = create_repo_root();
    let out = root.path().join("archive");
    run(&[
        "archive",
        "-q",
        "--repo-root",
        &path_arg(root.path()),
        "-o",
        &path_arg(&out),
    ])
    .unwrap();

    for format in ["text", "json", "yaml"] {
        run(&["info", "-q", &path_arg(&out), "--format", format, "--verify"]).unwrap();
    }
}

#[test]
fn test_info_command_not_an_archive() {
    let dir = TempDir::new().unwrap();
    let err = run(&["info", "-q", &path_arg(dir.path())]).unwrap_err();
    assert!(err.contains("[E060]"));
}

// =========================================================================
// Provider Selection Tests
// =========================================================================

#[test]
fn test_build_provider_uses_repo_root() {
    let root = create_repo_root();
    let hub = HubSpec {
        repo_root: Some(root.path().to_path_buf()),
        ..HubSpec::default()
    };
    let provider = build_provider(&hub, LogLevel::Quiet).unwrap();
    let dict = provider
        .load(&crate::hub::DatasetRequest::new(DATASET))
        .unwrap();
    assert_eq!(dict.split_names(), vec!["test", "train"]);
}

#[test]
fn test_build_provider_defaults_to_hub() {
    assert!(build_provider(&HubSpec::default(), LogLevel::Quiet).is_ok());
}
