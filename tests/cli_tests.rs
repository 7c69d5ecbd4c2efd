use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to write the two inputs into a temporary directory
fn write_inputs(original: &[u8], modified: &[u8]) -> (TempDir, PathBuf, PathBuf) {
    let temp = tempfile::tempdir().unwrap();
    let original_path = temp.path().join("original.txt");
    let modified_path = temp.path().join("modified.txt");
    fs::write(&original_path, original).unwrap();
    fs::write(&modified_path, modified).unwrap();
    (temp, original_path, modified_path)
}

fn text_diff() -> Command {
    Command::cargo_bin("text-diff").unwrap()
}

#[test]
fn stats_summary_reports_counts() {
    let (_temp, original, modified) = write_inputs(b"a\nb\nc", b"a\nx\nc");

    text_diff()
        .arg(&original)
        .arg(&modified)
        .arg("--stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Added:      1"))
        .stdout(predicate::str::contains("Removed:    1"))
        .stdout(predicate::str::contains("Similarity: 50%"));
}

#[test]
fn identical_files_are_reported() {
    let (_temp, original, modified) = write_inputs(b"same\ntext", b"same\ntext");

    text_diff()
        .arg(&original)
        .arg(&modified)
        .arg("-s")
        .assert()
        .success()
        .stdout(predicate::str::contains("Texts are identical"));
}

#[test]
fn aligned_view_emits_json_pairs() {
    let (_temp, original, modified) = write_inputs(b"a\nb\nc", b"a\nx\nc");

    let output = text_diff()
        .arg(&original)
        .arg(&modified)
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["kind"], "pair");
    assert_eq!(rows[1]["original"]["line"]["type"], "removed");
    assert_eq!(rows[1]["modified"]["line"]["content"], "x");
}

#[test]
fn unified_view_collapses_context() {
    let original: String = (1..=30).map(|i| format!("line {i}\n")).collect();
    let modified = original.replace("line 15\n", "line fifteen\n");
    let (_temp, original, modified) = write_inputs(original.as_bytes(), modified.as_bytes());

    let output = text_diff()
        .arg(&original)
        .arg(&modified)
        .args(["--view", "unified", "--context", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let kinds: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds.first(), Some(&"collapsed"));
    assert_eq!(kinds.last(), Some(&"collapsed"));
    assert_eq!(kinds.iter().filter(|k| **k == "line").count(), 6);
}

#[test]
fn full_flag_disables_collapsing() {
    let text: String = (1..=50).map(|i| format!("line {i}\n")).collect();
    let (_temp, original, modified) = write_inputs(text.as_bytes(), text.as_bytes());

    text_diff()
        .arg(&original)
        .arg(&modified)
        .arg("--full")
        .assert()
        .success()
        .stdout(predicate::str::contains("collapsed").not());
}

#[test]
fn side_by_side_view_emits_columns() {
    let (_temp, original, modified) = write_inputs(b"a\nb", b"a\nb\nc");

    let output = text_diff()
        .arg(&original)
        .arg(&modified)
        .args(["--view", "side-by-side"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let columns: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(columns["original"].as_array().unwrap().len(), 2);
    assert_eq!(columns["modified"].as_array().unwrap().len(), 3);
}

#[test]
fn invalid_utf8_fails() {
    let (_temp, original, modified) = write_inputs(b"fine", &[0xc3, 0x28]);

    text_diff()
        .arg(&original)
        .arg(&modified)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid UTF-8"));
}

#[test]
fn line_limit_is_enforced() {
    let (_temp, original, modified) = write_inputs(b"1\n2\n3\n4", b"1");

    text_diff()
        .arg(&original)
        .arg(&modified)
        .args(["--max-lines", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("limit is 3"));
}

#[test]
fn missing_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let missing = temp.path().join("nope.txt");

    text_diff()
        .arg(&missing)
        .arg(&missing)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}
