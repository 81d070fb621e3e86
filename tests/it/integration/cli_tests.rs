//! End-to-end tests of the `tabular-view` binary.

use serde_json::{Value, json};
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tabular-view"))
}

#[test]
fn test_render_request_file() {
    let dir = tempdir().unwrap();
    let request = dir.path().join("request.json");
    fs::write(
        &request,
        json!({
            "data": {"a": [3, 1, 2], "b": ["x", "y", "z"]},
            "columns": {"a": "Alpha"},
            "controls": {"sortByColumnName": "a", "ascending": true}
        })
        .to_string(),
    )
    .unwrap();

    let output = bin()
        .args(["render", request.to_str().unwrap(), "--start", "1", "--end", "3"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(payload["length"], json!(3));
    assert_eq!(payload["start"], json!(1));
    assert_eq!(payload["sourceIndexes"], json!([2, 0]));
    assert_eq!(payload["header"][0]["title"], json!("Alpha"));
    assert_eq!(payload["header"].as_array().unwrap().len(), 1);
}

#[test]
fn test_render_with_config_uses_virtualizer_window() {
    let dir = tempdir().unwrap();
    let request = dir.path().join("request.json");
    let config = dir.path().join("config.json");
    let data: Vec<Value> = (0..100).map(|n| json!({"n": n})).collect();
    fs::write(&request, json!({"data": data}).to_string()).unwrap();
    fs::write(
        &config,
        json!({"virtualizer": {"overscan": 2, "rowHeight": 20, "viewportHeight": 100}, "enumerate": true})
            .to_string(),
    )
    .unwrap();

    let output = bin()
        .args(["render", request.to_str().unwrap(), "--config", config.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout).unwrap();
    // 5 rows on screen, one partial row, two rows of overscan below
    assert_eq!(payload["visibleRows"].as_array().unwrap().len(), 8);
    assert_eq!(payload["rowNumbers"][0], json!(1));
    assert_eq!(payload["length"], json!(100));
}

#[test]
fn test_bad_columns_spec_fails() {
    let dir = tempdir().unwrap();
    let request = dir.path().join("request.json");
    fs::write(&request, json!({"data": [{"a": 1}], "columns": "bogus"}).to_string()).unwrap();

    let output = bin().args(["render", request.to_str().unwrap()]).output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid columns spec"), "stderr: {}", stderr);
}
