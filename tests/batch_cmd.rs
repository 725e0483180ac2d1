//! End-to-end tests for `plag batch`.

use assert_fs::prelude::*;
use predicates::prelude::*;
use serde_json::Value;

mod util;
use util::{SHARED_A, SHARED_B, plag};

fn parse_lines(out: &str) -> Vec<Value>
{
    out.lines()
        .map(|l| serde_json::from_str(l).expect("json line"))
        .collect()
}

fn pairs_file() -> String
{
    let ok = serde_json::json!({ "id": "shared", "text1": SHARED_A, "text2": SHARED_B });
    let same = serde_json::json!({ "id": 2, "text1": "the same six words right here", "text2": "the same six words right here" });
    format!("{ok}\n\n{{\"id\": \"half\", \"text1\": \"only one\"}}\nnot json at all\n{same}\n")
}

#[test]
fn one_envelope_per_record_in_input_order()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("pairs.jsonl")
        .write_str(&pairs_file())
        .expect("write pairs");

    let assert = plag(tmp.path())
        .args(["--quiet", "batch", "pairs.jsonl"])
        .assert()
        .success();
    let stdout = String::from_utf8(
        assert
            .get_output()
            .stdout
            .clone(),
    )
    .expect("utf8");
    let rows = parse_lines(&stdout);

    // Blank line skipped, bad lines still produce an envelope
    assert_eq!(rows.len(), 4);

    assert_eq!(rows[0]["success"], true);
    assert_eq!(rows[0]["id"], "shared");
    assert_eq!(rows[0]["results"]["longestCommonWords"], 8);

    assert_eq!(rows[1]["success"], false);
    assert_eq!(rows[1]["id"], "half");
    assert!(
        rows[1]["error"]
            .as_str()
            .unwrap()
            .contains("second document")
    );

    assert_eq!(rows[2]["success"], false);
    assert!(rows[2].get("id").is_none());
    assert!(
        rows[2]["error"]
            .as_str()
            .unwrap()
            .starts_with("line 4: malformed record")
    );

    assert_eq!(rows[3]["id"], 2);
    assert_eq!(rows[3]["results"]["overallScore"], 100.0);
    assert_eq!(rows[3]["results"]["verdict"], "High Similarity");
}

#[test]
fn writes_to_output_file_and_reports_summary()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    tmp.child("pairs.jsonl")
        .write_str(&pairs_file())
        .expect("write pairs");

    plag(tmp.path())
        .args(["batch", "pairs.jsonl", "-o", "out.jsonl"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Compared 4 pairs: 2 ok, 2 failed"));

    let written = std::fs::read_to_string(
        tmp.child("out.jsonl")
            .path(),
    )
    .expect("read output");
    assert_eq!(parse_lines(&written).len(), 4);
}

#[test]
fn reads_records_from_stdin()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    plag(tmp.path())
        .args(["--quiet", "batch", "-"])
        .write_stdin("{\"text1\": \"one two three four five six\", \"text2\": \"One, two, three; four five six.\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""overallScore":100.0"#));
}

#[test]
fn missing_batch_file_is_an_error()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    plag(tmp.path())
        .args(["batch", "absent.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read batch file"));
}
