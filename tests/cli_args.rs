use std::process::{Command, Output};

use tempfile::tempdir;

fn table2csv(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_table2csv"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("CLI should run")
}

#[test]
fn requires_a_table_selector() {
    let output = table2csv(&["https://example.com/page"]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--table-id"), "stderr: {stderr}");
}

#[test]
fn rejects_both_selectors() {
    let output = table2csv(&[
        "https://example.com/page",
        "--table-id",
        "a",
        "--table-class",
        "b",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn rejects_ambiguous_with_citation_value() {
    let output = table2csv(&[
        "https://example.com/page",
        "--table-id",
        "a",
        "--with-citation=maybe",
    ]);
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid boolean"), "stderr: {stderr}");
}

#[test]
fn rejects_unknown_row_policy() {
    let output = table2csv(&[
        "https://example.com/page",
        "--table-id",
        "a",
        "--row-policy",
        "loose",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn pipeline_errors_exit_with_code_1_and_write_nothing() {
    let dir = tempdir().expect("tempdir should be created");
    let data = dir.path().join("data.csv");
    let output = table2csv(&[
        "ftp://example.com/page",
        "--table-id",
        "a",
        "--with-citation=False",
        "--data-filepath",
        &data.to_string_lossy(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unsupported URL scheme"), "stderr: {stderr}");
    assert!(!data.exists());
}

#[test]
fn bare_with_citation_leaves_the_url_alone() {
    let dir = tempdir().expect("tempdir should be created");
    let data = dir.path().join("data.csv");
    let output = table2csv(&[
        "--with-citation",
        "ftp://example.com/page",
        "--table-id",
        "a",
        "--data-filepath",
        &data.to_string_lossy(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("invalid boolean"), "stderr: {stderr}");
    assert!(stderr.contains("unsupported URL scheme"), "stderr: {stderr}");
}
