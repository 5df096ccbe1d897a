//! End-to-end tests running the batchkit binary

use std::io::{Cursor, Read};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use zip::ZipArchive;

fn batchkit(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_batchkit"))
        .args(args)
        .current_dir(dir)
        .env_remove("BATCHKIT_CONFIG")
        .env_remove("BATCHKIT_LOG_LEVEL")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run batchkit")
}

#[test]
fn test_format_split_extract_pipeline() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("rows.csv"), "id,text\n1,hello\n2,world\n3,again\n").unwrap();

    let output = batchkit(
        dir.path(),
        &[
            "format",
            "rows.csv",
            "--model",
            "gpt-4",
            "--system-prompt",
            "translate",
            "--max-tokens",
            "50",
            "--content-column",
            "text",
        ],
    );
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let jsonl = std::fs::read_to_string(dir.path().join("output.jsonl")).unwrap();
    assert_eq!(jsonl.lines().count(), 3);

    let output = batchkit(dir.path(), &["split", "output.jsonl", "-n", "2"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let zip_bytes = std::fs::read(dir.path().join("split_files.zip")).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
    assert_eq!(archive.len(), 2);
    let mut first = String::new();
    archive
        .by_name("part_1.jsonl")
        .unwrap()
        .read_to_string(&mut first)
        .unwrap();
    assert_eq!(first.lines().count(), 2);

    std::fs::write(
        dir.path().join("results.jsonl"),
        concat!(
            r#"{"custom_id":"request-2","response":{"body":{"choices":[{"message":{"content":"monde"}}]}}}"#,
            "\n",
            r#"{"custom_id":"request-1","response":{"body":{"choices":[{"message":{"content":"bonjour"}}]}}}"#,
            "\n"
        ),
    )
    .unwrap();
    let output = batchkit(dir.path(), &["extract", "results.jsonl"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let csv = std::fs::read_to_string(dir.path().join("extracted_content.csv")).unwrap();
    assert_eq!(
        csv,
        "\u{feff}custom_id,content\nrequest-1,bonjour\nrequest-2,monde\n"
    );
}

#[test]
fn test_format_reads_defaults_from_config_file() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("batchkit.toml"),
        "[format]\nmodel = \"gpt-4o-mini\"\nsystem_prompt = \"sum\"\nmax_tokens = 10\ncontent_column = \"body\"\ninclude_temperature = false\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("rows.csv"), "body\nhi\n").unwrap();

    let output = batchkit(dir.path(), &["format", "rows.csv"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");

    let jsonl = std::fs::read_to_string(dir.path().join("output.jsonl")).unwrap();
    assert!(jsonl.contains("\"model\":\"gpt-4o-mini\""));
    assert!(!jsonl.contains("temperature"));
}

#[test]
fn test_missing_column_exits_with_client_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("rows.csv"), "body\nhi\n").unwrap();

    let output = batchkit(
        dir.path(),
        &[
            "format",
            "rows.csv",
            "--model",
            "gpt-4",
            "--system-prompt",
            "p",
            "--max-tokens",
            "5",
            "--content-column",
            "text",
        ],
    );
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Column 'text' not found. Available columns: body"));
    assert!(!dir.path().join("output.jsonl").exists());
}

#[test]
fn test_split_rejects_wrong_extension() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("batch.json"), "{}\n").unwrap();

    let output = batchkit(dir.path(), &["split", "batch.json"]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_invalid_config_exits_with_config_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("batchkit.toml"), "[split]\nsplit_number = 0\n").unwrap();
    std::fs::write(dir.path().join("batch.jsonl"), "{}\n").unwrap();

    let output = batchkit(dir.path(), &["split", "batch.jsonl"]);
    assert_eq!(output.status.code(), Some(2));

    let output = batchkit(dir.path(), &["validate-config"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_init_then_validate() {
    let dir = TempDir::new().unwrap();

    let output = batchkit(dir.path(), &["init"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    assert!(dir.path().join("batchkit.toml").exists());

    let output = batchkit(dir.path(), &["validate-config"]);
    assert_eq!(output.status.code(), Some(0), "{output:?}");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Configuration is valid"));

    let output = batchkit(dir.path(), &["init"]);
    assert_eq!(output.status.code(), Some(2));
}
