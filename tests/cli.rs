mod common;

use assert_cmd::Command;
use common::EpubBuilder;
use predicates::prelude::*;
use tempfile::TempDir;

#[test]
fn cli_converts_to_markdown_in_output_dir() {
    let dir = TempDir::new().unwrap();
    let source = EpubBuilder::new()
        .title("The Time Machine")
        .creator("H. G. Wells")
        .document("ch1", "<p>The Time Traveller was expounding a recondite matter to us.</p>")
        .write(&dir.path().join("time.epub"));
    let out_dir = dir.path().join("outputs");

    Command::cargo_bin("epub2text")
        .unwrap()
        .arg(&source)
        .arg("md")
        .arg("--output-dir")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Conversion successful! Output saved to:"))
        .stdout(predicate::str::contains("The-Time-Machine.md"));

    let content = std::fs::read_to_string(out_dir.join("The-Time-Machine.md")).unwrap();
    assert!(content.starts_with("# The Time Machine\n**Author:** H. G. Wells\n"));
}

#[test]
fn cli_defaults_to_plain_text_next_to_source() {
    let dir = TempDir::new().unwrap();
    let source = EpubBuilder::new()
        .title("Walden")
        .document("ch1", "<p>I went to the woods.</p>")
        .write(&dir.path().join("walden.epub"));

    Command::cargo_bin("epub2text")
        .unwrap()
        .arg(&source)
        .assert()
        .success();

    assert!(dir.path().join("Walden.txt").exists());
}

#[test]
fn cli_reports_missing_file() {
    let dir = TempDir::new().unwrap();

    Command::cargo_bin("epub2text")
        .unwrap()
        .arg(dir.path().join("nope.epub"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("EPUB file not found"));
}
