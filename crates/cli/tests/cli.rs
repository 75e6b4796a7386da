use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const LSTM: &str = "Long short-term memory networks use gates to control the memory cell. \
    The forget gate decides which information the cell discards. \
    Recurrent networks with gating learn long range dependencies in sequences. ";

const GAN: &str = "Generative adversarial networks train a generator against a discriminator. \
    The discriminator learns to tell real samples from generated samples. \
    Adversarial training produces sharp realistic images. ";

#[allow(deprecated)]
fn docqa() -> Command {
    let mut cmd = Command::cargo_bin("docqa").expect("binary");
    for var in [
        "DOCQA_CONFIG",
        "DOCQA_WINDOW_SIZE",
        "DOCQA_OVERLAP",
        "DOCQA_EMBED_MODE",
        "DOCQA_DIMENSION",
        "DOCQA_EMBED_WORKERS",
        "DOCQA_TOP_K",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

fn setup_papers() -> TempDir {
    let temp = tempdir().unwrap();
    let root = temp.path();
    fs::write(root.join("lstm.txt"), LSTM.repeat(2)).unwrap();
    fs::write(root.join("gan.md"), GAN.repeat(2)).unwrap();
    fs::write(root.join("notes.txt"), "too short").unwrap();
    fs::write(root.join("figure.png"), [0u8, 1, 2, 3]).unwrap();
    temp
}

fn run_json(dir: &Path, args: &[&str]) -> Value {
    let output = docqa().arg(args[0]).arg(dir).args(&args[1..]).output().unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("valid json")
}

#[test]
fn index_reports_stats_and_skipped_documents() {
    let temp = setup_papers();
    let body = run_json(
        temp.path(),
        &["index", "--window-size", "40", "--overlap", "5", "--json"],
    );

    assert_eq!(body["documents"], 3);
    assert_eq!(body["indexed_documents"], 2);
    assert_eq!(body["dimension"], 384);
    assert_eq!(body["chunks"], 4);
    assert_eq!(body["failed"], serde_json::json!(["notes.txt"]));
}

#[test]
fn index_prints_human_summary() {
    let temp = setup_papers();
    docqa()
        .arg("index")
        .arg(temp.path())
        .args(["--embed-mode", "stub", "--dimension", "32"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Indexed 2/3 documents"))
        .stdout(predicate::str::contains("dimension 32"))
        .stdout(predicate::str::contains("Skipped 1: notes.txt"));
}

#[test]
fn ask_answers_from_the_matching_document() {
    let temp = setup_papers();
    let body = run_json(
        temp.path(),
        &[
            "ask",
            "what does the forget gate of the memory cell decide",
            "--window-size",
            "40",
            "--overlap",
            "5",
            "-k",
            "2",
            "--show-context",
            "--json",
        ],
    );

    let sources = body["sources"].as_array().expect("sources array");
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0]["source"], "lstm.txt");
    assert!(body["context"].as_str().is_some_and(|c| !c.is_empty()));
    assert!(body["answer"].as_str().is_some_and(|a| !a.is_empty()));
    assert_eq!(body["failed"], serde_json::json!(["notes.txt"]));
}

#[test]
fn ask_text_output_lists_sources() {
    let temp = setup_papers();
    docqa()
        .arg("ask")
        .arg(temp.path())
        .arg("how are generator and discriminator trained")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sources:"))
        .stdout(predicate::str::contains("1. gan.md"))
        .stdout(predicate::str::contains("Context:").not());
}

#[test]
fn config_file_sets_chunking() {
    let temp = setup_papers();
    let config = temp.path().join("docqa.toml");
    fs::write(&config, "[chunker]\nwindow_size = 20\noverlap = 0\n").unwrap();

    let output = docqa()
        .arg("--config")
        .arg(&config)
        .arg("index")
        .arg(temp.path())
        .args(["--extensions", "txt", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let body: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["indexed_documents"], 1);
    assert_eq!(body["chunks"], 3);
}

#[test]
fn invalid_config_fails() {
    let temp = setup_papers();
    docqa()
        .arg("index")
        .arg(temp.path())
        .args(["--window-size", "10", "--overlap", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid retrieval configuration"));
}

#[test]
fn folder_without_usable_text_fails() {
    let temp = tempdir().unwrap();
    fs::write(temp.path().join("stub.txt"), "nothing here").unwrap();

    docqa()
        .arg("ask")
        .arg(temp.path())
        .arg("anything")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No usable documents"));
}

#[test]
fn missing_folder_fails() {
    let temp = tempdir().unwrap();
    docqa()
        .arg("index")
        .arg(temp.path().join("absent"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("document folder not found"));
}

#[test]
fn blank_question_fails() {
    let temp = setup_papers();
    docqa()
        .arg("ask")
        .arg(temp.path())
        .arg("   ")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Empty query"));
}
