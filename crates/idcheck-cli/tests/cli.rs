use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CARD: &str = r#"{
    "success": true,
    "extracted_text": [
        {"order": 1, "text": "ROMANIA"},
        {"order": 2, "text": "CARTE DE IDENTITATE"},
        {"order": 3, "text": "Maria"},
        {"order": 4, "text": "Popescu"},
        {"order": 5, "text": "AB123456"},
        {"order": 6, "text": "à Bucuresti"},
        {"order": 7, "text": "15.03.1990"},
        {"order": 8, "text": "01.12.2030"}
    ]
}"#;

fn idcheck(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("idcheck").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

#[test]
fn parse_prints_json_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("card.json");
    fs::write(&input, CARD).unwrap();

    idcheck(dir.path())
        .args(["parse", input.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""name": "Maria Popescu""#))
        .stdout(predicate::str::contains(r#""verification_status": "verified""#))
        .stdout(predicate::str::contains(r#""date_of_birth": "01.12.2030""#));
}

#[test]
fn parse_chronological_flag() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("card.json");
    fs::write(&input, CARD).unwrap();

    idcheck(dir.path())
        .args(["parse", input.to_str().unwrap(), "--chronological", "-f", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Date Of Birth: 15.03.1990"))
        .stdout(predicate::str::contains("Expiry Date: 01.12.2030"));
}

#[test]
fn parse_strict_fails_on_incomplete_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("partial.json");
    fs::write(&input, r#"[{"order": 3, "text": "Maria"}]"#).unwrap();

    idcheck(dir.path())
        .args(["parse", input.to_str().unwrap(), "--strict"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("incomplete"));
}

#[test]
fn parse_missing_input() {
    let dir = TempDir::new().unwrap();

    idcheck(dir.path())
        .args(["parse", "/nonexistent/card.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();
    fs::write(inputs.join("good.json"), CARD).unwrap();
    fs::write(inputs.join("bad.json"), "not json").unwrap();

    let pattern = format!("{}/*.json", inputs.display());

    idcheck(dir.path())
        .args(["batch", &pattern, "--summary", "--continue-on-error", "-o"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 verified, 0 incomplete, 1 failed"));

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    assert!(summary.contains("good.json,verified,Maria Popescu,AB123456"));
    assert!(summary.contains("bad.json,error"));
    assert!(outputs.join("good.identity.json").exists());
}

#[test]
fn batch_into_input_directory_keeps_sources() {
    let dir = TempDir::new().unwrap();
    let cards = dir.path().join("cards");
    fs::create_dir_all(&cards).unwrap();
    let input = cards.join("card.json");
    fs::write(&input, CARD).unwrap();

    let pattern = format!("{}/*.json", cards.display());

    idcheck(dir.path())
        .args(["batch", &pattern, "-o"])
        .arg(&cards)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&input).unwrap(), CARD);
    let written = fs::read_to_string(cards.join("card.identity.json")).unwrap();
    assert!(written.contains("Maria Popescu"));

    // A second run ignores the files the first one produced.
    idcheck(dir.path())
        .args(["batch", &pattern, "-o"])
        .arg(&cards)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 1 files"));
    assert!(!cards.join("card.identity.identity.json").exists());
}

#[test]
fn config_init_then_get() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("config.json");
    let config = config.to_str().unwrap();

    idcheck(dir.path())
        .args(["-c", config, "config", "init"])
        .assert()
        .success();

    idcheck(dir.path())
        .args(["-c", config, "config", "set", "services.base_url", "http://kyc:9000"])
        .assert()
        .success();

    idcheck(dir.path())
        .args(["-c", config, "config", "get", "services.base_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://kyc:9000"));
}

#[test]
fn verify_reports_unreachable_service() {
    let dir = TempDir::new().unwrap();
    let image = "data:image/jpeg;base64,/9j/4AAQ";

    idcheck(dir.path())
        .args([
            "verify",
            "--front",
            image,
            "--back",
            image,
            "--selfie",
            image,
            "--base-url",
            "http://127.0.0.1:9",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("face-match service error"));
}
