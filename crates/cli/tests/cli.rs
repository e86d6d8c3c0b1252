use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const SEED: &str = "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f";

fn quorum(dir: &Path) -> Command {
    let config = dir.join("quorum-test.toml");
    if !config.exists() {
        fs::write(&config, "").unwrap();
    }
    let mut cmd = Command::cargo_bin("quorum").unwrap();
    cmd.current_dir(dir).arg("--config").arg(&config);
    cmd
}

#[test]
fn split_then_recover_prints_secret() {
    let dir = TempDir::new().unwrap();
    let shares = dir.path().join("shares.txt");

    quorum(dir.path())
        .args(["split", "1234", "-k", "3", "-n", "6", "--seed", SEED, "-o"])
        .arg(&shares)
        .assert()
        .success();

    let content = fs::read_to_string(&shares).unwrap();
    let mut lines = content.lines();
    assert_eq!(lines.next(), Some("6;3"));
    assert_eq!(lines.count(), 6);

    quorum(dir.path())
        .arg("recover")
        .arg(&shares)
        .assert()
        .success()
        .stdout("1234\n");
}

#[test]
fn seeded_split_is_reproducible() {
    let dir = TempDir::new().unwrap();

    let run = || {
        quorum(dir.path())
            .args(["split", "987654321", "-k", "2", "-n", "4", "--seed", SEED])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone()
    };

    assert_eq!(run(), run());
}

#[test]
fn recover_with_verify_accepts_consistent_shares() {
    let dir = TempDir::new().unwrap();
    let shares = dir.path().join("shares.json");

    quorum(dir.path())
        .args(["split", "42", "-k", "2", "-n", "5", "-f", "json", "--include-metadata", "-o"])
        .arg(&shares)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&shares).unwrap()).unwrap();
    assert_eq!(json["total_shares"], 5);
    assert_eq!(json["prime_bits"], 127);

    quorum(dir.path())
        .arg("recover")
        .arg(&shares)
        .arg("--verify")
        .assert()
        .success()
        .stdout("42\n");
}

#[test]
fn shard_then_deshard_restores_file() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("id_test.pem");
    let shares = dir.path().join("key.shares");
    let restored = dir.path().join("restored.pem");
    let pem = "-----BEGIN TEST KEY-----\nTUlJQmd3SUJBREFOQmdr\n-----END TEST KEY-----\n";
    fs::write(&key, pem).unwrap();

    quorum(dir.path())
        .arg("shard")
        .arg(&key)
        .args(["-k", "3", "-n", "5", "-o"])
        .arg(&shares)
        .assert()
        .success();

    quorum(dir.path())
        .arg("deshard")
        .arg(&shares)
        .arg("-o")
        .arg(&restored)
        .assert()
        .success();

    assert_eq!(fs::read_to_string(&restored).unwrap(), pem);

    quorum(dir.path())
        .arg("deshard")
        .arg(&shares)
        .arg("--text")
        .assert()
        .success()
        .stdout(pem);
}

#[test]
fn shard_rejects_payload_larger_than_field() {
    let dir = TempDir::new().unwrap();
    let key = dir.path().join("big.bin");
    fs::write(&key, vec![b'a'; 300]).unwrap();

    quorum(dir.path())
        .arg("shard")
        .arg(&key)
        .args(["-k", "2", "-n", "3", "-o", "out.shares"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not fit"));
}

#[test]
fn recover_rejects_malformed_share_file() {
    let dir = TempDir::new().unwrap();
    let shares = dir.path().join("broken.txt");
    fs::write(&shares, "3;2\n12\n").unwrap();

    quorum(dir.path())
        .arg("recover")
        .arg(&shares)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn split_rejects_threshold_above_share_count() {
    let dir = TempDir::new().unwrap();

    quorum(dir.path())
        .args(["split", "1234", "-k", "5", "-n", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be at least the threshold"));
}

#[test]
fn split_rejects_non_decimal_secret() {
    let dir = TempDir::new().unwrap();

    quorum(dir.path())
        .args(["split", "12ab"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid input format"));
}

#[test]
fn info_reports_share_set_as_json() {
    let dir = TempDir::new().unwrap();
    let shares = dir.path().join("shares.txt");

    quorum(dir.path())
        .args(["split", "1234", "-k", "3", "-n", "4", "-o"])
        .arg(&shares)
        .assert()
        .success();

    let output = quorum(dir.path())
        .arg("info")
        .arg(&shares)
        .args(["--output-format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let info: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(info["total_shares"], 4);
    assert_eq!(info["threshold"], 3);
    assert_eq!(info["prime_bits"], 127);
    assert_eq!(info["shares"].as_array().unwrap().len(), 4);
    assert!(info["consistency_issues"].as_array().unwrap().is_empty());
}

#[test]
fn split_rejects_single_share() {
    let dir = TempDir::new().unwrap();

    quorum(dir.path())
        .args(["split", "5", "-k", "1", "-n", "1", "-o", "single.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("At least two shares"));

    assert!(!dir.path().join("single.txt").exists());
}

#[test]
fn threshold_one_split_recovers() {
    let dir = TempDir::new().unwrap();
    let shares = dir.path().join("shares.txt");

    quorum(dir.path())
        .args(["split", "5", "-k", "1", "-n", "2", "-o"])
        .arg(&shares)
        .assert()
        .success();

    quorum(dir.path())
        .arg("recover")
        .arg(&shares)
        .assert()
        .success()
        .stdout("5\n");
}

#[test]
fn recover_rejects_single_share_file() {
    let dir = TempDir::new().unwrap();
    let shares = dir.path().join("single.txt");
    fs::write(&shares, "1;1\n1234\n").unwrap();

    quorum(dir.path())
        .arg("recover")
        .arg(&shares)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}
