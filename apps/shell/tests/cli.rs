use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn shelf(workdir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("shelf").unwrap();
    cmd.current_dir(workdir)
        .env_remove("SHELF__ROOT")
        .env_remove("SHELF__LOG_LEVEL")
        .env_remove("SHELF__DURABLE")
        .env_remove("RUST_LOG");
    cmd
}

fn seeded() -> TempDir {
    let temp = TempDir::new().unwrap();
    shelf(temp.path())
        .args(["--root", "data", "seed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Seeded 5 records into 'users'"));
    temp
}

#[test]
fn seed_then_list_prints_every_record() {
    let temp = seeded();

    let output = shelf(temp.path()).args(["--root", "data", "list", "users"]).output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.matches("\"Name\"").count(), 5, "unexpected listing: {stdout}");
    for name in ["John", "Sarah", "Raj", "Maria", "Yuki"] {
        assert!(temp.path().join(format!("data/users/{name}.json")).is_file());
    }
}

#[test]
fn read_prints_a_single_record() {
    let temp = seeded();

    shelf(temp.path())
        .args(["--root", "data", "read", "users", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Company\": \"Google\""))
        .stdout(predicate::str::contains("Sarah").not());

    shelf(temp.path())
        .args(["--root", "data", "read", "users", "Raj.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Name\": \"Raj\""));
}

#[test]
fn seeded_records_keep_every_field() {
    let temp = seeded();

    shelf(temp.path())
        .args(["--root", "data", "read", "users", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Age\": 23"))
        .stdout(predicate::str::contains("\"Contact\": \"2345423\""))
        .stdout(predicate::str::contains("\"State\": \"karnataka\""))
        .stdout(predicate::str::contains("\"Pincode\": 302028"));
}

#[test]
fn list_decode_prints_typed_summaries() {
    let temp = seeded();

    let output = shelf(temp.path())
        .args(["--root", "data", "list", "users", "--decode"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 5, "unexpected listing: {stdout}");
    assert!(stdout.contains("Sarah (28) - 9876543, Microsoft, seattle, washington, usa 98052"));
    assert!(stdout.contains("Yuki (29) - 7654321, Sony, tokyo, kanto, japan 100001"));
}

#[test]
fn list_decode_rejects_foreign_records() {
    let temp = seeded();
    fs::write(temp.path().join("data/users/notes.json"), "{\"Title\": \"todo\"}").unwrap();

    shelf(temp.path())
        .args(["--root", "data", "list", "users", "--decode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to decode records of 'users'"));
}

#[test]
fn delete_resource_then_collection() {
    let temp = seeded();

    shelf(temp.path())
        .args(["--root", "data", "delete", "users", "John"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 'users/John'"));

    shelf(temp.path())
        .args(["--root", "data", "read", "users", "John"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));

    shelf(temp.path()).args(["--root", "data", "delete", "users"]).assert().success();
    assert!(!temp.path().join("data/users").exists());

    shelf(temp.path())
        .args(["--root", "data", "list", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn config_file_supplies_the_root() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("from-config");
    let config = temp.path().join("settings.toml");
    fs::write(&config, format!("root = {:?}\nlog_level = \"warn\"\n", root.display().to_string()))
        .unwrap();

    shelf(temp.path())
        .args(["--config", config.to_str().unwrap(), "seed"])
        .assert()
        .success();

    assert!(root.join("users/Yuki.json").is_file());
}

#[test]
fn invalid_names_are_reported() {
    let temp = TempDir::new().unwrap();

    shelf(temp.path())
        .args(["--root", "data", "read", "..", "John"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("names must be a single path segment"));
}

#[test]
fn missing_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();

    shelf(temp.path()).assert().failure().stderr(predicate::str::contains("Usage"));
}
