mod common;

use assert_cmd::Command;
use common::*;
use predicates::prelude::*;

fn fieldpack_cmd() -> Command {
    Command::cargo_bin("fieldpack").unwrap()
}

#[test]
fn test_cli_help() {
    fieldpack_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("portable geodatabase extract"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_cli_version() {
    fieldpack_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fieldpack"));
}

#[test]
fn test_init_writes_example_config_and_refuses_overwrite() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("fieldpack.toml");

    fieldpack_cmd()
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success();
    assert!(config_path.exists());

    // Refuses to clobber without --force
    fieldpack_cmd()
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure();

    fieldpack_cmd()
        .arg("init")
        .arg("--config")
        .arg(&config_path)
        .arg("--force")
        .assert()
        .success();

    // The written example is a loadable configuration
    let config = fieldpack::config::Config::load(&config_path).unwrap();
    assert!(config.datasets.mapping.len() >= 13);
}

#[test]
fn test_run_with_missing_config_exits_with_io_code() {
    fieldpack_cmd()
        .arg("run")
        .arg("--config")
        .arg("/nonexistent/fieldpack.toml")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_run_with_invalid_config_exits_with_config_code() {
    let dir = tempfile::TempDir::new().unwrap();
    let config_path = dir.path().join("broken.toml");
    std::fs::write(&config_path, "not valid toml {{").unwrap();

    fieldpack_cmd()
        .arg("run")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .code(2);
}

#[test]
fn test_run_refreshes_database_end_to_end() {
    let env = TestEnvironment::new();
    let config_path = env.temp.path().join("fieldpack.toml");
    env.config.save(&config_path).unwrap();

    fieldpack_cmd()
        .arg("run")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Refresh complete."));

    let db = env.output_db();
    assert!(class_file(&db.join("Buildings").join("Buildings_DLH")).exists());
    assert!(table_file(&db.join("Assessor")).exists());

    // Run log was appended under the output directory
    assert!(env.config.log_file_path().exists());
}

#[test]
fn test_run_reports_partial_failure_but_exits_zero() {
    let mut env = TestEnvironment::new();
    env.config.datasets.mapping.insert(
        "Landuse".to_string(),
        vec!["Shoreland_Management_Zones".to_string()],
    );
    let config_path = env.temp.path().join("fieldpack.toml");
    env.config.save(&config_path).unwrap();

    fieldpack_cmd()
        .arg("run")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Refresh finished with errors."));
}
