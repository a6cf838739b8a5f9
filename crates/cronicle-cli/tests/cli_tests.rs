//! Integration tests for cronicle-cli
//!
//! These tests exercise config matching and full command runs, both through
//! the library and through the compiled binary's exit codes.

use clap::Parser;
use cronicle_cli::commands::execute_rotate;
use cronicle_cli::config::OutputFormat;
use cronicle_cli::{Cli, CliError, Config, Formatter};
use cronicle_domain::Tier;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("config.toml");
    fs::write(&path, contents).unwrap();
    path
}

fn write_file(dir: &Path, name: &str) -> PathBuf {
    let file = dir.join(name);
    fs::write(&file, name.as_bytes()).unwrap();
    file
}

fn quiet() -> Formatter {
    Formatter::new(OutputFormat::Quiet, false)
}

fn cronicle() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cronicle"));
    cmd.env_remove("RUST_LOG").env_remove("CRONICLE_CONFIG");
    cmd
}

#[test]
fn test_rotate_with_matching_policy() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(
        dir.path(),
        "[[policy]]\npattern = \"*.tar\"\ndaily = 3\nweekly = 2\n",
    );
    let file = write_file(dir.path(), "backup.tar");

    let cli = Cli::parse_from(["cronicle", file.to_str().unwrap()]);
    let config = Config::load_from(&config_path).unwrap();
    let report = execute_rotate(&cli, &config, &config_path, &quiet()).unwrap();

    assert_eq!(report.created().len(), 2);
    assert_eq!(fs::read_link(dir.path().join("daily").join("backup.tar")).unwrap(), file);
    assert_eq!(fs::read_link(dir.path().join("weekly").join("backup.tar")).unwrap(), file);
    assert!(report.tier(Tier::Monthly).is_none());
}

#[test]
fn test_no_matching_policy() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "[[policy]]\npattern = \"*.zip\"\ndaily = 1\n");
    let file = write_file(dir.path(), "backup.tar");

    let cli = Cli::parse_from(["cronicle", file.to_str().unwrap()]);
    let config = Config::load_from(&config_path).unwrap();
    let result = execute_rotate(&cli, &config, &config_path, &quiet());

    assert!(matches!(result, Err(CliError::NoMatchingPolicy { .. })));
    assert!(!dir.path().join("daily").exists());
}

#[test]
fn test_disabled_policy_is_a_noop() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "[[policy]]\npattern = \"*.tar\"\n");
    let file = write_file(dir.path(), "backup.tar");

    let cli = Cli::parse_from(["cronicle", file.to_str().unwrap()]);
    let config = Config::load_from(&config_path).unwrap();
    let report = execute_rotate(&cli, &config, &config_path, &quiet()).unwrap();

    assert!(report.is_noop());
}

#[test]
fn test_dry_run_flag_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "[[policy]]\npattern = \"*.tar\"\ndaily = 1\n");
    let file = write_file(dir.path(), "backup.tar");

    let cli = Cli::parse_from(["cronicle", "--dry-run", file.to_str().unwrap()]);
    let config = Config::load_from(&config_path).unwrap();
    let report = execute_rotate(&cli, &config, &config_path, &quiet()).unwrap();

    assert!(report.dry_run);
    assert_eq!(report.created().len(), 1);
    assert!(!dir.path().join("daily").exists());
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let config_path = write_config(dir.path(), "[[policy]]\npattern = \"*\"\ndaily = 1\n");

    let cli = Cli::parse_from(["cronicle", dir.path().join("nope.tar").to_str().unwrap()]);
    let config = Config::load_from(&config_path).unwrap();
    let result = execute_rotate(&cli, &config, &config_path, &quiet());

    assert!(matches!(result, Err(CliError::InvalidInput(_))));
}

#[test]
fn test_missing_config_is_empty() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
    assert!(config.policies.is_empty());
}

#[test]
fn test_binary_exit_codes() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "backup.tar");

    let no_match = write_config(dir.path(), "[[policy]]\npattern = \"*.zip\"\ndaily = 1\n");
    let output = cronicle()
        .arg("--config")
        .arg(&no_match)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("No pattern found"));

    let disabled = write_config(dir.path(), "[[policy]]\npattern = \"*.tar\"\n");
    let output = cronicle()
        .arg("--config")
        .arg(&disabled)
        .arg(&file)
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_binary_quiet_output() {
    let dir = TempDir::new().unwrap();
    let file = write_file(dir.path(), "backup.tar");
    let config_path = write_config(dir.path(), "[[policy]]\npattern = \"*.tar\"\nyearly = 1\n");

    let output = cronicle()
        .args(["--format", "quiet", "--config"])
        .arg(&config_path)
        .arg(&file)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout.trim(),
        dir.path().join("yearly").join("backup.tar").display().to_string()
    );
}
