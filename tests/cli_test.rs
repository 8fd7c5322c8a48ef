/*!
# CLI Tests for add-report

Runs the built binary against a throwaway site and checks exit codes and
what it prints.
*/

use pretty_assertions::assert_eq;
use report_catalog::config::{CONFIG_ENV, DEFAULT_CONFIG_FILE};
use serde_json::Value;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "last_updated": "2026-01-15T00:00:00Z",
  "reports": [
    { "id": "SLM-edge-2026-01-10", "filename": "SLM-edge-2026-01-10.html", "title": "Edge", "date": "2026-01-10", "category": "slm" }
  ]
}"#;

fn site(index_command: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("config")).unwrap();
    fs::create_dir_all(root.join("reports")).unwrap();
    fs::write(root.join("config/reports.json"), CATALOG).unwrap();
    fs::write(root.join("reports/SLM-edge-2026-01-10.html"), "<title>Edge</title>").unwrap();
    fs::write(
        root.join(DEFAULT_CONFIG_FILE),
        format!("[index]\ncommand = {}\n", index_command),
    )
    .unwrap();
    dir
}

fn add_report(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_add-report"))
        .args(args)
        .current_dir(cwd)
        .env_remove(CONFIG_ENV)
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

fn first_id(root: &Path) -> String {
    let catalog: Value =
        serde_json::from_str(&fs::read_to_string(root.join("config/reports.json")).unwrap()).unwrap();
    catalog["reports"][0]["id"].as_str().unwrap().to_string()
}

#[test]
fn test_no_path_prints_usage() {
    let dir = TempDir::new().unwrap();
    let output = add_report(dir.path(), &["--featured"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No report file given"), "{}", stderr);
    assert!(stderr.contains("Usage:"), "{}", stderr);
    assert!(stderr.contains("add-report"), "{}", stderr);
}

#[test]
fn test_print_entry_stops_before_catalog() {
    let dir = site(r#"["false"]"#);
    let root = dir.path();
    fs::write(root.join("reports/VC-seed-2026-02-01.html"), "<title>Seed Rounds</title>").unwrap();

    let output = add_report(root, &["--print-entry", "reports/VC-seed-2026-02-01.html"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Extracting metadata"), "{}", stdout);
    assert!(!stdout.contains("Updating catalog"), "{}", stdout);
    assert!(stdout.contains("\"id\": \"VC-seed-2026-02-01\""), "{}", stdout);
    assert!(stdout.contains("\"title\": \"Seed Rounds\""), "{}", stdout);
    assert_eq!(fs::read_to_string(root.join("config/reports.json")).unwrap(), CATALOG);
}

#[cfg(unix)]
#[test]
fn test_registers_and_rebuilds_index() {
    let dir = site(r#"["true"]"#);
    let root = dir.path();
    fs::write(root.join("SOLANA-vibe-2026-01-19.html"), "<title>Vibe</title>").unwrap();

    let output = add_report(root, &["SOLANA-vibe-2026-01-19.html"]);

    assert_eq!(output.status.code(), Some(0), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Regenerating index"), "{}", stdout);
    assert!(stdout.contains("Report SOLANA-vibe-2026-01-19 registered"), "{}", stdout);
    assert!(stdout.contains("Copied to"), "{}", stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(!stderr.contains("Copied"), "{}", stderr);
    assert!(!stderr.contains("Added report"), "{}", stderr);
    assert!(root.join("reports/SOLANA-vibe-2026-01-19.html").is_file());
    assert_eq!(first_id(root), "SOLANA-vibe-2026-01-19");
}

#[cfg(unix)]
#[test]
fn test_index_failure_status_becomes_exit_code() {
    let dir = site(r#"["sh", "-c", "exit 5"]"#);
    let root = dir.path();
    fs::write(root.join("reports/SLM-x-2026-02-02.html"), "<title>x</title>").unwrap();

    let output = add_report(root, &["reports/SLM-x-2026-02-02.html"]);

    assert_eq!(output.status.code(), Some(5));
    assert_eq!(first_id(root), "SLM-x-2026-02-02");
}

#[test]
fn test_missing_file_exits_with_one() {
    let dir = site(r#"["true"]"#);
    let output = add_report(dir.path(), &["nowhere.html"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("report file not found"));
}
