//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a temp root and verify outputs.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

const SECRET_VARS: [&str; 5] = [
    "GOOGLE_OAUTH_REFRESH_TOKEN",
    "GOOGLE_CLIENT_ID",
    "GOOGLE_CLIENT_SECRET",
    "ANTHROPIC_API_KEY",
    "CLAUDE_API_KEY",
];

/// Run the CLI with no credentials in the environment.
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_heartbeat"));
    for var in SECRET_VARS {
        cmd.env_remove(var);
    }
    let output = cmd
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn single_report(root: &Path) -> String {
    let reports: Vec<_> = std::fs::read_dir(root.join("briefing"))
        .expect("briefing dir")
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(reports.len(), 1, "expected exactly one report: {reports:?}");
    let name = reports[0].file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("heartbeat-") && name.ends_with(".md"), "{name}");
    std::fs::read_to_string(&reports[0]).unwrap()
}

#[test]
fn test_dry_run_writes_placeholder_report() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().to_str().unwrap();

    let (code, stdout, stderr) = run_cli(&["--dry-run", "--root", root]);
    assert_eq!(code, 0, "dry run failed: {stderr}");
    assert!(stdout.contains("Checks: todos, inbox, calendar, gmail"));
    assert!(stdout.contains("Dry run: true"));
    assert!(stdout.contains("Heartbeat written to:"));
    assert!(!stdout.contains("Generating AI summary..."));

    let todos = stdout.find("Running: todos...").expect("todos progress line");
    let gmail = stdout.find("Running: gmail...").expect("gmail progress line");
    assert!(todos < gmail);

    let report = single_report(temp.path());
    assert!(report.contains("[DRY RUN - would generate AI summary]"));
    assert!(report.contains("## Gmail\n\n[DRY RUN - would check gmail]"));
}

#[test]
fn test_run_without_credentials_degrades() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join("todo")).unwrap();
    std::fs::write(temp.path().join("todo/call-mom.md"), "# Call mom\n").unwrap();
    let root = temp.path().to_str().unwrap();

    let (code, stdout, stderr) = run_cli(&["--root", root]);
    assert_eq!(code, 0, "run failed: {stderr}");
    assert!(stdout.contains("Running: calendar...\n  skipped\n"));
    assert!(stdout.contains("Generating AI summary..."));

    let report = single_report(temp.path());
    assert!(report.contains("- Call mom (call-mom.md)"));
    assert!(report.contains("Gmail check skipped (OAuth credentials not configured)."));
}

#[test]
fn test_config_file_selects_checks() {
    let temp = TempDir::new().unwrap();
    std::fs::create_dir_all(temp.path().join(".claude")).unwrap();
    std::fs::write(
        temp.path().join(".claude/heartbeat-config.json"),
        r#"{"checks": ["inbox", "horoscope"]}"#,
    )
    .unwrap();
    let root = temp.path().to_str().unwrap();

    let (code, stdout, _) = run_cli(&["--root", root]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Running: inbox...\n  skipped\n  Unknown check: horoscope, skipping.\n"));
    assert!(!stdout.contains("Running: todos..."));

    let report = single_report(temp.path());
    assert!(report.contains("No inbox folder found."));
    assert!(!report.contains("Todo"));
}

#[test]
fn test_invalid_config_is_fatal() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("broken.json");
    std::fs::write(&config, "{not json").unwrap();
    let root = temp.path().to_str().unwrap();

    let (code, _, stderr) = run_cli(&["--root", root, "--config", config.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: Failed to parse configuration"));
    assert!(!temp.path().join("briefing").exists());
}
