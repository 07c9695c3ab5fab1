//! CLI smoke tests for the soilcard-dashboard binary
//!
//! These run the built binary without network access: help output, config
//! validation, and the paths that stop before any HTTP call.

use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Helper to run the soilcard-dashboard binary with given arguments
fn run_dashboard(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_soilcard-dashboard"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute soilcard-dashboard")
}

/// Write a quiet config rooted in `dir` and return its path.
fn write_config(dir: &Path, modules: &str) -> String {
    let config_path = dir.join("soilcard.yaml");
    let content = format!(
        r#"
app:
  home_dir: "{home}"

logging:
  default:
    console_level: "off"
    file: ""
    file_level: "off"
{modules}
"#,
        home = dir.join("home").to_string_lossy().replace('\\', "/"),
        modules = modules,
    );
    std::fs::write(&config_path, content).expect("Failed to write config file");
    config_path.to_string_lossy().to_string()
}

#[test]
fn test_cli_help_command() {
    let output = run_dashboard(&["--help"]);

    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("soilcard-dashboard"));
    assert!(stdout.contains("Usage:"), "Should contain usage information");
    for subcommand in ["roster", "show", "login", "register", "check"] {
        assert!(stdout.contains(subcommand), "Should list '{}'", subcommand);
    }
    assert!(stdout.contains("--config"), "Should mention config option");
}

#[test]
fn test_cli_version_command() {
    let output = run_dashboard(&["--version"]);

    assert!(output.status.success(), "Version command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("soilcard-dashboard"));
    assert!(stdout.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_dashboard(&["invalid-command"]);

    assert!(!output.status.success(), "Invalid command should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid-command") || stderr.contains("unrecognized"));
}

#[test]
fn test_cli_roster_help_lists_view_options() {
    let output = run_dashboard(&["roster", "--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for flag in ["--query", "--sort", "--desc", "--page", "--page-size", "--watch"] {
        assert!(stdout.contains(flag), "Should mention {}", flag);
    }
}

#[test]
fn test_cli_unknown_sort_column_is_rejected() {
    let output = run_dashboard(&["roster", "--sort", "salary"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("salary"), "stderr: {}", stderr);
}

#[test]
fn test_cli_config_validation_missing_file() {
    let output = run_dashboard(&["--config", "/nonexistent/soilcard.yaml", "check"]);

    assert!(!output.status.success(), "Should fail with missing config");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not found"), "stderr: {}", stderr);
}

#[test]
fn test_cli_config_validation_invalid_yaml() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").unwrap();

    let output = run_dashboard(&["--config", config_path.to_str().unwrap(), "check"]);

    assert!(!output.status.success(), "Should fail with invalid YAML");
}

#[test]
fn test_cli_check_valid_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        r#"
modules:
  roster:
    refresh_interval: 10s
    default_page_size: 10
  forms:
    register_redirect_delay: 1s
"#,
    );

    let output = run_dashboard(&["--config", &config_path, "check"]);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Configuration check passed"));
    assert!(stdout.contains("refresh_interval"));
    assert!(temp_dir.path().join("home").is_dir(), "home_dir should be created");
}

#[test]
fn test_cli_check_rejects_bad_module_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        r#"
modules:
  roster:
    default_page_size: 7
"#,
    );

    let output = run_dashboard(&["--config", &config_path, "check"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("default_page_size"), "stderr: {}", stderr);
}

#[test]
fn test_cli_print_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "");

    let output = run_dashboard(&["--config", &config_path, "--print-config"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("home_dir"));
    assert!(stdout.contains("console_level"));
}

#[test]
fn test_cli_login_validation_errors() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "");

    let output = run_dashboard(&[
        "--config",
        &config_path,
        "login",
        "--user-type",
        "district_user",
        "--email",
        "not-an-email",
        "--password",
        "abc",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid email format"), "stderr: {}", stderr);
    assert!(stderr.contains("Password must be at least 4 characters"));
}

#[test]
fn test_cli_register_mismatched_passwords() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(temp_dir.path(), "");

    let output = run_dashboard(&[
        "--config",
        &config_path,
        "register",
        "--user-type",
        "farmer",
        "--full-name",
        "Ravi Kumar",
        "--email",
        "ravi@soil.gov.in",
        "--mobile",
        "9876543210",
        "--password",
        "secret1",
        "--confirm-password",
        "secret2",
        "--state",
        "Karnataka",
        "--district",
        "Mysuru",
    ]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("confirmPassword: Passwords must match"), "stderr: {}", stderr);
    assert!(!stderr.contains("mobile:"));
}

#[test]
fn test_cli_districts() {
    let output = run_dashboard(&["districts", "Gujarat"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Surat"));

    let output = run_dashboard(&["districts", "Goa"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_roster_reports_unreachable_source() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = write_config(
        temp_dir.path(),
        r#"
modules:
  roster:
    base_url: "http://127.0.0.1:1"
    request_timeout: 500ms
"#,
    );

    let output = run_dashboard(&["--config", &config_path, "roster"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unavailable") || stderr.contains("Unavailable"), "stderr: {}", stderr);
}
