use std::process::Command;

#[test]
fn test_version_flag() {
    let binary_path = env!("CARGO_BIN_EXE_pwfield");

    let output = Command::new(binary_path)
        .arg("--version")
        .output()
        .expect("Failed to execute binary");

    assert!(
        output.status.success(),
        "Version flag should exit with code 0"
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let version_part = stdout.trim().strip_prefix("pwfield ").unwrap_or("");
    assert_eq!(version_part, env!("CARGO_PKG_VERSION"));
}

#[test]
fn test_help_flag_prints_usage() {
    let output = Command::new(env!("CARGO_BIN_EXE_pwfield"))
        .args(["database.kdbx", "-h", "--pw-stdin"])
        .output()
        .expect("Failed to execute binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage: pwfield"));
    assert!(stdout.contains("--pw-stdin"));
    // Help wins before stdin is read
    assert!(!stdout.contains("Database password"));
}

#[test]
fn test_unknown_option_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pwfield"))
        .arg("--frobnicate")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown option '--frobnicate'"));
}

#[test]
fn test_missing_option_value_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pwfield"))
        .arg("--keyfile")
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("missing value for option '--keyfile'"));
}

#[test]
fn test_flag_with_value_is_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_pwfield"))
        .args(["--pw-stdin=1", "database.kdbx"])
        .output()
        .expect("Failed to execute binary");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("option '--pw-stdin' does not take a value"));
}
