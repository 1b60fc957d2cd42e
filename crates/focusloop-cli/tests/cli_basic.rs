//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run and verify outputs. All
//! commands run against the dev data directory (FOCUSLOOP_ENV=dev) so
//! they never touch a real user profile.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "focusloop-cli", "--"])
        .args(args)
        .env("FOCUSLOOP_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_timer_status() {
    let (stdout, _, code) = run_cli(&["timer", "status"]);
    assert_eq!(code, 0, "Timer status failed");
    assert!(stdout.contains("StateSnapshot"));
    assert!(stdout.contains("remaining_secs"));
}

#[test]
fn test_timer_start() {
    let (stdout, _, code) = run_cli(&["timer", "start"]);
    assert_eq!(code, 0, "Timer start failed");
    // Already-running no-ops print a snapshot instead of an event.
    assert!(stdout.contains("TimerStarted") || stdout.contains("StateSnapshot"));
}

#[test]
fn test_timer_pause() {
    let _ = run_cli(&["timer", "start"]);
    let (stdout, _, code) = run_cli(&["timer", "pause"]);
    assert_eq!(code, 0, "Timer pause failed");
    assert!(stdout.contains("TimerPaused") || stdout.contains("StateSnapshot"));
}

#[test]
fn test_timer_reset() {
    let (stdout, _, code) = run_cli(&["timer", "reset"]);
    assert_eq!(code, 0, "Timer reset failed");
    assert!(stdout.contains("TimerReset"));
}

#[test]
fn test_timer_skip() {
    let (stdout, _, code) = run_cli(&["timer", "skip"]);
    assert_eq!(code, 0, "Timer skip failed");
    assert!(stdout.contains("TimerSkipped"));
}

#[test]
fn test_config_get() {
    let (stdout, _, code) = run_cli(&["config", "get", "timer.work_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert!(!stdout.trim().is_empty());
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (_, _, code) = run_cli(&["config", "get", "no.such_key"]);
    assert_ne!(code, 0, "Unknown key should fail");
}

#[test]
fn test_config_set() {
    let (stdout, _, code) = run_cli(&["config", "set", "auto_start.delay_ms", "1000"]);
    assert_eq!(code, 0, "Config set failed");
    assert!(stdout.contains("ok"));
}

#[test]
fn test_config_list() {
    let (stdout, _, code) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "Config list failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("config list should print JSON");
    assert!(parsed.get("timer").is_some());
    assert!(parsed.get("auto_start").is_some());
}

#[test]
fn test_completions_generate() {
    let (stdout, _, code) = run_cli(&["completions", "bash"]);
    assert_eq!(code, 0, "Completions failed");
    assert!(stdout.contains("focusloop-cli"));
}
