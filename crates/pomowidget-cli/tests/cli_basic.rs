//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary and verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_pomowidget-cli");

/// Run a CLI command against `config` and return (code, stdout, stderr).
fn run_cli(config: &Path, args: &[&str]) -> (i32, String, String) {
    let output = Command::new(BIN)
        .arg("--config")
        .arg(config)
        .args(args)
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

fn simulate(config: &Path, args: &[&str]) -> serde_json::Value {
    let mut full = vec!["timer", "simulate"];
    full.extend_from_slice(args);
    let (code, stdout, stderr) = run_cli(config, &full);
    assert_eq!(code, 0, "simulate failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn no_config() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

#[test]
fn test_simulate_one_tick() {
    let (_dir, cfg) = no_config();
    let report = simulate(&cfg, &["--ticks", "1"]);
    let session = &report["view"]["session"];
    assert_eq!(session["label"], "focusing");
    assert_eq!(session["time_remaining"], 1499);
    assert_eq!(session["progress"]["aria_value_now"], 0.067);
    assert_eq!(session["sub_title"], "00:24:59 remaining");
    assert_eq!(report["view"]["focus"]["disabled"], true);
}

#[test]
fn test_simulate_expiry_into_break() {
    let (_dir, cfg) = no_config();
    let report = simulate(&cfg, &["--focus", "5", "--break", "2", "--ticks", "301"]);
    assert_eq!(report["expiries"], 1);
    let session = &report["view"]["session"];
    assert_eq!(session["label"], "on_break");
    assert_eq!(session["title"], "On Break for 02:00 minutes");
    assert_eq!(session["time_remaining"], 120);
}

#[test]
fn test_simulate_pause_freezes_countdown() {
    let (_dir, cfg) = no_config();
    let report = simulate(&cfg, &["--ticks", "50", "--pause-after", "10"]);
    assert_eq!(report["view"]["session"]["time_remaining"], 1490);
    assert_eq!(report["view"]["controls"]["play_pause"], "play");
}

#[test]
fn test_simulate_stop_clears_session() {
    let (_dir, cfg) = no_config();
    let report = simulate(&cfg, &["--ticks", "5", "--stop"]);
    assert!(report["view"]["session"].is_null());
    assert_eq!(report["view"]["controls"]["stop_disabled"], true);
    assert_eq!(report["view"]["focus"]["disabled"], false);
}

#[test]
fn test_simulate_snapshot() {
    let (_dir, cfg) = no_config();
    let report = simulate(&cfg, &["--ticks", "3", "--pause-after", "2", "--snapshot"]);
    let snapshot = &report["snapshot"];
    assert_eq!(snapshot["type"], "StateSnapshot");
    assert_eq!(snapshot["state"], "paused");
    assert_eq!(snapshot["label"], "focusing");
    assert_eq!(snapshot["time_remaining"], 1498);
    assert_eq!(snapshot["durations"]["break"], 5);

    let report = simulate(&cfg, &["--ticks", "1"]);
    assert!(report.get("snapshot").is_none());
}

#[test]
fn test_simulate_rejects_off_step_focus() {
    let (_dir, cfg) = no_config();
    let (code, _, stderr) = run_cli(&cfg, &["timer", "simulate", "--focus", "22"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_config_file_seeds_durations() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("config.toml");
    std::fs::write(&cfg, "[durations]\nfocus = 45\nbreak = 10\n").unwrap();

    let (code, stdout, _) = run_cli(&cfg, &["config", "get", "durations.focus"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "45");

    let report = simulate(&cfg, &[]);
    assert_eq!(report["view"]["session"]["time_remaining"], 2700);
    assert_eq!(report["view"]["break"]["label"], "Break Duration: 10:00");
}

#[test]
fn test_config_get_unknown_key() {
    let (_dir, cfg) = no_config();
    let (code, _, stderr) = run_cli(&cfg, &["config", "get", "durations.nope"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown key"));
}

#[test]
fn test_run_reads_commands_from_stdin() {
    let (_dir, cfg) = no_config();
    let mut child = Command::new(BIN)
        .arg("--config")
        .arg(&cfg)
        .args(["timer", "run", "--silent"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"f+\nbogus\np\ns\nq\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Focus Duration: 30:00"));
    assert!(stdout.contains("Focusing for 30:00 minutes"));
    assert!(stdout.contains("00:30:00 remaining"));
    assert!(stdout.trim_end().ends_with("[q] quit"));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command 'bogus'"));
}

#[test]
fn test_completions() {
    let (_dir, cfg) = no_config();
    let (code, stdout, _) = run_cli(&cfg, &["completions", "bash"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("pomowidget-cli"));
}
