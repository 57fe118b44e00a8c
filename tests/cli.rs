use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn dlidx(args: &[&str], dir: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_dlidx"))
        .args(args)
        .env("DLIDX_CONFIG", dir.join("config.toml"))
        .env("DLIDX_LOG_DIR", dir.join("logs"))
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn log_text(dir: &Path) -> String {
    fs::read_to_string(dir.join("logs").join("dlidx.log")).unwrap_or_default()
}

#[test]
fn fatal_fetch_error_and_bad_config_reach_the_log() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("config.toml"), "timeout_secs = = 3").unwrap();

    // nothing listens on port 1
    let out = dlidx(&["list", "127.0.0.1:1/"], dir.path());
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed to fetch"));

    let log = log_text(dir.path());
    assert!(log.contains("Ignoring invalid config"), "log was: {log}");
    assert!(log.contains("ERROR"), "log was: {log}");
}

#[test]
fn usage_error_exits_with_two_and_is_logged() {
    let dir = tempfile::tempdir().unwrap();

    let out = dlidx(&[], dir.path());
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("No index URL given."));
    assert!(stderr.contains("Usage:"));
    assert!(log_text(dir.path()).contains("No index URL given."));
}

#[test]
fn help_exits_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let out = dlidx(&["help"], dir.path());
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("dlidx list <url>"));
}
