//! Runs the `noughts repl` binary end to end.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn repl(config: &Path, extra: &[&str], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_noughts"))
        .arg("repl")
        .arg("--config")
        .arg(config)
        .args(extra)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start noughts");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(script.as_bytes())
        .expect("Failed to write script");

    child.wait_with_output().expect("noughts did not exit")
}

#[test]
fn test_clean_script_exits_zero() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = repl(&config, &["--no-ai"], "move 0 0\nmove 1 1\nscore\nquit\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("X plays (0, 0)"));
    assert!(stdout.contains("O plays (1, 1)"));
    assert!(stdout.contains("X 0 - 0 O"));
}

#[test]
fn test_bad_coordinates_exit_two() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = repl(&config, &[], "move 5 5\nmove 1 1\n");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("outside the 3x3 grid"));
}

#[test]
fn test_config_file_sets_starting_player() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("noughts.toml");
    std::fs::write(&config, "starting_player = \"O\"\nai_enabled = false\n").unwrap();

    let output = repl(&config, &[], "move 2 2\n");
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("O plays (2, 2)"));
}

#[test]
fn test_unreadable_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("noughts.toml");
    std::fs::write(&config, "ai_delay_ms = \"soon\"\n").unwrap();

    let output = repl(&config, &[], "");
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_ai_takes_the_side_that_does_not_open() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("absent.toml");
    let output = repl(&config, &["--starting-player", "O"], "move 0 0\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("O plays (0, 0)"));
    assert!(stdout.contains("X plays (1, 1)"));
}
