//! Integration tests for the skirmish binary.
//!
//! Spawns the binary, feeds a grid on stdin, and checks what it prints.

use std::io::Write;
use std::process::{Command, Output, Stdio};

const SAMPLE: &str = "\
#######
#.G...#
#...EG#
#.#.#G#
#..G#E#
#.....#
#######
";

/// Runs the binary with `args`, writing `stdin` to it.
fn run_skirmish(args: &[&str], stdin: &str) -> Output {
    let exe = env!("CARGO_BIN_EXE_skirmish");
    let mut child = Command::new(exe)
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to start skirmish");

    let mut pipe = child.stdin.take().unwrap();
    // The binary may exit before reading stdin (bad flags, missing file).
    let _ = pipe.write_all(stdin.as_bytes());
    drop(pipe);

    child.wait_with_output().expect("failed to wait on child")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn prints_outcome_and_search() {
    let output = run_skirmish(&["-"], SAMPLE);
    assert!(output.status.success());
    let lines = stdout_lines(&output);
    assert_eq!(
        lines,
        vec![
            "combat outcome 27730 (47 rounds x 590 hit points, goblin victory)",
            "minimal elf attack power 15, outcome 4988 (29 rounds x 172 hit points)",
        ]
    );
}

#[test]
fn no_search_prints_one_line() {
    let output = run_skirmish(&["--no-search", "-"], SAMPLE);
    assert!(output.status.success());
    assert_eq!(stdout_lines(&output).len(), 1);
}

#[test]
fn json_report() {
    let output = run_skirmish(&["--json", "--threads", "3", "-"], SAMPLE);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["combat"]["score"], 27730);
    assert_eq!(value["combat"]["winner"], "goblin");
    assert_eq!(value["search"]["attack_power"], 15);
    assert_eq!(value["search"]["outcome"]["score"], 4988);
}

#[test]
fn attack_override_changes_outcome() {
    let output = run_skirmish(&["--no-search", "--elf-attack", "15", "-"], SAMPLE);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["combat outcome 4988 (29 rounds x 172 hit points, elf victory)"]
    );
}

#[test]
fn malformed_grid_fails() {
    let output = run_skirmish(&["-"], "#####\n#E?G#\n#####\n");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown character '?'"), "stderr: {}", stderr);
}

#[test]
fn unknown_flag_is_rejected() {
    let output = run_skirmish(&["--frobnicate", "-"], SAMPLE);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn missing_file_fails() {
    let output = run_skirmish(&["/nonexistent/cave.txt"], "");
    assert!(!output.status.success());
}
