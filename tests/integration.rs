//! Integration tests for the rezzo engine binary.
//!
//! Tests the line protocol by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_rezzo");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start rezzo");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Parses the JSON payload of an `ok` or `state` reply.
fn payload(line: &str, prefix: &str) -> serde_json::Value {
    let json = line
        .strip_prefix(prefix)
        .unwrap_or_else(|| panic!("expected '{}' reply, got: {}", prefix, line));
    serde_json::from_str(json).unwrap()
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["foobar", "", "move 1,0", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok".to_string()]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}

#[test]
fn default_game_is_13_by_13() {
    let lines = run_engine(&["state", "quit"]);
    let state = payload(&lines[0], "state ");
    let board = state["board"].as_array().unwrap();
    assert_eq!(board.len(), 13);
    assert_eq!(board[0][0], 1);
    assert_eq!(board[12][12], 2);
    assert_eq!(board[6][6], 0);
    assert_eq!(state["turn"], "red");
    assert_eq!(state["turn_phase"], 0);
    assert_eq!(state["game_over"], false);
}

#[test]
fn opening_moves_exclude_trains() {
    let lines = run_engine(&["newgame 5", "moves", "quit"]);
    assert!(lines[0].starts_with("moves "));
    let pairs: Vec<&str> = lines[0]["moves ".len()..].split(' ').collect();
    assert!(pairs.contains(&"1,0-2,0"));
    assert!(pairs.contains(&"1,1-2,3"));
    assert!(!pairs.contains(&"0,0-2,0"));
}

#[test]
fn full_turn_sequence() {
    let lines = run_engine(&[
        "newgame 5",
        "move 1,0 2,0",
        "move 2,0 3,1",
        "move 3,4 2,4",
        "move 2,4 2,3",
        "move 3,0 2,1",
        "layout",
        "state",
        "quit",
    ]);
    assert_eq!(lines.len(), 7);

    // Red's opening turn is a single move.
    let first = payload(&lines[0], "ok ");
    assert_eq!(first["turn_ended"], true);
    assert_eq!(first["move"]["type"], "single");

    // The piece on 2,0 is Red's; Blue is on move.
    assert_eq!(lines[1], "error invalid move");

    let second = payload(&lines[2], "ok ");
    assert_eq!(second["turn_ended"], false);

    assert!(lines[3].starts_with("error must move a different piece"));

    let third = payload(&lines[4], "ok ");
    assert_eq!(third["turn_ended"], true);

    assert_eq!(lines[5], "layout rrrrr/1rrrr/rb2b/1bbb1/bbbbb r");

    let state = payload(&lines[6], "state ");
    assert_eq!(state["turn"], "red");
    assert_eq!(state["turn_phase"], 0);
}

#[test]
fn position_and_layout_round_trip() {
    let layout = "5/1rr2/5/2b2/5 b";
    let lines = run_engine(&[&format!("position {}", layout), "layout", "quit"]);
    assert_eq!(lines, vec![format!("layout {}", layout)]);
}

#[test]
fn invalid_newgame_keeps_current_game() {
    let lines = run_engine(&["newgame 5", "newgame 3", "layout", "quit"]);
    assert_eq!(lines, vec!["layout rrrrr/rrrrr/5/bbbbb/bbbbb r".to_string()]);
}

#[test]
fn size_option_applies_to_newgame() {
    let lines = run_engine(&["setoption name Size value 7", "newgame", "layout", "quit"]);
    assert_eq!(
        lines,
        vec!["layout rrrrrrr/rrrrrrr/7/7/7/bbbbbbb/bbbbbbb r".to_string()]
    );
}

#[test]
fn train_capture_over_protocol() {
    let lines = run_engine(&[
        "position 7/7/rrr1b2/7/7/7/4b2 r",
        "move 2,0 2,4",
        "layout",
        "quit",
    ]);
    let outcome = payload(&lines[0], "ok ");
    assert_eq!(outcome["move"]["type"], "train");
    assert_eq!(outcome["turn_ended"], true);
    assert_eq!(lines[1], "layout 7/7/2rrr2/7/7/7/4b2 b");
}
