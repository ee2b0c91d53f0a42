//! Command parser for the line protocol.
//!
//! Parses incoming text commands into structured `Command` variants that
//! the main loop can dispatch on.

use tracing::warn;

use crate::board::Coord;

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Start a fresh game, optionally on a board of the given size.
    NewGame { size: Option<usize> },

    /// Start a game from a layout string: `position <rows> <side>`.
    Position { layout: String },

    /// Submit an intent: `move <r,c> <r,c>`.
    Move { from: Coord, to: Coord },

    /// List the intents currently available to the side on move.
    Moves,

    /// Print the full client-visible state as JSON.
    State,

    /// Print the current position in layout notation.
    Layout,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "moves" => Some(Command::Moves),
        "state" => Some(Command::State),
        "layout" => Some(Command::Layout),

        "setoption" => parse_setoption(&tokens),
        "newgame" => parse_newgame(&tokens),
        "position" => parse_position(&tokens),
        "move" => parse_move(&tokens),

        other => {
            warn!("unknown command: {}", other);
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`. Both the id and the value may
/// span several tokens.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    let rest = match tokens {
        [_, "name", rest @ ..] if !rest.is_empty() => rest,
        _ => {
            warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
            return None;
        }
    };

    let (name, value) = match rest.iter().position(|&t| t == "value") {
        Some(0) => {
            warn!("malformed setoption: empty name");
            return None;
        }
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };

    Some(Command::SetOption {
        name: name.join(" "),
        value: value.filter(|v| !v.is_empty()).map(|v| v.join(" ")),
    })
}

/// Parses `newgame [size]`.
fn parse_newgame(tokens: &[&str]) -> Option<Command> {
    match tokens.get(1) {
        None => Some(Command::NewGame { size: None }),
        Some(s) => match s.parse::<usize>() {
            Ok(size) => Some(Command::NewGame { size: Some(size) }),
            Err(_) => {
                warn!("invalid newgame size: '{}'", s);
                None
            }
        },
    }
}

/// Parses `position <rows> <side>`.
fn parse_position(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed position: expected 'position <rows> <side>'");
        return None;
    }
    Some(Command::Position {
        layout: tokens[1..].join(" "),
    })
}

/// Parses `move <r,c> <r,c>`.
fn parse_move(tokens: &[&str]) -> Option<Command> {
    if tokens.len() != 3 {
        warn!("malformed move: expected 'move <r,c> <r,c>'");
        return None;
    }
    match (tokens[1].parse::<Coord>(), tokens[2].parse::<Coord>()) {
        (Ok(from), Ok(to)) => Some(Command::Move { from, to }),
        (Err(e), _) | (_, Err(e)) => {
            warn!("malformed move: {}", e);
            None
        }
    }
}
