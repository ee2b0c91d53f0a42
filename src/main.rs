//! Rezzo -- a rules engine for a two-player train-capture board game.
//!
//! This binary reads commands from stdin and writes responses to stdout,
//! one line each. Logging goes to stderr, filtered by `RUST_LOG`.

use std::io::{self, BufRead};

use tracing::warn;
use tracing_subscriber::EnvFilter;

use rezzo::engine::Engine;
use rezzo::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new()?;

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => engine.set_option(name, value),
            Command::NewGame { size } => {
                if let Err(e) = engine.new_game(size) {
                    warn!("newgame: {}", e);
                }
            }
            Command::Position { layout } => {
                if let Err(e) = engine.set_position(&layout) {
                    warn!("position: {}", e);
                }
            }
            Command::Move { from, to } => engine.handle_move(from, to, &mut out)?,
            Command::Moves => engine.handle_moves(&mut out)?,
            Command::State => engine.handle_state(&mut out)?,
            Command::Layout => engine.handle_layout(&mut out)?,
            Command::Quit => break,
        }
    }

    Ok(())
}
