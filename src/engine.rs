//! Engine state management.
//!
//! Holds the current game and engine options between protocol commands,
//! and writes each command's response.

use std::collections::HashMap;
use std::io::{self, Write};

use tracing::warn;

use crate::board::Coord;
use crate::error::ConfigError;
use crate::game::{Game, GameConfig};
use crate::protocol::layout::{encode_layout, parse_layout, LayoutError};

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub game: Game,
    pub config: GameConfig,
    pub options: HashMap<String, String>,
}

impl Engine {
    /// Creates an engine with a default game in progress.
    pub fn new() -> Result<Self, ConfigError> {
        let config = GameConfig::default();
        Ok(Engine {
            game: Game::new(config)?,
            config,
            options: HashMap::new(),
        })
    }

    /// Starts a new game, on a board of `size` if given, else the
    /// configured size.
    pub fn new_game(&mut self, size: Option<usize>) -> Result<(), ConfigError> {
        let config = GameConfig {
            size: size.unwrap_or(self.config.size),
            ..self.config
        };
        self.game = Game::new(config)?;
        Ok(())
    }

    /// Replaces the game with one starting from a layout string.
    pub fn set_position(&mut self, layout: &str) -> Result<(), LayoutError> {
        let (board, to_move) = parse_layout(layout)?;
        self.game = Game::from_position(board, to_move, self.config.zobrist_seed)
            .map_err(|ConfigError::InvalidSize(n)| LayoutError::InvalidSize(n))?;
        Ok(())
    }

    /// Sets an engine option. `Size` and `Seed` apply to the next game.
    pub fn set_option(&mut self, name: String, value: Option<String>) {
        let parsed = value.as_deref().and_then(|v| v.parse::<u64>().ok());
        match (name.as_str(), parsed) {
            ("Size", Some(size)) => self.config.size = size as usize,
            ("Seed", Some(seed)) => self.config.zobrist_seed = seed,
            ("Size" | "Seed", None) => warn!("option {} needs a numeric value", name),
            _ => {}
        }
        self.options.insert(name, value.unwrap_or_default());
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles `move`: replies `ok <outcome json>` or `error <reason>`.
    pub fn handle_move<W: Write>(&mut self, from: Coord, to: Coord, out: &mut W) -> io::Result<()> {
        match self.game.process_intent(from, to) {
            Ok(outcome) => writeln!(out, "ok {}", serde_json::to_string(&outcome)?)?,
            Err(e) => writeln!(out, "error {}", e)?,
        }
        out.flush()
    }

    /// Handles `moves`: lists available intents as `from-to` pairs.
    pub fn handle_moves<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let pairs: Vec<String> = self
            .game
            .legal_intents()
            .iter()
            .map(|(from, to)| format!("{}-{}", from, to))
            .collect();
        writeln!(out, "moves {}", pairs.join(" "))?;
        out.flush()
    }

    /// Handles `state`: the full client-visible snapshot as JSON.
    pub fn handle_state<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "state {}", serde_json::to_string(&self.game.snapshot())?)?;
        out.flush()
    }

    /// Handles `layout`: the current position in layout notation.
    pub fn handle_layout<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "layout {}", encode_layout(self.game.board(), self.game.to_move()))?;
        out.flush()
    }
}
