//! Game state management.
//!
//! `Game` owns the board, the turn state, and the position history of one
//! match, and is the only way to change them. Each intent is validated
//! against generated moves, applied to a copy of the position, checked by
//! the turn rules and the super-ko guard, and only then committed. A
//! refused intent leaves every part of the game untouched.

use serde::Serialize;
use tracing::{debug, info};

use crate::board::{Board, Coord, Move, Side, DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::error::{ConfigError, MoveError};
use crate::movegen::{moves_from, single_steps, train_moves};
use crate::resolve::{
    check_winner, Continuation, GameStatus, History, Position, TurnPhase, TurnState, ZobristKeys,
    DEFAULT_ZOBRIST_SEED,
};

/// Side that moves first in a new game.
pub const FIRST_SIDE: Side = Side::Red;

/// Settings for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Squares per side.
    pub size: usize,
    /// Seed for the position-hash keys.
    pub zobrist_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            zobrist_seed: DEFAULT_ZOBRIST_SEED,
        }
    }
}

impl GameConfig {
    /// Default settings on a board of `size`.
    pub fn with_size(size: usize) -> Self {
        GameConfig {
            size,
            ..GameConfig::default()
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if (MIN_SIZE..=MAX_SIZE).contains(&self.size) {
            Ok(())
        } else {
            Err(ConfigError::InvalidSize(self.size))
        }
    }
}

/// Result of an accepted intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveOutcome {
    /// The move that was played.
    #[serde(rename = "move")]
    pub mv: Move,
    /// Squares changed by the move, for display.
    pub highlights: Vec<Coord>,
    /// True if the turn passed to the opponent.
    pub turn_ended: bool,
    pub status: GameStatus,
}

/// Everything a client needs to draw the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardUpdate {
    pub board: Vec<Vec<u8>>,
    pub turn: Side,
    pub turn_phase: u8,
    pub highlights: Vec<Coord>,
    pub game_over: bool,
    pub winner: Option<Side>,
}

/// One match in progress.
#[derive(Debug, Clone)]
pub struct Game {
    keys: ZobristKeys,
    position: Position,
    history: History,
    turn: TurnState,
    status: GameStatus,
    last_highlights: Vec<Coord>,
}

impl Game {
    /// Starts a new game from the standard layout.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let board = Board::initial(config.size);
        Ok(Game::start(board, TurnState::new(FIRST_SIDE), config.zobrist_seed))
    }

    /// Starts a game from an arbitrary position with `to_move` about to
    /// begin a turn. The opening-turn restriction does not apply.
    pub fn from_position(board: Board, to_move: Side, zobrist_seed: u64) -> Result<Self, ConfigError> {
        GameConfig {
            size: board.size(),
            zobrist_seed,
        }
        .validate()?;
        Ok(Game::start(board, TurnState::resumed(to_move), zobrist_seed))
    }

    fn start(board: Board, turn: TurnState, zobrist_seed: u64) -> Self {
        let keys = ZobristKeys::new(board.size(), zobrist_seed);
        let position = Position::new(board, &keys);
        let history = History::seeded(position.hash() ^ keys.to_move(turn.to_move));
        Game {
            keys,
            position,
            history,
            turn,
            status: GameStatus::InProgress,
            last_highlights: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        self.position.board()
    }

    pub fn size(&self) -> usize {
        self.board().size()
    }

    pub fn to_move(&self) -> Side {
        self.turn.to_move
    }

    pub fn phase(&self) -> TurnPhase {
        self.turn.phase
    }

    pub fn turn(&self) -> &TurnState {
        &self.turn
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Number of distinct positions recorded so far, the start included.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Signature of the current board with the current side to move.
    pub fn signature(&self) -> u64 {
        self.position.hash() ^ self.keys.to_move(self.turn.to_move)
    }

    pub fn keys(&self) -> &ZobristKeys {
        &self.keys
    }

    /// Highlights from the last accepted move.
    pub fn last_highlights(&self) -> &[Coord] {
        &self.last_highlights
    }

    /// Snapshot of the full client-visible state.
    pub fn snapshot(&self) -> BoardUpdate {
        BoardUpdate {
            board: self.board().to_rows(),
            turn: self.turn.to_move,
            turn_phase: self.turn.phase.number(),
            highlights: self.last_highlights.clone(),
            game_over: self.status.is_over(),
            winner: self.status.winner(),
        }
    }

    /// Resolves an intent to the generated move it names, applying the
    /// turn-phase rules. Singles take precedence over trains.
    pub fn find_move(&self, from: Coord, to: Coord) -> Result<Move, MoveError> {
        if self.status.is_over() {
            return Err(MoveError::GameOver);
        }
        let board = self.board();
        if !board.is_side(from, self.turn.to_move) {
            return Err(MoveError::InvalidMove);
        }

        match moves_from(board, from).into_iter().find(|m| m.target() == to) {
            Some(Move::Single { from, to }) => {
                self.turn.admit_single(from)?;
                Ok(Move::Single { from, to })
            }
            Some(Move::Train(train)) => {
                self.turn.admit_train()?;
                if !self.turn.trains_allowed() {
                    return Err(MoveError::InvalidMove);
                }
                Ok(Move::Train(train))
            }
            None => Err(MoveError::InvalidMove),
        }
    }

    /// Attempts to move from `from` to `to` for the side on move.
    ///
    /// On success the board, history, and turn state have all advanced; on
    /// failure none of them has changed.
    pub fn process_intent(&mut self, from: Coord, to: Coord) -> Result<MoveOutcome, MoveError> {
        let side = self.turn.to_move;
        let result = self.find_move(from, to).and_then(|mv| self.execute(mv));
        match &result {
            Ok(outcome) => debug!(
                ?side,
                %from,
                %to,
                turn_ended = outcome.turn_ended,
                "intent accepted"
            ),
            Err(e) => debug!(?side, %from, %to, error = %e, "intent rejected"),
        }
        result
    }

    fn execute(&mut self, mv: Move) -> Result<MoveOutcome, MoveError> {
        let mover = self.turn.to_move;
        let mut next = self.position.clone();
        next.apply(&self.keys, &mv);

        let continuation = match mv {
            Move::Single { to, .. } => self.turn.after_single(next.board(), to)?,
            Move::Train(_) => Continuation::EndTurn,
        };

        let next_side = self.turn.next_to_move(continuation);
        let signature = next.hash() ^ self.keys.to_move(next_side);
        if self.history.contains(signature) {
            return Err(MoveError::RepetitionViolation);
        }

        self.position = next;
        self.history.record(signature);
        self.turn.advance(continuation, mv.target());

        let turn_ended = continuation == Continuation::EndTurn;
        if turn_ended {
            self.status = check_winner(self.position.board(), mover);
            if let GameStatus::Won(winner) = self.status {
                info!(?winner, "game over");
            }
        }

        self.last_highlights = mv.highlights();
        Ok(MoveOutcome {
            mv,
            highlights: self.last_highlights.clone(),
            turn_ended,
            status: self.status,
        })
    }

    /// Every (from, to) pair the side on move could submit now. Some may
    /// still be refused by the super-ko or double-goal rules.
    pub fn legal_intents(&self) -> Vec<(Coord, Coord)> {
        if self.status.is_over() {
            return Vec::new();
        }
        let board = self.board();
        let mut intents = Vec::new();
        for from in board.pieces(self.turn.to_move) {
            if self.turn.admit_single(from).is_ok() {
                intents.extend(single_steps(board, from).into_iter().map(|to| (from, to)));
            }
            if self.turn.trains_allowed() {
                intents.extend(train_moves(board, from).into_iter().map(|m| (from, m.dest)));
            }
        }
        intents
    }

    /// True if the game is running but the side on move has nothing to
    /// submit.
    pub fn is_stalled(&self) -> bool {
        !self.status.is_over() && self.legal_intents().is_empty()
    }
}
