//! Error types returned by the engine.

use crate::board::{MAX_SIZE, MIN_SIZE};

/// Why a submitted intent was refused. The game is left exactly as it was
/// before the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("invalid move")]
    InvalidMove,

    #[error("must move a different piece, and trains may only open a turn")]
    PhaseViolation,

    #[error("cannot move two pieces to the last row in one turn")]
    DoubleGoalViolation,

    #[error("position repeats an earlier one (super ko)")]
    RepetitionViolation,

    #[error("game is over")]
    GameOver,
}

/// Invalid game configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("board size {0} is outside the supported range {min}..={max}", min = MIN_SIZE, max = MAX_SIZE)]
    InvalidSize(usize),
}
