//! Move resolution.
//!
//! Applies moves to the board, sequences turns, guards against repeated
//! positions, and detects wins.

pub mod apply;
pub mod superko;
pub mod turn;
pub mod win;

pub use apply::Position;
pub use superko::{History, ZobristKeys, DEFAULT_ZOBRIST_SEED};
pub use turn::{Continuation, TurnPhase, TurnState};
pub use win::{check_winner, goal_threatened, GameStatus};
