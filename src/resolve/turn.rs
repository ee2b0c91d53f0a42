//! Turn sequencing.
//!
//! A turn is either one train slide or up to two single moves by different
//! pieces. The mover's very first turn of the game is a single move only.
//! After a first single move the turn carries on only if some other piece
//! has a step available; a piece that has just reached the goal row does
//! not let a second piece follow it there.

use serde::Serialize;

use crate::board::{Board, Coord, Side};
use crate::error::MoveError;
use crate::movegen::any_other_single_step;

/// Position within the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TurnPhase {
    /// Nothing moved yet this turn.
    Opening,
    /// One single move made; a different piece may follow.
    FollowUp,
}

impl TurnPhase {
    /// Numeric phase as shown to clients: 0 or 1.
    pub const fn number(self) -> u8 {
        match self {
            TurnPhase::Opening => 0,
            TurnPhase::FollowUp => 1,
        }
    }
}

/// Whether a move hands the turn over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// The same side moves again.
    Continue,
    /// The turn passes to the opponent.
    EndTurn,
}

/// Who is on move and how far through their turn they are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnState {
    pub to_move: Side,
    pub phase: TurnPhase,
    /// Where the piece moved earlier this turn now stands.
    pub first_moved: Option<Coord>,
    /// Set until the first mover finishes their first turn.
    pub opening_turn: bool,
}

impl TurnState {
    /// State at the start of a game, `first` to move.
    pub fn new(first: Side) -> Self {
        TurnState {
            to_move: first,
            phase: TurnPhase::Opening,
            first_moved: None,
            opening_turn: true,
        }
    }

    /// State at the start of a turn in an arbitrary position.
    pub fn resumed(to_move: Side) -> Self {
        TurnState {
            opening_turn: false,
            ..TurnState::new(to_move)
        }
    }

    /// Train slides are available only as the first move of a turn, and
    /// never on the opening turn.
    pub fn trains_allowed(&self) -> bool {
        self.phase == TurnPhase::Opening && !self.opening_turn
    }

    /// Checks that a single move from `from` may be attempted now.
    pub fn admit_single(&self, from: Coord) -> Result<(), MoveError> {
        if self.phase == TurnPhase::FollowUp && self.first_moved == Some(from) {
            return Err(MoveError::PhaseViolation);
        }
        Ok(())
    }

    /// Checks that a train slide may be attempted now.
    pub fn admit_train(&self) -> Result<(), MoveError> {
        if self.phase == TurnPhase::FollowUp {
            return Err(MoveError::PhaseViolation);
        }
        Ok(())
    }

    /// Decides what follows a single move that has just landed on `to`.
    /// `board` is the position after the move.
    pub fn after_single(&self, board: &Board, to: Coord) -> Result<Continuation, MoveError> {
        let goal = self.to_move.goal_row(board.size()) as i32;
        match self.phase {
            TurnPhase::Opening if self.opening_turn => Ok(Continuation::EndTurn),
            TurnPhase::Opening => {
                let landed_on_goal = to.row == goal;
                let allowed = |d: Coord| !landed_on_goal || d.row != goal;
                if any_other_single_step(board, self.to_move, to, allowed) {
                    Ok(Continuation::Continue)
                } else {
                    Ok(Continuation::EndTurn)
                }
            }
            TurnPhase::FollowUp => {
                let first_on_goal = self.first_moved.is_some_and(|c| c.row == goal);
                if first_on_goal && to.row == goal {
                    return Err(MoveError::DoubleGoalViolation);
                }
                Ok(Continuation::EndTurn)
            }
        }
    }

    /// Side that will be on move once `continuation` takes effect.
    pub fn next_to_move(&self, continuation: Continuation) -> Side {
        match continuation {
            Continuation::Continue => self.to_move,
            Continuation::EndTurn => self.to_move.opponent(),
        }
    }

    /// Commits a move that landed on `moved_to`.
    pub fn advance(&mut self, continuation: Continuation, moved_to: Coord) {
        match continuation {
            Continuation::Continue => {
                self.phase = TurnPhase::FollowUp;
                self.first_moved = Some(moved_to);
            }
            Continuation::EndTurn => {
                self.to_move = self.to_move.opponent();
                self.phase = TurnPhase::Opening;
                self.first_moved = None;
                self.opening_turn = false;
            }
        }
    }
}
