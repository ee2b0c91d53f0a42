//! Win detection.
//!
//! Checked only when a turn passes. The side now on move wins outright if
//! it already holds a square on its goal row. Otherwise the side that just
//! moved wins if it holds a goal-row square that no enemy train can capture
//! on the coming move.

use serde::Serialize;

use crate::board::{Board, Side};
use crate::movegen::all_train_moves;

/// Whether a game is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won(Side),
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        matches!(self, GameStatus::Won(_))
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameStatus::Won(side) => Some(side),
            GameStatus::InProgress => None,
        }
    }
}

/// Returns true if `attacker` has a capturing train slide onto one of
/// `defender`'s goal-row pieces.
pub fn goal_threatened(board: &Board, defender: Side, attacker: Side) -> bool {
    let goal = board.pieces_on_row(defender, defender.goal_row(board.size()));
    if goal.is_empty() {
        return false;
    }
    all_train_moves(board, attacker)
        .iter()
        .any(|m| m.is_capture() && goal.contains(&m.dest))
}

/// Evaluates the board after `mover` has finished a turn.
pub fn check_winner(board: &Board, mover: Side) -> GameStatus {
    let next = mover.opponent();
    if board.on_goal(next) {
        return GameStatus::Won(next);
    }
    if board.on_goal(mover) && !goal_threatened(board, mover, next) {
        return GameStatus::Won(mover);
    }
    GameStatus::InProgress
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Coord;

    fn board_with(size: usize, pieces: &[(i32, i32, Side)]) -> Board {
        let mut board = Board::empty(size);
        for &(r, c, side) in pieces {
            board.set(Coord::new(r, c), Some(side));
        }
        board
    }

    #[test]
    fn nobody_on_goal_means_no_winner() {
        let board = Board::initial(9);
        assert_eq!(check_winner(&board, Side::Red), GameStatus::InProgress);
        assert_eq!(check_winner(&board, Side::Blue), GameStatus::InProgress);
    }

    #[test]
    fn unchallenged_goal_piece_wins_for_mover() {
        let board = board_with(9, &[(8, 4, Side::Red), (0, 0, Side::Blue)]);
        assert_eq!(check_winner(&board, Side::Red), GameStatus::Won(Side::Red));
    }

    #[test]
    fn side_on_move_already_on_goal_wins_first() {
        let board = board_with(9, &[(8, 4, Side::Red), (0, 4, Side::Blue)]);
        // Red just moved; blue is on move and already sits on row 0.
        assert_eq!(check_winner(&board, Side::Red), GameStatus::Won(Side::Blue));
    }

    #[test]
    fn capturable_goal_piece_is_not_yet_a_win() {
        // A blue train on row 8 can slide onto red's goal piece.
        let board = board_with(
            9,
            &[(8, 4, Side::Red), (8, 6, Side::Blue), (8, 7, Side::Blue)],
        );
        assert!(goal_threatened(&board, Side::Red, Side::Blue));
        assert_eq!(check_winner(&board, Side::Red), GameStatus::InProgress);
    }

    #[test]
    fn blocked_train_is_no_threat() {
        let board = board_with(
            9,
            &[(8, 4, Side::Red), (8, 5, Side::Red), (8, 6, Side::Blue), (8, 7, Side::Blue)],
        );
        // The red pair is aligned with the blue pair and equally long.
        assert!(!goal_threatened(&board, Side::Red, Side::Blue));
        assert_eq!(check_winner(&board, Side::Red), GameStatus::Won(Side::Red));
    }

    #[test]
    fn status_accessors() {
        assert!(!GameStatus::InProgress.is_over());
        assert_eq!(GameStatus::InProgress.winner(), None);
        assert!(GameStatus::Won(Side::Blue).is_over());
        assert_eq!(GameStatus::Won(Side::Blue).winner(), Some(Side::Blue));
    }
}
