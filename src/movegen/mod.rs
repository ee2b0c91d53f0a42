//! Legal move generation.
//!
//! Generates single-piece steps and train slides from a square, and the
//! alignment analysis that decides which enemy pieces a train may capture.
//! Generation looks only at the board; turn rules (phase, opening turn,
//! first-moved piece) are applied by the caller.

pub mod alignment;
pub mod single;
pub mod train;

pub use alignment::analyze;
pub use single::{has_single_step, single_steps};
pub use train::{all_train_moves, train_moves, train_moves_along};

use crate::board::{Board, Coord, Move, Side};

/// Generates every single and train move available from `from`, singles
/// first.
pub fn moves_from(board: &Board, from: Coord) -> Vec<Move> {
    let singles = single_steps(board, from)
        .into_iter()
        .map(|to| Move::Single { from, to });
    let trains = train_moves(board, from).into_iter().map(Move::Train);
    singles.chain(trains).collect()
}

/// Returns true if any piece of `side` other than `except` has a single step
/// that `allowed` accepts.
pub fn any_other_single_step(
    board: &Board,
    side: Side,
    except: Coord,
    allowed: impl Fn(Coord) -> bool + Copy,
) -> bool {
    board
        .pieces(side)
        .filter(|&c| c != except)
        .any(|c| has_single_step(board, c, allowed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_from_lists_singles_before_trains() {
        let board = Board::initial(13);
        let moves = moves_from(&board, Coord::new(0, 6));
        assert!(!moves.is_empty());
        let first_train = moves.iter().position(|m| m.is_train()).unwrap();
        assert!(moves[..first_train].iter().all(|m| !m.is_train()));
        assert!(moves[first_train..].iter().all(|m| m.is_train()));
    }

    #[test]
    fn other_piece_check_skips_the_excluded_square() {
        let mut board = Board::empty(7);
        board.set(Coord::new(3, 3), Some(Side::Red));
        assert!(!any_other_single_step(&board, Side::Red, Coord::new(3, 3), |_| true));
        board.set(Coord::new(0, 0), Some(Side::Red));
        assert!(any_other_single_step(&board, Side::Red, Coord::new(3, 3), |_| true));
        assert!(!any_other_single_step(&board, Side::Red, Coord::new(3, 3), |_| false));
    }
}
