//! Single-piece move generation.
//!
//! A lone piece may step to any of the eight adjacent squares or leap to any
//! of the eight knight squares, provided the destination is on the board and
//! empty. Single moves never capture.

use crate::board::{Board, Coord, KING_STEPS, KNIGHT_LEAPS};

/// Returns every empty square reachable from `from` by a king step or a
/// knight leap. Returns nothing if `from` is empty.
pub fn single_steps(board: &Board, from: Coord) -> Vec<Coord> {
    if board.get(from).is_none() {
        return Vec::new();
    }
    KING_STEPS
        .iter()
        .chain(KNIGHT_LEAPS.iter())
        .map(|&d| from.next(d))
        .filter(|&to| board.is_vacant(to))
        .collect()
}

/// Returns true if the piece on `from` has at least one destination that
/// `allowed` accepts.
pub fn has_single_step(board: &Board, from: Coord, allowed: impl Fn(Coord) -> bool) -> bool {
    single_steps(board, from).into_iter().any(allowed)
}
