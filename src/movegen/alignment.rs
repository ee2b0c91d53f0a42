//! Enemy alignment analysis.
//!
//! When a train meets an opposing piece, whether it may capture depends on
//! how that piece is arranged: a lone piece or one braced along a different
//! line can be taken, while an enemy train lying along the attacking axis
//! can only be taken by a strictly longer train.

use crate::board::{Alignment, Board, Coord, Direction, Side, LINES};

/// Counts contiguous pieces of `side` starting one step from `from` along
/// `dir`. The starting square itself is not counted.
pub fn run_length(board: &Board, from: Coord, dir: Direction, side: Side) -> usize {
    let mut count = 0;
    let mut c = from.next(dir);
    while board.is_side(c, side) {
        count += 1;
        c = c.next(dir);
    }
    count
}

/// Length of the full `side` run through `at` along the line of `dir`,
/// counting both directions and `at` itself.
pub fn line_length(board: &Board, at: Coord, dir: Direction, side: Side) -> usize {
    1 + run_length(board, at, dir, side) + run_length(board, at, dir.reverse(), side)
}

/// Classifies the `enemy` piece at `at` as met by a train travelling along
/// `axis`.
pub fn analyze(board: &Board, at: Coord, axis: Direction, enemy: Side) -> Alignment {
    let length = line_length(board, at, axis, enemy);
    if length > 1 {
        return Alignment::SameOrientation { length };
    }

    let braced = LINES
        .iter()
        .filter(|line| !line.is_parallel(axis))
        .any(|&line| line_length(board, at, line, enemy) > 1);

    if braced {
        Alignment::DiffOrientation
    } else {
        Alignment::Isolated
    }
}
