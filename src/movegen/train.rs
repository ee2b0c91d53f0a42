//! Train move generation.
//!
//! A train is a straight run of two or more same-colored pieces. Selecting
//! its tail, the train may slide forward along its own axis up to as many
//! squares as it has pieces. Empty squares are plain destinations; the first
//! opposing piece in the way may be captured depending on its alignment,
//! and any own piece blocks the axis.

use crate::board::{Alignment, Board, Coord, Direction, Side, TrainMove, AXES};

use super::alignment::analyze;

/// What a train finds on a square ahead of its head.
enum Scan {
    /// Empty; a destination, and scanning continues.
    Open,
    /// An enemy piece that can be captured; a destination, and scanning stops.
    Capture(Alignment),
    /// Own piece, or an enemy train too long to take; scanning stops.
    Blocked,
}

fn scan(board: &Board, at: Coord, axis: Direction, side: Side, length: usize) -> Scan {
    match board.get(at) {
        None => Scan::Open,
        Some(s) if s == side => Scan::Blocked,
        Some(enemy) => match analyze(board, at, axis, enemy) {
            Alignment::SameOrientation { length: defenders } if defenders >= length => {
                Scan::Blocked
            }
            alignment => Scan::Capture(alignment),
        },
    }
}

/// Generates the slides available to the train whose tail is `tail` and
/// which extends along `axis`. Returns nothing if no train of at least two
/// pieces lies that way.
pub fn train_moves_along(board: &Board, tail: Coord, axis: Direction) -> Vec<TrainMove> {
    let side = match board.get(tail) {
        Some(s) => s,
        None => return Vec::new(),
    };

    let mut head = tail;
    let mut length = 1;
    while board.is_side(head.next(axis), side) {
        head = head.next(axis);
        length += 1;
    }
    if length < 2 {
        return Vec::new();
    }

    let mut moves = Vec::new();
    for dist in 1..=length as i32 {
        let dest = head.step(axis, dist);
        if !board.contains(dest) {
            break;
        }
        let capture = match scan(board, dest, axis, side, length) {
            Scan::Open => None,
            Scan::Capture(alignment) => Some(alignment),
            Scan::Blocked => break,
        };
        moves.push(TrainMove {
            tail,
            head,
            dest,
            axis,
            length,
            capture,
        });
        if capture.is_some() {
            break;
        }
    }
    moves
}

/// Generates the slides of every train whose tail is `tail`, over all eight
/// axes.
pub fn train_moves(board: &Board, tail: Coord) -> Vec<TrainMove> {
    AXES.iter()
        .flat_map(|&axis| train_moves_along(board, tail, axis))
        .collect()
}

/// Generates every train slide available to `side`.
pub fn all_train_moves(board: &Board, side: Side) -> Vec<TrainMove> {
    board
        .pieces(side)
        .flat_map(|tail| train_moves(board, tail))
        .collect()
}
