//! Applying moves to a board.
//!
//! `Position` pairs a board with the XOR hash of its pieces and keeps the
//! two in step: every write goes through `put`, which folds the old
//! occupant's key out and the new one's in.

use crate::board::{Alignment, Board, Cell, Coord, Move, TrainMove};

use super::superko::ZobristKeys;

/// A board together with its incrementally maintained piece hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    hash: u64,
}

impl Position {
    /// Wraps `board`, hashing it from scratch.
    pub fn new(board: Board, keys: &ZobristKeys) -> Self {
        let hash = keys.board_hash(&board);
        Position { board, hash }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Hash of the pieces, without the side-to-move key.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Writes `cell` at `c`, updating the hash.
    pub fn put(&mut self, keys: &ZobristKeys, c: Coord, cell: Cell) {
        if !self.board.contains(c) {
            return;
        }
        if let Some(old) = self.board.set(c, cell) {
            self.hash ^= keys.piece(c, old);
        }
        if let Some(new) = cell {
            self.hash ^= keys.piece(c, new);
        }
    }

    /// Applies a generated move. The move must have been generated from this
    /// position's board.
    pub fn apply(&mut self, keys: &ZobristKeys, mv: &Move) {
        match mv {
            Move::Single { from, to } => {
                let piece = self.board.get(*from);
                self.put(keys, *from, None);
                self.put(keys, *to, piece);
            }
            Move::Train(train) => self.apply_train(keys, train),
        }
    }

    fn apply_train(&mut self, keys: &ZobristKeys, train: &TrainMove) {
        let side = match self.board.get(train.tail) {
            Some(s) => s,
            None => return,
        };
        let enemy = side.opponent();

        if let Some(alignment) = train.capture {
            if self.board.is_side(train.dest, enemy) {
                self.put(keys, train.dest, None);
                // An aligned enemy train is removed whole: everything
                // contiguous beyond the target along the direction of travel.
                if let Alignment::SameOrientation { .. } = alignment {
                    let mut c = train.dest.next(train.axis);
                    while self.board.is_side(c, enemy) {
                        self.put(keys, c, None);
                        c = c.next(train.axis);
                    }
                }
            }
        }

        let shift = train.distance();
        let cars: Vec<Coord> = train.cars().collect();
        for &c in &cars {
            self.put(keys, c, None);
        }
        for &c in &cars {
            self.put(keys, c.step(train.axis, shift), Some(side));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Direction, Side};
    use crate::movegen::train_moves_along;

    const EAST: Direction = Direction::new(0, 1);

    fn keys() -> ZobristKeys {
        ZobristKeys::new(13, 99)
    }

    fn position_with(pieces: &[(i32, i32, Side)]) -> Position {
        let mut board = Board::empty(13);
        for &(r, c, side) in pieces {
            board.set(Coord::new(r, c), Some(side));
        }
        Position::new(board, &keys())
    }

    fn row(position: &Position, r: i32) -> Vec<Cell> {
        (0..13).map(|c| position.board().get(Coord::new(r, c))).collect()
    }

    #[test]
    fn single_move_relocates_piece_and_tracks_hash() {
        let keys = keys();
        let mut pos = position_with(&[(2, 2, Side::Red)]);
        pos.apply(&keys, &Move::Single { from: Coord::new(2, 2), to: Coord::new(4, 3) });
        assert!(pos.board().is_vacant(Coord::new(2, 2)));
        assert!(pos.board().is_side(Coord::new(4, 3), Side::Red));
        assert_eq!(pos.hash(), keys.board_hash(pos.board()));
    }

    #[test]
    fn plain_slide_shifts_whole_train() {
        let keys = keys();
        let mut pos = position_with(&[(6, 0, Side::Red), (6, 1, Side::Red), (6, 2, Side::Red)]);
        let slide = train_moves_along(pos.board(), Coord::new(6, 0), EAST)
            .into_iter()
            .find(|m| m.dest == Coord::new(6, 5))
            .unwrap();
        pos.apply(&keys, &Move::Train(slide));
        let r = Some(Side::Red);
        assert_eq!(
            row(&pos, 6),
            vec![None, None, None, r, r, r, None, None, None, None, None, None, None]
        );
        assert_eq!(pos.hash(), keys.board_hash(pos.board()));
    }

    #[test]
    fn short_slide_overlaps_old_squares() {
        let keys = keys();
        let mut pos = position_with(&[(6, 0, Side::Red), (6, 1, Side::Red), (6, 2, Side::Red)]);
        let slide = train_moves_along(pos.board(), Coord::new(6, 0), EAST)
            .into_iter()
            .find(|m| m.dest == Coord::new(6, 3))
            .unwrap();
        pos.apply(&keys, &Move::Train(slide));
        assert_eq!(pos.board().count(Side::Red), 3);
        assert!(pos.board().is_vacant(Coord::new(6, 0)));
        assert!(pos.board().is_side(Coord::new(6, 3), Side::Red));
        assert_eq!(pos.hash(), keys.board_hash(pos.board()));
    }

    #[test]
    fn capturing_isolated_piece_removes_only_target() {
        let keys = keys();
        let mut pos = position_with(&[
            (6, 0, Side::Red),
            (6, 1, Side::Red),
            (6, 2, Side::Blue),
            (7, 2, Side::Blue),
        ]);
        let slide = train_moves_along(pos.board(), Coord::new(6, 0), EAST)[0];
        assert_eq!(slide.capture, Some(Alignment::DiffOrientation));
        pos.apply(&keys, &Move::Train(slide));
        assert!(pos.board().is_side(Coord::new(6, 2), Side::Red));
        assert!(pos.board().is_side(Coord::new(7, 2), Side::Blue));
        assert_eq!(pos.board().count(Side::Blue), 1);
        assert_eq!(pos.hash(), keys.board_hash(pos.board()));
    }

    #[test]
    fn capturing_aligned_train_removes_all_of_it() {
        let keys = keys();
        let mut pieces: Vec<(i32, i32, Side)> = (0..4).map(|c| (6, c, Side::Red)).collect();
        pieces.extend((4..7).map(|c| (6, c, Side::Blue)));
        let mut pos = position_with(&pieces);
        let slide = train_moves_along(pos.board(), Coord::new(6, 0), EAST)[0];
        assert_eq!(slide.capture, Some(Alignment::SameOrientation { length: 3 }));
        pos.apply(&keys, &Move::Train(slide));
        assert_eq!(pos.board().count(Side::Blue), 0);
        assert_eq!(pos.board().count(Side::Red), 4);
        assert!(pos.board().is_side(Coord::new(6, 4), Side::Red));
        assert!(pos.board().is_vacant(Coord::new(6, 0)));
        assert!(pos.board().is_vacant(Coord::new(6, 5)));
        assert_eq!(pos.hash(), keys.board_hash(pos.board()));
    }
}
