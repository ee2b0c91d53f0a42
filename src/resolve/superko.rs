//! Position signatures and the super-ko history.
//!
//! Every (cell, side) pair gets its own random key, plus one key marking
//! blue to move. A position's signature is the XOR of the keys of all
//! occupied cells, with the side-to-move key folded in when blue is on
//! move. Keys come from a seeded generator so signatures are reproducible
//! for a given seed.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Coord, Side};

/// Seed used when a game is created without one.
pub const DEFAULT_ZOBRIST_SEED: u64 = 0x5EED_2E22_0C0F_FEE5;

/// Random keys for incremental position hashing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristKeys {
    size: usize,
    /// Key for each square, indexed by `Side::index`.
    cells: Vec<[u64; 2]>,
    blue_to_move: u64,
}

impl ZobristKeys {
    /// Generates keys for a board of `size` squares per side. All keys are
    /// non-zero and pairwise distinct.
    pub fn new(size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut seen = HashSet::with_capacity(size * size * 2 + 1);
        let mut draw = || loop {
            let key: u64 = rng.gen();
            if key != 0 && seen.insert(key) {
                return key;
            }
        };

        let blue_to_move = draw();
        let cells = (0..size * size).map(|_| [draw(), draw()]).collect();
        ZobristKeys {
            size,
            cells,
            blue_to_move,
        }
    }

    /// Key for `side` occupying `c`. Off-board squares have no key.
    pub fn piece(&self, c: Coord, side: Side) -> u64 {
        let n = self.size as i32;
        if c.row < 0 || c.row >= n || c.col < 0 || c.col >= n {
            return 0;
        }
        self.cells[c.row as usize * self.size + c.col as usize][side.index()]
    }

    /// Key folded in when `to_move` is blue.
    pub fn to_move(&self, to_move: Side) -> u64 {
        match to_move {
            Side::Red => 0,
            Side::Blue => self.blue_to_move,
        }
    }

    /// Hash of the pieces on `board`, ignoring the side to move.
    pub fn board_hash(&self, board: &Board) -> u64 {
        board
            .occupied()
            .fold(0, |h, (c, side)| h ^ self.piece(c, side))
    }

    /// Full signature of `board` with `to_move` next to act.
    pub fn signature(&self, board: &Board, to_move: Side) -> u64 {
        self.board_hash(board) ^ self.to_move(to_move)
    }
}

/// Every signature reached so far in a game. Only ever grows.
#[derive(Debug, Clone, Default)]
pub struct History {
    seen: HashSet<u64>,
}

impl History {
    /// Creates a history holding just the starting position.
    pub fn seeded(initial: u64) -> Self {
        let mut history = History::default();
        history.record(initial);
        history
    }

    pub fn contains(&self, signature: u64) -> bool {
        self.seen.contains(&signature)
    }

    /// Records a signature. Returns false if it was already present.
    pub fn record(&mut self, signature: u64) -> bool {
        self.seen.insert(signature)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
