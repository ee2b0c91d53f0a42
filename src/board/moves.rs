//! Move records produced by move generation.
//!
//! A move is either a single-piece step or a train slide. Train records
//! carry the whole formation (tail, head, axis, length) so that applying the
//! move needs no further board analysis.

use serde::Serialize;

use super::coord::{Coord, Direction};

/// How an opposing piece met by a train is arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Alignment {
    /// Part of an enemy run of `length` pieces lying along the attacking axis.
    SameOrientation { length: usize },
    /// Alone on the attacking axis but part of a run along another line.
    DiffOrientation,
    /// Not part of any enemy run.
    Isolated,
}

/// A train slide from one formation position to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TrainMove {
    /// The square the train was selected from.
    pub tail: Coord,
    /// The train piece farthest along the axis.
    pub head: Coord,
    /// Where the head ends up.
    pub dest: Coord,
    /// Direction of travel.
    pub axis: Direction,
    /// Number of pieces in the train.
    pub length: usize,
    /// Classification of the captured piece, if this slide captures.
    pub capture: Option<Alignment>,
}

impl TrainMove {
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Squares the train occupies before moving, tail first.
    pub fn cars(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.length as i32).map(move |i| self.tail.step(self.axis, i))
    }

    /// Number of squares each piece of the train travels.
    pub fn distance(&self) -> i32 {
        (self.dest.row - self.head.row)
            .abs()
            .max((self.dest.col - self.head.col).abs())
    }
}

/// A move in either form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Move {
    /// One piece steps or leaps to an empty square.
    Single { from: Coord, to: Coord },
    /// A train of two or more pieces slides, possibly capturing.
    Train(TrainMove),
}

impl Move {
    /// The square the player selected.
    pub fn origin(&self) -> Coord {
        match self {
            Move::Single { from, .. } => *from,
            Move::Train(t) => t.tail,
        }
    }

    /// The square the player targeted.
    pub fn target(&self) -> Coord {
        match self {
            Move::Single { to, .. } => *to,
            Move::Train(t) => t.dest,
        }
    }

    pub fn is_train(&self) -> bool {
        matches!(self, Move::Train(_))
    }

    /// Squares a front end should mark as changed by this move.
    pub fn highlights(&self) -> Vec<Coord> {
        vec![self.origin(), self.target()]
    }
}
