//! Board coordinates and step directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A square on the board, addressed by row and column.
///
/// Signed so that direction arithmetic can step off the board and be
/// rejected by a bounds check instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    #[serde(rename = "r")]
    pub row: i32,
    #[serde(rename = "c")]
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Coord { row, col }
    }

    /// Returns the coordinate `steps` squares away along `dir`.
    pub const fn step(self, dir: Direction, steps: i32) -> Coord {
        Coord {
            row: self.row + dir.dr * steps,
            col: self.col + dir.dc * steps,
        }
    }

    /// Returns the coordinate one square away along `dir`.
    pub const fn next(self, dir: Direction) -> Coord {
        self.step(dir, 1)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// Error returned when a `row,col` string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid coordinate: '{0}'")]
pub struct ParseCoordError(pub String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let (row, col) = s.split_once(',').ok_or_else(err)?;
        let row = row.trim().parse().map_err(|_| err())?;
        let col = col.trim().parse().map_err(|_| err())?;
        Ok(Coord { row, col })
    }
}

/// A (row, column) offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Direction {
    pub dr: i32,
    pub dc: i32,
}

impl Direction {
    pub const fn new(dr: i32, dc: i32) -> Self {
        Direction { dr, dc }
    }

    /// Returns the direction pointing the opposite way.
    pub const fn reverse(self) -> Direction {
        Direction { dr: -self.dr, dc: -self.dc }
    }

    /// True if `other` lies on the same line as `self`, in either sense.
    pub fn is_parallel(self, other: Direction) -> bool {
        self == other || self == other.reverse()
    }
}

/// The eight king steps. These are also the eight train axes.
pub const KING_STEPS: [Direction; 8] = [
    Direction::new(-1, -1),
    Direction::new(-1, 0),
    Direction::new(-1, 1),
    Direction::new(0, -1),
    Direction::new(0, 1),
    Direction::new(1, -1),
    Direction::new(1, 0),
    Direction::new(1, 1),
];

/// The eight knight leaps.
pub const KNIGHT_LEAPS: [Direction; 8] = [
    Direction::new(-2, -1),
    Direction::new(-2, 1),
    Direction::new(-1, -2),
    Direction::new(-1, 2),
    Direction::new(1, -2),
    Direction::new(1, 2),
    Direction::new(2, -1),
    Direction::new(2, 1),
];

/// Train axes, one per direction of travel.
pub const AXES: [Direction; 8] = KING_STEPS;

/// One representative direction per line: vertical, horizontal, both diagonals.
pub const LINES: [Direction; 4] = [
    Direction::new(1, 0),
    Direction::new(0, 1),
    Direction::new(1, 1),
    Direction::new(1, -1),
];
