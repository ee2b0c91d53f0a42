//! Sides and cell occupancy.

use serde::{Deserialize, Serialize};

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Starts on the top two rows and always moves first.
    Red,
    /// Starts on the bottom two rows.
    Blue,
}

/// Both sides in move order.
pub const ALL_SIDES: [Side; 2] = [Side::Red, Side::Blue];

impl Side {
    /// Returns the other side.
    pub const fn opponent(self) -> Side {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }

    /// Returns the row this side must reach to win on a board of `size` rows.
    pub const fn goal_row(self, size: usize) -> usize {
        match self {
            Side::Red => size - 1,
            Side::Blue => 0,
        }
    }

    /// Index into per-side tables.
    pub const fn index(self) -> usize {
        match self {
            Side::Red => 0,
            Side::Blue => 1,
        }
    }

    /// Numeric cell code used on the wire: 1 for red, 2 for blue.
    pub const fn code(self) -> u8 {
        match self {
            Side::Red => 1,
            Side::Blue => 2,
        }
    }

    /// Returns the single-character layout abbreviation.
    pub const fn layout_char(self) -> char {
        match self {
            Side::Red => 'r',
            Side::Blue => 'b',
        }
    }

    /// Parses a side from its single-character layout abbreviation.
    pub fn from_layout_char(c: char) -> Option<Side> {
        match c {
            'r' => Some(Side::Red),
            'b' => Some(Side::Blue),
            _ => None,
        }
    }
}

/// Contents of a single square: empty or holding one side's piece.
pub type Cell = Option<Side>;

/// Numeric wire code for a cell: 0 empty, 1 red, 2 blue.
pub fn cell_code(cell: Cell) -> u8 {
    cell.map_or(0, Side::code)
}
