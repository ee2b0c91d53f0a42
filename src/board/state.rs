//! The playing grid.
//!
//! Holds an N×N array of cells in row-major order. Every square is either
//! empty or holds a piece of one side; pieces carry no identity beyond
//! their color and position.

use super::coord::Coord;
use super::side::{cell_code, Cell, Side};

/// Smallest supported board: two home rows per side plus a gap row.
pub const MIN_SIZE: usize = 5;

/// Largest supported board.
pub const MAX_SIZE: usize = 32;

/// Board size used when none is requested.
pub const DEFAULT_SIZE: usize = 13;

/// Number of rows each side fills at the start of a game.
pub const HOME_ROWS: usize = 2;

/// A square grid of cells.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board with no pieces.
    pub fn empty(size: usize) -> Self {
        Board {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Creates the starting position: red fills the top two rows, blue the
    /// bottom two.
    pub fn initial(size: usize) -> Self {
        let mut board = Board::empty(size);
        for row in 0..size {
            let side = if row < HOME_ROWS {
                Side::Red
            } else if row >= size.saturating_sub(HOME_ROWS) {
                Side::Blue
            } else {
                continue;
            };
            for col in 0..size {
                board.set(Coord::new(row as i32, col as i32), Some(side));
            }
        }
        board
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns true if the coordinate lies on the board.
    pub fn contains(&self, c: Coord) -> bool {
        let n = self.size as i32;
        c.row >= 0 && c.row < n && c.col >= 0 && c.col < n
    }

    fn index(&self, c: Coord) -> Option<usize> {
        self.contains(c)
            .then(|| c.row as usize * self.size + c.col as usize)
    }

    /// Returns the cell contents, or `None` for off-board coordinates.
    pub fn get(&self, c: Coord) -> Cell {
        self.index(c).and_then(|i| self.cells[i])
    }

    /// Returns true if `c` is on the board and holds a piece of `side`.
    pub fn is_side(&self, c: Coord, side: Side) -> bool {
        self.get(c) == Some(side)
    }

    /// Returns true if `c` is on the board and unoccupied.
    pub fn is_vacant(&self, c: Coord) -> bool {
        self.index(c).is_some_and(|i| self.cells[i].is_none())
    }

    /// Writes a cell and returns what was there before. Off-board writes are
    /// ignored.
    pub fn set(&mut self, c: Coord, cell: Cell) -> Cell {
        match self.index(c) {
            Some(i) => std::mem::replace(&mut self.cells[i], cell),
            None => None,
        }
    }

    /// Iterates over every occupied square with its owner.
    pub fn occupied(&self) -> impl Iterator<Item = (Coord, Side)> + '_ {
        let size = self.size;
        self.cells.iter().enumerate().filter_map(move |(i, cell)| {
            cell.map(|side| (Coord::new((i / size) as i32, (i % size) as i32), side))
        })
    }

    /// Iterates over the squares held by `side`, in row-major order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Coord> + '_ {
        self.occupied()
            .filter(move |&(_, s)| s == side)
            .map(|(c, _)| c)
    }

    /// Number of pieces `side` has on the board.
    pub fn count(&self, side: Side) -> usize {
        self.cells.iter().filter(|&&cell| cell == Some(side)).count()
    }

    /// Squares of `row` held by `side`.
    pub fn pieces_on_row(&self, side: Side, row: usize) -> Vec<Coord> {
        (0..self.size as i32)
            .map(|col| Coord::new(row as i32, col))
            .filter(|&c| self.is_side(c, side))
            .collect()
    }

    /// Returns true if `side` occupies any square of its own goal row.
    pub fn on_goal(&self, side: Side) -> bool {
        !self.pieces_on_row(side, side.goal_row(self.size)).is_empty()
    }

    /// Board rows as wire codes (0 empty, 1 red, 2 blue).
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|&cell| cell_code(cell)).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_board_has_no_pieces() {
        let board = Board::empty(7);
        assert_eq!(board.occupied().count(), 0);
        assert!(board.is_vacant(Coord::new(3, 3)));
    }

    #[test]
    fn initial_layout_fills_home_rows() {
        let board = Board::initial(DEFAULT_SIZE);
        assert_eq!(board.count(Side::Red), 2 * DEFAULT_SIZE);
        assert_eq!(board.count(Side::Blue), 2 * DEFAULT_SIZE);
        assert!(board.is_side(Coord::new(0, 0), Side::Red));
        assert!(board.is_side(Coord::new(1, 12), Side::Red));
        assert!(board.is_vacant(Coord::new(2, 5)));
        assert!(board.is_vacant(Coord::new(10, 5)));
        assert!(board.is_side(Coord::new(11, 0), Side::Blue));
        assert!(board.is_side(Coord::new(12, 12), Side::Blue));
    }

    #[test]
    fn bounds_check() {
        let board = Board::empty(5);
        assert!(board.contains(Coord::new(0, 0)));
        assert!(board.contains(Coord::new(4, 4)));
        assert!(!board.contains(Coord::new(-1, 0)));
        assert!(!board.contains(Coord::new(0, 5)));
        assert!(!board.is_vacant(Coord::new(5, 5)));
        assert_eq!(board.get(Coord::new(-3, 2)), None);
    }

    #[test]
    fn set_returns_previous_and_ignores_off_board() {
        let mut board = Board::empty(5);
        let c = Coord::new(2, 3);
        assert_eq!(board.set(c, Some(Side::Red)), None);
        assert_eq!(board.set(c, Some(Side::Blue)), Some(Side::Red));
        assert_eq!(board.set(Coord::new(9, 9), Some(Side::Red)), None);
        assert_eq!(board.count(Side::Blue), 1);
        assert_eq!(board.count(Side::Red), 0);
    }

    #[test]
    fn clone_is_independent() {
        let board = Board::initial(5);
        let mut copy = board.clone();
        copy.set(Coord::new(0, 0), None);
        assert!(board.is_side(Coord::new(0, 0), Side::Red));
        assert_ne!(board, copy);
    }

    #[test]
    fn goal_presence() {
        let mut board = Board::empty(5);
        assert!(!board.on_goal(Side::Red));
        board.set(Coord::new(4, 1), Some(Side::Red));
        board.set(Coord::new(4, 2), Some(Side::Blue));
        assert!(board.on_goal(Side::Red));
        assert!(!board.on_goal(Side::Blue));
        assert_eq!(board.pieces_on_row(Side::Red, 4), vec![Coord::new(4, 1)]);
    }

    #[test]
    fn rows_use_wire_codes() {
        let rows = Board::initial(5).to_rows();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec![1; 5]);
        assert_eq!(rows[2], vec![0; 5]);
        assert_eq!(rows[4], vec![2; 5]);
    }
}
