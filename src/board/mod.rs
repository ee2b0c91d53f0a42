//! Board representation and move records.
//!
//! Contains the grid, coordinates and step tables, sides, and the move
//! types shared by generation and execution.

pub mod coord;
pub mod moves;
pub mod side;
pub mod state;

pub use coord::{Coord, Direction, ParseCoordError, AXES, KING_STEPS, KNIGHT_LEAPS, LINES};
pub use moves::{Alignment, Move, TrainMove};
pub use side::{cell_code, Cell, Side, ALL_SIDES};
pub use state::{Board, DEFAULT_SIZE, HOME_ROWS, MAX_SIZE, MIN_SIZE};
