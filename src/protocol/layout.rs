//! Layout notation for board positions.
//!
//! A compact single-line form, in the spirit of chess FEN:
//! `<rows> <side>`, where rows run from row 0 to row N-1 separated by `/`,
//! `r` and `b` are pieces, decimal numbers are runs of empty squares, and
//! `<side>` (`r` or `b`) is the side to move.
//!
//! The 5×5 starting position is `rrrrr/rrrrr/5/bbbbb/bbbbb r`.

use crate::board::{Board, Coord, Side, MAX_SIZE, MIN_SIZE};

/// Errors that can occur during layout parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("expected '<rows> <side>', got {0} fields")]
    WrongFieldCount(usize),

    #[error("invalid side to move: '{0}'")]
    InvalidSide(String),

    #[error("invalid square character: '{0}'")]
    InvalidChar(char),

    #[error("row {row} has {width} squares, expected {expected}")]
    RowWidth {
        row: usize,
        width: usize,
        expected: usize,
    },

    #[error("row {row} is wider than {expected} squares")]
    RowOverflow { row: usize, expected: usize },

    #[error("board size {0} is outside the supported range")]
    InvalidSize(usize),
}

/// Parses one row into cells, expanding empty runs. Fails as soon as the
/// row grows past `width` squares.
fn parse_row(text: &str, row: usize, width: usize) -> Result<Vec<Option<Side>>, LayoutError> {
    let overflow = LayoutError::RowOverflow { row, expected: width };
    let mut cells = Vec::with_capacity(width);
    let mut run = 0usize;
    for ch in text.chars() {
        if let Some(d) = ch.to_digit(10) {
            run = run
                .checked_mul(10)
                .and_then(|r| r.checked_add(d as usize))
                .filter(|&r| cells.len() + r <= width)
                .ok_or_else(|| overflow.clone())?;
            continue;
        }
        cells.extend(std::iter::repeat(None).take(run));
        run = 0;
        let side = Side::from_layout_char(ch).ok_or(LayoutError::InvalidChar(ch))?;
        if cells.len() == width {
            return Err(overflow);
        }
        cells.push(Some(side));
    }
    cells.extend(std::iter::repeat(None).take(run));
    Ok(cells)
}

/// Parses a layout string into a board and the side to move.
pub fn parse_layout(text: &str) -> Result<(Board, Side), LayoutError> {
    let fields: Vec<&str> = text.split_whitespace().collect();
    if fields.len() != 2 {
        return Err(LayoutError::WrongFieldCount(fields.len()));
    }

    let side = {
        let mut chars = fields[1].chars();
        match (chars.next().and_then(Side::from_layout_char), chars.next()) {
            (Some(side), None) => side,
            _ => return Err(LayoutError::InvalidSide(fields[1].to_string())),
        }
    };

    let rows: Vec<&str> = fields[0].split('/').collect();
    let size = rows.len();
    if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
        return Err(LayoutError::InvalidSize(size));
    }

    let mut board = Board::empty(size);
    for (r, row) in rows.iter().enumerate() {
        let cells = parse_row(row, r, size)?;
        if cells.len() != size {
            return Err(LayoutError::RowWidth {
                row: r,
                width: cells.len(),
                expected: size,
            });
        }
        for (c, cell) in cells.into_iter().enumerate() {
            board.set(Coord::new(r as i32, c as i32), cell);
        }
    }

    Ok((board, side))
}

/// Encodes a board and side to move as a layout string.
pub fn encode_layout(board: &Board, to_move: Side) -> String {
    let size = board.size() as i32;
    let mut rows = Vec::with_capacity(board.size());
    for r in 0..size {
        let mut row = String::new();
        let mut run = 0;
        for c in 0..size {
            match board.get(Coord::new(r, c)) {
                None => run += 1,
                Some(side) => {
                    if run > 0 {
                        row.push_str(&run.to_string());
                        run = 0;
                    }
                    row.push(side.layout_char());
                }
            }
        }
        if run > 0 {
            row.push_str(&run.to_string());
        }
        rows.push(row);
    }
    format!("{} {}", rows.join("/"), to_move.layout_char())
}
