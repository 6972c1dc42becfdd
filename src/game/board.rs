use super::player::Seat;
use crate::error::InvalidMove;

/// Number of same-seat cells in a row needed to win.
pub const LINE_LENGTH: usize = 4;

/// Largest number of cells a game board may have.
pub const MAX_CELLS: usize = 4096;

/// Row/column steps of the four line shapes, each read away from its anchor:
/// horizontal, vertical, diagonal down-right, diagonal down-left.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Seat),
}

/// A `height` x `width` grid. Row 0 is the top, row `height - 1` the bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    height: usize,
    width: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(height: usize, width: usize) -> Self {
        Board {
            height,
            width,
            cells: vec![Cell::Empty; height * width],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the cell at a specific position
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) outside {}x{} board",
            self.height,
            self.width
        );
        self.cells[row * self.width + col]
    }

    /// Lowest empty row in a column, scanning from the bottom up.
    /// `None` when the column is full or does not exist.
    pub fn find_open_row(&self, col: usize) -> Option<usize> {
        if col >= self.width {
            return None;
        }
        (0..self.height)
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Check if a column is full
    pub fn is_column_full(&self, col: usize) -> bool {
        self.find_open_row(col).is_none()
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, seat: Seat) -> Result<usize, InvalidMove> {
        if col >= self.width {
            return Err(InvalidMove::ColumnOutOfRange {
                column: col,
                width: self.width,
            });
        }

        let row = self
            .find_open_row(col)
            .ok_or(InvalidMove::ColumnFull { column: col })?;
        self.cells[row * self.width + col] = Cell::Occupied(seat);
        Ok(row)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Scan every cell as the anchor of each line shape and report whether
    /// any line is held entirely by `seat`.
    pub fn check_for_win(&self, seat: Seat) -> bool {
        (0..self.height).any(|row| {
            (0..self.width).any(|col| {
                DIRECTIONS
                    .iter()
                    .any(|&step| self.line_held_by(row as isize, col as isize, step, seat))
            })
        })
    }

    /// Check only the lines through (row, col), for the seat occupying it.
    /// Agrees with [`Board::check_for_win`] whenever (row, col) holds the
    /// most recently dropped piece.
    pub fn wins_through(&self, row: usize, col: usize) -> bool {
        let Cell::Occupied(seat) = self.get(row, col) else {
            return false;
        };

        DIRECTIONS.iter().any(|&(dr, dc)| {
            let forward = self.run_length(row, col, (dr, dc), seat);
            let backward = self.run_length(row, col, (-dr, -dc), seat);
            1 + forward + backward >= LINE_LENGTH
        })
    }

    fn line_held_by(&self, row: isize, col: isize, (dr, dc): (isize, isize), seat: Seat) -> bool {
        (0..LINE_LENGTH as isize).all(|i| self.held_by(row + dr * i, col + dc * i, seat))
    }

    /// Count consecutive `seat` cells after (row, col) along `step`.
    fn run_length(&self, row: usize, col: usize, (dr, dc): (isize, isize), seat: Seat) -> usize {
        let mut count = 0;
        let (mut r, mut c) = (row as isize + dr, col as isize + dc);
        while self.held_by(r, c, seat) {
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn held_by(&self, row: isize, col: isize, seat: Seat) -> bool {
        row >= 0
            && col >= 0
            && (row as usize) < self.height
            && (col as usize) < self.width
            && self.get(row as usize, col as usize) == Cell::Occupied(seat)
    }
}
