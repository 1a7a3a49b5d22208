//! Board module - manages the game grid
//!
//! The board is a `cols × rows` grid where each cell is empty or filled with
//! the kind of the piece that filled it. Storage is a flat row-major vector.
//! Coordinates: (x, y) with x = column (left to right) and y = row (top to
//! bottom, row 0 is the top visible row).

use crate::piece::Piece;
use crate::types::{Cell, EngineError, PieceKind};

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    /// Flat array of cells, row-major order (y * cols + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board with `rows` rows and `cols` columns.
    ///
    /// Zero-sized boards are rejected.
    pub fn new(rows: usize, cols: usize) -> Result<Self, EngineError> {
        if rows == 0 || cols == 0 {
            return Err(EngineError::invalid_config(format!(
                "board must have at least one row and one column, got {rows}x{cols}"
            )));
        }
        if rows > i32::MAX as usize || cols > i32::MAX as usize {
            return Err(EngineError::invalid_config("board dimensions too large"));
        }
        Ok(Self {
            cols,
            rows,
            cells: vec![None; rows * cols],
        })
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        Some((y as usize) * self.cols + (x as usize))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.cols
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_filled(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y).is_some_and(|row| row.iter().all(Option::is_some))
    }

    /// Cells of row `y`, left to right.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.rows {
            return None;
        }
        let start = y * self.cols;
        Some(&self.cells[start..start + self.cols])
    }

    /// Stamp the piece's occupied cells into the grid with the piece's kind.
    ///
    /// Cells above the board (y < 0) are dropped.
    pub fn merge(&mut self, piece: &Piece) {
        let kind = piece.kind();
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(kind));
            }
        }
    }

    /// Clear every full row and return how many were cleared.
    ///
    /// Rows are scanned bottom to top. A full row is removed by shifting all
    /// rows above it down by one and emptying row 0; the same row index is then
    /// examined again since a different row now occupies it.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.rows;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Remove row `y`, shifting all rows above it down by one.
    fn clear_row(&mut self, y: usize) {
        let width = self.cols;

        // copy_within handles the overlapping ranges.
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        self.cells[..width].fill(None);
    }

    /// Number of filled cells on the whole board.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Fill every cell of row `y` except the columns in `holes`.
    ///
    /// Handy for building test boards.
    pub fn fill_row(&mut self, y: usize, kind: PieceKind, holes: &[usize]) {
        if y >= self.rows {
            return;
        }
        for x in 0..self.cols {
            let cell = if holes.contains(&x) { None } else { Some(kind) };
            self.cells[y * self.cols + x] = cell;
        }
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }
}
