//! Shape table - the seven standard polyominoes as occupancy matrices
//!
//! The table is `'static` data. Pieces never borrow it mutably: a piece takes
//! its own [`Matrix`] copy via [`Shape::matrix`] and rotates that.

use crate::types::{EngineError, PieceKind};

/// A row-major boolean occupancy matrix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Matrix {
    /// Build a matrix from rows of `0`/`1` values.
    ///
    /// # Panics
    ///
    /// If the rows differ in length.
    pub fn from_rows(rows: &[&[u8]]) -> Self {
        let cols = rows.first().map_or(0, |r| r.len());
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "matrix rows must all have {cols} columns"
        );
        Self {
            rows: rows.len(),
            cols,
            cells: rows.iter().flat_map(|r| r.iter().map(|&v| v != 0)).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Whether the cell at (`row`, `col`) is occupied. Out of range is empty.
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// The matrix turned 90° clockwise.
    ///
    /// Cell (r, c) moves to (c, rows - 1 - r); the result is `cols × rows`.
    pub fn rotated_clockwise(&self) -> Matrix {
        let mut cells = vec![false; self.cells.len()];
        // Rotated matrix has `self.rows` columns.
        for r in 0..self.rows {
            for c in 0..self.cols {
                cells[c * self.rows + (self.rows - 1 - r)] = self.cells[r * self.cols + c];
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            cells,
        }
    }

    /// Number of leading rows with no occupied cell.
    pub fn top_padding(&self) -> usize {
        (0..self.rows)
            .find(|&r| (0..self.cols).any(|c| self.get(r, c)))
            .unwrap_or(0)
    }

    /// Number of trailing rows with no occupied cell.
    pub fn bottom_padding(&self) -> usize {
        (0..self.rows)
            .rev()
            .position(|r| (0..self.cols).any(|c| self.get(r, c)))
            .unwrap_or(0)
    }

    /// Occupied cells as `(col, row)` offsets from the top-left corner.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(i, _)| (i % self.cols, i / self.cols))
    }
}

/// A catalog entry: occupancy pattern plus display tag.
#[derive(Debug)]
pub struct Shape {
    kind: PieceKind,
    pattern: &'static [&'static [u8]],
}

static SHAPES: [Shape; 7] = [
    Shape {
        kind: PieceKind::I,
        pattern: &[&[1, 1, 1, 1]],
    },
    Shape {
        kind: PieceKind::O,
        pattern: &[&[1, 1], &[1, 1]],
    },
    Shape {
        kind: PieceKind::T,
        pattern: &[&[0, 1, 0], &[1, 1, 1]],
    },
    Shape {
        kind: PieceKind::S,
        pattern: &[&[0, 1, 1], &[1, 1, 0]],
    },
    Shape {
        kind: PieceKind::Z,
        pattern: &[&[1, 1, 0], &[0, 1, 1]],
    },
    Shape {
        kind: PieceKind::J,
        pattern: &[&[1, 0, 0], &[1, 1, 1]],
    },
    Shape {
        kind: PieceKind::L,
        pattern: &[&[0, 0, 1], &[1, 1, 1]],
    },
];

/// The seven canonical shapes, in [`PieceKind::ALL`] order.
pub fn shapes() -> &'static [Shape; 7] {
    &SHAPES
}

impl Shape {
    /// Look up the shape for a piece kind.
    pub fn of(kind: PieceKind) -> &'static Shape {
        match kind {
            PieceKind::I => &SHAPES[0],
            PieceKind::O => &SHAPES[1],
            PieceKind::T => &SHAPES[2],
            PieceKind::S => &SHAPES[3],
            PieceKind::Z => &SHAPES[4],
            PieceKind::J => &SHAPES[5],
            PieceKind::L => &SHAPES[6],
        }
    }

    /// Look up a shape by its tag name (case-insensitive).
    pub fn from_tag(tag: &str) -> Result<&'static Shape, EngineError> {
        PieceKind::from_str(tag)
            .map(Shape::of)
            .ok_or_else(|| EngineError::UnknownTag(tag.to_string()))
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn width(&self) -> usize {
        self.pattern.first().map_or(0, |r| r.len())
    }

    pub fn height(&self) -> usize {
        self.pattern.len()
    }

    /// An owned copy of the occupancy matrix.
    pub fn matrix(&self) -> Matrix {
        Matrix::from_rows(self.pattern)
    }

    pub fn top_padding(&self) -> usize {
        self.pattern
            .iter()
            .position(|row| row.iter().any(|&v| v != 0))
            .unwrap_or(0)
    }
}
