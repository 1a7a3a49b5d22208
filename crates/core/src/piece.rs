//! The falling piece: a private matrix copy plus an origin on the board.
//!
//! Every mutation here is unchecked. The game loop applies a mutation, asks
//! [`collides`](crate::collision::collides) about the result, and undoes it
//! when the placement is illegal. Undo relies on exact inverses:
//! `translate(-dx, -dy)` for moves and four clockwise turns being the identity
//! for rotations.

use crate::shapes::{Matrix, Shape};
use crate::types::PieceKind;

/// Active falling piece
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    matrix: Matrix,
    /// Board column of the matrix's left edge.
    x: i32,
    /// Board row of the matrix's top edge. Negative while above the board.
    y: i32,
}

impl Piece {
    /// Create a piece of `kind` in spawn orientation with its top-left at (`x`, `y`).
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self::from_shape(Shape::of(kind), x, y)
    }

    pub fn from_shape(shape: &Shape, x: i32, y: i32) -> Self {
        Self {
            kind: shape.kind(),
            matrix: shape.matrix(),
            x,
            y,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn matrix(&self) -> &Matrix {
        &self.matrix
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> usize {
        self.matrix.cols()
    }

    pub fn height(&self) -> usize {
        self.matrix.rows()
    }

    pub fn top_padding(&self) -> usize {
        self.matrix.top_padding()
    }

    /// Turn the piece 90° clockwise around its origin.
    pub fn rotate_clockwise(&mut self) {
        self.matrix = self.matrix.rotated_clockwise();
    }

    /// Turn the piece 90° counter-clockwise (three clockwise turns).
    pub fn rotate_counter_clockwise(&mut self) {
        for _ in 0..3 {
            self.rotate_clockwise();
        }
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.x += dx;
        self.y += dy;
    }

    /// Absolute board coordinates `(x, y)` of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.cells_offset(0, 0)
    }

    /// Occupied cells as they would be after `translate(dx, dy)`.
    pub fn cells_offset(&self, dx: i32, dy: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (ox, oy) = (self.x + dx, self.y + dy);
        self.matrix
            .occupied()
            .map(move |(c, r)| (ox + c as i32, oy + r as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_piece_copies_catalog_matrix() {
        let piece = Piece::new(PieceKind::S, 4, -1);
        assert_eq!(piece.kind(), PieceKind::S);
        assert_eq!(piece.matrix(), &Shape::of(PieceKind::S).matrix());
        assert_eq!((piece.x(), piece.y()), (4, -1));
    }

    #[test]
    fn rotation_does_not_touch_catalog() {
        let mut piece = Piece::new(PieceKind::L, 0, 0);
        piece.rotate_clockwise();
        assert_ne!(piece.matrix(), &Shape::of(PieceKind::L).matrix());
        assert_eq!(
            Shape::of(PieceKind::L).matrix(),
            Matrix::from_rows(&[&[0, 0, 1], &[1, 1, 1]])
        );
    }

    #[test]
    fn counter_clockwise_undoes_clockwise() {
        let mut piece = Piece::new(PieceKind::J, 2, 3);
        let original = piece.clone();
        piece.rotate_clockwise();
        piece.rotate_counter_clockwise();
        assert_eq!(piece, original);
    }

    #[test]
    fn translate_moves_every_cell() {
        let mut piece = Piece::new(PieceKind::O, 0, 0);
        piece.translate(3, 5);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(3, 5), (4, 5), (3, 6), (4, 6)]);
        piece.translate(-3, -5);
        assert_eq!((piece.x(), piece.y()), (0, 0));
    }

    #[test]
    fn cells_offset_does_not_move_piece() {
        let piece = Piece::new(PieceKind::I, 1, 0);
        let below: Vec<_> = piece.cells_offset(0, 1).collect();
        assert_eq!(below, vec![(1, 1), (2, 1), (3, 1), (4, 1)]);
        assert_eq!(piece.y(), 0);
    }
}
