//! Placement legality.

use crate::board::Board;
use crate::piece::Piece;

/// Whether `piece`, shifted by (`dx`, `dy`), is an illegal placement on `board`.
///
/// A cell collides when it lies outside columns `[0, width)`, at or below the
/// bottom edge, or on a filled board cell. Cells above the board (y < 0) only
/// collide with the side walls, so pieces can spawn partly hidden and fall
/// into view.
pub fn collides(board: &Board, piece: &Piece, dx: i32, dy: i32) -> bool {
    let cols = board.width() as i32;
    let rows = board.height() as i32;

    piece.cells_offset(dx, dy).any(|(x, y)| {
        if x < 0 || x >= cols || y >= rows {
            return true;
        }
        y >= 0 && board.is_filled(x, y)
    })
}
