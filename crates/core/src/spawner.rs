//! Spawner - places new pieces at the top of the board
//!
//! Kinds are drawn uniformly and independently (repeats allowed). A spawned
//! piece is horizontally centered and shifted up by its top padding, so its
//! first occupied row sits on board row 0.

use rand::Rng;

use crate::piece::Piece;
use crate::shapes::{shapes, Shape};
use crate::types::PieceKind;

/// Spawn a uniformly random piece for a board `board_width` columns wide.
pub fn spawn<R: Rng + ?Sized>(rng: &mut R, board_width: usize) -> Piece {
    let table = shapes();
    let shape = &table[rng.random_range(0..table.len())];
    place(shape, board_width)
}

/// Spawn a piece of a given kind.
pub fn spawn_kind(kind: PieceKind, board_width: usize) -> Piece {
    place(Shape::of(kind), board_width)
}

fn place(shape: &Shape, board_width: usize) -> Piece {
    let x = (board_width / 2) as i32 - (shape.width() / 2) as i32;
    let y = -(shape.top_padding() as i32);
    Piece::from_shape(shape, x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn spawn_is_centered() {
        assert_eq!(spawn_kind(PieceKind::I, 10).x(), 3);
        assert_eq!(spawn_kind(PieceKind::O, 10).x(), 4);
        assert_eq!(spawn_kind(PieceKind::T, 10).x(), 4);
        assert_eq!(spawn_kind(PieceKind::T, 30).x(), 14);
        assert_eq!(spawn_kind(PieceKind::I, 7).x(), 1);
    }

    #[test]
    fn first_occupied_row_is_row_zero() {
        for kind in PieceKind::ALL {
            let piece = spawn_kind(kind, 10);
            let top = piece.cells().map(|(_, y)| y).min().unwrap();
            assert_eq!(top, 0, "{kind:?}");
        }
    }

    #[test]
    fn same_seed_same_sequence() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..50 {
            assert_eq!(spawn(&mut a, 10).kind(), spawn(&mut b, 10).kind());
        }
    }

    #[test]
    fn every_kind_eventually_spawns() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(spawn(&mut rng, 10).kind());
        }
        assert_eq!(seen.len(), 7);
    }
}
