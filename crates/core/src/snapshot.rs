//! Render-state snapshot handed to the renderer after every tick.
//!
//! Snapshots are plain data and serialize to JSON, so a renderer does not need
//! to link against the engine.

use serde::Serialize;

use crate::game_state::Phase;
use crate::piece::Piece;
use crate::types::{Cell, PieceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub x: i32,
    pub y: i32,
    /// Absolute `(x, y)` of each occupied cell. May include rows above the board.
    pub cells: Vec<(i32, i32)>,
}

impl ActiveSnapshot {
    fn write_from(&mut self, piece: &Piece) {
        self.kind = piece.kind();
        self.x = piece.x();
        self.y = piece.y();
        self.cells.clear();
        self.cells.extend(piece.cells());
    }
}

impl From<&Piece> for ActiveSnapshot {
    fn from(piece: &Piece) -> Self {
        Self {
            kind: piece.kind(),
            x: piece.x(),
            y: piece.y(),
            cells: piece.cells().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub rows: usize,
    pub cols: usize,
    /// Board cells, row-major.
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub score: u32,
    pub lines: u32,
    pub gravity_ms: u32,
    pub phase: Phase,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.rows = 0;
        self.cols = 0;
        self.board.clear();
        self.active = None;
        self.score = 0;
        self.lines = 0;
        self.gravity_ms = 0;
        self.phase = Phase::Spawning;
    }

    /// Locked board cell at (x, y); `None` when empty or out of range.
    pub fn board_cell(&self, x: i32, y: i32) -> Cell {
        if x < 0 || y < 0 || x as usize >= self.cols || y as usize >= self.rows {
            return None;
        }
        self.board[y as usize * self.cols + x as usize]
    }

    /// What the player sees at (x, y): the active piece over the board.
    pub fn visible_cell(&self, x: i32, y: i32) -> Cell {
        if let Some(active) = &self.active {
            if active.cells.contains(&(x, y)) {
                return Some(active.kind);
            }
        }
        self.board_cell(x, y)
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub(crate) fn write_active(&mut self, piece: Option<&Piece>) {
        match (piece, self.active.as_mut()) {
            (Some(piece), Some(active)) => active.write_from(piece),
            (Some(piece), None) => self.active = Some(ActiveSnapshot::from(piece)),
            (None, _) => self.active = None,
        }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: 0,
            cols: 0,
            board: Vec::new(),
            active: None,
            score: 0,
            lines: 0,
            gravity_ms: 0,
            phase: Phase::Spawning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_active_reuses_and_clears() {
        let mut snap = GameSnapshot::default();
        let piece = Piece::new(PieceKind::O, 2, 0);

        snap.write_active(Some(&piece));
        assert_eq!(snap.active, Some(ActiveSnapshot::from(&piece)));

        let mut moved = piece.clone();
        moved.translate(1, 1);
        snap.write_active(Some(&moved));
        assert_eq!(snap.active.as_ref().map(|a| (a.x, a.y)), Some((3, 1)));
        assert_eq!(snap.active.as_ref().map(|a| a.cells.len()), Some(4));

        snap.write_active(None);
        assert!(snap.active.is_none());
    }

    #[test]
    fn visible_cell_prefers_active_piece() {
        let mut snap = GameSnapshot {
            rows: 2,
            cols: 2,
            board: vec![Some(PieceKind::Z), None, None, None],
            ..GameSnapshot::default()
        };
        assert_eq!(snap.visible_cell(0, 0), Some(PieceKind::Z));
        assert_eq!(snap.visible_cell(5, 0), None);

        snap.write_active(Some(&Piece::new(PieceKind::I, 0, 0)));
        assert_eq!(snap.visible_cell(0, 0), Some(PieceKind::I));
        assert_eq!(snap.board_cell(0, 0), Some(PieceKind::Z));
    }

    #[test]
    fn active_snapshot_json_shape() {
        let active = ActiveSnapshot::from(&Piece::new(PieceKind::T, 1, -1));
        let json = serde_json::to_string(&active).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"T","x":1,"y":-1,"cells":[[2,-1],[1,0],[2,0],[3,0]]}"#
        );
    }
}
