//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style};
use crate::types::PieceKind;

/// Glyph used for every filled board cell.
pub const BLOCK: char = '█';

/// Rows the view needs beyond the board itself: two border rows, the status
/// line, and slack for the shell prompt line.
pub const CHROME_ROWS: u16 = 5;

/// Columns the view needs beyond the board itself (the side borders).
pub const CHROME_COLS: u16 = 2;

const BOARD_BG: Rgb = Rgb::new(0, 0, 0);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Largest `(rows, cols)` board that fits, capped at `max_rows × max_cols`.
    ///
    /// Either value may be zero on a tiny terminal; the engine rejects those.
    pub fn fit_board(&self, max_rows: usize, max_cols: usize) -> (usize, usize) {
        let rows = (self.height.saturating_sub(CHROME_ROWS) as usize).min(max_rows);
        let cols = (self.width.saturating_sub(CHROME_COLS) as usize).min(max_cols);
        (rows, cols)
    }
}

/// Foreground colour for a shape tag.
pub fn kind_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        // Dark yellow.
        PieceKind::L => Rgb::new(205, 150, 0),
    }
}

/// A lightweight terminal view for the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    border: Style,
    status: Style,
    overlay: Style,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            border: Style::fg(Rgb::new(80, 120, 220)),
            status: Style::default(),
            overlay: Style::fg(Rgb::new(200, 40, 40)).bold(),
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers reuse a framebuffer
    /// across frames and it is only reallocated when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::default());

        let board_w = snap.cols as u16;
        let board_h = snap.rows as u16;
        let frame_w = board_w.saturating_add(CHROME_COLS);
        let frame_h = board_h.saturating_add(2);

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = 0;

        self.draw_border(fb, start_x, start_y, frame_w, frame_h);

        // Locked cells, then the active piece over them. Rows above the board
        // are not drawn.
        for y in 0..snap.rows {
            for x in 0..snap.cols {
                if let Some(kind) = snap.board_cell(x as i32, y as i32) {
                    draw_block(fb, start_x, start_y, x as u16, y as u16, kind);
                }
            }
        }
        if let Some(active) = &snap.active {
            for &(x, y) in &active.cells {
                if x >= 0 && y >= 0 && (x as usize) < snap.cols && (y as usize) < snap.rows {
                    draw_block(fb, start_x, start_y, x as u16, y as u16, active.kind);
                }
            }
        }

        self.draw_status_line(fb, snap, start_x, start_y.saturating_add(frame_h));

        if snap.game_over() {
            self.draw_game_over(fb, viewport, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
        if w < 2 || h < 2 {
            return;
        }
        let style = self.border;

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// `Score: N  Lines: M  Speed: Xms`
    fn draw_status_line(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let style = self.status;
        let mut cx = fb.put_str(x, y, "Score: ", style);
        cx = fb.put_u32(cx, y, snap.score, style);
        cx = fb.put_str(cx, y, "  Lines: ", style);
        cx = fb.put_u32(cx, y, snap.lines, style);
        cx = fb.put_str(cx, y, "  Speed: ", style);
        cx = fb.put_u32(cx, y, snap.gravity_ms, style);
        fb.put_str(cx, y, "ms", style);
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, viewport: Viewport, score: u32) {
        const TITLE: &str = "GAME OVER";
        const SCORE_LABEL: &str = "Final score: ";
        const PROMPT: &str = "Play again? (y/n)";

        let style = self.overlay;
        let mid_y = viewport.height / 2;
        let top = mid_y.saturating_sub(2);

        let centered = |text_w: u16| viewport.width.saturating_sub(text_w) / 2;

        fb.fill_rect(0, top, viewport.width, 5, ' ', Style::default().on(BOARD_BG));
        fb.put_str(centered(TITLE.len() as u16), top + 1, TITLE, style);

        let score_w = SCORE_LABEL.len() as u16 + digit_count(score);
        let cx = fb.put_str(centered(score_w), top + 2, SCORE_LABEL, style);
        fb.put_u32(cx, top + 2, score, style);

        fb.put_str(centered(PROMPT.len() as u16), top + 3, PROMPT, style);
    }
}

fn draw_block(fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16, kind: PieceKind) {
    let style = Style::fg(kind_color(kind)).on(BOARD_BG);
    fb.put_char(start_x + 1 + x, start_y + 1 + y, BLOCK, style);
}

fn digit_count(mut v: u32) -> u16 {
    let mut n = 1;
    while v >= 10 {
        v /= 10;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GameConfig, GameState};

    fn snapshot(rows: usize, cols: usize) -> GameSnapshot {
        let game = GameState::new(GameConfig::default().with_board(rows, cols), 7).unwrap();
        game.snapshot()
    }

    #[test]
    fn fit_board_caps_and_reserves_chrome() {
        assert_eq!(Viewport::new(80, 24).fit_board(40, 30), (19, 30));
        assert_eq!(Viewport::new(200, 100).fit_board(40, 30), (40, 30));
        assert_eq!(Viewport::new(1, 3).fit_board(40, 30), (0, 0));
    }

    #[test]
    fn border_wraps_board() {
        let snap = snapshot(4, 6);
        let fb = GameView::default().render(&snap, Viewport::new(8, 9));

        assert_eq!(fb.get(0, 0).map(|g| g.ch), Some('┌'));
        assert_eq!(fb.get(7, 0).map(|g| g.ch), Some('┐'));
        assert_eq!(fb.get(0, 5).map(|g| g.ch), Some('└'));
        assert_eq!(fb.get(7, 5).map(|g| g.ch), Some('┘'));
    }

    #[test]
    fn status_line_sits_under_the_board() {
        let snap = snapshot(4, 30);
        let fb = GameView::default().render(&snap, Viewport::new(32, 9));
        assert_eq!(fb.row_text(6), "Score: 0  Lines: 0  Speed: 500ms");
    }

    #[test]
    fn locked_cells_use_tag_colour() {
        let mut snap = snapshot(4, 6);
        snap.active = None;
        snap.board[3 * 6] = Some(PieceKind::Z);

        let fb = GameView::default().render(&snap, Viewport::new(8, 9));
        let glyph = fb.get(1, 4).unwrap();
        assert_eq!(glyph.ch, BLOCK);
        assert_eq!(glyph.style.fg, kind_color(PieceKind::Z));
    }

    #[test]
    fn active_piece_cells_above_board_are_hidden() {
        let mut snap = snapshot(4, 6);
        let active = snap.active.as_mut().unwrap();
        for cell in active.cells.iter_mut() {
            cell.1 -= 10;
        }

        let fb = GameView::default().render(&snap, Viewport::new(8, 9));
        let blocks = fb.glyphs().iter().filter(|g| g.ch == BLOCK).count();
        assert_eq!(blocks, 0);
    }

    #[test]
    fn game_over_overlay_shows_score_and_prompt() {
        let mut snap = snapshot(10, 20);
        snap.phase = crate::core::Phase::GameOver;
        snap.score = 700;

        let fb = GameView::default().render(&snap, Viewport::new(22, 15));
        let text: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
        assert!(text.iter().any(|row| row.trim() == "GAME OVER"));
        assert!(text.iter().any(|row| row.trim() == "Final score: 700"));
        assert!(text.iter().any(|row| row.trim() == "Play again? (y/n)"));
    }

    #[test]
    fn digit_count_matches_decimal_width() {
        assert_eq!(digit_count(0), 1);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(u32::MAX), 10);
    }
}
