//! Render tests - snapshot to framebuffer to terminal bytes

use blockfall::core::{GameConfig, GameState, Phase};
use blockfall::term::{encode_diff_into, encode_full_into, kind_color, GameView, Viewport, BLOCK};
use blockfall::types::{Intent, DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS};

fn game(rows: usize, cols: usize) -> GameState {
    GameState::new(GameConfig::default().with_board(rows, cols), 11).unwrap()
}

#[test]
fn test_active_piece_drawn_inside_border() {
    let game = game(10, 10);
    let snap = game.snapshot();
    let view = GameView::default();
    let viewport = Viewport::new(12, 15);

    let fb = view.render(&snap, viewport);

    let active = game.active().unwrap();
    let color = kind_color(active.kind());
    for (x, y) in active.cells() {
        let glyph = fb.get(x as u16 + 1, y as u16 + 1).unwrap();
        assert_eq!(glyph.ch, BLOCK);
        assert_eq!(glyph.style.fg, color);
    }
    let blocks = fb.glyphs().iter().filter(|g| g.ch == BLOCK).count();
    assert_eq!(blocks, 4);
}

#[test]
fn test_board_centred_horizontally() {
    let snap = game(10, 10).snapshot();
    let fb = GameView::default().render(&snap, Viewport::new(40, 15));

    // Frame is 12 wide: (40 - 12) / 2 = 14.
    assert_eq!(fb.get(14, 0).map(|g| g.ch), Some('┌'));
    assert_eq!(fb.get(25, 0).map(|g| g.ch), Some('┐'));
}

#[test]
fn test_status_line_tracks_score_and_speed() {
    let mut game = game(10, 10);
    game.tick(0, [Intent::HardDrop]);
    let snap = game.snapshot();

    let fb = GameView::default().render(&snap, Viewport::new(60, 15));
    let status = fb.row_text(12);
    assert!(status.trim_start().starts_with("Score: 0  Lines: 0  Speed: 500ms"));
}

#[test]
fn test_game_over_frame_has_prompt() {
    let mut game = game(10, 10);
    game.tick(0, [Intent::Quit]);
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::GameOver);

    let fb = GameView::default().render(&snap, Viewport::new(30, 16));
    let rows: Vec<String> = (0..fb.height()).map(|y| fb.row_text(y)).collect();
    assert!(rows.iter().any(|r| r.contains("GAME OVER")));
    assert!(rows.iter().any(|r| r.contains("Final score: 0")));
    assert!(rows.iter().any(|r| r.contains("Play again? (y/n)")));
}

#[test]
fn test_default_board_fits_large_terminal() {
    let viewport = Viewport::new(120, 60);
    assert_eq!(
        viewport.fit_board(DEFAULT_BOARD_ROWS, DEFAULT_BOARD_COLS),
        (40, 30)
    );
}

#[test]
fn test_diff_after_move_is_smaller_than_full_redraw() {
    let mut game = game(20, 10);
    let view = GameView::default();
    let viewport = Viewport::new(40, 25);

    let before = view.render(&game.snapshot(), viewport);
    game.tick(0, [Intent::MoveLeft]);
    let after = view.render(&game.snapshot(), viewport);

    let mut full = Vec::new();
    encode_full_into(&after, &mut full).unwrap();
    let mut diff = Vec::new();
    encode_diff_into(&before, &after, &mut diff).unwrap();

    assert!(!diff.is_empty());
    assert!(diff.len() < full.len());
}
