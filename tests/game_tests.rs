//! Game tests - the tick-driven session through the public API

use blockfall::core::{
    Board, GameConfig, GameOverReason, GameSnapshot, GameState, Phase, SessionOutcome, TickStatus,
};
use blockfall::types::{Intent, PieceKind};

const SEED: u64 = 2024;

fn config() -> GameConfig {
    GameConfig::default().with_board(20, 10)
}

/// Columns of the lowest row of the active piece.
fn bottom_columns(game: &GameState) -> Vec<i32> {
    let active = game.active().expect("active piece");
    let bottom = active.cells().map(|(_, y)| y).max().unwrap();
    active
        .cells()
        .filter(|&(_, y)| y == bottom)
        .map(|(x, _)| x)
        .collect()
}

#[test]
fn test_new_session_spawns_first_piece() {
    let game = GameState::new(config(), SEED).unwrap();

    assert_eq!(game.phase(), Phase::Falling);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.gravity_ms(), 500);
    assert_eq!(game.pieces_spawned(), 1);
    assert!(game.active().is_some());
    assert!(game.outcome().is_none());
}

#[test]
fn test_same_seed_same_session() {
    let intents = [
        Intent::MoveLeft,
        Intent::Rotate,
        Intent::HardDrop,
        Intent::MoveRight,
        Intent::MoveRight,
        Intent::HardDrop,
    ];

    let mut a = GameState::new(config(), SEED).unwrap();
    let mut b = GameState::new(config(), SEED).unwrap();
    for chunk in intents.chunks(2) {
        a.tick(16, chunk.iter().copied());
        b.tick(16, chunk.iter().copied());
    }

    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_hard_drop_lands_on_floor_and_spawns_next() {
    let mut game = GameState::new(config(), SEED).unwrap();

    let status = game.tick(0, [Intent::HardDrop]);

    assert_eq!(status, TickStatus::Running);
    assert_eq!(game.board().filled_count(), 4);
    assert!(game.board().row(19).unwrap().iter().any(Option::is_some));
    assert_eq!(game.pieces_spawned(), 2);
    assert_eq!(game.score(), 0);

    let lock = game.take_last_lock().unwrap();
    assert_eq!((lock.lines_cleared, lock.points), (0, 0));
    assert!(game.take_last_lock().is_none());
}

#[test]
fn test_hard_drop_into_gap_clears_line_and_scores() {
    let reference = GameState::new(config(), SEED).unwrap();
    let holes: Vec<usize> = bottom_columns(&reference)
        .into_iter()
        .map(|x| x as usize)
        .collect();

    let mut board = Board::new(20, 10).unwrap();
    board.fill_row(19, PieceKind::J, &holes);
    let mut game = GameState::with_board(config(), board, SEED).unwrap();
    assert_eq!(game.active(), reference.active());

    game.tick(0, [Intent::HardDrop]);

    assert_eq!(game.lines(), 1);
    assert_eq!(game.score(), 100);
    assert_eq!(game.board().filled_count(), 4 - holes.len());
    let lock = game.take_last_lock().unwrap();
    assert_eq!((lock.lines_cleared, lock.points), (1, 100));
}

#[test]
fn test_gravity_moves_once_per_interval() {
    let mut game = GameState::new(config(), SEED).unwrap();
    let y0 = game.active().unwrap().y();

    game.tick(499, []);
    assert_eq!(game.active().unwrap().y(), y0);

    game.tick(1, []);
    assert_eq!(game.active().unwrap().y(), y0 + 1);

    // A long stall still falls a single row.
    game.tick(5_000, []);
    assert_eq!(game.active().unwrap().y(), y0 + 2);
}

#[test]
fn test_piece_eventually_locks_under_gravity() {
    let mut game = GameState::new(config(), SEED).unwrap();

    for _ in 0..25 {
        game.tick(500, []);
    }

    assert_eq!(game.pieces_spawned(), 2);
    assert_eq!(game.board().filled_count(), 4);
}

#[test]
fn test_moves_never_leave_the_board() {
    let mut game = GameState::new(config(), SEED).unwrap();

    game.tick(0, [Intent::MoveLeft; 20]);
    let min_x = game.active().unwrap().cells().map(|(x, _)| x).min().unwrap();
    assert_eq!(min_x, 0);

    game.tick(0, [Intent::MoveRight; 20]);
    let max_x = game.active().unwrap().cells().map(|(x, _)| x).max().unwrap();
    assert_eq!(max_x, 9);
}

#[test]
fn test_blocked_spawn_ends_session() {
    let mut board = Board::new(20, 10).unwrap();
    board.fill_row(0, PieceKind::Z, &[0]);
    board.fill_row(19, PieceKind::Z, &[0]);

    let mut game = GameState::with_board(config(), board, SEED).unwrap();

    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.active().is_none());
    let expected = SessionOutcome {
        score: 0,
        lines: 0,
        reason: GameOverReason::ToppedOut,
    };
    assert_eq!(game.outcome(), Some(expected));

    // Nothing resumes a finished session.
    let before = game.board().clone();
    assert_eq!(
        game.tick(10_000, [Intent::MoveLeft, Intent::HardDrop]),
        TickStatus::Over(expected)
    );
    assert_eq!(game.board(), &before);
}

#[test]
fn test_quit_ends_session_and_ignores_rest() {
    let mut game = GameState::new(config(), SEED).unwrap();

    let status = game.tick(16, [Intent::Quit, Intent::HardDrop]);

    match status {
        TickStatus::Over(outcome) => assert_eq!(outcome.reason, GameOverReason::Quit),
        TickStatus::Running => panic!("quit should end the session"),
    }
    assert_eq!(game.board().filled_count(), 0);
    assert!(game.game_over());
}

#[test]
fn test_board_size_mismatch_rejected() {
    let board = Board::new(10, 10).unwrap();
    assert!(GameState::with_board(config(), board, SEED).is_err());
}

#[test]
fn test_snapshot_reflects_state() {
    let game = GameState::new(config(), SEED).unwrap();
    let snap = game.snapshot();

    assert_eq!((snap.rows, snap.cols), (20, 10));
    assert_eq!(snap.board.len(), 200);
    assert_eq!(snap.phase, Phase::Falling);

    let active = snap.active.as_ref().unwrap();
    assert_eq!(active.kind, game.active().unwrap().kind());
    for &(x, y) in &active.cells {
        assert_eq!(snap.visible_cell(x, y), Some(active.kind));
        assert_eq!(snap.board_cell(x, y), None);
    }
}

#[test]
fn test_snapshot_into_reuses_buffer() {
    let mut game = GameState::new(config(), SEED).unwrap();
    let mut snap = GameSnapshot::default();

    game.snapshot_into(&mut snap);
    game.tick(0, [Intent::HardDrop]);
    game.snapshot_into(&mut snap);

    assert_eq!(snap, game.snapshot());
}

#[test]
fn test_snapshot_serializes_to_json() {
    let game = GameState::new(config(), SEED).unwrap();
    let value = serde_json::to_value(game.snapshot()).unwrap();

    assert_eq!(value["rows"], 20);
    assert_eq!(value["cols"], 10);
    assert_eq!(value["score"], 0);
    assert_eq!(value["gravity_ms"], 500);
    assert_eq!(value["phase"], "Falling");
    assert_eq!(value["board"].as_array().unwrap().len(), 200);
    assert!(value["board"][0].is_null());

    let kind = game.active().unwrap().kind();
    let expected_kind = format!("{kind:?}");
    assert_eq!(value["active"]["kind"], expected_kind.as_str());
    assert_eq!(value["active"]["cells"].as_array().unwrap().len(), 4);
}

#[test]
fn test_scripted_intents_from_json() {
    let script: Vec<Intent> =
        serde_json::from_str(r#"["MoveLeft", "Rotate", "SoftDrop", "HardDrop"]"#).unwrap();

    let mut scripted = GameState::new(config(), SEED).unwrap();
    let mut direct = GameState::new(config(), SEED).unwrap();
    scripted.tick(16, script);
    direct.tick(
        16,
        [Intent::MoveLeft, Intent::Rotate, Intent::SoftDrop, Intent::HardDrop],
    );

    assert_eq!(scripted.snapshot(), direct.snapshot());
    assert_eq!(scripted.pieces_spawned(), 2);
}
