//! Terminal falling-block runner (default binary).
//!
//! Uses crossterm for input and the framebuffer-based renderer in
//! `blockfall::term`. One thread: poll input until the next tick, feed the
//! collected intents and the elapsed time to the engine, redraw.

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use tracing::{debug, info};

use blockfall::core::{GameConfig, GameSnapshot, GameState, SessionOutcome, TickStatus};
use blockfall::input::{replay_answer, InputHandler, ReplayAnswer};
use blockfall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Intent, DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS, TICK_MS};
use blockfall::RunConfig;

fn main() -> Result<()> {
    let config = RunConfig::from_env()?;
    init_logging(&config)?;

    let mut term = TerminalRenderer::new();
    term.enter()?;
    info!(key_events_enhanced = term.key_events_enhanced(), "terminal ready");

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();

    let last = result?;
    if let Some(outcome) = last {
        println!("Final score: {}  Lines: {}", outcome.score, outcome.lines);
    }
    Ok(())
}

/// Install a file-backed subscriber when `BLOCKFALL_LOG` is set. Stdout is the
/// game screen, so nothing is logged there.
fn init_logging(config: &RunConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Play sessions until the player declines a replay. Returns the outcome of
/// the last session played.
fn run(term: &mut TerminalRenderer, config: &RunConfig) -> Result<Option<SessionOutcome>> {
    let base_seed = config.seed.unwrap_or_else(rand::random);
    let view = GameView::default();
    let mut fb = FrameBuffer::new(0, 0);
    let mut snap = GameSnapshot::default();
    let mut input = InputHandler::new();
    let mut last = None;

    for session in 0u64.. {
        let (w, h) = crossterm::terminal::size()?;
        let (rows, cols) = Viewport::new(w, h).fit_board(DEFAULT_BOARD_ROWS, DEFAULT_BOARD_COLS);
        let game_config = GameConfig::default().with_board(rows, cols);
        game_config
            .validate()
            .with_context(|| format!("terminal too small ({w}x{h}) for a {rows}x{cols} board"))?;

        let seed = RunConfig::session_seed(base_seed, session);
        let mut game = GameState::new(game_config, seed)?;
        input.reset();

        let outcome = play_session(term, &view, &mut fb, &mut snap, &mut input, &mut game)?;
        info!(seed, score = outcome.score, lines = outcome.lines, "session finished");
        last = Some(outcome);

        if wait_for_replay(term, &view, &mut fb, &snap)? == ReplayAnswer::Exit {
            break;
        }
    }

    Ok(last)
}

fn play_session(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
    snap: &mut GameSnapshot,
    input: &mut InputHandler,
    game: &mut GameState,
) -> Result<SessionOutcome> {
    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();
    let mut pending: Vec<Intent> = Vec::with_capacity(16);

    draw(term, view, fb, snap, game)?;

    loop {
        // Input with timeout until next tick, then drain whatever else is queued.
        let mut timeout = tick.saturating_sub(last_tick.elapsed());
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if let Some(intent) = input.handle_key_event(key) {
                        pending.push(intent);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
            timeout = Duration::ZERO;
        }

        let elapsed = last_tick.elapsed();
        if elapsed < tick {
            continue;
        }
        last_tick = Instant::now();
        let elapsed_ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);

        pending.extend(input.update(elapsed_ms));
        let status = game.tick(elapsed_ms, pending.drain(..));
        if let Some(lock) = game.take_last_lock() {
            debug!(
                lines = lock.lines_cleared,
                points = lock.points,
                score = game.score(),
                "piece locked"
            );
        }
        draw(term, view, fb, snap, game)?;

        if let TickStatus::Over(outcome) = status {
            return Ok(outcome);
        }
    }
}

fn draw(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
    snap: &mut GameSnapshot,
    game: &GameState,
) -> Result<()> {
    game.snapshot_into(snap);
    let (w, h) = crossterm::terminal::size()?;
    view.render_into(snap, Viewport::new(w, h), fb);
    term.draw_swap(fb)
}

/// Block on the `Play again? (y/n)` prompt. The game-over frame stays on
/// screen and is redrawn on resize.
fn wait_for_replay(
    term: &mut TerminalRenderer,
    view: &GameView,
    fb: &mut FrameBuffer,
    snap: &GameSnapshot,
) -> Result<ReplayAnswer> {
    loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(answer) = replay_answer(key) {
                    return Ok(answer);
                }
            }
            Event::Resize(w, h) => {
                term.invalidate();
                view.render_into(snap, Viewport::new(w, h), fb);
                term.draw_swap(fb)?;
            }
            _ => {}
        }
    }
}
