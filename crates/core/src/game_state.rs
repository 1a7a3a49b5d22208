//! Game state module - the per-session state machine
//!
//! Ties together board, piece, spawner and scoring. One [`GameState`] is one
//! session: it owns the board, the falling piece and the session RNG, and it
//! is driven by [`GameState::tick`] with the elapsed milliseconds and the
//! intents that arrived since the previous tick.
//!
//! Phase cycle: `Spawning → Falling → Locking → Clearing → Spawning`, with
//! `GameOver` reached from `Spawning` (the new piece collides where it
//! spawned) or from a `Quit` intent. Locking, clearing and spawning all happen
//! inside a single tick, so between ticks the phase is `Falling` or
//! `GameOver`.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info, trace};

use crate::board::Board;
use crate::collision::collides;
use crate::config::GameConfig;
use crate::piece::Piece;
use crate::scoring::{gravity_interval_ms, line_clear_score};
use crate::snapshot::GameSnapshot;
use crate::spawner::spawn;
use crate::types::{EngineError, Intent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Phase {
    Spawning,
    Falling,
    Locking,
    Clearing,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GameOverReason {
    /// A freshly spawned piece collided at its spawn placement.
    ToppedOut,
    /// The player sent `Quit`.
    Quit,
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionOutcome {
    pub score: u32,
    pub lines: u32,
    pub reason: GameOverReason,
}

/// Result of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickStatus {
    Running,
    Over(SessionOutcome),
}

/// Emitted every time a piece locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    board: Board,
    /// `None` only after the session ended by topping out.
    active: Option<Piece>,
    rng: ChaCha8Rng,
    seed: u64,
    score: u32,
    lines: u32,
    gravity_ms: u32,
    /// Milliseconds since the last successful gravity fall (or spawn).
    fall_timer_ms: u32,
    phase: Phase,
    outcome: Option<SessionOutcome>,
    pieces_spawned: u32,
    /// Most recent lock, until the runner takes it.
    last_lock: Option<LockEvent>,
}

impl GameState {
    /// Start a session on an empty board.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols)?;
        Ok(Self::start(config, board, seed))
    }

    /// Start a session on a prepared board.
    ///
    /// The board dimensions must match `config`. If the first piece collides
    /// at its spawn placement the session is over immediately.
    pub fn with_board(config: GameConfig, board: Board, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        if board.height() != config.rows || board.width() != config.cols {
            return Err(EngineError::invalid_config(format!(
                "board is {}x{} but config says {}x{}",
                board.height(),
                board.width(),
                config.rows,
                config.cols
            )));
        }
        Ok(Self::start(config, board, seed))
    }

    fn start(config: GameConfig, board: Board, seed: u64) -> Self {
        let mut state = Self {
            config,
            board,
            active: None,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            score: 0,
            lines: 0,
            gravity_ms: config.initial_gravity_ms,
            fall_timer_ms: 0,
            phase: Phase::Spawning,
            outcome: None,
            pieces_spawned: 0,
            last_lock: None,
        };
        info!(
            rows = config.rows,
            cols = config.cols,
            seed,
            "session started"
        );
        state.spawn_piece();
        state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Option<&Piece> {
        self.active.as_ref()
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current gravity interval in milliseconds.
    pub fn gravity_ms(&self) -> u32 {
        self.gravity_ms
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The session result, once the game is over.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.outcome
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    /// Take and clear the last lock event.
    pub fn take_last_lock(&mut self) -> Option<LockEvent> {
        self.last_lock.take()
    }

    fn status(&self) -> TickStatus {
        match self.outcome {
            Some(outcome) => TickStatus::Over(outcome),
            None => TickStatus::Running,
        }
    }

    /// Advance the session by `elapsed_ms`.
    ///
    /// Applies every intent in order, then gravity. Once the game is over the
    /// remaining intents are ignored and further ticks do nothing.
    pub fn tick<I>(&mut self, elapsed_ms: u32, intents: I) -> TickStatus
    where
        I: IntoIterator<Item = Intent>,
    {
        for intent in intents {
            if self.game_over() {
                break;
            }
            self.apply_intent(intent);
        }

        if !self.game_over() {
            self.apply_gravity(elapsed_ms);
        }

        self.status()
    }

    /// Apply a single intent. Returns whether it changed the state.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if self.game_over() {
            return false;
        }
        match intent {
            Intent::MoveLeft => self.try_move(-1, 0),
            Intent::MoveRight => self.try_move(1, 0),
            Intent::SoftDrop => self.try_move(0, 1),
            Intent::Rotate => self.try_rotate(true),
            Intent::RotateCounterClockwise => self.try_rotate(false),
            Intent::HardDrop => {
                self.hard_drop();
                true
            }
            Intent::Quit => {
                self.finish(GameOverReason::Quit);
                true
            }
        }
    }

    fn apply_gravity(&mut self, elapsed_ms: u32) {
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);
        if self.fall_timer_ms < self.gravity_ms {
            return;
        }

        if self.try_move(0, 1) {
            self.fall_timer_ms = 0;
        } else {
            self.lock_piece();
        }
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i32, dy: i32) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        active.translate(dx, dy);
        if collides(&self.board, active, 0, 0) {
            active.translate(-dx, -dy);
            trace!(dx, dy, "move rejected");
            return false;
        }
        true
    }

    /// Try to rotate the active piece in place
    pub(crate) fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.active.as_mut() else {
            return false;
        };

        if clockwise {
            active.rotate_clockwise();
        } else {
            active.rotate_counter_clockwise();
        }

        if collides(&self.board, active, 0, 0) {
            if clockwise {
                active.rotate_counter_clockwise();
            } else {
                active.rotate_clockwise();
            }
            trace!(clockwise, "rotation rejected");
            return false;
        }
        true
    }

    /// Drop the active piece as far as it goes and lock it.
    ///
    /// Returns the number of rows dropped.
    pub(crate) fn hard_drop(&mut self) -> u32 {
        let mut distance = 0;
        while self.try_move(0, 1) {
            distance += 1;
        }
        self.lock_piece();
        distance
    }

    /// Lock the active piece, clear lines, score, and spawn the next piece.
    pub(crate) fn lock_piece(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };

        self.phase = Phase::Locking;
        self.board.merge(&active);

        self.phase = Phase::Clearing;
        let cleared = self.board.clear_full_lines();
        let points = line_clear_score(cleared);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(cleared as u32);

        let interval = gravity_interval_ms(&self.config, self.lines);
        if interval < self.gravity_ms {
            debug!(from = self.gravity_ms, to = interval, "gravity sped up");
            self.gravity_ms = interval;
        }

        debug!(
            kind = active.kind().as_str(),
            x = active.x(),
            y = active.y(),
            cleared,
            points,
            score = self.score,
            "piece locked"
        );
        self.last_lock = Some(LockEvent {
            lines_cleared: cleared as u32,
            points,
        });

        self.spawn_piece();
    }

    /// Spawn a new piece. Ends the session if it collides where it spawned.
    fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;
        let piece = spawn(&mut self.rng, self.board.width());
        self.fall_timer_ms = 0;

        if collides(&self.board, &piece, 0, 0) {
            debug!(kind = piece.kind().as_str(), "spawn blocked");
            self.finish(GameOverReason::ToppedOut);
            return false;
        }

        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);
        self.phase = Phase::Falling;
        true
    }

    fn finish(&mut self, reason: GameOverReason) {
        if reason == GameOverReason::ToppedOut {
            self.active = None;
        }
        let outcome = SessionOutcome {
            score: self.score,
            lines: self.lines,
            reason,
        };
        info!(score = outcome.score, lines = outcome.lines, ?reason, "game over");
        self.outcome = Some(outcome);
        self.phase = Phase::GameOver;
    }

    /// Write the render state into an existing snapshot, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.height();
        out.cols = self.board.width();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.write_active(self.active.as_ref());
        out.score = self.score;
        out.lines = self.lines;
        out.gravity_ms = self.gravity_ms;
        out.phase = self.phase;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
