//! Per-session engine configuration.

use crate::shapes::shapes;
use crate::types::{
    EngineError, DEFAULT_BOARD_COLS, DEFAULT_BOARD_ROWS, GRAVITY_STEP_MS, INITIAL_GRAVITY_MS,
    LINES_PER_SPEEDUP, MIN_GRAVITY_MS,
};

/// Board size and gravity tuning for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub rows: usize,
    pub cols: usize,
    /// Gravity interval at session start.
    pub initial_gravity_ms: u32,
    /// Interval decrease per speed-up.
    pub gravity_step_ms: u32,
    /// Interval floor.
    pub min_gravity_ms: u32,
    pub lines_per_speedup: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_BOARD_ROWS,
            cols: DEFAULT_BOARD_COLS,
            initial_gravity_ms: INITIAL_GRAVITY_MS,
            gravity_step_ms: GRAVITY_STEP_MS,
            min_gravity_ms: MIN_GRAVITY_MS,
            lines_per_speedup: LINES_PER_SPEEDUP,
        }
    }
}

impl GameConfig {
    pub fn with_board(mut self, rows: usize, cols: usize) -> Self {
        self.rows = rows;
        self.cols = cols;
        self
    }

    pub fn with_gravity(mut self, initial_ms: u32, step_ms: u32, min_ms: u32) -> Self {
        self.initial_gravity_ms = initial_ms;
        self.gravity_step_ms = step_ms;
        self.min_gravity_ms = min_ms;
        self
    }

    pub fn with_lines_per_speedup(mut self, lines: u32) -> Self {
        self.lines_per_speedup = lines;
        self
    }

    /// Check that a session can run with this configuration.
    ///
    /// Every shape must fit the board in spawn orientation, and the gravity
    /// parameters must describe a positive, non-increasing interval.
    pub fn validate(&self) -> Result<(), EngineError> {
        let widest = shapes().iter().map(|s| s.width()).max().unwrap_or(0);
        let tallest = shapes().iter().map(|s| s.height()).max().unwrap_or(0);

        if self.cols < widest || self.rows < tallest {
            return Err(EngineError::invalid_config(format!(
                "board {}x{} is smaller than the largest shape ({}x{})",
                self.rows, self.cols, tallest, widest
            )));
        }
        if self.min_gravity_ms == 0 {
            return Err(EngineError::invalid_config(
                "minimum gravity interval must be positive",
            ));
        }
        if self.initial_gravity_ms < self.min_gravity_ms {
            return Err(EngineError::invalid_config(format!(
                "initial gravity {}ms is below the {}ms floor",
                self.initial_gravity_ms, self.min_gravity_ms
            )));
        }
        if self.lines_per_speedup == 0 {
            return Err(EngineError::invalid_config(
                "lines per speed-up must be positive",
            ));
        }
        Ok(())
    }
}
