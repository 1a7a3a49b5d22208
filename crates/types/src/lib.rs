//! Shared types and constants for the falling-block engine.
//!
//! Everything here is plain data: piece kinds, input intents, tuning constants
//! and the engine error type. The engine (`blockfall-core`), the input layer and
//! the terminal layer all depend on this crate and on nothing of each other.
//!
//! # Board Dimensions
//!
//! The board size is chosen per session. The defaults match the largest board
//! the terminal front-end will ever create:
//!
//! - **Width**: 30 columns (indexed 0-29)
//! - **Height**: 40 rows (indexed 0-39, row 0 at the top)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host loop interval |
//! | `INITIAL_GRAVITY_MS` | 500 | Gravity interval at session start |
//! | `GRAVITY_STEP_MS` | 50 | Interval decrease per speed-up |
//! | `MIN_GRAVITY_MS` | 100 | Gravity interval floor |
//! | `LINES_PER_SPEEDUP` | 10 | Cleared lines between speed-ups |
//! | `REPEAT_DELAY_MS` | 150 | Held key: delay before auto-repeat starts |
//! | `REPEAT_RATE_MS` | 50 | Held key: interval between repeats |
//! | `KEY_RELEASE_TIMEOUT_MS` | 550 | Held key considered released without events |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(Intent::from_str("hardDrop"), Some(Intent::HardDrop));
//! assert!(Intent::MoveLeft.repeats_when_held());
//! assert!(!Intent::Quit.repeats_when_held());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default board width in cells.
pub const DEFAULT_BOARD_COLS: usize = 30;

/// Default board height in cells.
pub const DEFAULT_BOARD_ROWS: usize = 40;

/// Host loop interval in milliseconds (16ms ≈ 60 FPS).
pub const TICK_MS: u32 = 16;

/// Gravity interval when a session starts.
pub const INITIAL_GRAVITY_MS: u32 = 500;

/// Amount the gravity interval shrinks at each speed-up.
pub const GRAVITY_STEP_MS: u32 = 50;

/// The gravity interval never drops below this.
pub const MIN_GRAVITY_MS: u32 = 100;

/// Cumulative cleared lines between two speed-ups.
pub const LINES_PER_SPEEDUP: u32 = 10;

/// Delay before a held key starts repeating.
pub const REPEAT_DELAY_MS: u32 = 150;

/// Interval between repeats of a held key.
pub const REPEAT_RATE_MS: u32 = 50;

/// Without release events, a key is considered released after this long
/// without a press or repeat event for it. Longer than the usual OS
/// auto-repeat delay (about 500 ms), whose repeated presses keep the key held.
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 550;

/// Points awarded for clearing N lines in a single lock (index = N).
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// The seven standard piece kinds.
///
/// The kind doubles as the display tag of a piece and of every board cell the
/// piece leaves behind when it locks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in shape table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// A discrete player command.
///
/// Intents are produced outside the engine (from keys, a bot, a test) and are
/// applied exactly once each. The engine keeps no notion of how long a key
/// was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down
    SoftDrop,
    /// Rotate piece 90° clockwise
    Rotate,
    /// Rotate piece 90° counter-clockwise
    RotateCounterClockwise,
    /// Drop piece to the lowest legal row and lock it
    HardDrop,
    /// End the session
    Quit,
}

impl Intent {
    /// Parse intent from its camelCase name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(Intent::MoveLeft),
            "moveright" => Some(Intent::MoveRight),
            "softdrop" => Some(Intent::SoftDrop),
            "rotate" => Some(Intent::Rotate),
            "rotatecounterclockwise" => Some(Intent::RotateCounterClockwise),
            "harddrop" => Some(Intent::HardDrop),
            "quit" => Some(Intent::Quit),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::MoveLeft => "moveLeft",
            Intent::MoveRight => "moveRight",
            Intent::SoftDrop => "softDrop",
            Intent::Rotate => "rotate",
            Intent::RotateCounterClockwise => "rotateCounterClockwise",
            Intent::HardDrop => "hardDrop",
            Intent::Quit => "quit",
        }
    }

    /// Whether a held key bound to this intent auto-repeats.
    pub fn repeats_when_held(&self) -> bool {
        matches!(
            self,
            Intent::MoveLeft
                | Intent::MoveRight
                | Intent::SoftDrop
                | Intent::Rotate
                | Intent::RotateCounterClockwise
        )
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a piece of that kind
pub type Cell = Option<PieceKind>;

/// Invalid engine configuration.
///
/// These are programming errors surfaced at construction time; nothing in a
/// running session returns them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("unknown shape tag `{0}`")]
    UnknownTag(String),
}

impl EngineError {
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(INITIAL_GRAVITY_MS, 500);
        assert_eq!(GRAVITY_STEP_MS, 50);
        assert_eq!(MIN_GRAVITY_MS, 100);
        assert_eq!(LINES_PER_SPEEDUP, 10);
        assert_eq!(REPEAT_DELAY_MS, 150);
        assert_eq!(REPEAT_RATE_MS, 50);
    }

    #[test]
    fn line_scores_table() {
        assert_eq!(LINE_SCORES, [0, 100, 300, 500, 800]);
    }

    #[test]
    fn piece_kind_string_roundtrip() {
        for kind in PieceKind::ALL {
            assert_eq!(PieceKind::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn intent_parsing_is_case_insensitive() {
        assert_eq!(Intent::from_str("MOVELEFT"), Some(Intent::MoveLeft));
        assert_eq!(
            Intent::from_str("rotateCounterClockwise"),
            Some(Intent::RotateCounterClockwise)
        );
        assert_eq!(Intent::from_str("hold"), None);
    }

    #[test]
    fn hard_drop_and_quit_do_not_repeat() {
        assert!(!Intent::HardDrop.repeats_when_held());
        assert!(!Intent::Quit.repeats_when_held());
        assert!(Intent::SoftDrop.repeats_when_held());
    }

    #[test]
    fn error_messages() {
        let err = EngineError::invalid_config("board has zero rows");
        assert_eq!(err.to_string(), "invalid configuration: board has zero rows");
        assert_eq!(
            EngineError::UnknownTag("x".into()).to_string(),
            "unknown shape tag `x`"
        );
    }
}
