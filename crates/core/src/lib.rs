//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the falling-block rules and the per-session state
//! machine. It has **no dependencies** on terminals, keyboards or audio:
//!
//! - **Deterministic**: a session is fully determined by its seed and the
//!   intents and elapsed times fed to it
//! - **Testable**: every rule is reachable through plain function calls
//! - **Portable**: input arrives as [`types::Intent`] values and output leaves
//!   as a [`GameSnapshot`]
//!
//! # Module Structure
//!
//! - [`shapes`]: the seven canonical shapes and the occupancy [`Matrix`]
//! - [`piece`]: the falling piece, with unchecked rotate/translate
//! - [`board`]: the occupancy grid, merging and line clearing
//! - [`collision`]: placement legality
//! - [`spawner`]: uniform random spawning at the top centre
//! - [`scoring`]: line-clear points and gravity speed-ups
//! - [`config`]: per-session board size and gravity tuning
//! - [`game_state`]: the tick-driven state machine
//! - [`snapshot`]: render state for the renderer
//!
//! # Game Rules
//!
//! - Pieces spawn centred with their first occupied row on board row 0
//! - Moves and rotations are tried speculatively and reverted on collision
//! - Hard drop falls to the lowest legal row and locks immediately
//! - Gravity moves the piece down once per interval; a blocked fall locks it
//! - Clearing 1/2/3/4 lines in one lock scores 100/300/500/800
//! - Gravity speeds up by 50ms every 10 lines, down to 100ms
//! - A spawned piece that collides where it spawned ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState, TickStatus};
//! use blockfall_core::types::Intent;
//!
//! let config = GameConfig::default().with_board(20, 10);
//! let mut game = GameState::new(config, 12345).unwrap();
//!
//! let status = game.tick(16, [Intent::MoveRight, Intent::Rotate, Intent::HardDrop]);
//! assert_eq!(status, TickStatus::Running);
//! assert_eq!(game.board().filled_count(), 4);
//!
//! let snapshot = game.snapshot();
//! assert_eq!((snapshot.rows, snapshot.cols), (20, 10));
//! ```

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod piece;
pub mod scoring;
pub mod shapes;
pub mod snapshot;
pub mod spawner;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::collides;
pub use config::GameConfig;
pub use game_state::{GameOverReason, GameState, LockEvent, Phase, SessionOutcome, TickStatus};
pub use piece::Piece;
pub use shapes::{shapes, Matrix, Shape};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
pub use spawner::{spawn, spawn_kind};
