//! Terminal input (engine-facing).
//!
//! Independent of any UI framework. It maps `crossterm` key events into
//! [`crate::types::Intent`] values and provides a held-key auto-repeat handler
//! suitable for terminal environments (including terminals without
//! key-release events).

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{handle_key_event, replay_answer, should_quit, ReplayAnswer};
