//! Terminal front-end for the game.
//!
//! A small, game-oriented rendering layer: a snapshot is drawn into a plain
//! framebuffer, and the framebuffer is diffed and flushed to the terminal with
//! crossterm. No widget toolkit is involved.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{kind_color, GameView, Viewport, BLOCK};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
