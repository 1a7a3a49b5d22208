//! Blockfall (workspace facade crate).
//!
//! Re-exports the engine, input and terminal crates under
//! `blockfall::{core, input, term, types}` and holds the runner's
//! environment-driven configuration.

pub mod config;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use config::RunConfig;
