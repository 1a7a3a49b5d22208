//! Runner configuration read from the environment.
//!
//! | variable | meaning |
//! |---|---|
//! | `BLOCKFALL_SEED` | `u64` seed for the first session; random when unset |
//! | `BLOCKFALL_LOG` | file that receives `tracing` output; logging is off when unset |

use std::path::PathBuf;

use anyhow::{Context, Result};

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const LOG_VAR: &str = "BLOCKFALL_LOG";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Seed of the first session. Later sessions use the following seeds.
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
}

impl RunConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let seed = get(SEED_VAR)
            .map(|raw| {
                raw.trim()
                    .parse::<u64>()
                    .with_context(|| format!("{SEED_VAR} must be an unsigned integer, got `{raw}`"))
            })
            .transpose()?;

        Ok(Self {
            seed,
            log_file: get(LOG_VAR).map(PathBuf::from),
        })
    }

    /// Seed of session number `session` (zero-based), given the base seed.
    pub fn session_seed(base: u64, session: u64) -> u64 {
        base.wrapping_add(session)
    }
}
