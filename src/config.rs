//! Runtime configuration read from environment variables.
//!
//! | Variable              | Meaning                               | Default      |
//! |-----------------------|---------------------------------------|--------------|
//! | `BLOCKFALL_SEED`      | seed for the shape generator (`u32`)  | clock based  |
//! | `BLOCKFALL_FALL_MS`   | initial fall interval in ms (min 50)  | 500          |
//! | `BLOCKFALL_EVENT_LOG` | path of the JSON-lines event journal  | disabled     |
//!
//! Invalid values fall back to the defaults; configuration never fails.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::scoring::clamp_fall_interval_ms;
use crate::core::{SessionConfig, SimpleRng};
use crate::types::INITIAL_FALL_INTERVAL_MS;

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const FALL_MS_VAR: &str = "BLOCKFALL_FALL_MS";
pub const EVENT_LOG_VAR: &str = "BLOCKFALL_EVENT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub seed: u32,
    /// Always at least the gravity floor
    pub fall_interval_ms: u32,
    pub event_log: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            fall_interval_ms: INITIAL_FALL_INTERVAL_MS,
            event_log: None,
        }
    }
}

impl GameConfig {
    /// Create from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from any key lookup (used by tests instead of mutating the
    /// process environment).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup(SEED_VAR)
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let fall_interval_ms = lookup(FALL_MS_VAR)
            .and_then(|s| s.trim().parse().ok())
            .map(clamp_fall_interval_ms)
            .unwrap_or(INITIAL_FALL_INTERVAL_MS);

        let event_log = lookup(EVENT_LOG_VAR)
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            fall_interval_ms,
            event_log,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::with_fall_interval_ms(self.fall_interval_ms)
    }

    pub fn shape_source(&self) -> SimpleRng {
        SimpleRng::new(self.seed)
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
