//! Session configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::core::EngineConfig;
use crate::types::{MOVE_DELAY_MS, TICK_MS};

/// Settings for one async game session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Piece RNG seed
    pub seed: u32,
    /// Minimum session time between accepted player moves
    pub move_delay_ms: u32,
    /// Gravity ticker period
    pub tick_ms: u32,
    /// Command channel depth
    pub max_pending_commands: usize,
    /// Where the demo writes its ledger export; stdout if unset
    pub export_path: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            move_delay_ms: MOVE_DELAY_MS,
            tick_ms: TICK_MS,
            max_pending_commands: 64,
            export_path: None,
        }
    }
}

impl SessionConfig {
    /// Create from `PROOF_TETRIS_*` environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Create from any key lookup; unset or unparsable values fall back to defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let seed = lookup("PROOF_TETRIS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let move_delay_ms = lookup("PROOF_TETRIS_MOVE_DELAY_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.move_delay_ms);

        let tick_ms = lookup("PROOF_TETRIS_TICK_MS")
            .and_then(|s| s.trim().parse().ok())
            .filter(|&ms: &u32| ms > 0)
            .unwrap_or(defaults.tick_ms);

        let max_pending_commands = lookup("PROOF_TETRIS_MAX_PENDING")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.max_pending_commands);

        let export_path = lookup("PROOF_TETRIS_EXPORT_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        Self {
            seed,
            move_delay_ms,
            tick_ms,
            max_pending_commands,
            export_path,
        }
    }

    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            move_delay_ms: self.move_delay_ms,
            ..EngineConfig::seeded(self.seed)
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms as u64)
    }
}

/// Seed derived from the wall clock when none is configured
fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
