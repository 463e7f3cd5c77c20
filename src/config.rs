//! Engine constants, fixed when an engine is built

use crate::board::{DEFAULT_COLUMNS, DEFAULT_ROWS};
use crate::engine::spawn_anchor;
use crate::error::ConfigError;
use crate::tetromino::{PALETTE, SHAPES};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Smallest board edge that fits an I piece standing or lying. Spawning adds
/// a wider constraint on columns, see [`EngineConfig::validate`].
pub const MIN_BOARD_EDGE: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub columns: usize,
    pub rows: usize,
    /// Gravity period in milliseconds
    pub gravity_ms: u64,
    /// Grace period between grounding and locking, in milliseconds
    pub lock_delay_ms: u64,
    /// How long full rows stay highlighted before they are removed
    pub clear_animation_ms: u64,
    pub per_square_score: u64,
    /// Number of palette colours pieces draw from
    pub palette_size: usize,
    /// Fixed RNG seed for reproducible games
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            rows: DEFAULT_ROWS,
            gravity_ms: 500,
            lock_delay_ms: 300,
            clear_animation_ms: 500,
            per_square_score: 1,
            palette_size: PALETTE.len(),
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns < MIN_BOARD_EDGE || self.rows < MIN_BOARD_EDGE {
            return Err(ConfigError::BoardTooSmall {
                columns: self.columns,
                rows: self.rows,
                min: MIN_BOARD_EDGE,
            });
        }
        // Every shape has to fit at the spawn point in its first rotation
        let anchor = spawn_anchor(self.columns);
        let spawn_fits = SHAPES.iter().all(|shape| {
            shape.rotations()[0].iter().all(|&offset| {
                let cell = anchor + offset;
                cell.x < self.columns as i32 && cell.y < self.rows as i32
            })
        });
        if !spawn_fits {
            return Err(ConfigError::SpawnOffBoard {
                columns: self.columns,
            });
        }
        if self.palette_size == 0 || self.palette_size > PALETTE.len() {
            return Err(ConfigError::PaletteSize {
                got: self.palette_size,
                max: PALETTE.len(),
            });
        }
        for (name, ms) in [
            ("gravity_ms", self.gravity_ms),
            ("lock_delay_ms", self.lock_delay_ms),
            ("clear_animation_ms", self.clear_animation_ms),
        ] {
            if ms == 0 {
                return Err(ConfigError::ZeroDuration { name });
            }
        }
        Ok(())
    }

    pub fn gravity(&self) -> Duration {
        Duration::from_millis(self.gravity_ms)
    }

    pub fn lock_delay(&self) -> Duration {
        Duration::from_millis(self.lock_delay_ms)
    }

    pub fn clear_animation(&self) -> Duration {
        Duration::from_millis(self.clear_animation_ms)
    }
}
