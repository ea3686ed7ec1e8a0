use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Smallest board that still fits the starting snake and food cells.
pub const MIN_GRID_SIZE: usize = 9;

/// Largest board a terminal can reasonably draw.
pub const MAX_GRID_SIZE: usize = 101;

/// Errors raised when validating a [`GameConfig`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("grid size must be odd, got {0}")]
    EvenGridSize(usize),
    #[error("grid size must be at least {min}, got {0}", min = MIN_GRID_SIZE)]
    GridTooSmall(usize),
    #[error("grid size must be at most {max}, got {0}", max = MAX_GRID_SIZE)]
    GridTooLarge(usize),
    #[error("minimum speed must be non-zero")]
    ZeroMinSpeed,
    #[error("base speed {base}ms is faster than the minimum speed {min}ms")]
    BaseBelowMinimum { base: u64, min: u64 },
    #[error("power-up duration must be non-zero")]
    ZeroPowerUpDuration,
    #[error("power-up spawn interval must be non-zero")]
    ZeroSpawnInterval,
}

/// Configuration for the game
///
/// All values are fixed once a simulation is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Side length of the square board (odd, the board spans `-B..=B`)
    pub grid_size: usize,
    /// Tick interval at the start of a run, in milliseconds
    pub base_speed_ms: u64,
    /// How much faster a tick gets per food eaten, in milliseconds
    pub speed_increment_ms: u64,
    /// Floor for the tick interval, in milliseconds
    pub min_speed_ms: u64,
    /// Score awarded per food
    pub points_per_food: u32,
    /// Lifetime of a collected power-up, in milliseconds
    pub power_up_duration_ms: u64,
    /// Cooldown between power-up spawns, in milliseconds
    pub power_up_spawn_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 15,
            base_speed_ms: 150,
            speed_increment_ms: 2,
            min_speed_ms: 50,
            points_per_food: 10,
            power_up_duration_ms: 5_000,
            power_up_spawn_interval_ms: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create the smallest valid board
    pub fn small() -> Self {
        Self::new(MIN_GRID_SIZE)
    }

    /// Load a configuration from a JSON file; missing fields keep their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    /// Half the board size: coordinates live in `-boundary..=boundary`
    ///
    /// Saturates for sizes that [`GameConfig::validate`] rejects.
    pub fn boundary(&self) -> i32 {
        i32::try_from(self.grid_size / 2).unwrap_or(i32::MAX)
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        self.grid_size.saturating_mul(self.grid_size)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size % 2 == 0 {
            return Err(ConfigError::EvenGridSize(self.grid_size));
        }
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if self.grid_size > MAX_GRID_SIZE {
            return Err(ConfigError::GridTooLarge(self.grid_size));
        }
        if self.min_speed_ms == 0 {
            return Err(ConfigError::ZeroMinSpeed);
        }
        if self.base_speed_ms < self.min_speed_ms {
            return Err(ConfigError::BaseBelowMinimum {
                base: self.base_speed_ms,
                min: self.min_speed_ms,
            });
        }
        if self.power_up_duration_ms == 0 {
            return Err(ConfigError::ZeroPowerUpDuration);
        }
        if self.power_up_spawn_interval_ms == 0 {
            return Err(ConfigError::ZeroSpawnInterval);
        }
        Ok(())
    }
}
