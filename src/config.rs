//! Game configuration
//!
//! Board dimensions, spawn column and tick interval are fixed for the
//! lifetime of a game instance. The tick interval is carried for external
//! schedulers; the core itself never sleeps.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_HEIGHT, DEFAULT_SPAWN_X, DEFAULT_TICK_MS, DEFAULT_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Interval between gravity ticks (milliseconds), for the caller's scheduler
    pub tick_ms: u32,
    /// Board width in columns
    pub width: u8,
    /// Board height in rows
    pub height: u8,
    /// Spawn column for new pieces; the spawn row is always 0
    pub spawn_x: u8,
}

impl GameConfig {
    pub fn new(tick_ms: u32, height: u8, width: u8, spawn_x: u8) -> Self {
        Self {
            tick_ms,
            width,
            height,
            spawn_x,
        }
    }

    /// Reject degenerate board sizes and off-board spawn columns.
    ///
    /// Board coordinates are signed 8-bit, so dimensions are capped at 127;
    /// anything wider would wrap negative in the collision arithmetic.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.width > 0, "board width must be at least 1");
        ensure!(self.height > 0, "board height must be at least 1");
        ensure!(
            self.width <= i8::MAX as u8,
            "board width {} exceeds the coordinate range (max {})",
            self.width,
            i8::MAX
        );
        ensure!(
            self.height <= i8::MAX as u8,
            "board height {} exceeds the coordinate range (max {})",
            self.height,
            i8::MAX
        );
        ensure!(
            self.spawn_x < self.width,
            "spawn column {} is outside a board {} columns wide",
            self.spawn_x,
            self.width
        );
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            spawn_x: DEFAULT_SPAWN_X,
        }
    }
}
