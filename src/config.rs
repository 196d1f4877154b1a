//! Arena configuration loaded from JSON.
//!
//! Every field is optional in the file and falls back to the built-in default:
//!
//! ```json
//! {
//!   "width": 800,
//!   "height": 600,
//!   "capacity": 20,
//!   "tick_interval_ms": 6,
//!   "spawn_margin": 50,
//!   "seed": 42,
//!   "shape": "Circle"
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::arena::Arena;
use crate::body::ShapeKind;
use crate::error::ConfigError;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Viewport size; the playable region is inset from it by [`Arena::MARGIN`].
    pub width: u32,
    pub height: u32,
    /// Number of body slots.
    pub capacity: usize,
    /// Target delay between ticks for a paced host loop. Best effort, missed ticks are not made up.
    pub tick_interval_ms: u64,
    /// Distance from the viewport edge that spawned bodies keep clear of.
    pub spawn_margin: u32,
    /// Seed for spawning and acceleration; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Shape given to populated bodies.
    pub shape: ShapeKind,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: Arena::DEFAULT_WIDTH,
            height: Arena::DEFAULT_HEIGHT,
            capacity: Arena::DEFAULT_CAPACITY,
            tick_interval_ms: 6,
            spawn_margin: Arena::DEFAULT_SPAWN_MARGIN,
            seed: None,
            shape: ShapeKind::Circle,
        }
    }
}

impl ArenaConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.capacity > Arena::MAX_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "capacity {} exceeds maximum {}",
                self.capacity,
                Arena::MAX_CAPACITY
            )));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
