//! Periodic mob spawning

use serde::{Deserialize, Serialize};

use crate::consts::SPAWN_INTERVAL;

/// Constant-rate timer; fires once every `interval` accumulated seconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spawner {
    pub accumulator: f32,
    pub interval: f32,
}

impl Default for Spawner {
    fn default() -> Self {
        Self {
            accumulator: 0.0,
            interval: SPAWN_INTERVAL,
        }
    }
}

impl Spawner {
    /// Advance the timer. Returns true when a mob is due; the caller builds
    /// it and bumps the Player's spawn count.
    pub fn update(&mut self, dt: f32) -> bool {
        self.accumulator += dt;
        if self.accumulator >= self.interval {
            self.accumulator = 0.0;
            true
        } else {
            false
        }
    }
}
