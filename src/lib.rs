//! Arcade Sim - a fixed-timestep 2D shooter core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, spawning, tick loop)
//! - `settings`: Playfield, tick rate and seed configuration
//!
//! Rendering, raw input capture and HUD drawing live outside this crate.
//! Hosts feed a [`sim::Controller`] snapshot in and read a
//! [`sim::FrameSnapshot`] back out.

pub mod settings;
pub mod sim;

pub use settings::{PairScan, Settings};

/// Game configuration constants
pub mod consts {
    /// Default simulation rate
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 320.0;
    pub const PLAYFIELD_HEIGHT: f32 = 480.0;

    /// Starting health for damageable kinds
    pub const DEFAULT_HEALTH: i32 = 100;

    /// Player defaults
    pub const PLAYER_SPEED: f32 = 120.0;
    pub const PLAYER_WIDTH: f32 = 11.0;
    pub const PLAYER_HEIGHT: f32 = 10.0;
    /// Distance from the bottom edge at spawn
    pub const PLAYER_SPAWN_INSET: f32 = 40.0;
    /// Seconds between shots while fire is held
    pub const FIRE_INTERVAL: f32 = 1.0;

    /// Projectile defaults
    pub const PROJECTILE_WIDTH: f32 = 3.0;
    pub const PROJECTILE_HEIGHT: f32 = 12.0;
    pub const PROJECTILE_SPEED: f32 = 100.0;
    /// Gap between the player's top edge and a fresh projectile
    pub const PROJECTILE_SPAWN_MARGIN: f32 = 2.0;
    /// Upper bound (inclusive) of the per-tick deceleration roll
    pub const PROJECTILE_MAX_DECELERATION: i32 = 6;
    /// Projectiles at or above this y are off the top edge
    pub const PROJECTILE_DESPAWN_Y: f32 = -5.0;

    /// Mob defaults
    pub const MOB_SPEED: f32 = 100.0;
    pub const MOB_WIDTH: f32 = 10.0;
    pub const MOB_HEIGHT: f32 = 20.0;
    pub const MOB_SPAWN_Y: f32 = -12.0;
    /// Horizontal spawn margin from either side
    pub const MOB_SPAWN_MARGIN: f32 = 20.0;
    /// Distance from the side walls that triggers a bounce
    pub const MOB_BOUNCE_MARGIN: f32 = 5.0;
    /// How far past the bottom edge a mob travels before despawning
    pub const MOB_DESPAWN_MARGIN: f32 = 5.0;
    /// First heading change comes almost immediately
    pub const MOB_INITIAL_SWITCH_INTERVAL: f32 = 0.1;
    /// Upper bound of the re-rolled switch interval (seconds)
    pub const MOB_MAX_SWITCH_INTERVAL: f32 = 2.0;

    /// Seconds between mob spawns
    pub const SPAWN_INTERVAL: f32 = 5.0;

    /// Damage a mob deals on contact with the player
    pub const CONTACT_DAMAGE: i32 = 20;

    /// Default session seed
    pub const DEFAULT_SEED: u64 = 0x5EED_0A2C_ADE5;
}
