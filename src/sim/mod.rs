//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (ascending arena slot)
//! - Removal deferred to the purge phase of each tick
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod entity;
pub mod input;
pub mod registry;
pub mod rng;
pub mod spawner;
pub mod state;
pub mod tick;

pub use body::{Body, EntityId, EntityKind, IdAllocator};
pub use collision::{CollisionEffect, CollisionReport, CollisionResolver, rule_for};
pub use entity::{
    Behavior, Entity, KindState, MobState, Playfield, PlayerState, ProjectileState, SpawnRequest,
    UpdateCtx,
};
pub use input::{Controller, ControllerSource, ScriptedController};
pub use registry::{Handle, RemovalQueue, Registry};
pub use rng::SimRng;
pub use spawner::Spawner;
pub use state::{EntityView, FrameSnapshot, GamePhase, HudStats, World};
pub use tick::{GameLoop, TickReport, tick};
