//! World state and the session state machine
//!
//! The [`World`] owns everything a tick mutates: the registry, the Player
//! handle, the spawner, the resolver, the id counter and the RNG stream.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{EntityId, EntityKind, IdAllocator};
use super::collision::CollisionResolver;
use super::entity::{Entity, Playfield, PlayerState, SpawnRequest};
use super::registry::{Handle, Registry};
use super::rng::SimRng;
use super::spawner::Spawner;
use crate::settings::{PairScan, Settings};

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No session started yet
    Idle,
    /// Player alive, world advancing
    Running,
    /// Player dead, waiting for action_1 to restart
    GameOver,
}

/// Player figures a HUD would show
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HudStats {
    pub health: i32,
    pub lifetime: f32,
    pub kills: u32,
    pub mobs_spawned: u32,
}

/// Render-facing view of one entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub health: i32,
    pub removal_queued: bool,
}

/// Everything an external renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub tick: u64,
    /// Ascending slot order
    pub entities: Vec<EntityView>,
    pub hud: HudStats,
}

/// Authoritative simulation state
#[derive(Debug, Clone)]
pub struct World {
    pub playfield: Playfield,
    pub phase: GamePhase,
    pub registry: Registry,
    /// The session's Player; dangling while Idle
    pub player: Handle,
    pub spawner: Spawner,
    pub resolver: CollisionResolver,
    /// Ticks run since the world was created (across restarts)
    pub time_ticks: u64,
    /// Completed restarts
    pub restarts: u32,
    pair_scan: PairScan,
    ids: IdAllocator,
    rng: SimRng,
    pub(crate) spawn_buffer: Vec<SpawnRequest>,
}

impl World {
    /// Create an idle world; call [`World::start`] to begin a session
    pub fn new(settings: &Settings) -> Self {
        Self {
            playfield: Playfield {
                width: settings.playfield_width,
                height: settings.playfield_height,
            },
            phase: GamePhase::Idle,
            registry: Registry::new(),
            player: Handle::DANGLING,
            spawner: Spawner::default(),
            resolver: CollisionResolver::new(settings.pair_scan),
            time_ticks: 0,
            restarts: 0,
            pair_scan: settings.pair_scan,
            ids: IdAllocator::new(),
            rng: SimRng::new(settings.seed),
            spawn_buffer: Vec::new(),
        }
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        if self.phase != GamePhase::Idle {
            return;
        }
        self.reset_session();
        log::info!(
            "Session started (seed {}, playfield {}x{})",
            self.rng.seed(),
            self.playfield.width,
            self.playfield.height
        );
    }

    /// GameOver -> Running with a fresh registry, Player, spawner and
    /// resolver. The id counter and RNG stream carry on.
    pub fn restart(&mut self) {
        self.reset_session();
        self.restarts += 1;
        log::info!("Session restarted ({} restarts, next id {})", self.restarts, self.ids.peek());
    }

    fn reset_session(&mut self) {
        self.registry = Registry::new();
        self.spawner = Spawner::default();
        self.resolver = CollisionResolver::new(self.pair_scan);
        self.spawn_buffer.clear();
        let player = Entity::player(self.ids.allocate(), self.playfield);
        self.player = self.registry.insert(player);
        self.phase = GamePhase::Running;
    }

    /// Next id the allocator will hand out
    pub fn next_id(&self) -> EntityId {
        self.ids.peek()
    }

    /// Update pass over every live entity, in slot order
    pub(crate) fn update_entities(&mut self, dt: f32, spawns: &mut Vec<SpawnRequest>) {
        self.registry
            .update_all(dt, self.playfield, &mut self.rng, spawns);
    }

    pub fn spawn_mob(&mut self) -> Handle {
        let mob = Entity::mob(self.ids.allocate(), self.playfield, &mut self.rng);
        log::debug!("Spawned mob {} at x={:.1}", mob.id(), mob.body.pos.x);
        self.registry.insert(mob)
    }

    pub fn spawn_projectile(&mut self, origin: Vec2) -> Handle {
        let shot = Entity::projectile(self.ids.allocate(), origin, &mut self.rng);
        self.registry.insert(shot)
    }

    /// Insert a prebuilt entity under a fresh id
    pub fn spawn_with(&mut self, build: impl FnOnce(EntityId) -> Entity) -> Handle {
        let entity = build(self.ids.allocate());
        self.registry.insert(entity)
    }

    pub fn player_entity(&self) -> Option<&Entity> {
        self.registry.get(self.player)
    }

    pub fn player_entity_mut(&mut self) -> Option<&mut Entity> {
        self.registry.get_mut(self.player)
    }

    pub fn player_state(&self) -> Option<&PlayerState> {
        self.player_entity().and_then(|e| e.as_player())
    }

    pub fn player_state_mut(&mut self) -> Option<&mut PlayerState> {
        self.player_entity_mut().and_then(|e| e.as_player_mut())
    }

    /// Player death is the only loss condition
    pub fn player_dead(&self) -> bool {
        self.player_entity().is_some_and(|e| e.is_dead())
    }

    pub fn hud(&self) -> HudStats {
        match self.player_entity() {
            Some(e) => {
                let p = e.as_player().cloned().unwrap_or_default();
                HudStats {
                    health: e.body.health,
                    lifetime: p.lifetime,
                    kills: p.kills,
                    mobs_spawned: p.mobs_spawned,
                }
            }
            None => HudStats::default(),
        }
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            phase: self.phase,
            tick: self.time_ticks,
            entities: self
                .registry
                .iter()
                .map(|(_, e)| EntityView {
                    id: e.id(),
                    kind: e.kind(),
                    pos: e.body.pos,
                    size: e.body.size,
                    health: e.body.health,
                    removal_queued: e.body.removal_queued,
                })
                .collect(),
            hud: self.hud(),
        }
    }
}
