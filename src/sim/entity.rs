//! Entity kinds and their per-tick behavior
//!
//! An [`Entity`] is a shared [`Body`] plus one closed [`KindState`] variant.
//! Each variant implements [`Behavior`]; [`Entity::update`] dispatches on the
//! tag so there is no open-ended inheritance.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{Body, EntityId, EntityKind};
use super::input::Controller;
use super::registry::{Handle, RemovalQueue};
use super::rng::SimRng;
use crate::consts::*;

/// Read-only playfield extent used for clamping and boundary checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Default for Playfield {
    fn default() -> Self {
        Self {
            width: PLAYFIELD_WIDTH,
            height: PLAYFIELD_HEIGHT,
        }
    }
}

/// Something an entity wants created once the update pass is over
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Projectile { origin: Vec2 },
}

/// Everything an entity may touch while updating itself
pub struct UpdateCtx<'a> {
    pub dt: f32,
    pub playfield: Playfield,
    pub rng: &'a mut SimRng,
    pub(crate) handle: Handle,
    pub(crate) removals: &'a mut RemovalQueue,
    pub(crate) spawns: &'a mut Vec<SpawnRequest>,
}

impl<'a> UpdateCtx<'a> {
    pub(crate) fn new(
        dt: f32,
        playfield: Playfield,
        rng: &'a mut SimRng,
        removals: &'a mut RemovalQueue,
        spawns: &'a mut Vec<SpawnRequest>,
    ) -> Self {
        Self {
            dt,
            playfield,
            rng,
            handle: Handle::DANGLING,
            removals,
            spawns,
        }
    }

    /// Queue the entity being updated for removal at the next purge
    pub fn remove(&mut self, body: &mut Body) {
        body.removal_queued = true;
        self.removals.push(self.handle);
    }

    pub fn spawn(&mut self, request: SpawnRequest) {
        self.spawns.push(request);
    }
}

/// Per-kind tick behavior
pub trait Behavior {
    const KIND: EntityKind;

    /// Advance one tick. Implementations apply their own velocity rules and
    /// then call [`Body::integrate`].
    fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx<'_>);
}

// ── Player ───────────────────────────────────────────────────────────────────

/// Player-only state, including the session statistics shown on the HUD
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Snapshot pulled in at the start of the tick
    pub controller: Controller,
    /// Seconds since the last shot
    pub fire_accumulator: f32,
    /// Seconds survived
    pub lifetime: f32,
    pub kills: u32,
    pub mobs_spawned: u32,
}

impl Behavior for PlayerState {
    const KIND: EntityKind = EntityKind::Player;

    fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx<'_>) {
        self.lifetime += ctx.dt;
        self.fire_accumulator += ctx.dt;

        let dir = Vec2::new(self.controller.move_x as f32, self.controller.move_y as f32);
        body.vel = dir * PLAYER_SPEED;
        if self.controller.move_x != 0 && self.controller.move_y != 0 {
            body.vel *= FRAC_1_SQRT_2;
        }

        // Held fire shoots at a fixed rate, not on the press edge
        if self.controller.action_1 && self.fire_accumulator >= FIRE_INTERVAL {
            let origin = body.pos - Vec2::new(0.0, body.half_size().y + PROJECTILE_SPAWN_MARGIN);
            ctx.spawn(SpawnRequest::Projectile { origin });
            self.fire_accumulator = 0.0;
        }

        body.integrate(ctx.dt);
        body.pos = body.pos.clamp(
            Vec2::ZERO,
            Vec2::new(ctx.playfield.width, ctx.playfield.height),
        );
    }
}

// ── Projectile ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectileState {
    /// Applied to y-velocity once per tick, rolled in [0, 6] at spawn
    pub deceleration: i32,
}

impl Behavior for ProjectileState {
    const KIND: EntityKind = EntityKind::Projectile;

    fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx<'_>) {
        if body.pos.y <= PROJECTILE_DESPAWN_Y {
            ctx.remove(body);
        }
        // Removal is deferred, so a departing shot still moves this tick
        body.vel.y -= self.deceleration as f32;
        body.integrate(ctx.dt);
    }
}

// ── Mob ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobState {
    pub speed: f32,
    /// Seconds since the last heading change
    pub switch_accumulator: f32,
    /// Seconds until the next heading change
    pub switch_interval: f32,
}

impl MobState {
    /// The three headings a mob can pick between
    pub fn headings(speed: f32) -> [Vec2; 3] {
        let diag = speed * FRAC_1_SQRT_2;
        [
            Vec2::new(diag, diag),
            Vec2::new(-diag, diag),
            Vec2::new(0.0, speed),
        ]
    }

    /// Pick a new heading and re-roll the switch interval
    pub fn switch(&mut self, body: &mut Body, rng: &mut SimRng) {
        let pick = rng.int_inclusive(1, 3);
        body.vel = Self::headings(self.speed)[(pick - 1) as usize];
        self.switch_interval = rng.float_inclusive(0.0, MOB_MAX_SWITCH_INTERVAL);
        self.switch_accumulator = 0.0;
    }
}

impl Behavior for MobState {
    const KIND: EntityKind = EntityKind::Mob;

    fn update(&mut self, body: &mut Body, ctx: &mut UpdateCtx<'_>) {
        self.switch_accumulator += ctx.dt;

        if body.pos.y >= ctx.playfield.height + MOB_DESPAWN_MARGIN {
            ctx.remove(body);
        }
        if body.pos.x >= ctx.playfield.width - MOB_BOUNCE_MARGIN {
            body.vel.x = -self.speed;
        }
        if body.pos.x <= MOB_BOUNCE_MARGIN {
            body.vel.x = self.speed;
        }

        body.integrate(ctx.dt);

        if self.switch_accumulator >= self.switch_interval {
            self.switch(body, ctx.rng);
        }
    }
}

// ── Entity ───────────────────────────────────────────────────────────────────

/// Kind-specific half of an entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum KindState {
    Player(PlayerState),
    Projectile(ProjectileState),
    Mob(MobState),
}

/// A simulated object: shared header plus kind state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub body: Body,
    pub state: KindState,
}

impl Entity {
    /// Player centred horizontally near the bottom edge
    pub fn player(id: EntityId, playfield: Playfield) -> Self {
        let pos = Vec2::new(
            playfield.width / 2.0,
            (playfield.height - PLAYER_SPAWN_INSET).max(0.0),
        );
        Self {
            body: Body::new(id, pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)),
            state: KindState::Player(PlayerState::default()),
        }
    }

    /// Projectile heading straight up from `origin`
    pub fn projectile(id: EntityId, origin: Vec2, rng: &mut SimRng) -> Self {
        let mut body = Body::new(id, origin, Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT));
        body.vel = Vec2::new(0.0, -PROJECTILE_SPEED);
        Self {
            body,
            state: KindState::Projectile(ProjectileState {
                deceleration: rng.int_inclusive(0, PROJECTILE_MAX_DECELERATION),
            }),
        }
    }

    /// Mob entering from just above the top edge
    pub fn mob(id: EntityId, playfield: Playfield, rng: &mut SimRng) -> Self {
        let x = rng.float_inclusive(MOB_SPAWN_MARGIN, playfield.width - MOB_SPAWN_MARGIN);
        let mut body = Body::new(
            id,
            Vec2::new(x, MOB_SPAWN_Y),
            Vec2::new(MOB_WIDTH, MOB_HEIGHT),
        );
        body.vel = Vec2::new(0.0, MOB_SPEED);
        Self {
            body,
            state: KindState::Mob(MobState {
                speed: MOB_SPEED,
                switch_accumulator: 0.0,
                switch_interval: MOB_INITIAL_SWITCH_INTERVAL,
            }),
        }
    }

    pub fn id(&self) -> EntityId {
        self.body.id
    }

    pub fn kind(&self) -> EntityKind {
        match self.state {
            KindState::Player(_) => PlayerState::KIND,
            KindState::Projectile(_) => ProjectileState::KIND,
            KindState::Mob(_) => MobState::KIND,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.body.is_dead()
    }

    /// Advance one tick according to the entity's kind
    pub fn update(&mut self, ctx: &mut UpdateCtx<'_>) {
        match &mut self.state {
            KindState::Player(p) => p.update(&mut self.body, ctx),
            KindState::Projectile(p) => p.update(&mut self.body, ctx),
            KindState::Mob(m) => m.update(&mut self.body, ctx),
        }
    }

    pub fn as_player(&self) -> Option<&PlayerState> {
        match &self.state {
            KindState::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_player_mut(&mut self) -> Option<&mut PlayerState> {
        match &mut self.state {
            KindState::Player(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_mob(&self) -> Option<&MobState> {
        match &self.state {
            KindState::Mob(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_projectile(&self) -> Option<&ProjectileState> {
        match &self.state {
            KindState::Projectile(p) => Some(p),
            _ => None,
        }
    }
}
