//! Fixed timestep simulation tick
//!
//! [`tick`] advances the world by exactly one step. [`GameLoop`] turns host
//! frame callbacks into zero or more fixed ticks.

use super::collision::CollisionReport;
use super::entity::SpawnRequest;
use super::input::{Controller, ControllerSource};
use super::state::{GamePhase, World};
use crate::settings::Settings;

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub collisions: CollisionReport,
    /// Entities erased by the purge
    pub purged: usize,
    pub projectiles_fired: u32,
    pub mob_spawned: bool,
    pub restarted: bool,
}

/// Advance the world by one fixed timestep
///
/// Running order: controller into Player, every entity updates, queued spawns
/// are inserted, collisions resolve, the removal queue is purged, the spawner
/// runs, and finally the loss condition is checked. GameOver only watches for
/// the restart trigger.
pub fn tick(world: &mut World, controller: Controller, dt: f32) -> TickReport {
    let mut report = TickReport::default();

    match world.phase {
        GamePhase::Idle => return report,
        GamePhase::GameOver => {
            if controller.action_1 {
                world.restart();
                report.restarted = true;
            }
            return report;
        }
        GamePhase::Running => {}
    }

    world.time_ticks += 1;

    if let Some(p) = world.player_state_mut() {
        p.controller = controller;
    }

    // Entity pass; fired shots wait until every entity has moved
    let mut spawns = std::mem::take(&mut world.spawn_buffer);
    world.update_entities(dt, &mut spawns);
    for request in spawns.drain(..) {
        match request {
            SpawnRequest::Projectile { origin } => {
                world.spawn_projectile(origin);
                report.projectiles_fired += 1;
            }
        }
    }
    world.spawn_buffer = spawns;

    let player = world.player;
    report.collisions = world.resolver.update(&mut world.registry, player, dt);

    report.purged = world.registry.purge();

    if world.spawner.update(dt) {
        world.spawn_mob();
        if let Some(p) = world.player_state_mut() {
            p.mobs_spawned += 1;
        }
        report.mob_spawned = true;
    }

    if world.player_dead() {
        world.phase = GamePhase::GameOver;
        let hud = world.hud();
        log::info!(
            "Game over after {:.1}s: {} kills, {} mobs spawned",
            hud.lifetime,
            hud.kills,
            hud.mobs_spawned
        );
    }

    report
}

/// Turns host frame callbacks into fixed ticks
#[derive(Debug, Clone)]
pub struct GameLoop {
    pub world: World,
    /// Seconds per tick
    tick_duration: f64,
    /// Cap on ticks per callback (None = catch up fully)
    max_catch_up: Option<u32>,
    accumulator: f64,
    last_time: Option<f64>,
    /// Total ticks run through this loop
    pub ticks_run: u64,
}

impl GameLoop {
    pub fn new(settings: &Settings) -> Self {
        Self {
            world: World::new(settings),
            tick_duration: settings.tick_duration(),
            max_catch_up: settings.max_catch_up_ticks,
            accumulator: 0.0,
            last_time: None,
            ticks_run: 0,
        }
    }

    pub fn tick_duration(&self) -> f64 {
        self.tick_duration
    }

    /// Leftover time not yet consumed by a tick
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    /// Host frame callback. `now` is wall time in seconds. The first call
    /// only records the time. Polls `input` once per tick and returns how
    /// many ticks ran.
    pub fn frame(&mut self, now: f64, input: &mut impl ControllerSource) -> u32 {
        let elapsed = match self.last_time {
            Some(last) => (now - last).max(0.0),
            None => 0.0,
        };
        self.last_time = Some(now);
        self.accumulator += elapsed;

        let dt = self.tick_duration as f32;
        let mut substeps = 0;
        while self.accumulator >= self.tick_duration {
            if self.max_catch_up.is_some_and(|cap| substeps >= cap) {
                // Drop whole ticks we can't afford, keep the fraction
                log::debug!("Dropping {:.3}s of catch-up", self.accumulator);
                self.accumulator %= self.tick_duration;
                break;
            }
            let controller = input.poll();
            tick(&mut self.world, controller, dt);
            self.accumulator -= self.tick_duration;
            substeps += 1;
        }
        self.ticks_run += substeps as u64;
        substeps
    }
}
