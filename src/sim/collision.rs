//! Pairwise collision detection and kind-pair resolution
//!
//! Brute-force O(n²) scan over every live entity, including ones already
//! queued for removal this tick. Overlap is plain AABB; what happens on
//! overlap depends only on the two kinds involved.

use super::body::EntityKind;
use super::registry::{Handle, Registry};
use crate::consts::CONTACT_DAMAGE;
use crate::settings::PairScan;

/// Effect applied when two entities of specific kinds overlap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEffect {
    /// Player takes contact damage, the mob is removed
    Contact { player: Handle, mob: Handle },
    /// Both removed, player is credited a kill
    Kill { projectile: Handle, mob: Handle },
}

/// Kind-pair rule table. Same-kind and undefined pairs yield `None`.
pub fn rule_for(a: (Handle, EntityKind), b: (Handle, EntityKind)) -> Option<CollisionEffect> {
    use EntityKind::*;
    match (a.1, b.1) {
        (x, y) if x == y => None,
        (Player, Mob) => Some(CollisionEffect::Contact { player: a.0, mob: b.0 }),
        (Mob, Player) => Some(CollisionEffect::Contact { player: b.0, mob: a.0 }),
        (Projectile, Mob) => Some(CollisionEffect::Kill { projectile: a.0, mob: b.0 }),
        (Mob, Projectile) => Some(CollisionEffect::Kill { projectile: b.0, mob: a.0 }),
        _ => None,
    }
}

/// Summary of one resolver pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Overlapping pairs visited, ruled or not
    pub overlaps: u32,
    pub contacts: u32,
    pub kills: u32,
}

/// Scans live entities pairwise each tick and applies kind-pair effects
#[derive(Debug, Clone, Default)]
pub struct CollisionResolver {
    pub scan: PairScan,
}

impl CollisionResolver {
    pub fn new(scan: PairScan) -> Self {
        Self { scan }
    }

    /// Collect the effects for the current registry contents without applying
    /// them. Order follows the pair enumeration.
    pub fn detect(&self, registry: &Registry) -> (Vec<CollisionEffect>, u32) {
        let live: Vec<_> = registry.iter().collect();
        let mut effects = Vec::new();
        let mut overlaps = 0;

        for (i, (ha, a)) in live.iter().enumerate() {
            for (j, (hb, b)) in live.iter().enumerate() {
                let visit = match self.scan {
                    PairScan::Unordered => i < j,
                    PairScan::Ordered => i != j,
                };
                if !visit || !a.body.overlaps(&b.body) {
                    continue;
                }
                overlaps += 1;
                if let Some(effect) = rule_for((*ha, a.kind()), (*hb, b.kind())) {
                    effects.push(effect);
                }
            }
        }
        (effects, overlaps)
    }

    /// Run one resolver pass. `player` is the session's Player, credited with
    /// kills. `_dt` is unused; tick-driven components share the signature.
    pub fn update(&mut self, registry: &mut Registry, player: Handle, _dt: f32) -> CollisionReport {
        let (effects, overlaps) = self.detect(registry);
        let mut report = CollisionReport {
            overlaps,
            ..Default::default()
        };

        for effect in effects {
            match effect {
                CollisionEffect::Contact { player: hit, mob } => {
                    if let Some(p) = registry.get_mut(hit) {
                        p.body.health -= CONTACT_DAMAGE;
                        log::debug!("{} hit by mob {}, health {}", hit.id, mob.id, p.body.health);
                    }
                    registry.queue_removal(mob);
                    report.contacts += 1;
                }
                CollisionEffect::Kill { projectile, mob } => {
                    registry.queue_removal(projectile);
                    registry.queue_removal(mob);
                    if let Some(p) = registry.get_mut(player).and_then(|e| e.as_player_mut()) {
                        p.kills += 1;
                    }
                    log::debug!("projectile {} destroyed mob {}", projectile.id, mob.id);
                    report.kills += 1;
                }
            }
        }
        report
    }
}
