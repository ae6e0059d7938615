//! Shared entity header
//!
//! Every simulated object carries a [`Body`]: identity, kinematics, extent,
//! health and the removal flag. Kind-specific state lives alongside it in
//! [`super::entity::Entity`].

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_HEALTH;

/// Process-unique entity identity
///
/// Serials increase monotonically and are never handed out twice, even when
/// the arena slot that held an entity is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out entity serials
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Serial the next allocation will return
    pub fn peek(&self) -> EntityId {
        EntityId(self.next)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Entity kind tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Projectile,
    Mob,
}

/// Axis-aligned body shared by all entity kinds
///
/// `pos` is the top-left corner of the bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Width and height, both > 0
    pub size: Vec2,
    pub health: i32,
    /// Set once removal has been requested; cleared only by the purge
    pub removal_queued: bool,
}

impl Body {
    pub fn new(id: EntityId, pos: Vec2, size: Vec2) -> Self {
        debug_assert!(size.x > 0.0 && size.y > 0.0, "body size must be positive");
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            health: DEFAULT_HEALTH,
            removal_queued: false,
        }
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// Constant-velocity integration
    pub fn integrate(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// True once health has dropped to zero or below (never clamped)
    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Axis-aligned overlap test (touching edges do not overlap)
    pub fn overlaps(&self, other: &Body) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(x: f32, y: f32, w: f32, h: f32) -> Body {
        Body::new(EntityId(1), Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_ids_strictly_increase() {
        let mut ids = IdAllocator::new();
        let a = ids.allocate();
        let b = ids.allocate();
        assert!(b > a);
        assert_eq!(ids.peek(), EntityId(b.0 + 1));
    }

    #[test]
    fn test_is_dead_boundary() {
        let mut b = body(0.0, 0.0, 1.0, 1.0);
        assert_eq!(b.health, DEFAULT_HEALTH);
        assert!(!b.is_dead());
        b.health = 1;
        assert!(!b.is_dead());
        b.health = 0;
        assert!(b.is_dead());
        b.health = -40;
        assert!(b.is_dead());
        // No implicit clamp
        assert_eq!(b.health, -40);
    }

    #[test]
    fn test_integrate() {
        let mut b = body(10.0, 10.0, 1.0, 1.0);
        b.vel = Vec2::new(60.0, -30.0);
        b.integrate(0.5);
        assert_eq!(b.pos, Vec2::new(40.0, -5.0));
    }

    #[test]
    fn test_half_size() {
        let b = body(0.0, 0.0, 11.0, 10.0);
        assert_eq!(b.half_size(), Vec2::new(5.5, 5.0));
    }

    #[test]
    fn test_overlap_cases() {
        let player = body(0.0, 0.0, 11.0, 10.0);
        let mob = body(5.0, 5.0, 10.0, 20.0);
        assert!(player.overlaps(&mob));
        assert!(mob.overlaps(&player));

        // Edge contact is not overlap
        let touching = body(11.0, 0.0, 5.0, 5.0);
        assert!(!player.overlaps(&touching));

        let apart = body(50.0, 50.0, 5.0, 5.0);
        assert!(!player.overlaps(&apart));
    }
}
