//! Live entity storage
//!
//! A dense slot arena with a free-list. Removal is always deferred: callers
//! queue a [`Handle`] and the tick driver drains the queue in [`Registry::purge`].
//! Iteration runs in ascending slot order, skipping free slots.

use super::body::EntityId;
use super::entity::{Entity, Playfield, SpawnRequest, UpdateCtx};
use super::rng::SimRng;

/// Address of a live entity
///
/// A handle goes stale once its entity is purged; a later occupant of the same
/// slot has a different id, so stale handles resolve to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Handle {
    pub slot: u32,
    pub id: EntityId,
}

impl Handle {
    /// Never matches any live entity
    pub const DANGLING: Handle = Handle {
        slot: u32::MAX,
        id: EntityId(0),
    };
}

/// Append-only list of pending removals, drained once per tick
#[derive(Debug, Clone, Default)]
pub struct RemovalQueue {
    pending: Vec<Handle>,
}

impl RemovalQueue {
    pub fn push(&mut self, handle: Handle) {
        self.pending.push(handle);
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.pending.contains(&handle)
    }

    fn drain(&mut self) -> std::vec::Drain<'_, Handle> {
        self.pending.drain(..)
    }
}

/// Slot arena of live entities plus the pending-removal queue
#[derive(Debug, Clone, Default)]
pub struct Registry {
    slots: Vec<Option<Entity>>,
    free: Vec<u32>,
    removals: RemovalQueue,
    live: usize,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an entity, reusing a free slot when one exists
    pub fn insert(&mut self, entity: Entity) -> Handle {
        let id = entity.id();
        let slot = match self.free.pop() {
            Some(slot) => {
                self.slots[slot as usize] = Some(entity);
                slot
            }
            None => {
                self.slots.push(Some(entity));
                (self.slots.len() - 1) as u32
            }
        };
        self.live += 1;
        Handle { slot, id }
    }

    pub fn get(&self, handle: Handle) -> Option<&Entity> {
        self.slots
            .get(handle.slot as usize)
            .and_then(|s| s.as_ref())
            .filter(|e| e.id() == handle.id)
    }

    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut Entity> {
        self.slots
            .get_mut(handle.slot as usize)
            .and_then(|s| s.as_mut())
            .filter(|e| e.id() == handle.id)
    }

    pub fn contains(&self, handle: Handle) -> bool {
        self.get(handle).is_some()
    }

    /// Look up a live entity by id (linear scan)
    pub fn find(&self, id: EntityId) -> Option<Handle> {
        self.iter().find(|(_, e)| e.id() == id).map(|(h, _)| h)
    }

    /// Live entity count, including entities queued for removal
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Number of slots ever allocated (live + free)
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Live entities in ascending slot order
    pub fn iter(&self) -> impl Iterator<Item = (Handle, &Entity)> {
        self.slots.iter().enumerate().filter_map(|(slot, entry)| {
            entry.as_ref().map(|e| {
                (
                    Handle {
                        slot: slot as u32,
                        id: e.id(),
                    },
                    e,
                )
            })
        })
    }

    /// Handles of all live entities, in iteration order
    pub fn handles(&self) -> Vec<Handle> {
        self.iter().map(|(h, _)| h).collect()
    }

    /// Request removal at the next purge. Harmless to call twice or on a
    /// stale handle.
    pub fn queue_removal(&mut self, handle: Handle) {
        if let Some(entity) = self.get_mut(handle) {
            entity.body.removal_queued = true;
            self.removals.push(handle);
        }
    }

    pub fn pending_removals(&self) -> &RemovalQueue {
        &self.removals
    }

    /// Run every live entity's update in slot order
    pub fn update_all(
        &mut self,
        dt: f32,
        playfield: Playfield,
        rng: &mut SimRng,
        spawns: &mut Vec<SpawnRequest>,
    ) {
        let mut ctx = UpdateCtx::new(dt, playfield, rng, &mut self.removals, spawns);
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if let Some(entity) = entry {
                ctx.handle = Handle {
                    slot: slot as u32,
                    id: entity.id(),
                };
                entity.update(&mut ctx);
            }
        }
    }

    /// Erase every queued entity and free its slot. Returns how many were
    /// actually erased; duplicates and stale handles are skipped.
    pub fn purge(&mut self) -> usize {
        let mut erased = 0;
        let pending: Vec<Handle> = self.removals.drain().collect();
        for handle in pending {
            let Some(entry) = self.slots.get_mut(handle.slot as usize) else {
                continue;
            };
            if entry.as_ref().is_some_and(|e| e.id() == handle.id) {
                *entry = None;
                self.free.push(handle.slot);
                self.live -= 1;
                erased += 1;
            }
        }
        erased
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::body::IdAllocator;
    use glam::Vec2;

    fn mob(ids: &mut IdAllocator, rng: &mut SimRng) -> Entity {
        Entity::mob(ids.allocate(), Playfield::default(), rng)
    }

    #[test]
    fn test_insert_and_get() {
        let mut ids = IdAllocator::new();
        let mut rng = SimRng::new(1);
        let mut reg = Registry::new();
        let h = reg.insert(mob(&mut ids, &mut rng));
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(h));
        assert_eq!(reg.find(h.id), Some(h));
    }

    #[test]
    fn test_removal_is_deferred_until_purge() {
        let mut ids = IdAllocator::new();
        let mut rng = SimRng::new(1);
        let mut reg = Registry::new();
        let h = reg.insert(mob(&mut ids, &mut rng));

        reg.queue_removal(h);
        assert!(reg.contains(h));
        assert!(reg.get(h).is_some_and(|e| e.body.removal_queued));

        assert_eq!(reg.purge(), 1);
        assert!(!reg.contains(h));
        assert!(reg.is_empty());
        assert!(reg.pending_removals().is_empty());
    }

    #[test]
    fn test_double_removal_is_harmless() {
        let mut ids = IdAllocator::new();
        let mut rng = SimRng::new(1);
        let mut reg = Registry::new();
        let a = reg.insert(mob(&mut ids, &mut rng));
        let b = reg.insert(mob(&mut ids, &mut rng));

        reg.queue_removal(a);
        reg.queue_removal(a);
        assert_eq!(reg.purge(), 1);
        assert_eq!(reg.len(), 1);
        assert!(reg.contains(b));

        // Stale handle after purge
        reg.queue_removal(a);
        assert_eq!(reg.purge(), 0);
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_slot_reuse_keeps_ids_unique() {
        let mut ids = IdAllocator::new();
        let mut rng = SimRng::new(1);
        let mut reg = Registry::new();
        let a = reg.insert(mob(&mut ids, &mut rng));
        let _b = reg.insert(mob(&mut ids, &mut rng));
        reg.queue_removal(a);
        reg.purge();

        let c = reg.insert(mob(&mut ids, &mut rng));
        assert_eq!(c.slot, a.slot);
        assert!(c.id > a.id);
        assert_eq!(reg.capacity(), 2);

        // The old handle does not alias the new occupant
        assert!(reg.get(a).is_none());
        assert!(reg.get(c).is_some());
    }

    #[test]
    fn test_iteration_is_ascending_slot_order() {
        let mut ids = IdAllocator::new();
        let mut rng = SimRng::new(1);
        let mut reg = Registry::new();
        let handles: Vec<Handle> = (0..4).map(|_| reg.insert(mob(&mut ids, &mut rng))).collect();

        reg.queue_removal(handles[1]);
        reg.purge();
        let late = reg.insert(mob(&mut ids, &mut rng));

        let order: Vec<u32> = reg.iter().map(|(h, _)| h.slot).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        // Newest entity sits in the reused slot, not at the end
        assert_eq!(reg.handles()[1], late);
    }

    #[test]
    fn test_update_all_queues_self_removal() {
        let mut ids = IdAllocator::new();
        let mut rng = SimRng::new(1);
        let mut reg = Registry::new();
        let mut gone = mob(&mut ids, &mut rng);
        gone.body.pos = Vec2::new(100.0, 1000.0);
        let gone = reg.insert(gone);
        let stays = reg.insert(mob(&mut ids, &mut rng));

        let mut spawns = Vec::new();
        reg.update_all(1.0 / 60.0, Playfield::default(), &mut rng, &mut spawns);
        assert!(reg.pending_removals().contains(gone));
        assert!(!reg.pending_removals().contains(stays));
        assert!(reg.contains(gone));

        reg.purge();
        assert!(!reg.contains(gone));
        assert!(reg.contains(stays));
    }
}
