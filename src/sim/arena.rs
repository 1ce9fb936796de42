//! Tombstone entity arena
//!
//! The original game splices entities out of shared arrays while iterating
//! them, which skips the neighbor of every removed element and occasionally
//! drops the wrong one. Here removal during a traversal only marks a
//! tombstone; [`Arena::compact`] runs once the traversal is over.

use serde::{Deserialize, Serialize};

/// Stable entity handle, unique within one arena for the life of a run
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct EntityId(pub u32);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Slot<T> {
    id: EntityId,
    dead: bool,
    item: T,
}

/// Flat entity storage with spawn-order iteration and deferred removal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    next_id: u32,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, item: T) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.slots.push(Slot {
            id,
            dead: false,
            item,
        });
        id
    }

    /// Mark an entity dead. The slot stays in place until the next
    /// `compact()`, so in-flight traversals never see indices shift.
    pub fn kill(&mut self, id: EntityId) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.id == id) {
            slot.dead = true;
        }
    }

    /// Mark every entity matching the predicate dead
    pub fn kill_where(&mut self, mut pred: impl FnMut(EntityId, &T) -> bool) {
        for slot in &mut self.slots {
            if !slot.dead && pred(slot.id, &slot.item) {
                slot.dead = true;
            }
        }
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.slots.iter().any(|s| s.id == id && !s.dead)
    }

    /// Number of live entities
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| !s.dead).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.slots
            .iter()
            .find(|s| s.id == id && !s.dead)
            .map(|s| &s.item)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
        self.slots
            .iter_mut()
            .find(|s| s.id == id && !s.dead)
            .map(|s| &mut s.item)
    }

    /// Live entities in spawn order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.slots.iter().filter(|s| !s.dead).map(|s| (s.id, &s.item))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (EntityId, &mut T)> {
        self.slots
            .iter_mut()
            .filter(|s| !s.dead)
            .map(|s| (s.id, &mut s.item))
    }

    /// Drop tombstoned slots. Call after a traversal, never during one.
    pub fn compact(&mut self) {
        self.slots.retain(|s| !s.dead);
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
