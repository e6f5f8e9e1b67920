//! Buffered entity pool
//!
//! Owns a homogeneous collection through three buffers:
//! - `pending`: spawned since the last update, invisible to draw and collision
//! - `live`: integrated entities, visible to everything
//! - `scratch`: only non-empty inside `update`
//!
//! Each update runs `pending → live`, then `live → scratch` (advancing every
//! entity on the way), then swaps `scratch` back into `live`. Entities are
//! moved, never copied, so each one sits in exactly one buffer. Removal is
//! only reachable through `remove_if`, which needs `&mut self` and therefore
//! cannot run while `update` is iterating.

use super::entity::{Entity, EntityId};

#[derive(Debug, Clone)]
pub struct EntityPool<T> {
    pending: Vec<T>,
    live: Vec<T>,
    scratch: Vec<T>,
}

impl<T> Default for EntityPool<T> {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            live: Vec::new(),
            scratch: Vec::new(),
        }
    }
}

impl<T: Entity> EntityPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage an entity. It joins `live` on the next `update`.
    pub fn spawn(&mut self, entity: T) {
        self.pending.push(entity);
    }

    /// Promote pending entities, advance every live entity once, swap buffers
    pub fn update(&mut self, dt: f32) {
        self.live.append(&mut self.pending);

        self.scratch.clear();
        for mut entity in self.live.drain(..) {
            entity.advance(dt);
            self.scratch.push(entity);
        }

        std::mem::swap(&mut self.live, &mut self.scratch);
        self.scratch.clear();

        log::trace!(
            "pool update: live={} pending={}",
            self.live.len(),
            self.pending.len()
        );
    }

    /// Drop every pending or live entity matching `predicate`, keeping survivor order
    pub fn remove_if<F>(&mut self, mut predicate: F)
    where
        F: FnMut(&T) -> bool,
    {
        let live_before = self.live.len();
        let pending_before = self.pending.len();

        self.live.retain(|e| !predicate(e));
        self.pending.retain(|e| !predicate(e));

        log::trace!(
            "pool remove_if: live {} -> {}, pending {} -> {}",
            live_before,
            self.live.len(),
            pending_before,
            self.pending.len()
        );
    }

    /// Remove the entity with the given id, wherever it is staged
    pub fn remove(&mut self, id: EntityId) {
        self.remove_if(|e| e.id() == id);
    }

    /// Visit each live entity in stored order
    pub fn draw<F>(&self, mut visitor: F)
    where
        F: FnMut(&T),
    {
        for entity in &self.live {
            visitor(entity);
        }
    }

    /// Live entities in stored order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.live.iter()
    }

    /// Mutable access to live entities. Membership cannot change through this.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.live.iter_mut()
    }

    pub fn get(&self, id: EntityId) -> Option<&T> {
        self.live
            .iter()
            .chain(self.pending.iter())
            .find(|e| e.id() == id)
    }

    /// Live plus pending
    pub fn count(&self) -> usize {
        self.live.len() + self.pending.len()
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    pub fn clear(&mut self) {
        self.pending.clear();
        self.live.clear();
        self.scratch.clear();
    }
}
