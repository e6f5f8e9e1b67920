//! Shared capability of everything that lives in an [`EntityPool`](super::EntityPool)

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Stable identity of an entity, independent of its value.
///
/// Two asteroids may be equal in size and position; removal always goes by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A simulated object: advances itself and exposes a collision circle
pub trait Entity {
    fn id(&self) -> EntityId;

    /// Advance internal state by `dt` seconds. Only mutates the receiver.
    fn advance(&mut self, dt: f32);

    fn position(&self) -> Vec2;

    fn collision_radius(&self) -> f32;
}
