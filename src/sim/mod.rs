//! Deterministic simulation module
//!
//! All gameplay logic lives here:
//! - Seeded RNG only (injected through `GameState::new` or as a generic `Rng`)
//! - Entities are owned by exactly one pool buffer at a time
//! - No rendering or platform dependencies

pub mod asteroid;
pub mod collision;
pub mod entity;
pub mod pool;
pub mod projectile;
pub mod ship;
pub mod space;
pub mod state;
pub mod tick;

pub use asteroid::{Asteroid, AsteroidSize};
pub use collision::{circles_overlap, overlaps};
pub use entity::{Entity, EntityId};
pub use pool::EntityPool;
pub use projectile::{Projectile, ProjectileParams};
pub use ship::{Ship, ShipControl, ShipParams};
pub use space::{Arena, wrap};
pub use state::{GameEvent, GamePhase, GameState, inward_velocity};
pub use tick::{TickInput, fragment_velocities, tick};
