//! Projectiles fired by the ship

use glam::Vec2;

use super::entity::{Entity, EntityId};
use super::space::Arena;
use crate::consts::*;
use crate::heading_to_vec;

/// Flight parameters shared by every projectile
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileParams {
    pub speed: f32,
    pub radius: f32,
    /// Total distance a projectile may travel before expiring
    pub max_distance: f32,
    pub arena: Arena,
}

impl Default for ProjectileParams {
    fn default() -> Self {
        let arena = Arena::default();
        Self {
            speed: PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            max_distance: arena.shortest_axis() * PROJECTILE_RANGE_FRACTION,
            arena,
        }
    }
}

/// Straight-line shot. Does not wrap.
#[derive(Debug, Clone)]
pub struct Projectile {
    id: EntityId,
    pos: Vec2,
    vel: Vec2,
    distance_traveled: f32,
    params: ProjectileParams,
}

impl Projectile {
    pub fn new(id: EntityId, pos: Vec2, heading: f32, params: ProjectileParams) -> Self {
        Self {
            id,
            pos,
            vel: heading_to_vec(heading) * params.speed,
            distance_traveled: 0.0,
            params,
        }
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn distance_traveled(&self) -> f32 {
        self.distance_traveled
    }

    /// Travel budget used up
    pub fn has_expired(&self) -> bool {
        self.distance_traveled >= self.params.max_distance
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.params.arena.is_outside(self.pos)
    }

    /// Either terminal condition
    pub fn is_spent(&self) -> bool {
        self.has_expired() || self.is_out_of_bounds()
    }

    #[cfg(test)]
    pub(crate) fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }
}

impl Entity for Projectile {
    fn id(&self) -> EntityId {
        self.id
    }

    fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.distance_traveled += self.params.speed * dt;
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.params.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centered() -> Projectile {
        let params = ProjectileParams::default();
        Projectile::new(EntityId(1), params.arena.center(), 0.0, params)
    }

    #[test]
    fn test_initial_state() {
        let p = centered();
        assert!(!p.has_expired());
        assert!(!p.is_out_of_bounds());
        assert_eq!(p.collision_radius(), PROJECTILE_RADIUS);
    }

    #[test]
    fn test_moves_up_at_heading_zero() {
        let mut p = centered();
        let start = p.position();
        p.advance(0.016);

        assert!((p.position().x - start.x).abs() < 1e-4);
        assert!(p.position().y < start.y);
        assert!((p.distance_traveled() - PROJECTILE_SPEED * 0.016).abs() < 1e-3);
    }

    #[test]
    fn test_expires_after_travel_budget() {
        let mut p = centered();
        for _ in 0..1000 {
            p.advance(0.016);
            if p.has_expired() {
                break;
            }
        }
        assert!(p.has_expired());
        // 0.75 * 600 = 450 px at 500 px/s
        assert!(p.distance_traveled() >= 450.0);
    }

    #[test]
    fn test_out_of_bounds_on_every_side() {
        let mut p = centered();
        let arena = Arena::default();

        for pos in [
            Vec2::new(arena.width / 2.0, -10.0),
            Vec2::new(arena.width / 2.0, arena.height + 10.0),
            Vec2::new(-10.0, arena.height / 2.0),
            Vec2::new(arena.width + 10.0, arena.height / 2.0),
        ] {
            p.set_position(pos);
            assert!(p.is_out_of_bounds(), "{pos:?} should be out of bounds");
            assert!(p.is_spent());
        }

        p.set_position(arena.center());
        assert!(!p.is_out_of_bounds());
    }

    #[test]
    fn test_zero_dt_is_stationary() {
        let mut p = centered();
        let start = p.position();
        p.advance(0.0);
        assert_eq!(p.position(), start);
        assert_eq!(p.distance_traveled(), 0.0);
    }
}
