//! Asteroids and their size classes

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId};
use super::space::Arena;
use crate::consts::*;

/// Size class. Fixed for the lifetime of an asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => LARGE_ASTEROID_RADIUS,
            AsteroidSize::Medium => MEDIUM_ASTEROID_RADIUS,
            AsteroidSize::Small => SMALL_ASTEROID_RADIUS,
        }
    }

    /// Score awarded for destroying one
    pub fn points(self) -> u64 {
        match self {
            AsteroidSize::Large => POINTS_LARGE_ASTEROID,
            AsteroidSize::Medium => POINTS_MEDIUM_ASTEROID,
            AsteroidSize::Small => POINTS_SMALL_ASTEROID,
        }
    }

    /// Size of the fragments left behind, if any
    pub fn fragment(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }

    /// Nominal spin (degrees/s); smaller rocks spin faster
    pub fn base_spin(self) -> f32 {
        match self {
            AsteroidSize::Large => 30.0,
            AsteroidSize::Medium => 45.0,
            AsteroidSize::Small => 60.0,
        }
    }
}

/// Draw a spin rate (radians/s) for `size`: base ±25%, random direction
pub fn random_spin<R: Rng + ?Sized>(size: AsteroidSize, rng: &mut R) -> f32 {
    let variation = 0.5;
    let spin = size.base_spin() * (1.0 + (rng.random::<f32>() - 0.5) * variation);
    let spin = spin.to_radians();
    if rng.random_bool(0.5) { spin } else { -spin }
}

/// A drifting, spinning rock. Constant velocity, wraps at the arena edge.
#[derive(Debug, Clone)]
pub struct Asteroid {
    id: EntityId,
    size: AsteroidSize,
    pos: Vec2,
    vel: Vec2,
    /// Current rotation (radians)
    rotation: f32,
    /// Angular rate (radians/s)
    spin: f32,
    arena: Arena,
}

impl Asteroid {
    pub fn new(
        id: EntityId,
        size: AsteroidSize,
        pos: Vec2,
        vel: Vec2,
        spin: f32,
        arena: Arena,
    ) -> Self {
        Self {
            id,
            size,
            pos,
            vel,
            rotation: 0.0,
            spin,
            arena,
        }
    }

    pub fn size(&self) -> AsteroidSize {
        self.size
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn set_velocity(&mut self, vel: Vec2) {
        self.vel = vel;
    }
}

impl Entity for Asteroid {
    fn id(&self) -> EntityId {
        self.id
    }

    fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
        self.rotation = crate::normalize_angle(self.rotation + self.spin * dt);
        self.pos = self.arena.wrap(self.pos);
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn collision_radius(&self) -> f32 {
        self.size.radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn still(size: AsteroidSize, pos: Vec2) -> Asteroid {
        Asteroid::new(EntityId(1), size, pos, Vec2::ZERO, 0.0, Arena::default())
    }

    #[test]
    fn test_radius_by_size() {
        for (size, radius) in [
            (AsteroidSize::Large, LARGE_ASTEROID_RADIUS),
            (AsteroidSize::Medium, MEDIUM_ASTEROID_RADIUS),
            (AsteroidSize::Small, SMALL_ASTEROID_RADIUS),
        ] {
            assert_eq!(still(size, Vec2::ZERO).collision_radius(), radius);
        }
    }

    #[test]
    fn test_fragment_chain() {
        assert_eq!(AsteroidSize::Large.fragment(), Some(AsteroidSize::Medium));
        assert_eq!(AsteroidSize::Medium.fragment(), Some(AsteroidSize::Small));
        assert_eq!(AsteroidSize::Small.fragment(), None);
    }

    #[test]
    fn test_points() {
        assert_eq!(AsteroidSize::Large.points(), 20);
        assert_eq!(AsteroidSize::Medium.points(), 50);
        assert_eq!(AsteroidSize::Small.points(), 100);
    }

    #[test]
    fn test_movement() {
        let mut a = still(AsteroidSize::Large, Vec2::new(100.0, 100.0));
        a.set_velocity(Vec2::new(50.0, 50.0));
        a.advance(1.0);
        assert_eq!(a.position(), Vec2::new(150.0, 150.0));
    }

    #[test]
    fn test_screen_wrapping() {
        let arena = Arena::default();
        let mut a = still(AsteroidSize::Large, Vec2::new(-10.0, arena.height / 2.0));
        a.advance(0.016);
        assert_eq!(a.position().x, arena.width);

        a.set_position(Vec2::new(arena.width + 10.0, arena.height / 2.0));
        a.advance(0.016);
        assert_eq!(a.position().x, 0.0);

        a.set_position(Vec2::new(arena.width / 2.0, -10.0));
        a.advance(0.016);
        assert_eq!(a.position().y, arena.height);

        a.set_position(Vec2::new(arena.width / 2.0, arena.height + 10.0));
        a.advance(0.016);
        assert_eq!(a.position().y, 0.0);
    }

    #[test]
    fn test_boundary_unchanged_at_zero_dt() {
        let arena = Arena::default();
        let corner = Vec2::new(arena.width, arena.height);
        let mut a = still(AsteroidSize::Small, corner);
        a.set_velocity(Vec2::new(30.0, -20.0));
        a.advance(0.0);
        assert_eq!(a.position(), corner);
    }

    #[test]
    fn test_rotation_follows_spin() {
        let mut a = Asteroid::new(
            EntityId(2),
            AsteroidSize::Medium,
            Vec2::new(200.0, 200.0),
            Vec2::ZERO,
            1.0,
            Arena::default(),
        );
        a.advance(0.5);
        assert!((a.rotation() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_random_spin_within_variation() {
        let mut rng = Pcg32::seed_from_u64(7);
        for size in [AsteroidSize::Large, AsteroidSize::Medium, AsteroidSize::Small] {
            for _ in 0..50 {
                let spin = random_spin(size, &mut rng).abs().to_degrees();
                assert!(spin >= size.base_spin() * 0.75 - 1e-3);
                assert!(spin <= size.base_spin() * 1.25 + 1e-3);
            }
        }
    }

    proptest! {
        #[test]
        fn advance_is_linear_before_wrap(
            x in 100.0f32..700.0, y in 100.0f32..500.0,
            vx in -80.0f32..80.0, vy in -80.0f32..80.0,
            dt in 0.0f32..1.0,
        ) {
            let mut a = still(AsteroidSize::Large, Vec2::new(x, y));
            a.set_velocity(Vec2::new(vx, vy));
            a.advance(dt);
            let expected = Vec2::new(x, y) + Vec2::new(vx, vy) * dt;
            prop_assert!((a.position() - expected).length() < 1e-3);
        }
    }
}
