//! Circle-circle overlap between positioned entities
//!
//! Only two pairings are ever tested: ship vs asteroid and projectile vs
//! asteroid. Asteroids pass through each other.

use glam::Vec2;

use super::entity::Entity;

/// True iff the centers are strictly closer than the sum of the radii
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Overlap test between two entities' collision circles
#[inline]
pub fn overlaps<A, B>(a: &A, b: &B) -> bool
where
    A: Entity + ?Sized,
    B: Entity + ?Sized,
{
    circles_overlap(
        a.position(),
        a.collision_radius(),
        b.position(),
        b.collision_radius(),
    )
}
