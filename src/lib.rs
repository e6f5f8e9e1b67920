//! Asteroid Belt - A screen-wrapping Asteroids arcade simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, pools, collisions, round state)
//! - `config`: Data-driven game balance loaded from JSON

pub mod config;
pub mod sim;

pub use config::{ConfigError, GameConfig};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Ship physics
    pub const SHIP_ROTATION_SPEED: f32 = 180.0; // degrees per second
    pub const SHIP_ACCELERATION: f32 = 300.0; // pixels per second^2
    pub const SHIP_MAX_SPEED: f32 = 400.0; // pixels per second
    pub const DRAG_COEFFICIENT: f32 = 1.0; // velocity multiplier per tick
    pub const SHIP_RADIUS: f32 = 15.0;
    /// Seconds between shots
    pub const FIRE_COOLDOWN: f32 = 0.25;
    /// Projectiles a ship may have in flight at once
    pub const MAX_PROJECTILES: usize = 8;

    /// Projectile defaults
    pub const PROJECTILE_SPEED: f32 = 500.0;
    pub const PROJECTILE_RADIUS: f32 = 2.0;
    /// Travel budget as a fraction of the shorter arena axis
    pub const PROJECTILE_RANGE_FRACTION: f32 = 0.75;

    /// Asteroid collision radii
    pub const LARGE_ASTEROID_RADIUS: f32 = 40.0;
    pub const MEDIUM_ASTEROID_RADIUS: f32 = 20.0;
    pub const SMALL_ASTEROID_RADIUS: f32 = 10.0;
    pub const INITIAL_ASTEROID_COUNT: u32 = 4;

    /// Initial asteroid speed range (pixels per second)
    pub const ASTEROID_MIN_SPEED: f32 = 40.0;
    pub const ASTEROID_MAX_SPEED: f32 = 80.0;
    /// Max deviation of an initial asteroid heading from "toward center" (degrees)
    pub const ASTEROID_INWARD_SPREAD: f32 = 45.0;
    /// Initial asteroids sit on a ring of this fraction of the shorter axis
    pub const SPAWN_RING_FRACTION: f32 = 0.4;

    /// Fragments fly 1.5x faster than their parent
    pub const FRAGMENT_SPEED_MULTIPLIER: f32 = 1.5;
    /// Max fragment deviation from the parent heading (degrees)
    pub const FRAGMENT_SPREAD: f32 = 60.0;

    /// Score per destroyed asteroid
    pub const POINTS_LARGE_ASTEROID: u64 = 20;
    pub const POINTS_MEDIUM_ASTEROID: u64 = 50;
    pub const POINTS_SMALL_ASTEROID: u64 = 100;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}

/// Unit direction for a ship heading (radians, 0 = up, clockwise positive).
///
/// Screen space: y grows downward.
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), -heading.cos())
}

/// Inverse of [`heading_to_vec`] for a non-zero direction
#[inline]
pub fn vec_to_heading(dir: Vec2) -> f32 {
    dir.x.atan2(-dir.y)
}
