//! Toroidal arena addressing
//!
//! Vector arithmetic comes from `glam::Vec2`. This module adds the
//! arena bounds and the screen-wrap rule shared by every entity.
//!
//! Wrap is a hard teleport, not a modulo: a coordinate past one edge lands
//! exactly on the opposite edge regardless of how far it overshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// Rectangular play field spanning `[0, width] × [0, height]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Length of the shorter side
    #[inline]
    pub fn shortest_axis(&self) -> f32 {
        self.width.min(self.height)
    }

    #[inline]
    pub fn wrap(&self, pos: Vec2) -> Vec2 {
        wrap(pos, self.width, self.height)
    }

    /// True if `pos` lies outside the arena (boundary counts as inside)
    #[inline]
    pub fn is_outside(&self, pos: Vec2) -> bool {
        pos.x < 0.0 || pos.x > self.width || pos.y < 0.0 || pos.y > self.height
    }
}

/// Fold a position back into `[0, width] × [0, height]`
pub fn wrap(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_axis(pos.x, width), wrap_axis(pos.y, height))
}

#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    if value < 0.0 {
        extent
    } else if value > extent {
        0.0
    } else {
        value
    }
}
