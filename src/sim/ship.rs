//! The player's ship and the projectiles it owns

use glam::Vec2;

use super::entity::{Entity, EntityId};
use super::pool::EntityPool;
use super::projectile::{Projectile, ProjectileParams};
use super::space::Arena;
use crate::consts::*;
use crate::{heading_to_vec, normalize_angle};

/// Flight parameters for the ship
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShipParams {
    /// px/s²
    pub acceleration: f32,
    /// px/s
    pub max_speed: f32,
    /// radians/s
    pub rotation_speed: f32,
    /// Velocity multiplier applied once per tick
    pub drag: f32,
    pub radius: f32,
    /// Seconds between shots
    pub fire_cooldown: f32,
    pub max_projectiles: usize,
    pub arena: Arena,
}

impl Default for ShipParams {
    fn default() -> Self {
        Self {
            acceleration: SHIP_ACCELERATION,
            max_speed: SHIP_MAX_SPEED,
            rotation_speed: SHIP_ROTATION_SPEED.to_radians(),
            drag: DRAG_COEFFICIENT,
            radius: SHIP_RADIUS,
            fire_cooldown: FIRE_COOLDOWN,
            max_projectiles: MAX_PROJECTILES,
            arena: Arena::default(),
        }
    }
}

/// Drive inputs, fed in from outside once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipControl {
    /// -1.0 = counter-clockwise, 1.0 = clockwise, 0.0 = hold heading
    pub turn: f32,
    pub thrust: bool,
}

#[derive(Debug, Clone)]
pub struct Ship {
    id: EntityId,
    pos: Vec2,
    vel: Vec2,
    /// Radians, 0 = up
    heading: f32,
    control: ShipControl,
    /// Seconds until the next shot is allowed
    cooldown: f32,
    params: ShipParams,
    projectiles: EntityPool<Projectile>,
}

impl Ship {
    pub fn new(id: EntityId, pos: Vec2, params: ShipParams) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            control: ShipControl::default(),
            cooldown: 0.0,
            params,
            projectiles: EntityPool::new(),
        }
    }

    /// Set the drive inputs used by the next `advance`
    pub fn apply_control(&mut self, control: ShipControl) {
        self.control = ShipControl {
            turn: control.turn.clamp(-1.0, 1.0),
            thrust: control.thrust,
        };
    }

    /// Whether a shot would be accepted right now
    pub fn can_fire(&self) -> bool {
        self.cooldown <= 0.0 && self.projectiles.count() < self.params.max_projectiles
    }

    /// Launch a projectile from the ship along its heading.
    ///
    /// Returns false when cooling down or at the projectile cap. The shot is
    /// staged and starts moving on the next `advance`.
    pub fn fire(&mut self, id: EntityId, params: ProjectileParams) -> bool {
        if !self.can_fire() {
            return false;
        }
        self.projectiles
            .spawn(Projectile::new(id, self.pos, self.heading, params));
        self.cooldown = self.params.fire_cooldown;
        true
    }

    pub fn velocity(&self) -> Vec2 {
        self.vel
    }

    pub fn heading(&self) -> f32 {
        self.heading
    }

    pub fn control(&self) -> ShipControl {
        self.control
    }

    pub fn projectiles(&self) -> &EntityPool<Projectile> {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut EntityPool<Projectile> {
        &mut self.projectiles
    }

    pub fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    pub fn set_heading(&mut self, heading: f32) {
        self.heading = normalize_angle(heading);
    }
}

impl Entity for Ship {
    fn id(&self) -> EntityId {
        self.id
    }

    fn advance(&mut self, dt: f32) {
        self.heading =
            normalize_angle(self.heading + self.control.turn * self.params.rotation_speed * dt);

        if self.control.thrust {
            self.vel += heading_to_vec(self.heading) * self.params.acceleration * dt;
        }
        self.vel = self.vel.clamp_length_max(self.params.max_speed) * self.params.drag;

        self.pos = self.params.arena.wrap(self.pos + self.vel * dt);
        self.cooldown = (self.cooldown - dt).max(0.0);

        self.projectiles.update(dt);
        self.projectiles.remove_if(Projectile::is_spent);
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

    fn centered() -> Ship {
        let params = ShipParams::default();
        Ship::new(EntityId(1), params.arena.center(), params)
    }

    #[test]
    fn test_initial_state() {
        let ship = centered();
        assert_eq!(ship.velocity(), Vec2::ZERO);
        assert_eq!(ship.projectiles().count(), 0);
        assert!(ship.can_fire());
    }

    #[test]
    fn test_thrust_accelerates_along_heading() {
        let mut ship = centered();
        ship.apply_control(ShipControl {
            turn: 0.0,
            thrust: true,
        });
        ship.advance(0.1);
        // Heading 0 is up: negative y
        assert!(ship.velocity().y < 0.0);
        assert!(ship.velocity().x.abs() < 1e-4);
        assert!((ship.velocity().length() - SHIP_ACCELERATION * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_speed_is_clamped() {
        let mut ship = centered();
        ship.apply_control(ShipControl {
            turn: 0.0,
            thrust: true,
        });
        for _ in 0..200 {
            ship.advance(0.05);
        }
        assert!(ship.velocity().length() <= SHIP_MAX_SPEED + 1e-3);
    }

    #[test]
    fn test_drag_decays_velocity_each_tick() {
        let params = ShipParams {
            drag: 0.5,
            ..ShipParams::default()
        };
        let mut ship = Ship::new(EntityId(1), params.arena.center(), params);
        ship.apply_control(ShipControl {
            turn: 0.0,
            thrust: true,
        });
        ship.advance(0.1);
        let thrusted = ship.velocity().length();
        assert!((thrusted - SHIP_ACCELERATION * 0.1 * 0.5).abs() < 1e-3);

        ship.apply_control(ShipControl::default());
        ship.advance(0.1);
        assert!((ship.velocity().length() - thrusted * 0.5).abs() < 1e-3);
        ship.advance(0.1);
        assert!((ship.velocity().length() - thrusted * 0.25).abs() < 1e-3);
    }

    #[test]
    fn test_turn_rotates_heading() {
        let mut ship = centered();
        ship.apply_control(ShipControl {
            turn: 1.0,
            thrust: false,
        });
        ship.advance(0.5);
        assert!((ship.heading() - SHIP_ROTATION_SPEED.to_radians() * 0.5).abs() < 1e-4);

        // Out-of-range turn input is clamped
        ship.apply_control(ShipControl {
            turn: -7.0,
            thrust: false,
        });
        assert_eq!(ship.control().turn, -1.0);
    }

    #[test]
    fn test_screen_wrapping() {
        let mut ship = centered();
        let arena = Arena::default();

        ship.set_position(Vec2::new(-10.0, arena.height / 2.0));
        ship.advance(0.016);
        assert!(ship.position().x > 0.0);

        ship.set_position(Vec2::new(arena.width + 10.0, arena.height / 2.0));
        ship.advance(0.016);
        assert!(ship.position().x < arena.width);

        ship.set_position(Vec2::new(arena.width / 2.0, -10.0));
        ship.advance(0.016);
        assert!(ship.position().y > 0.0);

        ship.set_position(Vec2::new(arena.width / 2.0, arena.height + 10.0));
        ship.advance(0.016);
        assert!(ship.position().y < arena.height);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut ship = centered();
        let params = ProjectileParams::default();

        assert!(ship.fire(EntityId(10), params));
        assert!(!ship.fire(EntityId(11), params));
        assert_eq!(ship.projectiles().count(), 1);

        ship.advance(FIRE_COOLDOWN);
        assert!(ship.fire(EntityId(12), params));
    }

    #[test]
    fn test_projectile_cap() {
        let ship_params = ShipParams {
            fire_cooldown: 0.0,
            ..ShipParams::default()
        };
        let mut ship = Ship::new(EntityId(1), ship_params.arena.center(), ship_params);
        let params = ProjectileParams::default();

        let fired = (0..(MAX_PROJECTILES as u32 + 2))
            .filter(|i| ship.fire(EntityId(100 + i), params))
            .count();
        assert_eq!(fired, MAX_PROJECTILES);
        assert_eq!(ship.projectiles().count(), MAX_PROJECTILES);
    }

    #[test]
    fn test_spent_projectiles_are_pruned() {
        let mut ship = centered();
        let params = ProjectileParams::default();
        ship.fire(EntityId(5), params);

        // 450 px budget at 500 px/s: gone within a second
        for _ in 0..60 {
            ship.advance(1.0 / 60.0);
        }
        assert_eq!(ship.projectiles().count(), 0);
    }
}
