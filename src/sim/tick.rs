//! Per-tick round controller
//!
//! Order within one tick:
//! 1. ship advances (its projectile pool updates and drops spent shots)
//! 2. asteroid pool updates
//! 3. ship vs asteroid: the first overlap ends the round
//! 4. projectile vs asteroid: each projectile destroys at most one asteroid
//!
//! Collision passes only look at `live` buffers, so fragments spawned in
//! step 4 sit in `pending` until the next tick.

use glam::Vec2;
use rand::Rng;

use super::asteroid::{Asteroid, AsteroidSize, random_spin};
use super::collision::overlaps;
use super::entity::{Entity, EntityId};
use super::ship::ShipControl;
use super::state::{GameEvent, GamePhase, GameState};
use crate::{normalize_angle, vec_to_heading};

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// -1.0 = counter-clockwise, 1.0 = clockwise
    pub turn: f32,
    pub thrust: bool,
    pub fire: bool,
    /// Start a fresh round (the only input honoured after game over or a win)
    pub reset: bool,
    /// Demo mode - the simulation aims and fires on its own
    pub idle_mode: bool,
}

/// A projectile/asteroid hit found during the collision pass
#[derive(Debug, Clone, Copy)]
struct Hit {
    projectile: EntityId,
    asteroid: EntityId,
    size: AsteroidSize,
    position: Vec2,
    velocity: Vec2,
}

/// Advance the game state by one step of `dt` seconds.
///
/// Events left over from the previous step are discarded first, so after
/// this returns the buffer holds only what this step produced.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    state.events.clear();

    if input.reset {
        state.reset();
        return;
    }

    if state.is_game_over() || state.is_won() {
        return;
    }

    let mut input = *input;
    if input.idle_mode {
        autopilot(state, &mut input, sanitize_dt(dt));
    }

    state.apply_ship_control(input.turn, input.thrust, input.fire);
    state.tick(dt);
}

impl GameState {
    /// Feed this tick's drive inputs to the ship. Firing happens immediately;
    /// the shot starts moving when the ship next advances.
    pub fn apply_ship_control(&mut self, turn: f32, thrust: bool, fire: bool) {
        let wants_shot = fire && self.ship.as_ref().is_some_and(|s| s.can_fire());
        let shot_id = wants_shot.then(|| self.next_entity_id());
        let projectile_params = self.config.projectile_params();

        let Some(ship) = self.ship.as_mut() else {
            return;
        };
        ship.apply_control(ShipControl { turn, thrust });

        if let Some(id) = shot_id {
            if ship.fire(id, projectile_params) {
                log::debug!("Projectile {} fired", id);
                self.events.push(GameEvent::ProjectileFired { id });
            }
        }
    }

    /// Run one simulation step. Does nothing once the round is over or won.
    pub fn tick(&mut self, dt: f32) {
        if self.is_game_over() || self.is_won() {
            return;
        }
        let dt = sanitize_dt(dt);
        self.time_ticks += 1;

        if let Some(ship) = self.ship.as_mut() {
            ship.advance(dt);
        }
        self.asteroids.update(dt);

        if self.resolve_ship_collision() {
            return;
        }
        self.resolve_projectile_collisions();

        if self.asteroids.is_empty() {
            log::info!("Field cleared with score {}", self.score);
            self.events
                .push(GameEvent::FieldCleared { score: self.score });
        }
    }

    /// Returns true if the ship was destroyed
    fn resolve_ship_collision(&mut self) -> bool {
        let Some(ship) = self.ship.as_ref() else {
            return true;
        };
        let Some(by) = self
            .asteroids
            .iter()
            .find(|a| overlaps(ship, *a))
            .map(|a| a.id())
        else {
            return false;
        };

        self.ship = None;
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::ShipDestroyed { by });
        log::info!("Ship destroyed by asteroid {}, final score {}", by, self.score);
        true
    }

    fn resolve_projectile_collisions(&mut self) {
        let hits = {
            let Some(ship) = self.ship.as_ref() else {
                return;
            };
            let mut hits: Vec<Hit> = Vec::new();
            for shot in ship.projectiles().iter() {
                let target = self
                    .asteroids
                    .iter()
                    .filter(|a| !hits.iter().any(|h| h.asteroid == a.id()))
                    .find(|a| overlaps(shot, *a));
                if let Some(rock) = target {
                    hits.push(Hit {
                        projectile: shot.id(),
                        asteroid: rock.id(),
                        size: rock.size(),
                        position: rock.position(),
                        velocity: rock.velocity(),
                    });
                }
            }
            hits
        };

        if hits.is_empty() {
            return;
        }

        for hit in &hits {
            let points = hit.size.points();
            self.score += points;
            self.events.push(GameEvent::AsteroidDestroyed {
                id: hit.asteroid,
                size: hit.size,
                points,
                position: hit.position,
            });
            log::debug!(
                "Asteroid {} ({:?}) destroyed by {} for {} points",
                hit.asteroid,
                hit.size,
                hit.projectile,
                points
            );
            self.spawn_fragments(hit);
        }

        // Identity match: value-equal asteroids must survive
        if let Some(ship) = self.ship.as_mut() {
            ship.projectiles_mut()
                .remove_if(|p| hits.iter().any(|h| h.projectile == p.id()));
        }
        self.asteroids
            .remove_if(|a| hits.iter().any(|h| h.asteroid == a.id()));
    }

    /// Stage the two next-smaller fragments of a destroyed asteroid
    fn spawn_fragments(&mut self, hit: &Hit) {
        let Some(size) = hit.size.fragment() else {
            return;
        };
        let arena = self.config.arena();
        let velocities = fragment_velocities(
            hit.velocity,
            self.config.fragment_speed_multiplier,
            self.config.fragment_spread.to_radians(),
            &mut self.rng,
        );

        for vel in velocities {
            let spin = random_spin(size, &mut self.rng);
            let id = self.next_entity_id();
            self.asteroids
                .spawn(Asteroid::new(id, size, hit.position, vel, spin, arena));
            self.events.push(GameEvent::AsteroidSpawned { id, size });
        }
        log::debug!("Asteroid {} split into two {:?}", hit.asteroid, size);
    }
}

/// Velocities of the two fragments of a parent moving at `parent_vel`.
///
/// Both fly at `speed_multiplier` times the parent speed. One deviates from
/// the parent heading by a random angle in `[-spread, spread]`, the other by
/// the negation of an independent draw.
pub fn fragment_velocities<R: Rng + ?Sized>(
    parent_vel: Vec2,
    speed_multiplier: f32,
    spread: f32,
    rng: &mut R,
) -> [Vec2; 2] {
    let speed = parent_vel.length() * speed_multiplier;
    let base = parent_vel.y.atan2(parent_vel.x);

    let mut draw = || {
        if spread > 0.0 {
            rng.random_range(-spread..=spread)
        } else {
            0.0
        }
    };
    let first = base + draw();
    let second = base - draw();

    [
        Vec2::new(first.cos(), first.sin()) * speed,
        Vec2::new(second.cos(), second.sin()) * speed,
    ]
}

/// Negative or NaN elapsed time would run motion backwards; treat it as zero
fn sanitize_dt(dt: f32) -> f32 {
    if dt >= 0.0 {
        dt
    } else {
        log::debug!("Clamping invalid dt {} to 0", dt);
        0.0
    }
}

/// Aim at the nearest asteroid (leading it slightly) and fire when lined up
fn autopilot(state: &GameState, input: &mut TickInput, dt: f32) {
    input.thrust = false;
    input.turn = 0.0;
    input.fire = false;

    let Some(ship) = state.ship() else {
        return;
    };
    let ship_pos = ship.position();
    let nearest = state.asteroids().iter().min_by(|a, b| {
        a.position()
            .distance_squared(ship_pos)
            .partial_cmp(&b.position().distance_squared(ship_pos))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let Some(target) = nearest else {
        return;
    };

    // Lead the target by the projectile flight time
    let flight_time = target.position().distance(ship_pos) / state.config().projectile_speed;
    let aim_point = target.position() + target.velocity() * flight_time;
    let to_aim = aim_point - ship_pos;
    if to_aim.length_squared() <= f32::EPSILON {
        input.fire = true;
        return;
    }

    let delta = normalize_angle(vec_to_heading(to_aim) - ship.heading());
    let max_step = state.config().ship_rotation_speed.to_radians() * dt;
    input.turn = if max_step > 0.0 {
        (delta / max_step).clamp(-1.0, 1.0)
    } else {
        delta.signum()
    };
    input.fire = delta.abs() < 0.1;
}
