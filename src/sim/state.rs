//! Round state and core simulation types
//!
//! `GameState` owns everything that changes during a round: the ship (and
//! through it, the projectiles), the asteroid pool, the score and the RNG.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::asteroid::{Asteroid, AsteroidSize, random_spin};
use super::entity::EntityId;
use super::pool::EntityPool;
use super::projectile::Projectile;
use super::ship::Ship;
use crate::config::GameConfig;
use crate::heading_to_vec;

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship alive, simulation running
    Active,
    /// Ship destroyed; waits for reset
    GameOver,
}

/// Lifecycle notifications for the HUD and scoring layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ProjectileFired {
        id: EntityId,
    },
    AsteroidDestroyed {
        id: EntityId,
        size: AsteroidSize,
        points: u64,
        position: Vec2,
    },
    AsteroidSpawned {
        id: EntityId,
        size: AsteroidSize,
    },
    ShipDestroyed {
        by: EntityId,
    },
    /// Every asteroid destroyed with the ship still alive
    FieldCleared {
        score: u64,
    },
    RoundReset,
}

/// Complete round state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub(crate) config: GameConfig,
    pub(crate) rng: Pcg32,
    pub(crate) phase: GamePhase,
    /// Present while the round is active
    pub(crate) ship: Option<Ship>,
    pub(crate) asteroids: EntityPool<Asteroid>,
    pub(crate) score: u64,
    /// Simulation tick counter (since last reset)
    pub(crate) time_ticks: u64,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Start a new round with the given config and seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            seed,
            config,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Active,
            ship: None,
            asteroids: EntityPool::new(),
            score: 0,
            time_ticks: 0,
            events: Vec::new(),
            next_id: 1,
        };
        state.reset();
        state
    }

    /// Allocate a new entity ID.
    ///
    /// IDs wrap after `u32::MAX` allocations; a round never keeps an entity
    /// alive that long.
    pub fn next_entity_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Rebuild the ship at home, repopulate asteroids, zero the score
    pub fn reset(&mut self) {
        let home = self.config.arena().center();
        let ship_id = self.next_entity_id();
        self.ship = Some(Ship::new(ship_id, home, self.config.ship_params()));
        self.events.push(GameEvent::RoundReset);

        self.asteroids.clear();
        self.populate_asteroids();

        self.score = 0;
        self.time_ticks = 0;
        self.phase = GamePhase::Active;

        log::info!(
            "Round reset: {} asteroids, seed {}",
            self.asteroids.count(),
            self.seed
        );
    }

    /// Place the initial large asteroids on a ring around the arena center,
    /// drifting roughly inward
    fn populate_asteroids(&mut self) {
        let arena = self.config.arena();
        let center = arena.center();
        let count = self.config.initial_asteroid_count;
        let ring = arena.shortest_axis() * self.config.spawn_ring_fraction;
        let spread = self.config.asteroid_inward_spread.to_radians();

        for i in 0..count {
            let angle = i as f32 * std::f32::consts::TAU / count as f32;
            let pos = center + Vec2::new(angle.cos(), angle.sin()) * ring;

            let vel = inward_velocity(
                pos,
                center,
                self.config.asteroid_min_speed,
                self.config.asteroid_max_speed,
                spread,
                &mut self.rng,
            );
            let spin = random_spin(AsteroidSize::Large, &mut self.rng);

            let id = self.next_entity_id();
            self.asteroids
                .spawn(Asteroid::new(id, AsteroidSize::Large, pos, vel, spin, arena));
            self.events.push(GameEvent::AsteroidSpawned {
                id,
                size: AsteroidSize::Large,
            });
        }
    }

    // === Queries ===

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.ship.is_none()
    }

    /// Ship alive and no asteroids left (pending fragments included)
    pub fn is_won(&self) -> bool {
        !self.is_game_over() && self.asteroids.is_empty()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn asteroid_count(&self) -> usize {
        self.asteroids.count()
    }

    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn ship(&self) -> Option<&Ship> {
        self.ship.as_ref()
    }

    pub fn ship_mut(&mut self) -> Option<&mut Ship> {
        self.ship.as_mut()
    }

    pub fn asteroids(&self) -> &EntityPool<Asteroid> {
        &self.asteroids
    }

    pub fn asteroids_mut(&mut self) -> &mut EntityPool<Asteroid> {
        &mut self.asteroids
    }

    // === Rendering views ===

    pub fn for_each_ship<F: FnMut(&Ship)>(&self, mut visitor: F) {
        if let Some(ship) = &self.ship {
            visitor(ship);
        }
    }

    pub fn for_each_asteroid<F: FnMut(&Asteroid)>(&self, visitor: F) {
        self.asteroids.draw(visitor);
    }

    pub fn for_each_projectile<F: FnMut(&Projectile)>(&self, visitor: F) {
        if let Some(ship) = &self.ship {
            ship.projectiles().draw(visitor);
        }
    }

    /// Take the events buffered for the current tick
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Velocity aimed at `target` from `pos`, deviated by up to `spread` radians,
/// with speed uniform in `[min_speed, max_speed]`
pub fn inward_velocity<R: Rng + ?Sized>(
    pos: Vec2,
    target: Vec2,
    min_speed: f32,
    max_speed: f32,
    spread: f32,
    rng: &mut R,
) -> Vec2 {
    let to_target = target - pos;
    let base = if to_target.length_squared() > f32::EPSILON {
        crate::vec_to_heading(to_target)
    } else {
        rng.random_range(0.0..std::f32::consts::TAU)
    };
    let heading = if spread > 0.0 {
        base + rng.random_range(-spread..=spread)
    } else {
        base
    };
    let speed = if max_speed > min_speed {
        rng.random_range(min_speed..=max_speed)
    } else {
        min_speed
    };
    heading_to_vec(heading) * speed
}
