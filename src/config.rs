//! Game balance configuration
//!
//! Loaded from JSON. Every field is optional and falls back to the value in
//! [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::{Arena, ProjectileParams, ShipParams};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,
    /// Large asteroids placed on every reset
    pub initial_asteroid_count: u32,

    // === Ship ===
    pub ship_acceleration: f32,
    pub ship_max_speed: f32,
    /// Degrees per second
    pub ship_rotation_speed: f32,
    /// Velocity multiplier per tick, in (0, 1]
    pub ship_drag: f32,
    pub ship_radius: f32,
    pub fire_cooldown: f32,
    pub max_projectiles: usize,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    /// Travel budget as a fraction of the shorter arena axis
    pub projectile_range_fraction: f32,

    // === Asteroids ===
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,
    /// Degrees
    pub asteroid_inward_spread: f32,
    pub spawn_ring_fraction: f32,
    pub fragment_speed_multiplier: f32,
    /// Degrees
    pub fragment_spread: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            initial_asteroid_count: INITIAL_ASTEROID_COUNT,

            ship_acceleration: SHIP_ACCELERATION,
            ship_max_speed: SHIP_MAX_SPEED,
            ship_rotation_speed: SHIP_ROTATION_SPEED,
            ship_drag: DRAG_COEFFICIENT,
            ship_radius: SHIP_RADIUS,
            fire_cooldown: FIRE_COOLDOWN,
            max_projectiles: MAX_PROJECTILES,

            projectile_speed: PROJECTILE_SPEED,
            projectile_radius: PROJECTILE_RADIUS,
            projectile_range_fraction: PROJECTILE_RANGE_FRACTION,

            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_inward_spread: ASTEROID_INWARD_SPREAD,
            spawn_ring_fraction: SPAWN_RING_FRACTION,
            fragment_speed_multiplier: FRAGMENT_SPEED_MULTIPLIER,
            fragment_spread: FRAGMENT_SPREAD,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("ship_acceleration", self.ship_acceleration),
            ("ship_max_speed", self.ship_max_speed),
            ("ship_radius", self.ship_radius),
            ("projectile_speed", self.projectile_speed),
            ("projectile_radius", self.projectile_radius),
            ("projectile_range_fraction", self.projectile_range_fraction),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("fragment_speed_multiplier", self.fragment_speed_multiplier),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("ship_rotation_speed", self.ship_rotation_speed),
            ("fire_cooldown", self.fire_cooldown),
            ("spawn_ring_fraction", self.spawn_ring_fraction),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        if !(self.ship_drag > 0.0 && self.ship_drag <= 1.0) {
            return Err(invalid(
                "ship_drag",
                format!("must be in (0, 1], got {}", self.ship_drag),
            ));
        }
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(invalid(
                "asteroid_max_speed",
                format!(
                    "must be at least asteroid_min_speed ({}), got {}",
                    self.asteroid_min_speed, self.asteroid_max_speed
                ),
            ));
        }
        for (field, value) in [
            ("asteroid_inward_spread", self.asteroid_inward_spread),
            ("fragment_spread", self.fragment_spread),
        ] {
            if !(0.0..=180.0).contains(&value) {
                return Err(invalid(field, format!("must be in [0, 180], got {value}")));
            }
        }
        if self.max_projectiles == 0 {
            return Err(invalid("max_projectiles", "must be at least 1".to_string()));
        }

        Ok(())
    }

    pub fn arena(&self) -> Arena {
        Arena::new(self.arena_width, self.arena_height)
    }

    pub fn ship_params(&self) -> ShipParams {
        ShipParams {
            acceleration: self.ship_acceleration,
            max_speed: self.ship_max_speed,
            rotation_speed: self.ship_rotation_speed.to_radians(),
            drag: self.ship_drag,
            radius: self.ship_radius,
            fire_cooldown: self.fire_cooldown,
            max_projectiles: self.max_projectiles,
            arena: self.arena(),
        }
    }

    pub fn projectile_params(&self) -> ProjectileParams {
        let arena = self.arena();
        ProjectileParams {
            speed: self.projectile_speed,
            radius: self.projectile_radius,
            max_distance: arena.shortest_axis() * self.projectile_range_fraction,
            arena,
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_param_bundles() {
        let config = GameConfig::default();
        assert_eq!(config.ship_params(), ShipParams::default());
        assert_eq!(config.projectile_params(), ProjectileParams::default());
    }

    #[test]
    fn test_partial_json_overrides() {
        let config =
            GameConfig::from_json(r#"{ "initial_asteroid_count": 6, "arena_width": 1024 }"#)
                .unwrap();
        assert_eq!(config.initial_asteroid_count, 6);
        assert_eq!(config.arena_width, 1024.0);
        assert_eq!(config.arena_height, ARENA_HEIGHT);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json(r#"{ "arena_height": -5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "arena_height", .. }));

        let err = GameConfig::from_json(r#"{ "ship_drag": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "ship_drag", .. }));

        let err =
            GameConfig::from_json(r#"{ "asteroid_min_speed": 90, "asteroid_max_speed": 10 }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "asteroid_max_speed", .. }));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
