//! Game tuning
//!
//! Every physics and layout constant lives in [`GameConfig`]. A config is
//! validated once when an [`Arcade`](crate::Arcade) is built, so impossible
//! spawn parameters are rejected up front instead of producing negative gap
//! heights mid-game.

use std::ops::RangeInclusive;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a configuration is rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("`{field}` must be a finite number")]
    NotFinite { field: &'static str },
    #[error("`{field}` must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },
    #[error("`{field}` must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },
    #[error("impulse velocity must point up (negative), got {value}")]
    ImpulseNotUpward { value: f32 },
    #[error("surface height {height} is too short, gap layout needs at least {required}")]
    SurfaceTooShort { height: f32, required: f32 },
    #[error("entity start rectangle does not fit strictly inside the surface")]
    EntityOutsideSurface,
}

/// Game tuning; any field missing from a JSON document keeps its default
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub surface_width: f32,
    pub surface_height: f32,

    // === Entity ===
    pub entity_start: Vec2,
    pub entity_size: Vec2,
    pub gravity: f32,
    pub impulse_velocity: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Vertical opening the entity must pass through
    pub gap_size: f32,
    /// Smallest allowed solid segment above (and below) the gap
    pub min_gap_height: f32,
    pub scroll_speed: f32,
    pub spawn_spacing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: SURFACE_WIDTH,
            surface_height: SURFACE_HEIGHT,

            entity_start: Vec2::new(ENTITY_START_X, ENTITY_START_Y),
            entity_size: Vec2::new(ENTITY_WIDTH, ENTITY_HEIGHT),
            gravity: GRAVITY,
            impulse_velocity: IMPULSE_VELOCITY,

            obstacle_width: OBSTACLE_WIDTH,
            gap_size: GAP_SIZE,
            min_gap_height: MIN_GAP_HEIGHT,
            scroll_speed: SCROLL_SPEED,
            spawn_spacing: SPAWN_SPACING,
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every constraint the simulation relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        let scalars = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("entity_start.x", self.entity_start.x),
            ("entity_start.y", self.entity_start.y),
            ("entity_size.x", self.entity_size.x),
            ("entity_size.y", self.entity_size.y),
            ("gravity", self.gravity),
            ("impulse_velocity", self.impulse_velocity),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("min_gap_height", self.min_gap_height),
            ("scroll_speed", self.scroll_speed),
            ("spawn_spacing", self.spawn_spacing),
        ];
        if let Some(&(field, _)) = scalars.iter().find(|(_, v)| !v.is_finite()) {
            return Err(ConfigError::NotFinite { field });
        }

        let positives = [
            ("surface_width", self.surface_width),
            ("surface_height", self.surface_height),
            ("entity_size.x", self.entity_size.x),
            ("entity_size.y", self.entity_size.y),
            ("obstacle_width", self.obstacle_width),
            ("gap_size", self.gap_size),
            ("scroll_speed", self.scroll_speed),
            ("spawn_spacing", self.spawn_spacing),
        ];
        if let Some(&(field, value)) = positives.iter().find(|(_, v)| *v <= 0.0) {
            return Err(ConfigError::NotPositive { field, value });
        }

        for (field, value) in [("min_gap_height", self.min_gap_height), ("gravity", self.gravity)] {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        if self.impulse_velocity >= 0.0 {
            return Err(ConfigError::ImpulseNotUpward {
                value: self.impulse_velocity,
            });
        }

        let required = self.gap_size + 2.0 * self.min_gap_height;
        if self.surface_height < required {
            return Err(ConfigError::SurfaceTooShort {
                height: self.surface_height,
                required,
            });
        }

        // Strict on both ends: touching an edge is already a terminal condition
        let start = self.entity_start;
        let end = start + self.entity_size;
        if start.x < 0.0
            || end.x > self.surface_width
            || start.y <= 0.0
            || end.y >= self.surface_height
        {
            return Err(ConfigError::EntityOutsideSurface);
        }

        Ok(())
    }

    /// Range the top of a freshly spawned gap is drawn from
    pub fn gap_height_range(&self) -> RangeInclusive<f32> {
        self.min_gap_height..=(self.surface_height - self.gap_size - self.min_gap_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gap_height_range(), 50.0..=400.0);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = GameConfig::from_json(r#"{ "scroll_speed": 4.5, "gap_size": 120 }"#).unwrap();
        assert_eq!(config.scroll_speed, 4.5);
        assert_eq!(config.gap_size, 120.0);
        assert_eq!(config.surface_height, SURFACE_HEIGHT);
        assert_eq!(config.entity_start, Vec2::new(ENTITY_START_X, ENTITY_START_Y));
    }

    #[test]
    fn test_vec_fields_from_json() {
        let config =
            GameConfig::from_json(r#"{ "entity_start": [40, 100], "entity_size": [20, 20] }"#)
                .unwrap();
        assert_eq!(config.entity_start, Vec2::new(40.0, 100.0));
        assert_eq!(config.entity_size, Vec2::new(20.0, 20.0));
    }

    #[test]
    fn test_malformed_json() {
        let err = GameConfig::from_json("{ scroll_speed: }").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_surface_too_short_for_gap() {
        let config = GameConfig {
            surface_height: 240.0,
            entity_start: Vec2::new(80.0, 100.0),
            ..Default::default()
        };
        match config.validate() {
            Err(ConfigError::SurfaceTooShort { height, required }) => {
                assert_eq!(height, 240.0);
                assert_eq!(required, 250.0);
            }
            other => panic!("expected SurfaceTooShort, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_fit_surface_is_allowed() {
        // Gap range collapses to a single value but is never negative
        let config = GameConfig {
            surface_height: 250.0,
            entity_start: Vec2::new(80.0, 100.0),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.gap_height_range(), 50.0..=50.0);
    }

    #[test]
    fn test_rejects_bad_scalars() {
        let config = GameConfig {
            scroll_speed: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive { field: "scroll_speed", .. })
        ));

        let config = GameConfig {
            gravity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotFinite { field: "gravity" })
        ));

        let config = GameConfig {
            min_gap_height: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Negative { field: "min_gap_height", .. })
        ));

        let config = GameConfig {
            impulse_velocity: 8.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ImpulseNotUpward { .. })
        ));
    }

    #[test]
    fn test_entity_must_start_inside() {
        let config = GameConfig {
            entity_start: Vec2::new(80.0, 0.0),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EntityOutsideSurface)
        ));

        let config = GameConfig {
            entity_start: Vec2::new(80.0, SURFACE_HEIGHT - ENTITY_HEIGHT),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EntityOutsideSurface)
        ));
    }
}
