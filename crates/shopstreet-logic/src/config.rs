//! Street tunables for collision, frame layout, ambience and the walker.
//!
//! Every constant the walkthrough depends on lives in [`StreetConfig`].
//! Missing fields in a serialized config fall back to the defaults, so a
//! partial JSON object is enough to override a single value.
//!
//! ```
//! use shopstreet_logic::config::{validate_config, StreetConfig};
//!
//! let mut config = StreetConfig::default();
//! config.collision_margin = 1.5;
//! assert!(validate_config(&config).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::geometry::Vec3;

/// All walkthrough tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StreetConfig {
    /// Distance the player keeps from shop walls.
    pub collision_margin: f32,
    /// Width of the door opening in each shop's front wall.
    pub door_width: f32,
    /// Width of one item frame.
    pub frame_width: f32,
    /// Height of one item frame.
    pub frame_height: f32,
    /// Gap between neighbouring frames on a wall.
    pub frame_spacing: f32,
    /// Distance from a wall to the frame run.
    pub wall_offset: f32,
    /// Extra inward nudge applied after the wall offset.
    pub frame_inset: f32,
    /// How far below the shop centre frames hang.
    pub eye_level_drop: f32,
    /// Background colour while the player is inside a shop (0xRRGGBB).
    pub interior_tone: u32,
    /// Background colour outdoors (0xRRGGBB).
    pub exterior_tone: u32,
    pub walk_speed: f32,
    pub run_speed: f32,
    /// Multiplier turning speed × delta into a per-tick displacement.
    pub move_scale: f32,
    /// Horizontal velocity damping factor per second.
    pub damping: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    /// Camera height when standing.
    pub ground_level: f32,
    /// Frames with a longer elapsed time are skipped.
    pub max_frame_delta: f32,
    /// Shops further than this from the camera are hidden.
    pub cull_distance: f32,
    /// Give shops without items the three placeholder pieces. The first
    /// version of the street always did this; it is off by default so an
    /// empty shop shows bare walls.
    pub placeholder_stock: bool,
    /// Where the player starts, at the south end of the street.
    pub spawn: Vec3,
}

impl Default for StreetConfig {
    fn default() -> Self {
        Self {
            collision_margin: 2.0,
            door_width: 3.0,
            frame_width: 4.0,
            frame_height: 5.5,
            frame_spacing: 1.8,
            wall_offset: 0.15,
            frame_inset: 0.15,
            eye_level_drop: 0.5,
            interior_tone: 0x333333,
            exterior_tone: 0x87CEEB,
            walk_speed: 0.1,
            run_speed: 0.5,
            move_scale: 50.0,
            damping: 10.0,
            jump_speed: 15.0,
            gravity: 120.0,
            ground_level: 2.0,
            max_frame_delta: 0.1,
            cull_distance: 100.0,
            placeholder_stock: false,
            spawn: Vec3::new(0.0, 2.0, 180.0),
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A length that must be strictly positive isn't (field name, value).
    NonPositive(&'static str, f32),
    /// A value that must not be negative is (field name, value).
    Negative(&'static str, f32),
    /// Running is not faster than walking.
    RunNotFaster { walk: f32, run: f32 },
    /// Colour does not fit in 24 bits.
    ToneOutOfRange(&'static str, u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonPositive(field, v) => {
                write!(f, "{} must be positive, got {}", field, v)
            }
            ConfigError::Negative(field, v) => {
                write!(f, "{} must not be negative, got {}", field, v)
            }
            ConfigError::RunNotFaster { walk, run } => {
                write!(f, "run speed {} is not faster than walk speed {}", run, walk)
            }
            ConfigError::ToneOutOfRange(field, v) => {
                write!(f, "{} 0x{:X} is not a 24-bit colour", field, v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a street configuration, returning all errors found.
pub fn validate_config(config: &StreetConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    let positive = [
        ("collision_margin", config.collision_margin),
        ("door_width", config.door_width),
        ("frame_width", config.frame_width),
        ("frame_height", config.frame_height),
        ("frame_spacing", config.frame_spacing),
        ("walk_speed", config.walk_speed),
        ("move_scale", config.move_scale),
        ("max_frame_delta", config.max_frame_delta),
        ("cull_distance", config.cull_distance),
    ];
    for (field, value) in positive {
        // NaN fails this too
        if !(value > 0.0) {
            errors.push(ConfigError::NonPositive(field, value));
        }
    }

    let non_negative = [
        ("wall_offset", config.wall_offset),
        ("frame_inset", config.frame_inset),
        ("eye_level_drop", config.eye_level_drop),
        ("damping", config.damping),
        ("jump_speed", config.jump_speed),
        ("gravity", config.gravity),
    ];
    for (field, value) in non_negative {
        if !(value >= 0.0) {
            errors.push(ConfigError::Negative(field, value));
        }
    }

    if config.run_speed <= config.walk_speed {
        errors.push(ConfigError::RunNotFaster {
            walk: config.walk_speed,
            run: config.run_speed,
        });
    }

    for (field, tone) in [
        ("interior_tone", config.interior_tone),
        ("exterior_tone", config.exterior_tone),
    ] {
        if tone > 0xFFFFFF {
            errors.push(ConfigError::ToneOutOfRange(field, tone));
        }
    }

    errors
}
