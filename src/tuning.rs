//! Data-driven gameplay constants
//!
//! The values were tuned for a ~60 Hz frame: horizontal force and vertical
//! velocity are applied as per-frame displacements, while accelerations are
//! scaled by the frame's elapsed seconds.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::WorldScale;

/// Base multiplier the movement constants were authored against
const MOTION_SCALE: f32 = 2.0;

/// Errors loading configuration files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Gameplay tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Movement ===
    /// Grounded horizontal acceleration rate; also the grounded max force
    pub ground_accel: f32,
    /// Airborne horizontal acceleration rate; also the airborne max force
    pub air_accel: f32,
    /// Airborne input only steers when |force| is below this fraction of `air_accel`
    pub air_steer_fraction: f32,
    /// Grounded force snaps to zero below this magnitude
    pub force_snap_epsilon: f32,
    /// Downward acceleration (negative = toward -y under normal gravity)
    pub gravity_accel: f32,
    pub jump_force: f32,
    /// Jump strength multiplier while airborne
    pub air_jump_factor: f32,
    /// Vertical speed below which the motion direction reads as zero (scaled by |gravity|)
    pub motion_dead_band: f32,
    /// Per-frame speed in fly (gravity disabled) mode
    pub fly_speed: f32,
    /// Whether a new session starts with gravity enabled
    pub start_with_gravity: bool,

    // === Collision ===
    /// Gap left between the player and a surface it was snapped against
    pub contact_epsilon: f32,

    // === Gravity flip ===
    /// Gravity multiplier while inverted; weaker than normal gravity
    pub inverted_gravity: f32,
    /// Ignore further flips for this long after one fires
    pub flip_debounce_ms: f32,

    // === Teleport ===
    /// Max offset from the portal center along its short axis to commit a crossing
    pub teleport_threshold: f32,

    // === Camera ===
    /// Padding around the player that must stay inside the view
    pub camera_margin: Vec2,
    /// Leash pan step clamp, per axis
    pub camera_max_pan: Vec2,
    /// Width of one leash distance bucket
    pub camera_bucket_size: f32,
    /// Pan divisors for near, medium and far buckets
    pub camera_pan_divisors: [f32; 3],
    /// Bucket index where medium and far distances start
    pub camera_bucket_edges: [u32; 2],
    /// Dead-zone bounds as a percentage of the viewport
    pub dead_zone_low_pct: f32,
    pub dead_zone_high_pct: f32,

    // === World ===
    pub world_scale: WorldScale,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            ground_accel: 4.0 * MOTION_SCALE,
            air_accel: 3.0 * MOTION_SCALE,
            air_steer_fraction: 0.15,
            force_snap_epsilon: 0.5,
            gravity_accel: -11.8 * MOTION_SCALE,
            jump_force: 6.5 * MOTION_SCALE,
            air_jump_factor: 0.75,
            motion_dead_band: 0.01,
            fly_speed: 8.0,
            start_with_gravity: true,

            contact_epsilon: 0.1,

            inverted_gravity: -0.8,
            flip_debounce_ms: 500.0,

            teleport_threshold: 5.0,

            camera_margin: Vec2::new(40.0, 60.0),
            camera_max_pan: Vec2::splat(2.0 * MOTION_SCALE),
            camera_bucket_size: 100.0,
            camera_pan_divisors: [8.0, 6.0, 4.0],
            camera_bucket_edges: [4, 8],
            dead_zone_low_pct: 30.0,
            dead_zone_high_pct: 70.0,

            world_scale: WorldScale::default(),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load tuning from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.as_ref().display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Teleport threshold in world units
    pub fn teleport_threshold_world(&self) -> f32 {
        self.teleport_threshold * self.world_scale.render_scale.x
    }

    /// Leash margin in world units
    pub fn camera_margin_world(&self) -> Vec2 {
        self.camera_margin * self.world_scale.render_scale
    }
}
