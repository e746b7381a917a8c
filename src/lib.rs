//! Gravflip - simulation core for a gravity-flipping 2D platformer
//!
//! Core modules:
//! - `sim`: Per-frame simulation (movement, collisions, gravity flips, teleports, camera)
//! - `game`: Level session ownership, (re)loading and level advancement
//! - `level_file`: Text level format decoder
//! - `renderer`: Render hand-off data (quad instances, per-kind styles)
//! - `platform`: Frame timing and pacing
//! - `tuning`: Data-driven gameplay constants
//! - `settings`: Display/runtime settings

pub mod game;
pub mod level_file;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::{FrameReport, Game};
pub use settings::Settings;
pub use tuning::{ConfigError, Tuning};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the headless runner (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Hard cap on entities per level
    pub const LEVEL_MAX_ENTITIES: usize = 100;

    /// Default viewport size in pixels
    pub const SCREEN_WIDTH: f32 = 1280.0;
    pub const SCREEN_HEIGHT: f32 = 960.0;

    /// Smallest authoring unit; level sizes are multiples of this
    pub const ATOM_SIZE: f32 = 64.0;

    /// Level file format version understood by the decoder
    pub const LEVEL_FORMAT_VERSION: u32 = 0x1;
}

/// Sign of `x` as -1, 0 or 1 (zero stays zero, unlike `f32::signum`)
#[inline]
pub fn sign(x: f32) -> f32 {
    if x < 0.0 {
        -1.0
    } else if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Componentwise [`sign`]
#[inline]
pub fn sign2(v: Vec2) -> Vec2 {
    Vec2::new(sign(v.x), sign(v.y))
}
