//! Runtime and display settings
//!
//! Stored as JSON next to the binary. Gameplay constants live in
//! [`crate::tuning::Tuning`]; this file only covers the window, pacing and
//! the level list.

use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::ConfigError;

/// Runtime settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Display ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Frame budget the runner paces to
    pub target_fps: u32,
    /// Catch-up steps allowed per real frame
    pub max_substeps: u32,

    // === Levels ===
    pub level_dir: PathBuf,
    /// Level files in play order, relative to `level_dir`
    pub levels: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            target_fps: 60,
            max_substeps: MAX_SUBSTEPS,

            level_dir: PathBuf::from("levels"),
            levels: vec!["level0.txt".to_string(), "level1.txt".to_string()],
        }
    }
}

impl Settings {
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Seconds per frame at the target rate
    pub fn frame_budget(&self) -> f32 {
        1.0 / self.target_fps.max(1) as f32
    }

    /// Full paths of the configured levels, in order
    pub fn level_paths(&self) -> Vec<PathBuf> {
        self.levels.iter().map(|l| self.level_dir.join(l)).collect()
    }

    /// Load settings, falling back to defaults when the file is missing or broken
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Using default settings ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
