//! Game session
//!
//! Owns the current level, the simulation state and the camera. Levels are
//! loaded wholesale: a load builds a fresh [`Level`] and only then swaps it in,
//! so a broken level file leaves the running level untouched.

use std::path::PathBuf;

use glam::Vec2;

use crate::level_file;
use crate::settings::Settings;
use crate::sim::{self, Camera, EntityRecord, FrameInput, Level, LevelError, SimState};
use crate::tuning::Tuning;

pub use crate::sim::FrameReport;

/// Where a level's text comes from
#[derive(Debug, Clone, PartialEq)]
pub enum LevelSource {
    Path(PathBuf),
    /// Level text held in memory
    Inline(String),
}

impl LevelSource {
    fn records(&self) -> Result<Vec<EntityRecord>, LevelError> {
        match self {
            LevelSource::Path(path) => level_file::load(path),
            LevelSource::Inline(text) => level_file::parse(text),
        }
    }
}

pub struct Game {
    sources: Vec<LevelSource>,
    index: usize,
    level: Level,
    state: SimState,
    camera: Camera,
    tuning: Tuning,
}

impl Game {
    /// Start a session on the first level
    pub fn new(sources: Vec<LevelSource>, tuning: Tuning, viewport: Vec2) -> Result<Self, LevelError> {
        let first = sources.first().ok_or(LevelError::NoLevels)?;
        let level = Level::build(&first.records()?, &tuning.world_scale)?;

        let mut game = Self {
            sources,
            index: 0,
            state: SimState::new(&tuning),
            camera: Camera::new(viewport),
            level,
            tuning,
        };
        game.enter_level();
        log::info!("Started on level 0 of {}", game.sources.len());
        Ok(game)
    }

    /// Start a session on the levels listed in the settings
    pub fn from_settings(settings: &Settings, tuning: Tuning) -> Result<Self, LevelError> {
        let sources = settings
            .level_paths()
            .into_iter()
            .map(LevelSource::Path)
            .collect();
        Self::new(sources, tuning, settings.viewport())
    }

    /// Replace the current level. Indices past the end load the last level.
    pub fn load_level(&mut self, index: usize) -> Result<(), LevelError> {
        let index = index.min(self.sources.len() - 1);
        let records = self.sources[index].records()?;
        self.level = Level::build(&records, &self.tuning.world_scale)?;
        self.index = index;
        self.enter_level();
        log::info!("Loaded level {}", index);
        Ok(())
    }

    /// Reload the current level from its source
    pub fn reload(&mut self) -> Result<(), LevelError> {
        self.load_level(self.index)
    }

    /// Run one frame. A level completed on the previous frame advances first.
    pub fn step(&mut self, input: &FrameInput) -> Result<FrameReport, LevelError> {
        if self.state.level_complete {
            let next = self.index + 1;
            log::info!("Level {} complete, advancing", self.index);
            // A failed load leaves the current level running instead of retrying every frame
            self.state.level_complete = false;
            if let Err(e) = self.load_level(next) {
                log::warn!("Could not advance to level {next}: {e}");
                return Err(e);
            }
        }

        Ok(sim::tick(
            &mut self.level,
            &mut self.state,
            &mut self.camera,
            input,
            &self.tuning,
        ))
    }

    fn enter_level(&mut self) {
        self.state.reset_for_level();
        self.camera.reset_on(self.level.player().center());
    }

    pub fn level(&self) -> &Level {
        &self.level
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn level_index(&self) -> usize {
        self.index
    }

    pub fn level_count(&self) -> usize {
        self.sources.len()
    }
}
