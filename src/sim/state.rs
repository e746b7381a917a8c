//! Simulation state and per-frame input types
//!
//! Everything that persists between frames lives in [`SimState`]. It is owned
//! by the game session and outlives individual levels; loading a level resets
//! it through [`SimState::reset_for_level`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::gravity::GravityFlip;
use super::teleport::TeleportState;
use crate::tuning::Tuning;

/// Horizontal key identity, used to break ties when both are held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Horizontal {
    Left,
    Right,
}

/// Input snapshot for one frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Controller {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Most recently pressed horizontal key; wins when left and right are both held
    pub latest_horizontal: Option<Horizontal>,
    /// One-shot jump pulse
    pub jump: bool,
    /// One-shot toggle between gravity and fly mode
    pub toggle_gravity: bool,
    /// One-shot manual gravity flip (debug key), ignores the debounce timer
    pub flip_gravity: bool,
}

impl Controller {
    /// Held horizontal direction: -1, 0 or 1.
    ///
    /// With both keys held the most recently pressed one wins; right wins
    /// when no press order was recorded.
    pub fn horizontal(&self) -> f32 {
        match (self.move_left, self.move_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            (true, true) => match self.latest_horizontal {
                Some(Horizontal::Left) => -1.0,
                Some(Horizontal::Right) | None => 1.0,
            },
            (false, false) => 0.0,
        }
    }

    /// Held vertical direction: -1, 0 or 1 (down wins when both are held)
    pub fn vertical(&self) -> f32 {
        if self.move_down {
            -1.0
        } else if self.move_up {
            1.0
        } else {
            0.0
        }
    }

    /// Held direction as per-axis unit components
    pub fn direction(&self) -> Vec2 {
        Vec2::new(self.horizontal(), self.vertical())
    }

    /// Drop the one-shot pulses after they have been consumed
    pub fn clear_pulses(&mut self) {
        self.jump = false;
        self.toggle_gravity = false;
        self.flip_gravity = false;
    }
}

/// Input and timing for one frame
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub controller: Controller,
    /// Elapsed frame time in seconds
    pub dt: f32,
}

impl FrameInput {
    pub fn new(controller: Controller, dt: f32) -> Self {
        Self { controller, dt }
    }

    #[inline]
    pub fn dt_ms(&self) -> f32 {
        self.dt * 1000.0
    }
}

/// Which player sides were blocked by solid entities in a frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionFlags {
    pub blocked_x: bool,
    /// Player's bottom side rests on a surface
    pub blocked_bottom: bool,
    /// Player's top side is pressed against a ceiling
    pub blocked_top: bool,
}

impl CollisionFlags {
    #[inline]
    pub fn blocked_y(&self) -> bool {
        self.blocked_bottom || self.blocked_top
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.blocked_x || self.blocked_y()
    }
}

/// Per-session simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    /// Per-frame velocity
    pub velocity: Vec2,
    /// Signed horizontal force driving the player
    pub effective_force: f32,
    /// +1 under normal gravity, negative (damped) when inverted
    pub gravity_dir: f32,
    /// false = fly mode
    pub gravity_enabled: bool,
    /// World-space direction of travel this frame, each axis -1, 0 or 1
    pub motion_dir: Vec2,
    /// Collision flags reported by the previous frame
    pub collisions: CollisionFlags,
    pub gravity_flip: GravityFlip,
    pub teleport: TeleportState,
    /// Set on goal overlap, cleared on level load
    pub level_complete: bool,
}

impl SimState {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            velocity: Vec2::ZERO,
            effective_force: 0.0,
            gravity_dir: 1.0,
            gravity_enabled: tuning.start_with_gravity,
            motion_dir: Vec2::ZERO,
            collisions: CollisionFlags::default(),
            gravity_flip: GravityFlip::default(),
            teleport: TeleportState::default(),
            level_complete: false,
        }
    }

    /// Reset everything tied to the previous level; the gravity mode carries over
    pub fn reset_for_level(&mut self) {
        self.velocity = Vec2::ZERO;
        self.effective_force = 0.0;
        self.gravity_dir = 1.0;
        self.motion_dir = Vec2::ZERO;
        self.collisions = CollisionFlags::default();
        self.gravity_flip = GravityFlip::default();
        self.teleport = TeleportState::default();
        self.level_complete = false;
    }

    /// Switch between gravity and fly mode, dropping all momentum
    pub fn toggle_gravity_mode(&mut self) {
        self.gravity_enabled = !self.gravity_enabled;
        self.velocity = Vec2::ZERO;
        self.effective_force = 0.0;
        self.motion_dir = Vec2::ZERO;
        log::debug!(
            "Gravity mode {}",
            if self.gravity_enabled { "on" } else { "off (fly)" }
        );
    }

    /// The previous frame's vertical contact is on the side gravity pulls toward
    pub fn is_grounded(&self) -> bool {
        if self.gravity_dir > 0.0 {
            self.collisions.blocked_bottom
        } else {
            self.collisions.blocked_top
        }
    }
}
