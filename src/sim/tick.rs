//! Per-frame simulation step
//!
//! One call advances the level by one rendered frame: mode pulses, movement
//! integration, collision resolution, gravity inverters, teleporters, the
//! goal check and finally the camera. The order matters; each stage reads
//! what the previous stage wrote.

use glam::Vec2;

use super::camera::{self, Camera};
use super::collision;
use super::level::Level;
use super::movement;
use super::state::{CollisionFlags, FrameInput, SimState};
use super::teleport;
use crate::tuning::Tuning;

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameReport {
    /// Sides blocked this frame
    pub collisions: CollisionFlags,
    /// The level has been completed (latched until the next load)
    pub level_complete: bool,
    /// The camera matrices were rebuilt
    pub camera_refreshed: bool,
    pub teleported: bool,
    pub gravity_flipped: bool,
    /// Blocked this frame after a frame with no contact at all
    pub landed: bool,
}

/// Advance the simulation by one frame
pub fn tick(
    level: &mut Level,
    state: &mut SimState,
    camera: &mut Camera,
    input: &FrameInput,
    tuning: &Tuning,
) -> FrameReport {
    let controller = &input.controller;
    let mut report = FrameReport::default();

    if controller.toggle_gravity {
        state.toggle_gravity_mode();
    }
    if controller.flip_gravity {
        state.gravity_flip.force(&mut state.gravity_dir, tuning);
        report.gravity_flipped = true;
    }

    let displacement = movement::integrate(state, controller, input.dt, tuning);

    let start = level.player().position();
    let resolution = collision::resolve(
        level.player(),
        displacement,
        level,
        tuning.contact_epsilon,
    );
    level.player_mut().set_position(resolution.position);
    let flags = resolution.flags;

    if resolution.touched_inverter && state.gravity_flip.request(&mut state.gravity_dir, tuning) {
        report.gravity_flipped = true;
    }

    // Sliding into the goal against a wall or floor does not count
    if !state.level_complete
        && !flags.any()
        && level.player().bounds().overlaps(&level.goal().bounds())
    {
        state.level_complete = true;
        log::info!("Level complete");
    }

    let moved: Vec2 = resolution.position - start;
    if let Some(center) = teleport::update(
        &mut state.teleport,
        level.player(),
        level,
        tuning.teleport_threshold_world(),
    ) {
        level.player_mut().set_center(center);
        report.teleported = true;
    }

    state.gravity_flip.cool_down(input.dt_ms());

    report.landed = flags.any() && !state.collisions.any();
    state.collisions = flags;

    camera::track(camera, level.player(), moved, flags, input.dt_ms(), tuning);
    report.camera_refreshed = camera.refresh();

    report.collisions = flags;
    report.level_complete = state.level_complete;
    report
}
