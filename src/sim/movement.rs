//! Movement integrator
//!
//! Turns the frame's input and the persisted force/velocity state into a
//! candidate displacement. Collision flags are always those of the previous
//! frame: contact absorbs velocity on the blocked axis before integrating.

use glam::Vec2;

use super::state::{Controller, SimState};
use crate::sign;
use crate::tuning::Tuning;

/// Integrate one frame and return the player's candidate displacement
pub fn integrate(state: &mut SimState, controller: &Controller, dt: f32, tuning: &Tuning) -> Vec2 {
    if state.collisions.blocked_y() {
        state.velocity.y = 0.0;
    }
    if state.collisions.blocked_x {
        state.velocity.x = 0.0;
    }

    if !state.gravity_enabled {
        return fly(state, controller, tuning);
    }

    let grounded = state.is_grounded();
    let dir_x = controller.horizontal();

    state.effective_force = if state.collisions.blocked_x {
        0.0
    } else if grounded {
        ground_force(state.effective_force, dir_x, dt, tuning)
    } else {
        air_force(state.effective_force, dir_x, controller.jump, dt, tuning)
    };
    state.velocity.x = state.effective_force;

    let mut dy = state.velocity.y + state.gravity_dir * tuning.gravity_accel * dt;
    if controller.jump {
        dy = state.gravity_dir * tuning.jump_force;
        if !grounded {
            dy *= tuning.air_jump_factor;
        }
    }
    state.velocity.y = dy;

    state.motion_dir = Vec2::new(
        sign(state.effective_force),
        vertical_motion(dy, state.gravity_dir, tuning.motion_dead_band),
    );

    state.velocity
}

/// Gravity disabled: move along the held axes at a fixed speed
fn fly(state: &mut SimState, controller: &Controller, tuning: &Tuning) -> Vec2 {
    let displacement =
        controller.direction() * tuning.fly_speed * tuning.world_scale.render_scale.x;
    state.velocity = displacement;
    state.effective_force = 0.0;
    state.motion_dir = crate::sign2(displacement);
    displacement
}

/// Grounded: accelerate toward the held direction, otherwise friction down to a hard zero
fn ground_force(force: f32, dir_x: f32, dt: f32, tuning: &Tuning) -> f32 {
    let accel = tuning.ground_accel;
    if dir_x != 0.0 {
        return (force + dir_x * accel * dt).clamp(-accel, accel);
    }

    // Friction never pushes the force past zero
    let friction = (accel * dt).min(force.abs());
    let slowed = force - sign(force) * friction;
    if slowed.abs() < tuning.force_snap_epsilon {
        0.0
    } else {
        slowed
    }
}

/// Airborne: momentum carries, input only steers when slowing down or nearly
/// still, and speed above the air max bleeds off
fn air_force(force: f32, dir_x: f32, jump: bool, dt: f32, tuning: &Tuning) -> f32 {
    let accel = tuning.air_accel;
    let mut net = force;

    if jump {
        // An air jump against the current drift replaces it outright
        let drift = force.round();
        let reverses = (drift >= 0.0 && dir_x < 0.0) || (drift <= 0.0 && dir_x > 0.0);
        if reverses {
            net = dir_x * accel / 2.0;
        }
        return net;
    }

    if dir_x != 0.0 {
        let opposing = (net > 0.0 && dir_x < 0.0) || (net < 0.0 && dir_x > 0.0);
        if opposing || net.abs() < accel * tuning.air_steer_fraction {
            net = (net + dir_x * accel * dt).clamp(-accel, accel);
        }
    }

    if net.abs() >= accel {
        net -= sign(force) * accel * dt;
    }
    net
}

/// World-space vertical direction with a dead band scaled by gravity strength
fn vertical_motion(dy: f32, gravity_dir: f32, dead_band: f32) -> f32 {
    let band = dead_band * gravity_dir.abs();
    if dy > band {
        1.0
    } else if dy < -band {
        -1.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use proptest::prelude::*;

    fn grounded_state() -> SimState {
        let mut state = SimState::new(&Tuning::default());
        state.collisions.blocked_bottom = true;
        state
    }

    fn right() -> Controller {
        Controller {
            move_right: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_ground_acceleration_clamps_at_max() {
        let tuning = Tuning::default();
        let mut state = grounded_state();
        for _ in 0..600 {
            integrate(&mut state, &right(), SIM_DT, &tuning);
        }
        assert_eq!(state.effective_force, tuning.ground_accel);
        assert_eq!(state.motion_dir.x, 1.0);
    }

    #[test]
    fn test_friction_snaps_to_exact_zero() {
        let tuning = Tuning::default();
        let mut state = grounded_state();
        state.effective_force = tuning.ground_accel;

        let idle = Controller::default();
        let mut prev = state.effective_force;
        for _ in 0..240 {
            integrate(&mut state, &idle, SIM_DT, &tuning);
            // Monotonic decay, never crossing zero
            assert!(state.effective_force >= 0.0);
            assert!(state.effective_force <= prev);
            prev = state.effective_force;
        }
        assert_eq!(state.effective_force, 0.0);
        assert_eq!(state.motion_dir.x, 0.0);
    }

    proptest! {
        #[test]
        fn prop_friction_never_oscillates(
            start in -8.0f32..8.0,
            dt in 0.001f32..0.25,
        ) {
            let tuning = Tuning::default();
            let mut state = grounded_state();
            state.effective_force = start;
            let idle = Controller::default();
            for _ in 0..10_000 {
                let before = state.effective_force;
                integrate(&mut state, &idle, dt, &tuning);
                prop_assert!(state.effective_force == 0.0 || sign(state.effective_force) == sign(before));
                if state.effective_force == 0.0 {
                    break;
                }
            }
            prop_assert_eq!(state.effective_force, 0.0);
        }
    }

    #[test]
    fn test_blocked_x_zeroes_force() {
        let tuning = Tuning::default();
        let mut state = grounded_state();
        state.effective_force = 5.0;
        state.collisions.blocked_x = true;
        let d = integrate(&mut state, &right(), SIM_DT, &tuning);
        assert_eq!(d.x, 0.0);
        assert_eq!(state.effective_force, 0.0);
    }

    #[test]
    fn test_vertical_contact_absorbs_velocity() {
        let tuning = Tuning::default();
        let mut state = grounded_state();
        state.velocity.y = -5.0;
        let d = integrate(&mut state, &Controller::default(), SIM_DT, &tuning);
        // Only this frame's gravity remains
        let expected = tuning.gravity_accel * SIM_DT;
        assert!((d.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_airborne_gravity_accumulates() {
        let tuning = Tuning::default();
        let mut state = SimState::new(&tuning);
        let idle = Controller::default();
        let d1 = integrate(&mut state, &idle, SIM_DT, &tuning);
        let d2 = integrate(&mut state, &idle, SIM_DT, &tuning);
        assert!(d2.y < d1.y);
        assert_eq!(state.motion_dir.y, -1.0);
    }

    #[test]
    fn test_jump_strength_ground_vs_air() {
        let tuning = Tuning::default();
        let jump = Controller {
            jump: true,
            ..Default::default()
        };

        let mut state = grounded_state();
        let d = integrate(&mut state, &jump, SIM_DT, &tuning);
        assert_eq!(d.y, tuning.jump_force);

        let mut state = SimState::new(&tuning);
        let d = integrate(&mut state, &jump, SIM_DT, &tuning);
        assert_eq!(d.y, tuning.jump_force * tuning.air_jump_factor);
        assert_eq!(state.motion_dir.y, 1.0);
    }

    #[test]
    fn test_jump_follows_inverted_gravity() {
        let tuning = Tuning::default();
        let mut state = SimState::new(&tuning);
        state.gravity_dir = tuning.inverted_gravity;
        state.collisions.blocked_top = true;
        let jump = Controller {
            jump: true,
            ..Default::default()
        };
        let d = integrate(&mut state, &jump, SIM_DT, &tuning);
        assert_eq!(d.y, tuning.inverted_gravity * tuning.jump_force);
        assert_eq!(state.motion_dir.y, -1.0);
    }

    #[test]
    fn test_air_jump_against_drift_snaps_direction() {
        let tuning = Tuning::default();
        let mut state = SimState::new(&tuning);
        state.effective_force = 5.0;
        let jump_left = Controller {
            move_left: true,
            jump: true,
            ..Default::default()
        };
        integrate(&mut state, &jump_left, SIM_DT, &tuning);
        assert_eq!(state.effective_force, -tuning.air_accel / 2.0);
    }

    #[test]
    fn test_air_momentum_is_kept_without_input() {
        let tuning = Tuning::default();
        let mut state = SimState::new(&tuning);
        state.effective_force = 4.0;
        integrate(&mut state, &Controller::default(), SIM_DT, &tuning);
        assert_eq!(state.effective_force, 4.0);
    }

    #[test]
    fn test_air_speed_above_max_bleeds_off() {
        let tuning = Tuning::default();
        let mut state = SimState::new(&tuning);
        state.effective_force = tuning.ground_accel;
        integrate(&mut state, &Controller::default(), SIM_DT, &tuning);
        let expected = tuning.ground_accel - tuning.air_accel * SIM_DT;
        assert!((state.effective_force - expected).abs() < 1e-5);
    }

    #[test]
    fn test_air_steering_only_when_slow_or_opposing() {
        let tuning = Tuning::default();
        // Already drifting right at 4: holding right adds nothing
        let mut state = SimState::new(&tuning);
        state.effective_force = 4.0;
        integrate(&mut state, &right(), SIM_DT, &tuning);
        assert_eq!(state.effective_force, 4.0);

        // Nearly still: holding right steers
        let mut state = SimState::new(&tuning);
        integrate(&mut state, &right(), SIM_DT, &tuning);
        assert!((state.effective_force - tuning.air_accel * SIM_DT).abs() < 1e-6);
    }

    #[test]
    fn test_fly_mode_moves_at_fixed_speed() {
        let tuning = Tuning::default();
        let mut state = SimState::new(&tuning);
        state.gravity_enabled = false;
        let c = Controller {
            move_up: true,
            move_left: true,
            ..Default::default()
        };
        let d = integrate(&mut state, &c, SIM_DT, &tuning);
        assert_eq!(d, Vec2::new(-tuning.fly_speed, tuning.fly_speed));
        assert_eq!(state.motion_dir, Vec2::new(-1.0, 1.0));
        assert_eq!(state.effective_force, 0.0);
    }
}
