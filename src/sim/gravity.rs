//! Debounced gravity-flip trigger
//!
//! Touching a gravity inverter requests a flip. A flip only fires while the
//! debounce timer is at zero and rearms the timer, so resting against an
//! inverter flips gravity exactly once per window.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Debounce state for gravity flips
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GravityFlip {
    /// Milliseconds until flips are accepted again
    timer_ms: f32,
}

impl GravityFlip {
    #[inline]
    pub fn is_armed(&self) -> bool {
        self.timer_ms <= 0.0
    }

    #[inline]
    pub fn remaining_ms(&self) -> f32 {
        self.timer_ms
    }

    /// Flip gravity if the debounce window has passed. Returns whether it flipped.
    pub fn request(&mut self, gravity_dir: &mut f32, tuning: &Tuning) -> bool {
        if !self.is_armed() {
            return false;
        }
        self.force(gravity_dir, tuning);
        true
    }

    /// Flip gravity unconditionally and rearm the timer
    pub fn force(&mut self, gravity_dir: &mut f32, tuning: &Tuning) {
        *gravity_dir = flipped(*gravity_dir, tuning);
        self.timer_ms = tuning.flip_debounce_ms;
        log::debug!("Gravity flipped, multiplier now {}", gravity_dir);
    }

    /// Count the timer down by one frame, floored at zero
    pub fn cool_down(&mut self, dt_ms: f32) {
        self.timer_ms = (self.timer_ms - dt_ms).max(0.0);
    }
}

/// Normal gravity becomes the damped inverted multiplier; inverted goes back to +1
pub fn flipped(gravity_dir: f32, tuning: &Tuning) -> f32 {
    if gravity_dir > 0.0 {
        tuning.inverted_gravity
    } else {
        1.0
    }
}
