//! Frame clock and fixed-step accumulator

use std::time::{Duration, Instant};

/// Longest frame fed to the accumulator, in seconds
const MAX_FRAME_SECS: f32 = 0.1;

/// Measures real time between frames and paces the loop
#[derive(Debug)]
pub struct FrameClock {
    frame_start: Instant,
    /// Seconds elapsed during the last completed frame
    dt: f32,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            frame_start: Instant::now(),
            dt: 0.0,
        }
    }

    /// Close the current frame and start the next; returns its length in seconds
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.dt = now.duration_since(self.frame_start).as_secs_f32();
        self.frame_start = now;
        self.dt
    }

    #[inline]
    pub fn dt(&self) -> f32 {
        self.dt
    }

    #[inline]
    pub fn dt_ms(&self) -> f32 {
        self.dt * 1000.0
    }

    /// Sleep out the rest of the frame budget. Returns how long it slept.
    pub fn pace(&self, target_fps: u32) -> Duration {
        let budget = Duration::from_secs_f64(1.0 / target_fps.max(1) as f64);
        let elapsed = self.frame_start.elapsed();
        match budget.checked_sub(elapsed) {
            Some(remaining) if !remaining.is_zero() => {
                std::thread::sleep(remaining);
                remaining
            }
            _ => Duration::ZERO,
        }
    }
}

/// Turns variable frame times into a bounded number of fixed steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            step,
            max_substeps,
            accumulator: 0.0,
        }
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Add a frame's elapsed time and return how many steps to run now.
    ///
    /// Time beyond `max_substeps` steps is dropped so a long stall cannot
    /// snowball into ever longer catch-up frames.
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_SECS);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps {
            self.accumulator = self.accumulator.min(self.step);
        }
        steps
    }

    /// Fraction of a step left over, for interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.step
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}
