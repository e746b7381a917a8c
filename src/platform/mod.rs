//! Platform layer
//!
//! Frame timing only: measuring elapsed time between frames, pacing to a
//! target frame rate, and slicing real time into fixed simulation steps.

pub mod time;

pub use time::{FixedStep, FrameClock};
