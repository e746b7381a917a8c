//! Render hand-off
//!
//! The simulation does not draw. It exposes per-entity quads with their
//! per-kind style, plus the camera matrices, for whatever backend draws them.

pub mod instances;

pub use instances::{BACKGROUND, QuadInstance, as_bytes, build_instances};
