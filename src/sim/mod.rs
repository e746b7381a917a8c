//! Per-frame simulation core
//!
//! All gameplay logic lives here. The module is deterministic for a given
//! sequence of inputs and frame times:
//! - `dt` is always an explicit parameter
//! - Entities are visited in level order
//! - No rendering, file or platform dependencies

pub mod camera;
pub mod collision;
pub mod entity;
pub mod gravity;
pub mod level;
pub mod movement;
pub mod rect;
pub mod state;
pub mod teleport;
pub mod tick;

pub use camera::Camera;
pub use collision::{Contact, Resolution, resolve};
pub use entity::{Entity, EntityKind, EntityStyle, WorldScale};
pub use gravity::GravityFlip;
pub use level::{EntityRecord, Level, LevelError};
pub use rect::Rect;
pub use state::{CollisionFlags, Controller, FrameInput, Horizontal, SimState};
pub use teleport::TeleportState;
pub use tick::{FrameReport, tick};
