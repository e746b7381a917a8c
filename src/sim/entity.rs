//! Level entities
//!
//! Entities carry their authored (raw) placement plus the derived world-space
//! placement. The bounding rectangle is recomputed on every position write.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use crate::consts::ATOM_SIZE;

/// Entity type tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Obstacle,
    Goal,
    /// Solid block that flips gravity on contact
    GravityInverter,
    /// Portal paired with another teleporter through its link id
    Teleporter,
}

impl EntityKind {
    /// Decode the numeric type code used by level files
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(EntityKind::Player),
            1 => Some(EntityKind::Obstacle),
            2 => Some(EntityKind::Goal),
            3 => Some(EntityKind::GravityInverter),
            4 => Some(EntityKind::Teleporter),
            _ => None,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            EntityKind::Player => 0,
            EntityKind::Obstacle => 1,
            EntityKind::Goal => 2,
            EntityKind::GravityInverter => 3,
            EntityKind::Teleporter => 4,
        }
    }

    /// Whether the player collides with this kind
    pub fn is_solid(&self) -> bool {
        matches!(self, EntityKind::Obstacle | EntityKind::GravityInverter)
    }

    /// Render style for this kind
    pub fn style(&self) -> EntityStyle {
        match self {
            EntityKind::Player => EntityStyle {
                color: [0.45, 0.8, 0.2],
                z: -6.0,
            },
            EntityKind::Obstacle => EntityStyle {
                color: [1.0, 1.0, 1.0],
                z: -3.0,
            },
            EntityKind::Goal => EntityStyle {
                color: [0.93, 0.7, 0.27],
                z: -4.0,
            },
            EntityKind::GravityInverter => EntityStyle {
                color: [1.0, 0.0, 0.0],
                z: -5.0,
            },
            EntityKind::Teleporter => EntityStyle {
                color: [0.0, 0.0, 0.0],
                z: -5.0,
            },
        }
    }
}

/// Per-kind presentation data handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityStyle {
    pub color: [f32; 3],
    /// Depth; more negative draws behind
    pub z: f32,
}

/// Conversion from authoring units to world units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WorldScale {
    /// Size of one authoring unit, in pixels
    pub atom_size: Vec2,
    /// Resolution scaling factor
    pub render_scale: Vec2,
}

impl Default for WorldScale {
    fn default() -> Self {
        Self {
            atom_size: Vec2::splat(ATOM_SIZE),
            render_scale: Vec2::ONE,
        }
    }
}

impl WorldScale {
    /// A scale where authoring units are world units (handy for tests and tools)
    pub const IDENTITY: WorldScale = WorldScale {
        atom_size: Vec2::ONE,
        render_scale: Vec2::ONE,
    };

    /// Raw positions are pixel offsets; only the render scale applies
    pub fn position(&self, raw: Vec2) -> Vec2 {
        raw * self.render_scale
    }

    /// Raw sizes are in atoms
    pub fn size(&self, raw: Vec2) -> Vec2 {
        raw * self.atom_size * self.render_scale.x
    }
}

/// A placed level entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    pub raw_position: Vec2,
    pub raw_size: Vec2,
    /// World-space lower-left corner
    position: Vec2,
    /// World-space size
    size: Vec2,
    bounds: Rect,
    /// Paired portal id (teleporters only)
    pub link_id: Option<u32>,
}

impl Entity {
    pub fn new(
        id: u32,
        kind: EntityKind,
        raw_position: Vec2,
        raw_size: Vec2,
        link_id: Option<u32>,
        scale: &WorldScale,
    ) -> Self {
        let position = scale.position(raw_position);
        let size = scale.size(raw_size);
        Self {
            id,
            kind,
            raw_position,
            raw_size,
            position,
            size,
            bounds: Rect::new(position, size),
            link_id,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Move the entity and refresh its bounds
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
        self.bounds = Rect::new(position, self.size);
    }

    /// Move the entity so its center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.set_position(center - self.size * 0.5);
    }
}
