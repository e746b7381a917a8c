//! Quad instances handed to the renderer

use bytemuck::{Pod, Zeroable};

use crate::sim::{Entity, Level};

/// Clear color behind the level
pub const BACKGROUND: [f32; 4] = [0.12, 0.12, 0.14, 1.0];

/// One axis-aligned quad in world space
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct QuadInstance {
    pub center: [f32; 2],
    pub size: [f32; 2],
    pub z: f32,
    pub color: [f32; 3],
}

impl QuadInstance {
    pub fn from_entity(entity: &Entity) -> Self {
        let style = entity.kind.style();
        Self {
            center: entity.center().to_array(),
            size: entity.size().to_array(),
            z: style.z,
            color: style.color,
        }
    }
}

/// Instances for every entity, back to front
pub fn build_instances(level: &Level) -> Vec<QuadInstance> {
    let mut instances: Vec<QuadInstance> =
        level.entities().iter().map(QuadInstance::from_entity).collect();
    instances.sort_by(|a, b| a.z.total_cmp(&b.z));
    instances
}

/// Raw bytes for upload
pub fn as_bytes(instances: &[QuadInstance]) -> &[u8] {
    bytemuck::cast_slice(instances)
}
