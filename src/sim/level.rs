//! Level model
//!
//! A `Level` is built wholesale from decoded entity records and validated
//! once, so the per-frame simulation can rely on its invariants: exactly one
//! player, exactly one goal, unique ids, and teleporter links that resolve to
//! another teleporter.

use std::collections::HashSet;

use glam::Vec2;
use thiserror::Error;

use super::entity::{Entity, EntityKind, WorldScale};
use crate::consts::LEVEL_MAX_ENTITIES;

/// One decoded level record: `type posX posY sizeX sizeY [id] [linkId]`
#[derive(Debug, Clone, PartialEq)]
pub struct EntityRecord {
    pub kind: EntityKind,
    pub raw_position: Vec2,
    pub raw_size: Vec2,
    /// Explicit id; defaults to the record index
    pub id: Option<u32>,
    pub link_id: Option<u32>,
}

impl EntityRecord {
    pub fn new(kind: EntityKind, raw_position: Vec2, raw_size: Vec2) -> Self {
        Self {
            kind,
            raw_position,
            raw_size,
            id: None,
            link_id: None,
        }
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_link(mut self, link_id: u32) -> Self {
        self.link_id = Some(link_id);
        self
    }
}

/// Errors raised while decoding or validating a level
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),
    #[error("no levels configured")]
    NoLevels,
    #[error("level file has no version header")]
    MissingVersion,
    #[error("unsupported level version {0:#x}")]
    UnsupportedVersion(u32),
    #[error("line {line}: invalid number `{token}`")]
    InvalidNumber { line: usize, token: String },
    #[error("line {line}: unknown entity type {code}")]
    UnknownEntityType { line: usize, code: u32 },
    #[error("line {line}: record needs at least 5 fields, found {fields}")]
    IncompleteRecord { line: usize, fields: usize },
    #[error("level has {count} entities, the limit is {max}")]
    TooManyEntities { count: usize, max: usize },
    #[error("level has no player")]
    MissingPlayer,
    #[error("level has more than one player")]
    DuplicatePlayer,
    #[error("level has no goal")]
    MissingGoal,
    #[error("level has more than one goal")]
    DuplicateGoal,
    #[error("entity id {0} is used more than once")]
    DuplicateId(u32),
    #[error("teleporter {id} has no link id")]
    MissingLink { id: u32 },
    #[error("teleporter {id} links to missing entity {link_id}")]
    DanglingLink { id: u32, link_id: u32 },
    #[error("teleporter {id} links to itself")]
    SelfLink { id: u32 },
    #[error("teleporter {id} links to entity {link_id}, which is not a teleporter")]
    LinkToNonTeleporter { id: u32, link_id: u32 },
}

/// A validated, ready-to-simulate level
#[derive(Debug, Clone)]
pub struct Level {
    entities: Vec<Entity>,
    player: usize,
    goal: usize,
    /// Indices of solid entities (obstacles and gravity inverters)
    obstacles: Vec<usize>,
    teleporters: Vec<usize>,
}

impl Level {
    /// Build and validate a level from decoded records
    pub fn build(records: &[EntityRecord], scale: &WorldScale) -> Result<Self, LevelError> {
        if records.len() > LEVEL_MAX_ENTITIES {
            return Err(LevelError::TooManyEntities {
                count: records.len(),
                max: LEVEL_MAX_ENTITIES,
            });
        }

        let mut entities = Vec::with_capacity(records.len());
        let mut ids = HashSet::with_capacity(records.len());
        let mut player = None;
        let mut goal = None;
        let mut obstacles = Vec::new();
        let mut teleporters = Vec::new();

        for (index, record) in records.iter().enumerate() {
            let id = record.id.unwrap_or(index as u32);
            if !ids.insert(id) {
                return Err(LevelError::DuplicateId(id));
            }

            match record.kind {
                EntityKind::Player => {
                    if player.replace(index).is_some() {
                        return Err(LevelError::DuplicatePlayer);
                    }
                }
                EntityKind::Goal => {
                    if goal.replace(index).is_some() {
                        return Err(LevelError::DuplicateGoal);
                    }
                }
                EntityKind::Teleporter => teleporters.push(index),
                kind if kind.is_solid() => obstacles.push(index),
                _ => {}
            }

            let link_id = match record.kind {
                EntityKind::Teleporter => record.link_id,
                _ => None,
            };
            entities.push(Entity::new(
                id,
                record.kind,
                record.raw_position,
                record.raw_size,
                link_id,
                scale,
            ));
        }

        let level = Self {
            player: player.ok_or(LevelError::MissingPlayer)?,
            goal: goal.ok_or(LevelError::MissingGoal)?,
            entities,
            obstacles,
            teleporters,
        };
        level.validate_links()?;

        log::debug!(
            "Built level: {} entities, {} obstacles, {} teleporters",
            level.entities.len(),
            level.obstacles.len(),
            level.teleporters.len()
        );
        Ok(level)
    }

    fn validate_links(&self) -> Result<(), LevelError> {
        for &index in &self.teleporters {
            let portal = &self.entities[index];
            let link_id = portal.link_id.ok_or(LevelError::MissingLink { id: portal.id })?;
            if link_id == portal.id {
                return Err(LevelError::SelfLink { id: portal.id });
            }
            match self.find_by_id(link_id) {
                None => {
                    return Err(LevelError::DanglingLink {
                        id: portal.id,
                        link_id,
                    });
                }
                Some(target) if target.kind != EntityKind::Teleporter => {
                    return Err(LevelError::LinkToNonTeleporter {
                        id: portal.id,
                        link_id,
                    });
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn player(&self) -> &Entity {
        &self.entities[self.player]
    }

    pub fn player_mut(&mut self) -> &mut Entity {
        &mut self.entities[self.player]
    }

    pub fn goal(&self) -> &Entity {
        &self.entities[self.goal]
    }

    /// Solid entities in level order
    pub fn obstacles(&self) -> impl Iterator<Item = &Entity> {
        self.obstacles.iter().map(|&i| &self.entities[i])
    }

    /// Teleporter entities in level order
    pub fn teleporters(&self) -> impl Iterator<Item = &Entity> {
        self.teleporters.iter().map(|&i| &self.entities[i])
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// The portal a teleporter sends the player to
    pub fn linked_portal(&self, portal: &Entity) -> Option<&Entity> {
        portal
            .link_id
            .and_then(|id| self.find_by_id(id))
            .filter(|e| e.kind == EntityKind::Teleporter)
    }
}
