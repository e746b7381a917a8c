//! Teleport controller
//!
//! Walking into a portal does nothing until the player is centered on it
//! along the portal's short axis. At that point the crossing is committed:
//! the player reappears around the linked portal's center with the same
//! offset, and the controller latches. The latch holds while the player still
//! overlaps the destination portal and clears the moment they step out, which
//! is what keeps the destination from immediately sending them back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;
use super::level::Level;

/// Teleport latch state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeleportState {
    /// A crossing was committed and the player has not left the destination yet
    pub teleporting: bool,
    /// The player overlaps the active portal (or, unlatched, any portal)
    pub inside_teleporter: bool,
    /// Portal the latch is tied to
    pub active_portal: Option<u32>,
}

/// Run the teleport state machine for one frame.
///
/// Returns the player's new center when a crossing is committed this frame.
pub fn update(
    state: &mut TeleportState,
    player: &Entity,
    level: &Level,
    threshold: f32,
) -> Option<Vec2> {
    let bounds = player.bounds();

    if state.teleporting {
        let still_inside = state
            .active_portal
            .and_then(|id| level.find_by_id(id))
            .is_some_and(|portal| bounds.overlaps(&portal.bounds()));
        state.inside_teleporter = still_inside;
        state.teleporting = still_inside;
        if !still_inside {
            state.active_portal = None;
        }
        return None;
    }

    let mut inside = false;
    let mut arrival = None;
    for portal in level.teleporters() {
        if !bounds.overlaps(&portal.bounds()) {
            continue;
        }
        inside = true;

        let offset = player.center() - portal.center();
        if short_axis_offset(portal, offset).abs() > threshold {
            // Inside, not centered yet
            continue;
        }

        if let Some(destination) = level.linked_portal(portal) {
            log::debug!("Teleport {} -> {}", portal.id, destination.id);
            arrival = Some((destination.id, destination.center() + offset));
            break;
        }
    }

    state.inside_teleporter = inside;
    match arrival {
        Some((portal_id, center)) => {
            state.teleporting = inside;
            state.active_portal = Some(portal_id);
            Some(center)
        }
        None => {
            state.teleporting = false;
            state.active_portal = None;
            None
        }
    }
}

/// Offset component along the portal's narrow dimension
fn short_axis_offset(portal: &Entity, offset: Vec2) -> f32 {
    let size = portal.size();
    if size.x <= size.y { offset.x } else { offset.y }
}
