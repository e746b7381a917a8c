//! Axis-separated collision resolution
//!
//! The player's candidate rectangle is tested against every solid entity in
//! a single linear pass. Each axis test keys off the *previous* frame's
//! overlap on the other axis: a body already aligned horizontally with a
//! block can only hit its top or bottom, and a body aligned vertically can
//! only hit its side. That keeps a step from slipping through a corner onto
//! the wrong axis.
//!
//! Vertical hits snap the player flush against the touched edge (offset by a
//! small epsilon so the next frame does not re-enter). Horizontal hits simply
//! refuse the x move.

use glam::Vec2;

use super::entity::{Entity, EntityKind};
use super::level::Level;
use super::rect::Rect;
use super::state::CollisionFlags;

/// Outcome of resolving one frame's displacement
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Corrected player position (lower-left corner)
    pub position: Vec2,
    /// Candidate rectangle before correction
    pub candidate: Rect,
    pub flags: CollisionFlags,
    /// A gravity inverter was touched on any side
    pub touched_inverter: bool,
}

/// Sides of the player blocked by one target
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Contact {
    pub x: bool,
    /// Player landed on the target's top edge
    pub bottom: bool,
    /// Player bumped into the target's bottom edge
    pub top: bool,
}

impl Contact {
    #[inline]
    pub fn any(&self) -> bool {
        self.x || self.bottom || self.top
    }
}

/// Classify how a player moving from `prev` to `candidate` meets `target`
pub fn contact(prev: &Rect, candidate: &Rect, target: &Rect) -> Contact {
    let mut c = Contact::default();

    // Flush sides do not align: a wall beside the player is never a floor
    if prev.intersects_x(target) {
        // Straddling the edge, or having swept across it this step
        let straddles_top = candidate.bottom() < target.top() && candidate.top() > target.top();
        let crossed_top = prev.bottom() >= target.top() && candidate.bottom() < target.top();
        c.bottom = straddles_top || crossed_top;

        let straddles_bottom =
            candidate.top() > target.bottom() && candidate.bottom() < target.bottom();
        let crossed_bottom = prev.top() <= target.bottom() && candidate.top() > target.bottom();
        c.top = straddles_bottom || crossed_bottom;

        // The step spans the whole target: keep the side the player came from
        if c.bottom && c.top {
            if prev.bottom() >= target.top() {
                c.top = false;
            } else {
                c.bottom = false;
            }
        }
    }

    if prev.intersects_y(target) {
        let crossed_left = prev.right() <= target.left() && candidate.right() > target.left();
        let crossed_right = prev.left() >= target.right() && candidate.left() < target.right();
        c.x = candidate.intersects_x(target) || crossed_left || crossed_right;
    }

    // Diagonal entry with no prior alignment on either axis: refuse the x move
    if !c.any() && candidate.intersects_strict(target) {
        c.x = true;
    }

    c
}

/// Resolve the player's displacement against every solid entity in the level
pub fn resolve(player: &Entity, displacement: Vec2, level: &Level, epsilon: f32) -> Resolution {
    resolve_against(player, displacement, level.obstacles(), epsilon)
}

/// Resolve against an explicit set of solids
pub fn resolve_against<'a>(
    player: &Entity,
    displacement: Vec2,
    solids: impl IntoIterator<Item = &'a Entity>,
    epsilon: f32,
) -> Resolution {
    let prev = player.bounds();
    let size = player.size();
    let candidate_pos = player.position() + displacement;
    let candidate = Rect::new(candidate_pos, size);

    let mut flags = CollisionFlags::default();
    let mut touched_inverter = false;
    // Highest surface landed on, lowest ceiling bumped
    let mut floor: Option<f32> = None;
    let mut ceiling: Option<f32> = None;

    for target in solids {
        let bounds = target.bounds();
        let c = contact(&prev, &candidate, &bounds);

        if c.bottom {
            let y = bounds.top() + epsilon;
            floor = Some(floor.map_or(y, |f| f.max(y)));
        }
        if c.top {
            let y = bounds.bottom() - epsilon - size.y;
            ceiling = Some(ceiling.map_or(y, |f| f.min(y)));
        }

        if target.kind == EntityKind::GravityInverter && c.any() {
            touched_inverter = true;
        }

        flags.blocked_x |= c.x;
        flags.blocked_bottom |= c.bottom;
        flags.blocked_top |= c.top;
    }

    let y = match (floor, ceiling) {
        (Some(f), Some(c)) => {
            if displacement.y > 0.0 {
                c
            } else {
                f
            }
        }
        (Some(f), None) => f,
        (None, Some(c)) => c,
        (None, None) => candidate_pos.y,
    };
    let x = if flags.blocked_x {
        player.position().x
    } else {
        candidate_pos.x
    };
    let position = Vec2::new(x, y);

    Resolution {
        position,
        candidate,
        flags,
        touched_inverter,
    }
}
