//! Camera controller
//!
//! The camera is an orthographic window the size of the viewport whose
//! lower-left corner sits at `position`. Two corrections run each frame:
//!
//! - Leash pan: when the player's padded rectangle leaves the view, the
//!   camera steps toward the player. The step is scaled by a stepped
//!   distance bucket rather than a smooth curve.
//! - Edge follow: past the dead-zone percentages, the camera moves by exactly
//!   the player's displacement on that axis.
//!
//! Either correction marks the camera dirty. View and projection matrices are
//! only rebuilt by [`Camera::refresh`], once per frame, when dirty.

use glam::{Mat4, Vec2, Vec3};

use super::entity::Entity;
use super::rect::Rect;
use super::state::CollisionFlags;
use crate::sign;
use crate::tuning::Tuning;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space lower-left corner of the view
    position: Vec2,
    viewport: Vec2,
    dirty: bool,
    view: Mat4,
    projection: Mat4,
}

impl Camera {
    pub fn new(viewport: Vec2) -> Self {
        let mut camera = Self {
            position: Vec2::ZERO,
            viewport,
            dirty: true,
            view: Mat4::IDENTITY,
            projection: Mat4::orthographic_rh(
                0.0,
                viewport.x,
                0.0,
                viewport.y,
                NEAR_PLANE,
                FAR_PLANE,
            ),
        };
        camera.refresh();
        camera
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    #[inline]
    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Visible world rectangle
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.viewport)
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Center the view on `center` (used on level load)
    pub fn reset_on(&mut self, center: Vec2) {
        self.position = center - self.viewport * 0.5;
        self.dirty = true;
    }

    pub fn pan(&mut self, delta: Vec2) {
        if delta != Vec2::ZERO {
            self.position += delta;
            self.dirty = true;
        }
    }

    /// Rebuild the view matrix if anything moved this frame. Returns whether it did.
    pub fn refresh(&mut self) -> bool {
        if !self.dirty {
            return false;
        }
        let eye = Vec3::new(self.position.x, self.position.y, 1.0);
        let target = Vec3::new(self.position.x, self.position.y, 0.0);
        self.view = Mat4::look_at_rh(eye, target, Vec3::Y);
        self.dirty = false;
        true
    }
}

/// Run both camera corrections for one frame.
///
/// `displacement` is how far the player actually moved this frame, not
/// counting teleports.
pub fn track(
    camera: &mut Camera,
    player: &Entity,
    displacement: Vec2,
    flags: CollisionFlags,
    dt_ms: f32,
    tuning: &Tuning,
) {
    leash(camera, player, dt_ms, tuning);
    edge_follow(camera, player, displacement, flags, tuning);
}

fn leash(camera: &mut Camera, player: &Entity, dt_ms: f32, tuning: &Tuning) {
    let view = camera.bounds();
    let visible = player.bounds().expand(tuning.camera_margin_world());
    if view.contains_rect(&visible) {
        return;
    }

    let offset = player.center() - view.center();
    let step = Vec2::new(
        leash_step(offset.x, tuning.camera_max_pan.x, dt_ms, tuning),
        leash_step(offset.y, tuning.camera_max_pan.y, dt_ms, tuning),
    );
    camera.pan(step);
}

/// Never steps past the player, so a nearly centered axis settles instead of swinging
fn leash_step(offset: f32, max_pan: f32, dt_ms: f32, tuning: &Tuning) -> f32 {
    let distance = offset.abs();
    let step = distance.min(max_pan) * dt_ms / pan_divisor(distance, tuning);
    sign(offset) * step.min(distance)
}

/// Stepped distance scaling: near targets pan slowest, far ones fastest
fn pan_divisor(distance: f32, tuning: &Tuning) -> f32 {
    let bucket = (distance / tuning.camera_bucket_size).floor() as u32;
    let [near, far] = tuning.camera_bucket_edges;
    let [slow, medium, fast] = tuning.camera_pan_divisors;
    if bucket < near {
        slow
    } else if bucket < far {
        medium
    } else {
        fast
    }
}

fn edge_follow(
    camera: &mut Camera,
    player: &Entity,
    displacement: Vec2,
    flags: CollisionFlags,
    tuning: &Tuning,
) {
    let viewport = camera.viewport();
    let low = viewport * tuning.dead_zone_low_pct / 100.0;
    let high = viewport * tuning.dead_zone_high_pct / 100.0;
    let rel = player.position() - camera.position();

    let mut delta = Vec2::ZERO;
    if !flags.blocked_x && beyond_edge(rel.x, displacement.x, low.x, high.x) {
        delta.x = displacement.x;
    }
    if !flags.blocked_y() && beyond_edge(rel.y, displacement.y, low.y, high.y) {
        delta.y = displacement.y;
    }
    camera.pan(delta);
}

/// Past a dead-zone edge and still moving toward it
#[inline]
fn beyond_edge(rel: f32, moving: f32, low: f32, high: f32) -> bool {
    (rel < low && moving < 0.0) || (rel > high && moving > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
    use crate::sim::entity::{EntityKind, WorldScale};

    const FRAME_MS: f32 = 1000.0 / 60.0;

    fn viewport() -> Vec2 {
        Vec2::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }

    /// Camera at the origin with no pending refresh
    fn settled_camera() -> Camera {
        let mut camera = Camera::new(viewport());
        camera.refresh();
        camera
    }

    fn player_at(x: f32, y: f32) -> Entity {
        Entity::new(
            0,
            EntityKind::Player,
            Vec2::new(x, y),
            Vec2::splat(64.0),
            None,
            &WorldScale::IDENTITY,
        )
    }

    #[test]
    fn test_reset_centers_on_player_and_marks_dirty() {
        let mut camera = settled_camera();
        camera.reset_on(Vec2::new(1000.0, 500.0));
        assert!(camera.is_dirty());
        assert_eq!(camera.bounds().center(), Vec2::new(1000.0, 500.0));
    }

    #[test]
    fn test_refresh_only_when_dirty() {
        let mut camera = settled_camera();
        assert!(!camera.refresh());

        camera.pan(Vec2::new(10.0, 0.0));
        assert!(camera.refresh());
        assert!(!camera.is_dirty());
        assert!(!camera.refresh());

        // The view looks down -Z from the camera position
        let origin = camera.view().transform_point3(Vec3::new(10.0, 0.0, 0.0));
        assert!(origin.truncate().length() < 1e-5);
    }

    #[test]
    fn test_stationary_player_in_dead_zone_keeps_camera_clean() {
        let tuning = Tuning::default();
        let mut camera = settled_camera();
        let player = player_at(608.0, 448.0);
        for _ in 0..120 {
            track(
                &mut camera,
                &player,
                Vec2::ZERO,
                CollisionFlags::default(),
                FRAME_MS,
                &tuning,
            );
            assert!(!camera.is_dirty());
        }
        assert_eq!(camera.position(), Vec2::ZERO);
    }

    #[test]
    fn test_leash_uses_stepped_distance_buckets() {
        let tuning = Tuning::default();
        let max_pan = tuning.camera_max_pan.x;

        // Above the view (520 out: medium bucket), 50 right of center (near bucket)
        let mut camera = settled_camera();
        let player = player_at(658.0, 968.0);
        leash(&mut camera, &player, FRAME_MS, &tuning);
        let slow = max_pan * FRAME_MS / tuning.camera_pan_divisors[0];
        let medium = tuning.camera_max_pan.y * FRAME_MS / tuning.camera_pan_divisors[1];
        assert!((camera.position().x - slow).abs() < 1e-4);
        assert!((camera.position().y - medium).abs() < 1e-4);

        // Far away: fastest pan
        let mut camera = settled_camera();
        let far = player_at(3000.0, 448.0);
        leash(&mut camera, &far, FRAME_MS, &tuning);
        let expected = max_pan * FRAME_MS / tuning.camera_pan_divisors[2];
        assert!((camera.position().x - expected).abs() < 1e-4);
        // Vertically centered: no y pan
        assert_eq!(camera.position().y, 0.0);
    }

    #[test]
    fn test_leash_settles_on_nearly_centered_axis() {
        let tuning = Tuning::default();
        let mut camera = settled_camera();
        // Far off to the right, one unit above the view's center
        let mut player = player_at(3000.0, 449.0);
        let mut prev_offset = f32::MAX;
        for _ in 0..30 {
            leash(&mut camera, &player, FRAME_MS, &tuning);
            let offset = (player.center().y - camera.bounds().center().y).abs();
            assert!(offset <= prev_offset);
            assert!(offset < 1e-4);
            prev_offset = offset;
            // Keep the player ahead of the camera horizontally
            player.set_position(Vec2::new(camera.position().x + 3000.0, 449.0));
        }
    }

    #[test]
    fn test_leash_steps_toward_player_on_both_sides() {
        let tuning = Tuning::default();
        let mut camera = settled_camera();
        let player = player_at(-500.0, -400.0);
        leash(&mut camera, &player, FRAME_MS, &tuning);
        assert!(camera.position().x < 0.0);
        assert!(camera.position().y < 0.0);
    }

    #[test]
    fn test_edge_follow_matches_displacement() {
        let tuning = Tuning::default();
        let mut camera = settled_camera();
        // Past the 70% line, moving right
        let player = player_at(900.0, 448.0);
        track(
            &mut camera,
            &player,
            Vec2::new(5.0, 0.0),
            CollisionFlags::default(),
            FRAME_MS,
            &tuning,
        );
        assert_eq!(camera.position(), Vec2::new(5.0, 0.0));
        assert!(camera.is_dirty());
    }

    #[test]
    fn test_edge_follow_ignores_motion_away_from_edge() {
        let tuning = Tuning::default();
        let mut camera = settled_camera();
        let player = player_at(900.0, 448.0);
        track(
            &mut camera,
            &player,
            Vec2::new(-5.0, 0.0),
            CollisionFlags::default(),
            FRAME_MS,
            &tuning,
        );
        assert_eq!(camera.position(), Vec2::ZERO);
    }

    #[test]
    fn test_edge_follow_skips_blocked_axis() {
        let tuning = Tuning::default();
        let mut camera = settled_camera();
        // Below the 30% line, falling, but standing on something
        let player = player_at(608.0, 200.0);
        let flags = CollisionFlags {
            blocked_bottom: true,
            ..Default::default()
        };
        track(&mut camera, &player, Vec2::new(0.0, -3.0), flags, FRAME_MS, &tuning);
        assert_eq!(camera.position(), Vec2::ZERO);

        track(
            &mut camera,
            &player,
            Vec2::new(0.0, -3.0),
            CollisionFlags::default(),
            FRAME_MS,
            &tuning,
        );
        assert_eq!(camera.position(), Vec2::new(0.0, -3.0));
    }
}
