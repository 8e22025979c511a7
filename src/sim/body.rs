//! Kinematic body and axis-aligned box primitives
//!
//! Every simulated entity owns a `KinematicBody`; the physics step operates
//! uniformly over the body data. Static geometry is plain `Aabb` rects and
//! never moves.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::GRAVITY;

/// Axis-aligned bounding box, stored as center + half-extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, half: Vec2) -> Self {
        Self { center, half }
    }

    /// Build from a top-left rect, the format the level tables use.
    pub fn from_rect(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(x + width / 2.0, y + height / 2.0),
            half: Vec2::new(width / 2.0, height / 2.0),
        }
    }

    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    /// Top edge (y-down coordinates: smaller y).
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (other.center - self.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    /// Signed push-out vector separating `self` from `solid`, per axis.
    ///
    /// Returns `None` when the boxes do not overlap. Each component moves
    /// `self` out of `solid` along that axis; the caller picks the axis with
    /// the smaller magnitude (minimum penetration).
    pub fn penetration(&self, solid: &Aabb) -> Option<Vec2> {
        let delta = self.center - solid.center;
        let reach = self.half + solid.half;
        let overlap_x = reach.x - delta.x.abs();
        let overlap_y = reach.y - delta.y.abs();
        if overlap_x <= 0.0 || overlap_y <= 0.0 {
            return None;
        }
        Some(Vec2::new(
            overlap_x.copysign(if delta.x >= 0.0 { 1.0 } else { -1.0 }),
            overlap_y.copysign(if delta.y >= 0.0 { 1.0 } else { -1.0 }),
        ))
    }
}

/// Minimal 2D rigid-body state shared by every simulated entity.
///
/// Mutated only by the physics step and by behavior code issuing velocity
/// commands. Contact flags are recomputed every tick and decay to false the
/// instant the body leaves contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub half: Vec2,
    pub on_floor: bool,
    pub blocked_left: bool,
    pub blocked_right: bool,
    /// Whether gravity applies during integration
    pub gravity: bool,
}

impl KinematicBody {
    pub fn new(pos: Vec2, half: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            half,
            on_floor: false,
            blocked_left: false,
            blocked_right: false,
            gravity: true,
        }
    }

    /// A body that ignores gravity (projectiles).
    pub fn new_floating(pos: Vec2, half: Vec2) -> Self {
        Self {
            gravity: false,
            ..Self::new(pos, half)
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos, self.half)
    }

    /// Contact flags hold for one tick only.
    pub fn clear_contacts(&mut self) {
        self.on_floor = false;
        self.blocked_left = false;
        self.blocked_right = false;
    }

    /// Apply gravity and integrate velocity into position.
    pub fn integrate(&mut self, dt: f32) {
        if self.gravity {
            self.vel.y += GRAVITY * dt;
        }
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_rect_matches_edges() {
        let a = Aabb::from_rect(100.0, 200.0, 50.0, 20.0);
        assert_eq!(a.left(), 100.0);
        assert_eq!(a.right(), 150.0);
        assert_eq!(a.top(), 200.0);
        assert_eq!(a.bottom(), 220.0);
    }

    #[test]
    fn overlap_detection() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(15.0, 0.0), Vec2::new(10.0, 10.0));
        let c = Aabb::new(Vec2::new(25.0, 0.0), Vec2::new(4.0, 4.0));
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn penetration_prefers_shallow_axis() {
        let solid = Aabb::from_rect(0.0, 100.0, 200.0, 20.0);
        // Body sunk 4 units into the platform top, well inside horizontally
        let body = Aabb::new(Vec2::new(100.0, 100.0 - 10.0 + 4.0), Vec2::new(10.0, 10.0));
        let pen = body.penetration(&solid).unwrap();
        // Vertical push-out is upward (negative y) and smaller than horizontal
        assert!(pen.y < 0.0);
        assert!(pen.y.abs() < pen.x.abs());
        assert!((pen.y - (-4.0)).abs() < 1e-3);
    }

    #[test]
    fn integrate_applies_gravity() {
        let mut body = KinematicBody::new(Vec2::ZERO, Vec2::new(10.0, 10.0));
        body.integrate(0.1);
        assert!(body.vel.y > 0.0);
        assert!(body.pos.y > 0.0);

        let mut floater = KinematicBody::new_floating(Vec2::ZERO, Vec2::new(8.0, 8.0));
        floater.vel = Vec2::new(500.0, 0.0);
        floater.integrate(0.1);
        assert_eq!(floater.vel.y, 0.0);
        assert!((floater.pos.x - 50.0).abs() < 1e-3);
    }
}
