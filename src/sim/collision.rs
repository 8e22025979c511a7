//! Collision resolution against static level geometry
//!
//! Box-vs-box only: on overlap the dynamic body is pushed out along the
//! minimum-penetration axis and the matching velocity component is zeroed.
//! A vertical-downward separation sets `on_floor` for that tick.

use super::body::{Aabb, KinematicBody};

/// How close a body's bottom must be to a platform top to count as riding it.
const RIDE_TOLERANCE: f32 = 4.0;

/// Resolve a dynamic body against a set of static solids.
///
/// Clears the body's contact flags first; flags reflect only this tick's
/// contacts. Call after [`KinematicBody::integrate`].
pub fn resolve_static(body: &mut KinematicBody, solids: &[Aabb]) {
    body.clear_contacts();
    for solid in solids {
        let Some(pen) = body.aabb().penetration(solid) else {
            continue;
        };
        if pen.x.abs() < pen.y.abs() {
            body.pos.x += pen.x;
            body.vel.x = 0.0;
            if pen.x > 0.0 {
                // Pushed right: the obstruction is on the left
                body.blocked_left = true;
            } else {
                body.blocked_right = true;
            }
        } else {
            body.pos.y += pen.y;
            body.vel.y = 0.0;
            if pen.y < 0.0 {
                // Pushed up: resting contact
                body.on_floor = true;
            }
        }
    }
}

/// Whether `body` is resting on top of `platform` (horizontal overlap and
/// bottom edge at the platform top, within tolerance).
pub fn standing_on(body: &Aabb, platform: &Aabb) -> bool {
    let horizontal = body.right() > platform.left() && body.left() < platform.right();
    horizontal && (body.bottom() - platform.top()).abs() <= RIDE_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use glam::Vec2;

    fn ground() -> Aabb {
        Aabb::from_rect(0.0, 688.0, 1280.0, 32.0)
    }

    #[test]
    fn falling_body_lands_on_platform() {
        let mut body = KinematicBody::new(Vec2::new(100.0, 650.0), Vec2::new(14.0, 14.0));
        let solids = [ground()];
        for _ in 0..120 {
            body.integrate(SIM_DT);
            resolve_static(&mut body, &solids);
        }
        assert!(body.on_floor);
        assert_eq!(body.vel.y, 0.0);
        // Resting exactly on the platform top
        assert!((body.pos.y - (688.0 - 14.0)).abs() < 1e-3);
    }

    #[test]
    fn on_floor_decays_when_airborne() {
        let mut body = KinematicBody::new(Vec2::new(100.0, 674.0), Vec2::new(14.0, 14.0));
        let solids = [ground()];
        body.integrate(SIM_DT);
        resolve_static(&mut body, &solids);
        assert!(body.on_floor);

        // Launch upward; next tick the flag must drop
        body.vel.y = -500.0;
        body.integrate(SIM_DT);
        resolve_static(&mut body, &solids);
        assert!(!body.on_floor);
    }

    #[test]
    fn wall_contact_sets_blocked_flag_and_zeroes_vx() {
        let wall = Aabb::from_rect(200.0, 0.0, 40.0, 700.0);
        let mut body = KinematicBody::new(Vec2::new(180.0, 350.0), Vec2::new(14.0, 14.0));
        body.gravity = false;
        for _ in 0..10 {
            // Keep pressing into the wall; flags decay each tick otherwise
            body.vel.x = 300.0;
            body.integrate(SIM_DT);
            resolve_static(&mut body, &[wall]);
        }
        assert!(body.blocked_right);
        assert_eq!(body.vel.x, 0.0);
        assert!((body.pos.x - (200.0 - 14.0)).abs() < 1e-3);
    }

    #[test]
    fn standing_on_requires_horizontal_overlap() {
        let plat = Aabb::from_rect(100.0, 400.0, 100.0, 20.0);
        let riding = Aabb::new(Vec2::new(150.0, 400.0 - 14.0), Vec2::new(14.0, 14.0));
        let beside = Aabb::new(Vec2::new(300.0, 400.0 - 14.0), Vec2::new(14.0, 14.0));
        let above = Aabb::new(Vec2::new(150.0, 300.0), Vec2::new(14.0, 14.0));
        assert!(standing_on(&riding, &plat));
        assert!(!standing_on(&beside, &plat));
        assert!(!standing_on(&above, &plat));
    }
}
