//! Collision engine: swept circle tests and elastic bounce.
//!
//! Everything here is pure with respect to game rules. Tests run in the
//! table plane (x, z); the y component of every vector is ignored.

use glam::Vec3;

use crate::components::{planar, Ball};

/// Squared speed below which a velocity has no usable direction
const MIN_SPEED_SQ: f32 = 1e-12;

/// Anything the swept test can be run against
pub trait Circle {
    fn center(&self) -> Vec3;
    fn radius(&self) -> f32;
    fn velocity(&self) -> Vec3;
}

impl Circle for Ball {
    fn center(&self) -> Vec3 {
        Ball::center(self)
    }

    fn radius(&self) -> f32 {
        Ball::radius(self)
    }

    fn velocity(&self) -> Vec3 {
        self.movement()
    }
}

/// Static overlap check, used for placement
pub fn are_touching(a: &Ball, b: &Ball) -> bool {
    planar(a.center()).distance(planar(b.center())) <= a.radius() + b.radius()
}

/// Swept test of `moving` against a stationary `other`
pub fn dynamic_static_collision<C: Circle>(moving: &Ball, other: &C, dt: f32) -> bool {
    swept_contact(moving, moving.movement(), other, dt)
}

/// Swept test of two moving balls, run in `b`'s rest frame
///
/// `b` is treated as stationary and `a` moves with the relative velocity.
/// This is exact for the direction of approach but only approximates the
/// contact point when both balls are fast.
pub fn dynamic_dynamic_collision(a: &Ball, b: &Ball, dt: f32) -> bool {
    swept_contact(a, a.movement() - b.movement(), b, dt)
}

/// Dispatch on whether `b` is moving. Only call this for a moving `a`.
pub fn check_collision<C: Circle>(a: &Ball, b: &C, dt: f32) -> bool {
    if planar(b.velocity()) != glam::Vec2::ZERO {
        swept_contact(a, a.movement() - b.velocity(), b, dt)
    } else {
        swept_contact(a, a.movement(), b, dt)
    }
}

/// Closest-approach test along `velocity * dt`
fn swept_contact<C: Circle>(moving: &Ball, velocity: Vec3, other: &C, dt: f32) -> bool {
    let v = planar(velocity);
    let speed = v.length() * dt;

    let c = planar(other.center()) - planar(moving.center());
    let sum_radii = moving.radius() + other.radius();

    // Cheap reject: cannot close the gap this tick
    let gap = c.length() - sum_radii;
    if speed < gap {
        return false;
    }

    if v.length_squared() < MIN_SPEED_SQ {
        return false;
    }

    let n = v.normalize();
    let d = n.dot(c);
    if d <= 0.0 {
        // Moving away
        return false;
    }

    let t = sum_radii * sum_radii - c.length_squared() + d * d;
    if t <= 0.0 {
        // Closest approach misses
        return false;
    }

    d - t.sqrt() <= speed
}

/// Resolve a 1-D elastic collision along the line of centers
///
/// Both velocities are computed from the pre-collision values. Returns
/// false and leaves both balls untouched if their centers coincide.
pub fn bounce(a: &mut Ball, b: &mut Ball) -> bool {
    let axis = planar(a.center() - b.center());
    if axis.length_squared() < MIN_SPEED_SQ {
        log::warn!("bounce skipped: coincident centers at {:?}", a.center());
        return false;
    }
    let n = axis.normalize();
    let n3 = Vec3::new(n.x, 0.0, n.y);

    let va = a.movement();
    let vb = b.movement();
    let a1 = planar(va).dot(n);
    let a2 = planar(vb).dot(n);

    let k = 2.0 * (a1 - a2) / (a.mass() + b.mass());

    a.set_movement(va - n3 * (k * b.mass()));
    b.set_movement(vb + n3 * (k * a.mass()));
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{BallKind, Suit};
    use crate::params::Params;

    const R: f32 = Params::BALL_RADIUS;

    fn ball(x: f32, z: f32, vx: f32, vz: f32) -> Ball {
        let mut b = Ball::new(
            BallKind::Object(Suit::Red),
            Vec3::new(x, R, z),
            R,
            Params::BALL_MASS,
        );
        if vx != 0.0 || vz != 0.0 {
            let v = Vec3::new(vx, 0.0, vz);
            b.cue_hit(v.normalize(), v.length());
        }
        b
    }

    #[test]
    fn test_are_touching() {
        assert!(are_touching(&ball(0.0, 0.0, 0.0, 0.0), &ball(2.0 * R, 0.0, 0.0, 0.0)));
        assert!(!are_touching(
            &ball(0.0, 0.0, 0.0, 0.0),
            &ball(2.0 * R + 0.001, 0.0, 0.0, 0.0)
        ));
    }

    #[test]
    fn test_head_on_hit_within_reach() {
        let a = ball(0.0, 0.0, 1.0, 0.0);
        let b = ball(2.0 * R + 0.01, 0.0, 0.0, 0.0);
        assert!(dynamic_static_collision(&a, &b, 0.016), "0.016 of travel covers the 0.01 gap");
        assert!(!dynamic_static_collision(&a, &b, 0.005), "Too short a step");
    }

    #[test]
    fn test_moving_away_never_collides() {
        let a = ball(0.0, 0.0, -1.0, 0.0);
        let b = ball(2.0 * R - 0.001, 0.0, 0.0, 0.0);
        assert!(!dynamic_static_collision(&a, &b, 0.1));
    }

    #[test]
    fn test_glancing_miss() {
        // Passing alongside with lateral offset larger than the combined radii
        let a = ball(0.0, 0.0, 10.0, 0.0);
        let b = ball(0.2, 2.0 * R + 0.01, 0.0, 0.0);
        assert!(!dynamic_static_collision(&a, &b, 0.1));
    }

    #[test]
    fn test_glancing_hit() {
        let a = ball(0.0, 0.0, 10.0, 0.0);
        let b = ball(0.2, 2.0 * R - 0.01, 0.0, 0.0);
        assert!(dynamic_static_collision(&a, &b, 0.1));
    }

    #[test]
    fn test_stationary_overlap_is_not_a_collision() {
        let a = ball(0.0, 0.0, 0.0, 0.0);
        let b = ball(R, 0.0, 0.0, 0.0);
        assert!(!dynamic_static_collision(&a, &b, 0.1), "Zero velocity has no direction");
    }

    #[test]
    fn test_relative_frame_sweep_treats_partner_as_stationary() {
        // Known approximation: b is frozen and a moves at (v_a - v_b).
        // Two balls closing head-on at 1 m/s each behave like one ball at
        // 2 m/s against a stationary target.
        let a = ball(0.0, 0.0, 1.0, 0.0);
        let b = ball(2.0 * R + 0.03, 0.0, -1.0, 0.0);
        assert!(dynamic_dynamic_collision(&a, &b, 0.016));
        assert!(check_collision(&a, &b, 0.016), "Dispatch picks the relative frame");

        let lone = ball(0.0, 0.0, 1.0, 0.0);
        let still = ball(2.0 * R + 0.03, 0.0, 0.0, 0.0);
        assert!(!check_collision(&lone, &still, 0.016));
    }

    #[test]
    fn test_same_velocity_pair_never_collides() {
        let a = ball(0.0, 0.0, 1.0, 0.0);
        let b = ball(2.0 * R + 0.001, 0.0, 1.0, 0.0);
        assert!(!dynamic_dynamic_collision(&a, &b, 0.1));
    }

    #[test]
    fn test_bounce_exchanges_velocity_head_on() {
        let mut a = ball(0.0, 0.0, 1.0, 0.0);
        let mut b = ball(2.0 * R, 0.0, 0.0, 0.0);

        assert!(bounce(&mut a, &mut b));

        assert!(a.movement().length() < 1e-6, "Cue stops dead");
        assert!((b.movement().x - 1.0).abs() < 1e-6, "Target takes all the speed");
    }

    #[test]
    fn test_bounce_heterogeneous_mass_conserves_momentum() {
        let mut a = Ball::new(BallKind::Cue, Vec3::new(0.0, R, 0.0), R, 2.0);
        a.cue_hit(Vec3::X, 1.0);
        let mut b = Ball::new(BallKind::Eight, Vec3::new(2.0 * R, R, 0.0), R, 1.0);

        bounce(&mut a, &mut b);

        let momentum = a.movement() * a.mass() + b.movement() * b.mass();
        assert!((momentum.x - 2.0).abs() < 1e-5);
        assert!((a.movement().x - 1.0 / 3.0).abs() < 1e-5);
        assert!((b.movement().x - 4.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_bounce_coincident_centers_is_noop() {
        let mut a = ball(0.0, 0.0, 1.0, 0.0);
        let mut b = ball(0.0, 0.0, 0.0, 0.0);

        assert!(!bounce(&mut a, &mut b));
        assert_eq!(a.movement(), Vec3::new(1.0, 0.0, 0.0));
        assert!(!a.movement().is_nan() && !b.movement().is_nan());
    }

    #[test]
    fn test_pocket_counts_as_static_circle() {
        let pocket = crate::table::Pocket {
            label: "test_pocket",
            kind: crate::table::PocketKind::Corner,
            center: Vec3::new(0.5, 0.0, 0.0),
            radius: Params::POCKET_RADIUS,
        };
        let a = ball(0.5 - R - Params::POCKET_RADIUS - 0.005, 0.0, 1.0, 0.0);
        assert!(check_collision(&a, &pocket, 0.016));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_no_contact_below_gap(
                ax in -2.0f32..2.0, az in -2.0f32..2.0,
                bx in -2.0f32..2.0, bz in -2.0f32..2.0,
                ra in 0.01f32..0.2, rb in 0.01f32..0.2,
                vx in -5.0f32..5.0, vz in -5.0f32..5.0,
                dt in 0.0f32..0.1,
            ) {
                let mut a = Ball::new(BallKind::Cue, Vec3::new(ax, ra, az), ra, 1.0);
                a.cue_hit(Vec3::new(vx, 0.0, vz), 1.0);
                let b = Ball::new(BallKind::Eight, Vec3::new(bx, rb, bz), rb, 1.0);

                let speed = planar(a.movement()).length() * dt;
                let gap = planar(a.center()).distance(planar(b.center())) - (ra + rb);
                if speed < gap {
                    prop_assert!(!dynamic_static_collision(&a, &b, dt));
                }
            }

            #[test]
            fn prop_equal_mass_bounce_swaps_normal_components(
                ax in -1.0f32..1.0, az in -1.0f32..1.0,
                angle in 0.0f32..std::f32::consts::TAU,
                va in -3.0f32..3.0, vb in -3.0f32..3.0,
                ta in -3.0f32..3.0, tb in -3.0f32..3.0,
            ) {
                let n = Vec3::new(angle.cos(), 0.0, angle.sin());
                let t = Vec3::new(-n.z, 0.0, n.x);
                let mut a = Ball::new(BallKind::Cue, Vec3::new(ax, R, az), R, 1.0);
                let mut b = Ball::new(BallKind::Eight, a.center() - n * (2.0 * R), R, 1.0);
                a.cue_hit(n * va + t * ta, 1.0);
                b.cue_hit(n * vb + t * tb, 1.0);
                let (a_n, b_n) = (a.movement().dot(n), b.movement().dot(n));

                prop_assert!(bounce(&mut a, &mut b));

                prop_assert!((a.movement().dot(n) - b_n).abs() < 1e-3);
                prop_assert!((b.movement().dot(n) - a_n).abs() < 1e-3);
                prop_assert!((a.movement().dot(t) - ta).abs() < 1e-3, "Tangential part kept");
            }
        }
    }
}
