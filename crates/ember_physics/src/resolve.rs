//! Overlap resolution policies
//!
//! Both policies separate along the axis of least penetration: whichever
//! axis has the smaller overlap distance is the one the bodies are pushed
//! apart on. Ties go to the x axis.

use ember_math::{Rect, Vec2};

use crate::body::CollisionBody;

/// Axis a contact was resolved along.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Outcome of one resolution.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    /// Axis the separation happened on.
    pub axis: Axis,
    /// Unit normal along that axis, pointing the way the resolved body
    /// (the first argument) moved.
    pub normal: Vec2,
    /// Penetration depth that was removed.
    pub depth: f32,
}

/// Overlap distances on both axes, and the direction `a` sits relative to
/// `b` on each. Positive overlaps on both axes iff the rects overlap.
fn penetration(a: &Rect, b: &Rect) -> (f32, f32, f32, f32) {
    let overlap_x = a.right().min(b.right()) - a.left.max(b.left);
    let overlap_y = a.bottom().min(b.bottom()) - a.top.max(b.top);
    let dir_x = if a.center().x < b.center().x { -1.0 } else { 1.0 };
    let dir_y = if a.center().y < b.center().y { -1.0 } else { 1.0 };
    (overlap_x, overlap_y, dir_x, dir_y)
}

/// Push a kinematic body out of an immovable rectangle.
///
/// Moves the body to the obstacle's boundary along the axis of least
/// penetration and zeroes the body's velocity component on that axis, so
/// it cannot keep pressing through on subsequent ticks. The obstacle never
/// moves.
///
/// Returns `None` when the rectangles do not overlap.
pub fn resolve_kinematic_static(body: &mut CollisionBody, obstacle: &Rect) -> Option<Contact> {
    if !body.rect.overlaps(obstacle) {
        return None;
    }
    let (overlap_x, overlap_y, dir_x, dir_y) = penetration(&body.rect, obstacle);
    if overlap_x <= overlap_y {
        body.rect.left += dir_x * overlap_x;
        body.velocity.x = 0.0;
        Some(Contact {
            axis: Axis::X,
            normal: Vec2::new(dir_x, 0.0),
            depth: overlap_x,
        })
    } else {
        body.rect.top += dir_y * overlap_y;
        body.velocity.y = 0.0;
        Some(Contact {
            axis: Axis::Y,
            normal: Vec2::new(0.0, dir_y),
            depth: overlap_y,
        })
    }
}

/// Separate two kinematic bodies symmetrically.
///
/// The translation is split inversely by mass, so the heavier body moves
/// proportionally less; equal masses split it evenly. Velocities are left
/// alone.
///
/// Both masses must be positive. An immovable participant cannot reach
/// this path (statics live only in the ordered index) and its behavior
/// here is deliberately unspecified.
pub fn resolve_kinematic_pair(a: &mut CollisionBody, b: &mut CollisionBody) -> Option<Contact> {
    debug_assert!(a.mass > 0.0 && b.mass > 0.0);
    if !a.rect.overlaps(&b.rect) {
        return None;
    }
    let (overlap_x, overlap_y, dir_x, dir_y) = penetration(&a.rect, &b.rect);
    let total = a.mass + b.mass;
    let share_a = b.mass / total;
    let share_b = a.mass / total;
    if overlap_x <= overlap_y {
        a.rect.left += dir_x * overlap_x * share_a;
        b.rect.left -= dir_x * overlap_x * share_b;
        Some(Contact {
            axis: Axis::X,
            normal: Vec2::new(dir_x, 0.0),
            depth: overlap_x,
        })
    } else {
        a.rect.top += dir_y * overlap_y * share_a;
        b.rect.top -= dir_y * overlap_y * share_b;
        Some(Contact {
            axis: Axis::Y,
            normal: Vec2::new(0.0, dir_y),
            depth: overlap_y,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::KinematicBodyDesc;
    use approx::assert_relative_eq;

    fn kinematic(rect: Rect, mass: f32) -> CollisionBody {
        CollisionBody::movable(&KinematicBodyDesc::new(rect).with_mass(mass))
    }

    #[test]
    fn static_pushout_along_least_penetration_axis() {
        let obstacle = Rect::new(0.0, 0.0, 32.0, 32.0);
        let mut body = kinematic(Rect::new(16.0, 0.0, 32.0, 32.0), 1.0);
        body.velocity = Vec2::new(-3.0, 2.0);

        let contact = resolve_kinematic_static(&mut body, &obstacle).unwrap();

        assert_eq!(contact.axis, Axis::X);
        assert_relative_eq!(contact.depth, 16.0);
        assert_relative_eq!(body.rect.left, 32.0);
        assert_eq!(body.velocity, Vec2::new(0.0, 2.0));
        assert!(!body.rect.overlaps(&obstacle));
    }

    #[test]
    fn static_pushout_prefers_vertical_when_shallower() {
        let obstacle = Rect::new(0.0, 32.0, 32.0, 32.0);
        let mut body = kinematic(Rect::new(4.0, 8.0, 24.0, 28.0), 1.0);
        body.velocity = Vec2::new(1.0, 5.0);

        let contact = resolve_kinematic_static(&mut body, &obstacle).unwrap();

        assert_eq!(contact.axis, Axis::Y);
        assert_relative_eq!(body.rect.bottom(), 32.0);
        assert_eq!(body.velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn non_overlapping_is_none() {
        let obstacle = Rect::new(0.0, 0.0, 32.0, 32.0);
        let mut body = kinematic(Rect::new(32.0, 0.0, 32.0, 32.0), 1.0);

        assert!(resolve_kinematic_static(&mut body, &obstacle).is_none());
        assert_relative_eq!(body.rect.left, 32.0);
    }

    #[test]
    fn equal_mass_pair_splits_evenly() {
        let mut a = kinematic(Rect::new(0.0, 0.0, 20.0, 20.0), 1.0);
        let mut b = kinematic(Rect::new(10.0, 0.0, 20.0, 20.0), 1.0);

        let contact = resolve_kinematic_pair(&mut a, &mut b).unwrap();

        assert_eq!(contact.axis, Axis::X);
        assert_relative_eq!(a.rect.left, -5.0);
        assert_relative_eq!(b.rect.left, 15.0);
        assert!(!a.rect.overlaps(&b.rect));
    }

    #[test]
    fn heavier_body_moves_less() {
        let mut light = kinematic(Rect::new(0.0, 0.0, 20.0, 20.0), 1.0);
        let mut heavy = kinematic(Rect::new(10.0, 0.0, 20.0, 20.0), 3.0);

        resolve_kinematic_pair(&mut light, &mut heavy).unwrap();

        assert_relative_eq!(light.rect.left, -7.5);
        assert_relative_eq!(heavy.rect.left, 12.5);
        assert!(!light.rect.overlaps(&heavy.rect));
    }

    #[test]
    fn pair_resolution_keeps_velocities() {
        let mut a = kinematic(Rect::new(0.0, 0.0, 20.0, 20.0), 1.0);
        let mut b = kinematic(Rect::new(10.0, 0.0, 20.0, 20.0), 1.0);
        a.velocity = Vec2::new(2.0, 0.0);
        b.velocity = Vec2::new(-2.0, 0.0);

        resolve_kinematic_pair(&mut a, &mut b).unwrap();

        assert_eq!(a.velocity, Vec2::new(2.0, 0.0));
        assert_eq!(b.velocity, Vec2::new(-2.0, 0.0));
    }
}
