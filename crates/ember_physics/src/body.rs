//! Collision body record, typed handles, body descriptors

use ember_core::Handle;
use ember_math::{consts, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Handle to a body owned by the static index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StaticBodyHandle(pub(crate) Handle<CollisionBody>);

/// Handle to a body owned by the kinematic store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KinematicBodyHandle(pub(crate) Handle<CollisionBody>);

/// The data record for one collidable rectangle.
///
/// Bodies are owned by the stores inside the world; consumers hold typed
/// handles and go through the world's accessor surface.
#[derive(Debug, Clone)]
pub struct CollisionBody {
    /// Canonical position and extent.
    pub rect: Rect,
    /// Persistent per-tick drift (gravity, controlled movement), in units
    /// per tick.
    pub velocity: Vec2,
    /// Transient displacement queued by push areas; integrated and then
    /// decayed at end of step.
    pub push: Vec2,
    /// `0.0` marks an immovable body. Every kinematic body has positive
    /// mass.
    pub mass: f32,
    pushed: bool,
    position_last_tick: Vec2,
}

impl CollisionBody {
    /// An immovable body (terrain, walls).
    pub(crate) fn immovable(rect: Rect) -> Self {
        Self {
            rect,
            velocity: Vec2::ZERO,
            push: Vec2::ZERO,
            mass: 0.0,
            pushed: false,
            position_last_tick: rect.position(),
        }
    }

    /// A movable body built from a descriptor.
    pub(crate) fn movable(desc: &KinematicBodyDesc) -> Self {
        Self {
            rect: desc.rect,
            velocity: desc.velocity,
            push: Vec2::ZERO,
            mass: desc.mass,
            pushed: false,
            position_last_tick: desc.rect.position(),
        }
    }

    /// Whether this is an immovable body.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.mass == 0.0
    }

    /// Whether a push was applied during the current tick.
    #[inline]
    pub fn is_being_pushed(&self) -> bool {
        self.pushed
    }

    /// Position at the end of the previous tick.
    #[inline]
    pub fn position_last_tick(&self) -> Vec2 {
        self.position_last_tick
    }

    /// Queue a push displacement for this tick.
    pub(crate) fn apply_push(&mut self, push: Vec2) {
        self.push += push;
        self.pushed = true;
    }

    /// End-of-step finalize: decay the push vector, reset one-shot state,
    /// record the tick's final position.
    pub(crate) fn finalize_step(&mut self, push_retention: f32) {
        if push_retention > 0.0 {
            self.push *= push_retention;
            if self.push.length_squared() < consts::EPSILON {
                self.push = Vec2::ZERO;
            }
        } else {
            self.push = Vec2::ZERO;
        }
        self.pushed = false;
        self.position_last_tick = self.rect.position();
    }
}

/// Description for creating a kinematic body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KinematicBodyDesc {
    /// Initial position and extent
    pub rect: Rect,
    /// Mass, must be positive
    pub mass: f32,
    /// Initial velocity, in units per tick
    pub velocity: Vec2,
}

impl KinematicBodyDesc {
    /// A unit-mass body at `rect` with no initial velocity.
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            mass: 1.0,
            velocity: Vec2::ZERO,
        }
    }

    /// Set the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Set the initial velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_clears_push_by_default() {
        let mut body = CollisionBody::movable(&KinematicBodyDesc::new(Rect::new(
            0.0, 0.0, 10.0, 10.0,
        )));
        body.apply_push(Vec2::new(3.0, 0.0));
        assert!(body.is_being_pushed());

        body.finalize_step(0.0);
        assert_eq!(body.push, Vec2::ZERO);
        assert!(!body.is_being_pushed());
    }

    #[test]
    fn finalize_retains_a_fraction() {
        let mut body = CollisionBody::movable(&KinematicBodyDesc::new(Rect::new(
            0.0, 0.0, 10.0, 10.0,
        )));
        body.apply_push(Vec2::new(4.0, 0.0));

        body.finalize_step(0.5);
        assert_eq!(body.push, Vec2::new(2.0, 0.0));

        // Repeated decay bottoms out at exactly zero.
        for _ in 0..64 {
            body.finalize_step(0.5);
        }
        assert_eq!(body.push, Vec2::ZERO);
    }

    #[test]
    fn finalize_records_last_position() {
        let mut body = CollisionBody::movable(&KinematicBodyDesc::new(Rect::new(
            5.0, 6.0, 10.0, 10.0,
        )));
        body.rect.translate(Vec2::new(2.0, 0.0));
        assert_eq!(body.position_last_tick(), Vec2::new(5.0, 6.0));

        body.finalize_step(0.0);
        assert_eq!(body.position_last_tick(), Vec2::new(7.0, 6.0));
    }
}
