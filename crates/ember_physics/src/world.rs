//! Physics world - main simulation container

use ember_math::{Rect, Vec2};

use crate::body::{CollisionBody, KinematicBodyDesc, KinematicBodyHandle, StaticBodyHandle};
use crate::config::PhysicsConfig;
use crate::debug::DebugMirror;
use crate::error::{PhysicsError, Result};
use crate::events::{ContactEvent, ContactEvents, ContactOther};
use crate::index::StaticBodyIndex;
use crate::resolve;
use crate::store::KinematicBodyStore;

/// The main physics world containing all simulation state
///
/// Owns both body stores exclusively; consumers create and remove bodies
/// through it and hold typed, generation-checked handles in between.
/// Single-threaded: one `update` call runs zero or more whole fixed ticks
/// and never suspends.
pub struct PhysicsWorld {
    /// Configuration
    config: PhysicsConfig,

    /// Immovable bodies, ordered by position
    statics: StaticBodyIndex,

    /// Movable bodies, iterated in insertion order
    kinematics: KinematicBodyStore,

    /// Contacts resolved during the most recent tick
    events: ContactEvents,

    /// Rect mirror for the debug overlay
    mirror: DebugMirror,

    /// Accumulated time for fixed timestep
    accumulated_time: f32,
}

impl PhysicsWorld {
    /// Create a new physics world.
    ///
    /// The configuration is expected to pass
    /// [`PhysicsConfig::validate`]; constructing a world from an invalid
    /// one is a caller error.
    pub fn new(config: PhysicsConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid physics configuration");
        Self {
            config,
            statics: StaticBodyIndex::new(),
            kinematics: KinematicBodyStore::new(),
            events: ContactEvents::default(),
            mirror: DebugMirror::default(),
            accumulated_time: 0.0,
        }
    }

    /// Get the physics configuration
    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    // ==================== Body lifecycle ====================

    /// Insert an immovable body. The rectangle is fixed for the body's
    /// whole lifetime.
    pub fn create_static_body(&mut self, rect: Rect) -> StaticBodyHandle {
        let handle = self.statics.insert(CollisionBody::immovable(rect));
        if self.config.debug_mirror {
            self.mirror.add_static(handle, rect);
        }
        handle
    }

    /// Insert a movable body. `desc.mass` must be positive.
    pub fn create_kinematic_body(&mut self, desc: KinematicBodyDesc) -> KinematicBodyHandle {
        debug_assert!(desc.mass > 0.0, "kinematic bodies must have positive mass");
        let handle = self.kinematics.insert(CollisionBody::movable(&desc));
        if self.config.debug_mirror {
            self.mirror.add_kinematic(handle, desc.rect);
        }
        handle
    }

    /// Remove a static body. Unknown or stale handles are absorbed with a
    /// logged warning.
    pub fn remove_static_body(&mut self, handle: StaticBodyHandle) {
        match self.statics.remove(handle) {
            Some(_) => {
                if self.config.debug_mirror {
                    self.mirror.remove_static(handle);
                }
            }
            None => log::warn!("remove_static_body: unknown or stale handle {:?}", handle),
        }
    }

    /// Remove a kinematic body. Unknown or stale handles are absorbed with
    /// a logged warning.
    pub fn remove_kinematic_body(&mut self, handle: KinematicBodyHandle) {
        match self.kinematics.remove(handle) {
            Some(_) => {
                if self.config.debug_mirror {
                    self.mirror.remove_kinematic(handle);
                }
            }
            None => log::warn!(
                "remove_kinematic_body: unknown or stale handle {:?}",
                handle
            ),
        }
    }

    /// Empty all state: both stores, the contact buffer, the mirror, the
    /// timestep accumulator. Used on scene transitions; never fails.
    pub fn clear(&mut self) {
        self.statics.clear();
        self.kinematics.clear();
        self.events.clear();
        self.mirror.clear();
        self.accumulated_time = 0.0;
    }

    // ==================== Simulation ====================

    /// Advance the simulation by `delta_time` seconds.
    ///
    /// A fixed-timestep accumulator decouples the caller's frame rate from
    /// the tick rate: this may run zero, one, or several whole ticks, up
    /// to `max_substeps` per call.
    pub fn update(&mut self, delta_time: f32) {
        self.accumulated_time += delta_time;

        let mut steps = 0;
        while self.accumulated_time >= self.config.timestep && steps < self.config.max_substeps {
            self.step_tick();
            self.accumulated_time -= self.config.timestep;
            steps += 1;
        }
    }

    /// One fixed tick: the five-step pipeline, in fixed order.
    fn step_tick(&mut self) {
        self.events.clear();

        // 1. Kinematic vs kinematic, insertion order. Pairs are resolved
        // immediately, so later pairs see earlier separations within the
        // same tick.
        let count = self.kinematics.len();
        for i in 0..count {
            let a = match self.kinematics.handle_at(i) {
                Some(h) => h,
                None => continue,
            };
            for j in 0..count {
                if i == j {
                    continue;
                }
                let b = match self.kinematics.handle_at(j) {
                    Some(h) => h,
                    None => continue,
                };
                if let Some((body_a, body_b)) = self.kinematics.pair_mut(a, b) {
                    if let Some(contact) = resolve::resolve_kinematic_pair(body_a, body_b) {
                        self.events.push(ContactEvent {
                            body: a,
                            other: ContactOther::Kinematic(b),
                            normal: contact.normal,
                            depth: contact.depth,
                        });
                    }
                }
            }
        }

        // 2. Integrate persistent velocity and the queued push.
        for (_, body) in self.kinematics.iter_mut() {
            let step = body.velocity + body.push;
            body.rect.translate(step);
        }

        // 3. Resolve against nearby statics. The window is taken from the
        // pre-resolution rect; the margin already covers any push-out.
        let margin = self.config.max_static_extent;
        for i in 0..count {
            let handle = match self.kinematics.handle_at(i) {
                Some(h) => h,
                None => continue,
            };
            let probe = match self.kinematics.get(handle) {
                Some(body) => body.rect,
                None => continue,
            };
            for (obstacle_handle, obstacle) in self.statics.query_window(&probe, margin) {
                let body = match self.kinematics.get_mut(handle) {
                    Some(body) => body,
                    None => break,
                };
                if let Some(contact) = resolve::resolve_kinematic_static(body, &obstacle.rect) {
                    self.events.push(ContactEvent {
                        body: handle,
                        other: ContactOther::Static(obstacle_handle),
                        normal: contact.normal,
                        depth: contact.depth,
                    });
                }
            }
        }

        // 4. End-of-step finalize.
        let retention = self.config.push_retention;
        for (_, body) in self.kinematics.iter_mut() {
            body.finalize_step(retention);
        }

        // 5. Refresh the overlay mirror. Statics are mirrored at
        // creation; their rects never change.
        if self.config.debug_mirror {
            self.mirror
                .set_kinematics(self.kinematics.iter().map(|(h, b)| (h, b.rect)));
        }
    }

    // ==================== Body access ====================

    /// Current rectangle of a static body
    pub fn static_rect(&self, handle: StaticBodyHandle) -> Result<Rect> {
        self.statics
            .get(handle)
            .map(|b| b.rect)
            .ok_or(PhysicsError::StaticBodyNotFound(handle))
    }

    /// Current rectangle of a kinematic body
    pub fn kinematic_rect(&self, handle: KinematicBodyHandle) -> Result<Rect> {
        self.kinematics
            .get(handle)
            .map(|b| b.rect)
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    /// Current velocity of a kinematic body
    pub fn velocity(&self, handle: KinematicBodyHandle) -> Result<Vec2> {
        self.kinematics
            .get(handle)
            .map(|b| b.velocity)
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    /// Set the velocity of a kinematic body, in units per tick
    pub fn set_velocity(&mut self, handle: KinematicBodyHandle, velocity: Vec2) -> Result<()> {
        self.kinematics
            .get_mut(handle)
            .map(|b| b.velocity = velocity)
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    /// Queue a push displacement for the current tick (river currents,
    /// knockback areas). Accumulates with pushes already queued and decays
    /// at end of step.
    pub fn apply_push(&mut self, handle: KinematicBodyHandle, push: Vec2) -> Result<()> {
        self.kinematics
            .get_mut(handle)
            .map(|b| b.apply_push(push))
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    /// Whether a push has been applied to the body this tick
    pub fn is_being_pushed(&self, handle: KinematicBodyHandle) -> Result<bool> {
        self.kinematics
            .get(handle)
            .map(|b| b.is_being_pushed())
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    /// Position the body had at the end of the previous tick
    pub fn position_last_tick(&self, handle: KinematicBodyHandle) -> Result<Vec2> {
        self.kinematics
            .get(handle)
            .map(|b| b.position_last_tick())
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    /// Mass of a kinematic body
    pub fn kinematic_mass(&self, handle: KinematicBodyHandle) -> Result<f32> {
        self.kinematics
            .get(handle)
            .map(|b| b.mass)
            .ok_or(PhysicsError::KinematicBodyNotFound(handle))
    }

    // ==================== Queries ====================

    /// Static bodies whose interiors overlap `rect`, found through the
    /// windowed broad phase.
    pub fn statics_overlapping(&self, rect: &Rect) -> Vec<StaticBodyHandle> {
        self.statics
            .query_window(rect, self.config.max_static_extent)
            .filter(|(_, body)| body.rect.overlaps(rect))
            .map(|(handle, _)| handle)
            .collect()
    }

    /// Contacts resolved during the most recent tick
    pub fn contacts(&self) -> &ContactEvents {
        &self.events
    }

    /// The debug overlay mirror. Empty unless enabled in the
    /// configuration.
    pub fn debug_mirror(&self) -> &DebugMirror {
        &self.mirror
    }

    // ==================== Counts ====================

    /// Number of static bodies
    pub fn static_body_count(&self) -> usize {
        self.statics.len()
    }

    /// Number of kinematic bodies
    pub fn kinematic_body_count(&self) -> usize {
        self.kinematics.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const TICK: f32 = 1.0 / 60.0;

    fn world() -> PhysicsWorld {
        PhysicsWorld::new(PhysicsConfig::default())
    }

    fn desc(rect: Rect) -> KinematicBodyDesc {
        KinematicBodyDesc::new(rect)
    }

    #[test]
    fn create_and_count() {
        let mut world = world();
        world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        world.create_kinematic_body(desc(Rect::new(64.0, 0.0, 16.0, 16.0)));

        assert_eq!(world.static_body_count(), 1);
        assert_eq!(world.kinematic_body_count(), 1);
    }

    #[test]
    fn scenario_static_pushout() {
        let mut world = world();
        let wall = world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(desc(Rect::new(16.0, 0.0, 32.0, 32.0)));

        world.update(TICK);

        let rect = world.kinematic_rect(body).unwrap();
        assert_relative_eq!(rect.left, 32.0);
        assert_eq!(world.velocity(body).unwrap().x, 0.0);

        // The wall itself must be bit-identical.
        assert_eq!(
            world.static_rect(wall).unwrap(),
            Rect::new(0.0, 0.0, 32.0, 32.0)
        );
        assert!(!rect.overlaps(&world.static_rect(wall).unwrap()));
    }

    #[test]
    fn scenario_equal_mass_separation() {
        let mut world = world();
        let a = world.create_kinematic_body(desc(Rect::new(0.0, 0.0, 20.0, 20.0)));
        let b = world.create_kinematic_body(desc(Rect::new(10.0, 0.0, 20.0, 20.0)));

        world.update(TICK);

        let ra = world.kinematic_rect(a).unwrap();
        let rb = world.kinematic_rect(b).unwrap();
        assert_relative_eq!(ra.left, -5.0);
        assert_relative_eq!(rb.left, 15.0);
        assert!(!ra.overlaps(&rb));

        // Separation is symmetric about the original midpoint.
        assert_relative_eq!((ra.left + ra.right() + rb.left + rb.right()) * 0.25, 15.0);
    }

    #[test]
    fn scenario_distant_static_never_resolves() {
        let mut world = world();
        world.create_static_body(Rect::new(1000.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(desc(Rect::new(0.0, 0.0, 24.0, 24.0)));

        world.update(TICK);

        assert!(world.contacts().is_empty());
        assert_eq!(
            world.kinematic_rect(body).unwrap(),
            Rect::new(0.0, 0.0, 24.0, 24.0)
        );
        assert!(world
            .statics_overlapping(&Rect::new(0.0, 0.0, 24.0, 24.0))
            .is_empty());
    }

    #[test]
    fn statics_stay_bit_identical_under_pressure() {
        let mut world = world();
        let wall = world.create_static_body(Rect::new(64.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(
            desc(Rect::new(0.0, 0.0, 24.0, 24.0)).with_velocity(Vec2::new(3.0, 0.0)),
        );

        for _ in 0..120 {
            world.set_velocity(body, Vec2::new(3.0, 0.0)).unwrap();
            world.update(TICK);
        }

        assert_eq!(
            world.static_rect(wall).unwrap(),
            Rect::new(64.0, 0.0, 32.0, 32.0)
        );
        // The body came to rest against the wall, not inside it.
        let rect = world.kinematic_rect(body).unwrap();
        assert!(!rect.overlaps(&world.static_rect(wall).unwrap()));
        assert_relative_eq!(rect.right(), 64.0);
    }

    #[test]
    fn quiescent_update_is_identity() {
        let mut world = world();
        let wall = world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(desc(Rect::new(64.0, 64.0, 16.0, 16.0)));

        for dt in [0.0, TICK, 0.1, 1.0] {
            world.update(dt);
        }

        assert_eq!(
            world.static_rect(wall).unwrap(),
            Rect::new(0.0, 0.0, 32.0, 32.0)
        );
        assert_eq!(
            world.kinematic_rect(body).unwrap(),
            Rect::new(64.0, 64.0, 16.0, 16.0)
        );
    }

    #[test]
    fn clear_is_total() {
        let mut world = PhysicsWorld::new(PhysicsConfig::default().with_debug_mirror(true));
        let wall = world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(desc(Rect::new(16.0, 0.0, 32.0, 32.0)));

        world.clear();

        assert_eq!(world.static_body_count(), 0);
        assert_eq!(world.kinematic_body_count(), 0);
        assert!(world.debug_mirror().is_empty());
        assert!(world.static_rect(wall).is_err());
        assert!(world.kinematic_rect(body).is_err());

        world.update(TICK);
        assert!(world.contacts().is_empty());
        assert_eq!(world.kinematic_body_count(), 0);
    }

    #[test]
    fn unknown_handle_removal_is_absorbed() {
        let mut world = world();
        let body = world.create_kinematic_body(desc(Rect::new(0.0, 0.0, 16.0, 16.0)));

        world.remove_kinematic_body(body);
        world.remove_kinematic_body(body);

        assert_eq!(world.kinematic_body_count(), 0);
        assert!(matches!(
            world.velocity(body),
            Err(PhysicsError::KinematicBodyNotFound(_))
        ));
    }

    #[test]
    fn stale_static_handle_reports_error() {
        let mut world = world();
        let wall = world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        world.remove_static_body(wall);

        assert!(matches!(
            world.static_rect(wall),
            Err(PhysicsError::StaticBodyNotFound(_))
        ));
        world.remove_static_body(wall);
        assert_eq!(world.static_body_count(), 0);
    }

    #[test]
    fn accumulator_runs_whole_ticks_only() {
        let mut world = world();
        let body = world.create_kinematic_body(
            desc(Rect::new(0.0, 0.0, 16.0, 16.0)).with_velocity(Vec2::new(1.0, 0.0)),
        );

        world.update(TICK * 0.5);
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, 0.0);

        world.update(TICK * 0.5);
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, 1.0);
    }

    #[test]
    fn accumulator_is_bounded_by_max_substeps() {
        let mut world = world();
        let body = world.create_kinematic_body(
            desc(Rect::new(0.0, 0.0, 16.0, 16.0)).with_velocity(Vec2::new(1.0, 0.0)),
        );

        world.update(1.0);

        let max = PhysicsConfig::default().max_substeps as f32;
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, max);
    }

    #[test]
    fn contact_events_describe_the_last_tick() {
        let mut world = world();
        world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(desc(Rect::new(16.0, 0.0, 32.0, 32.0)));

        world.update(TICK);

        let contacts: Vec<_> = world.contacts().static_contacts().collect();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].body, body);
        assert_eq!(contacts[0].normal, Vec2::new(1.0, 0.0));
        assert_relative_eq!(contacts[0].depth, 16.0);

        // Once separated, the next tick reports nothing.
        world.update(TICK);
        assert!(world.contacts().is_empty());
    }

    #[test]
    fn push_is_integrated_then_decayed() {
        let mut world = world();
        let body = world.create_kinematic_body(desc(Rect::new(0.0, 0.0, 16.0, 16.0)));

        world.apply_push(body, Vec2::new(5.0, 0.0)).unwrap();
        assert!(world.is_being_pushed(body).unwrap());

        world.update(TICK);
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, 5.0);
        assert!(!world.is_being_pushed(body).unwrap());
        assert_eq!(world.position_last_tick(body).unwrap(), Vec2::new(5.0, 0.0));

        // Default retention clears the push entirely.
        world.update(TICK);
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, 5.0);
    }

    #[test]
    fn push_retention_tapers_over_ticks() {
        let mut world =
            PhysicsWorld::new(PhysicsConfig::default().with_push_retention(0.5));
        let body = world.create_kinematic_body(desc(Rect::new(0.0, 0.0, 16.0, 16.0)));

        world.apply_push(body, Vec2::new(4.0, 0.0)).unwrap();
        world.update(TICK);
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, 4.0);

        world.update(TICK);
        assert_relative_eq!(world.kinematic_rect(body).unwrap().left, 6.0);
    }

    #[test]
    fn identical_scenes_evolve_identically() {
        let build = || {
            let mut world = world();
            for i in 0..6 {
                world.create_static_body(Rect::new(i as f32 * 32.0, 96.0, 32.0, 32.0));
            }
            let a = world.create_kinematic_body(
                desc(Rect::new(10.0, 0.0, 20.0, 20.0)).with_velocity(Vec2::new(0.4, 2.0)),
            );
            let b = world.create_kinematic_body(
                desc(Rect::new(24.0, 8.0, 20.0, 20.0)).with_velocity(Vec2::new(-0.3, 2.0)),
            );
            (world, a, b)
        };

        let (mut w1, a1, b1) = build();
        let (mut w2, a2, b2) = build();
        for _ in 0..120 {
            w1.update(TICK);
            w2.update(TICK);
        }

        assert_eq!(
            w1.kinematic_rect(a1).unwrap(),
            w2.kinematic_rect(a2).unwrap()
        );
        assert_eq!(
            w1.kinematic_rect(b1).unwrap(),
            w2.kinematic_rect(b2).unwrap()
        );
    }

    #[test]
    fn debug_mirror_follows_bodies() {
        let mut world = PhysicsWorld::new(PhysicsConfig::default().with_debug_mirror(true));
        let wall = world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        let body = world.create_kinematic_body(
            desc(Rect::new(64.0, 0.0, 16.0, 16.0)).with_velocity(Vec2::new(1.0, 0.0)),
        );

        assert_eq!(world.debug_mirror().static_rects().len(), 1);
        assert_eq!(world.debug_mirror().kinematic_rects().len(), 1);

        world.update(TICK);
        let (mirrored, rect) = world.debug_mirror().kinematic_rects()[0];
        assert_eq!(mirrored, body);
        assert_relative_eq!(rect.left, 65.0);

        world.remove_static_body(wall);
        assert!(world.debug_mirror().static_rects().is_empty());
    }

    #[test]
    fn disabled_mirror_stays_empty() {
        let mut world = world();
        world.create_static_body(Rect::new(0.0, 0.0, 32.0, 32.0));
        world.create_kinematic_body(desc(Rect::new(64.0, 0.0, 16.0, 16.0)));
        world.update(TICK);

        assert!(world.debug_mirror().is_empty());
    }

    #[test]
    #[should_panic(expected = "positive mass")]
    fn zero_mass_kinematic_is_rejected() {
        let mut world = world();
        world.create_kinematic_body(
            KinematicBodyDesc::new(Rect::new(0.0, 0.0, 16.0, 16.0)).with_mass(0.0),
        );
    }
}
