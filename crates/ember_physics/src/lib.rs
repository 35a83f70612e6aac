//! Ember Physics - Axis-Aligned 2D Collision Engine
//!
//! This crate tracks every collidable rectangle in the world, detects
//! overlaps each simulation tick, and resolves them by adjusting position
//! and velocity so bodies never interpenetrate.
//!
//! # Features
//!
//! - Immovable bodies in a position-ordered index (windowed broad phase)
//! - Movable bodies with per-tick velocity and transient push vectors
//! - Deterministic, fixed-order resolution within a fixed-timestep tick
//! - Generation-checked handles: use-after-remove is a reported error
//! - Per-tick contact events and an optional debug overlay mirror
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────┐
//! │                  PhysicsWorld                     │
//! │  ┌────────────────┐  ┌─────────────────────────┐  │
//! │  │ StaticBodyIndex│  │   KinematicBodyStore    │  │
//! │  │ (sorted by     │  │   (insertion order,     │  │
//! │  │  left, top)    │  │    exhaustive pairs)    │  │
//! │  └────────────────┘  └─────────────────────────┘  │
//! │  ┌─────────────────────────────────────────────┐  │
//! │  │       five-step tick pipeline               │  │
//! │  │  (pairs, integrate, statics, finalize,      │  │
//! │  │   mirror refresh)                           │  │
//! │  └─────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────┘
//!              │                    │
//!              ▼                    ▼
//!       ┌─────────────┐     ┌──────────────┐
//!       │ContactEvents│     │ DebugMirror  │
//!       │ (gameplay)  │     │  (overlay)   │
//!       └─────────────┘     └──────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use ember_math::{Rect, Vec2};
//! use ember_physics::prelude::*;
//!
//! let mut world = PhysicsWorld::new(PhysicsConfig::default());
//!
//! // A wall tile and a body dropping onto it.
//! let _wall = world.create_static_body(Rect::new(0.0, 64.0, 32.0, 32.0));
//! let body = world.create_kinematic_body(
//!     KinematicBodyDesc::new(Rect::new(0.0, 0.0, 24.0, 24.0))
//!         .with_velocity(Vec2::new(0.0, 3.0)),
//! );
//!
//! // Run a second of simulation.
//! for _ in 0..60 {
//!     world.update(1.0 / 60.0);
//! }
//!
//! // The body rests on the wall instead of sinking through it.
//! assert_eq!(world.kinematic_rect(body).unwrap().bottom(), 64.0);
//! ```

pub mod body;
pub mod config;
pub mod debug;
pub mod error;
pub mod events;
pub mod index;
pub mod resolve;
pub mod store;
pub mod world;

pub mod prelude {
    //! Common imports for physics functionality
    pub use crate::body::{CollisionBody, KinematicBodyDesc, KinematicBodyHandle, StaticBodyHandle};
    pub use crate::config::PhysicsConfig;
    pub use crate::debug::DebugMirror;
    pub use crate::error::{PhysicsError, Result};
    pub use crate::events::{ContactEvent, ContactEvents, ContactOther};
    pub use crate::resolve::{Axis, Contact};
    pub use crate::world::PhysicsWorld;
}

pub use prelude::*;
