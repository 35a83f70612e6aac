//! # ember_core - Ember Engine Core
//!
//! Zero-dependency primitives shared by the engine crates. The main export
//! is the generational slot map used wherever the engine hands out stable
//! handles to data it owns: a handle stays `Copy` and cheap, and a
//! dereference after removal is detected instead of aliasing whatever
//! reused the slot.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

pub mod slot;

pub use slot::*;

pub mod prelude {
    pub use crate::slot::{Handle, SlotMap};
}
