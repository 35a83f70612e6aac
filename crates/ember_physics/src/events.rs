//! Per-tick contact reporting

use ember_math::Vec2;

use crate::body::{KinematicBodyHandle, StaticBodyHandle};

/// What a kinematic body was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOther {
    /// An immovable body from the static index
    Static(StaticBodyHandle),
    /// Another movable body
    Kinematic(KinematicBodyHandle),
}

/// One resolved overlap from the most recent tick.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    /// The kinematic body the resolver moved (the first of a pair).
    pub body: KinematicBodyHandle,
    /// What it was separated from.
    pub other: ContactOther,
    /// Unit normal along the resolution axis, pointing the way `body`
    /// moved.
    pub normal: Vec2,
    /// Penetration depth that was removed.
    pub depth: f32,
}

impl ContactEvent {
    /// Whether the contact was against an immovable body.
    pub fn is_static(&self) -> bool {
        matches!(self.other, ContactOther::Static(_))
    }
}

/// Buffer of the most recent tick's contacts.
///
/// Cleared at the start of every tick, so between updates it describes
/// exactly what the last tick resolved. Gameplay reads it for landing
/// sounds, touch damage and the like.
#[derive(Debug, Default)]
pub struct ContactEvents {
    events: Vec<ContactEvent>,
}

impl ContactEvents {
    pub(crate) fn clear(&mut self) {
        self.events.clear();
    }

    pub(crate) fn push(&mut self, event: ContactEvent) {
        self.events.push(event);
    }

    /// All contacts, in resolution order.
    pub fn iter(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.iter()
    }

    /// Contacts against static bodies.
    pub fn static_contacts(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.iter().filter(|e| e.is_static())
    }

    /// Contacts between kinematic pairs.
    pub fn kinematic_contacts(&self) -> impl Iterator<Item = &ContactEvent> {
        self.events.iter().filter(|e| !e.is_static())
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
