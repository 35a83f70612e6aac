//! Debug overlay mirror

use ember_math::Rect;

use crate::body::{KinematicBodyHandle, StaticBodyHandle};

/// Read-only mirror of every tracked rectangle, for overlay rendering.
///
/// Static entries are maintained when bodies are created and removed;
/// kinematic entries are refreshed at the end of every tick. The
/// visualizer consuming this never mutates engine state, and the mirror
/// stays empty when `debug_mirror` is off in the world's configuration.
#[derive(Debug, Default)]
pub struct DebugMirror {
    statics: Vec<(StaticBodyHandle, Rect)>,
    kinematics: Vec<(KinematicBodyHandle, Rect)>,
}

impl DebugMirror {
    pub(crate) fn add_static(&mut self, handle: StaticBodyHandle, rect: Rect) {
        self.statics.push((handle, rect));
    }

    pub(crate) fn remove_static(&mut self, handle: StaticBodyHandle) {
        self.statics.retain(|&(h, _)| h != handle);
    }

    pub(crate) fn add_kinematic(&mut self, handle: KinematicBodyHandle, rect: Rect) {
        self.kinematics.push((handle, rect));
    }

    pub(crate) fn remove_kinematic(&mut self, handle: KinematicBodyHandle) {
        self.kinematics.retain(|&(h, _)| h != handle);
    }

    pub(crate) fn set_kinematics(
        &mut self,
        entries: impl Iterator<Item = (KinematicBodyHandle, Rect)>,
    ) {
        self.kinematics.clear();
        self.kinematics.extend(entries);
    }

    pub(crate) fn clear(&mut self) {
        self.statics.clear();
        self.kinematics.clear();
    }

    /// Mirrored static rectangles.
    pub fn static_rects(&self) -> &[(StaticBodyHandle, Rect)] {
        &self.statics
    }

    /// Mirrored kinematic rectangles, as of the last tick.
    pub fn kinematic_rects(&self) -> &[(KinematicBodyHandle, Rect)] {
        &self.kinematics
    }

    pub fn is_empty(&self) -> bool {
        self.statics.is_empty() && self.kinematics.is_empty()
    }
}
