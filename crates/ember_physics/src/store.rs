//! Flat store of movable bodies

use ember_core::SlotMap;

use crate::body::{CollisionBody, KinematicBodyHandle};

/// All movable bodies, iterated in insertion order.
///
/// The population is small (player, enemies, projectiles), so the
/// orchestration loop scans it exhaustively; no spatial ordering is kept.
/// Insertion order is what makes resolution order, and therefore outcomes,
/// reproducible for identical creation sequences.
#[derive(Default)]
pub struct KinematicBodyStore {
    bodies: SlotMap<CollisionBody>,
    order: Vec<KinematicBodyHandle>,
}

impl KinematicBodyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, body: CollisionBody) -> KinematicBodyHandle {
        let handle = KinematicBodyHandle(self.bodies.insert(body));
        self.order.push(handle);
        handle
    }

    /// Remove a body. Returns `None` when the handle is unknown or stale.
    pub fn remove(&mut self, handle: KinematicBodyHandle) -> Option<CollisionBody> {
        let body = self.bodies.remove(handle.0)?;
        self.order.retain(|&h| h != handle);
        Some(body)
    }

    pub fn get(&self, handle: KinematicBodyHandle) -> Option<&CollisionBody> {
        self.bodies.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: KinematicBodyHandle) -> Option<&mut CollisionBody> {
        self.bodies.get_mut(handle.0)
    }

    pub fn contains(&self, handle: KinematicBodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    /// Mutable access to two distinct bodies at once, for pairwise
    /// resolution.
    pub fn pair_mut(
        &mut self,
        a: KinematicBodyHandle,
        b: KinematicBodyHandle,
    ) -> Option<(&mut CollisionBody, &mut CollisionBody)> {
        self.bodies.pair_mut(a.0, b.0)
    }

    /// Handle at position `i` of the insertion order.
    ///
    /// Lets the orchestration loop walk the store by index without holding
    /// a borrow across the mutations it performs.
    pub fn handle_at(&self, i: usize) -> Option<KinematicBodyHandle> {
        self.order.get(i).copied()
    }

    /// Bodies in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (KinematicBodyHandle, &CollisionBody)> {
        self.order
            .iter()
            .filter_map(move |&h| self.bodies.get(h.0).map(|b| (h, b)))
    }

    /// Bodies in slot order, mutably. Only for per-body passes whose
    /// outcome does not depend on visit order (integration, finalize).
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (KinematicBodyHandle, &mut CollisionBody)> {
        let bodies = &mut self.bodies;
        bodies.iter_mut().map(|(h, b)| (KinematicBodyHandle(h), b))
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Drop every body and invalidate every outstanding handle.
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.order.clear();
    }
}
