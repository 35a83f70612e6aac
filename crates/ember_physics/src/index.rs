//! Position-ordered index of immovable bodies

use core::cmp::Ordering;

use ember_core::SlotMap;
use ember_math::Rect;

use crate::body::{CollisionBody, StaticBodyHandle};

/// One entry of the order array. Carries the sort key so lookups never
/// have to chase the slot map while searching.
#[derive(Debug, Clone, Copy)]
struct OrderEntry {
    left: f32,
    top: f32,
    handle: StaticBodyHandle,
}

impl OrderEntry {
    /// Total order: `(left, top)` ascending, slot index as the final
    /// tiebreaker so even bit-identical rectangles compare unequal.
    fn cmp_key(&self, other: &OrderEntry) -> Ordering {
        self.left
            .total_cmp(&other.left)
            .then_with(|| self.top.total_cmp(&other.top))
            .then_with(|| self.handle.0.index().cmp(&other.handle.0.index()))
    }
}

/// All immovable bodies, held in a slot map with a parallel array sorted by
/// `(left, top)`.
///
/// Static rectangles never change after insertion, which is what keeps the
/// order valid without re-sorting. Because the order is total on `left`,
/// every candidate that could overlap a probe rectangle sits in one
/// contiguous run of the array, so the broad phase is a lower-bound seek
/// plus a bounded forward scan instead of a full sweep.
#[derive(Default)]
pub struct StaticBodyIndex {
    bodies: SlotMap<CollisionBody>,
    order: Vec<OrderEntry>,
}

impl StaticBodyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an immovable body, keeping the order array sorted.
    pub fn insert(&mut self, body: CollisionBody) -> StaticBodyHandle {
        let rect = body.rect;
        let handle = StaticBodyHandle(self.bodies.insert(body));
        let entry = OrderEntry {
            left: rect.left,
            top: rect.top,
            handle,
        };
        let at = self
            .order
            .partition_point(|e| e.cmp_key(&entry) == Ordering::Less);
        self.order.insert(at, entry);
        handle
    }

    /// Remove a body. Returns `None` when the handle is unknown or stale.
    pub fn remove(&mut self, handle: StaticBodyHandle) -> Option<CollisionBody> {
        let body = self.bodies.remove(handle.0)?;
        let entry = OrderEntry {
            left: body.rect.left,
            top: body.rect.top,
            handle,
        };
        if let Ok(at) = self.order.binary_search_by(|e| e.cmp_key(&entry)) {
            self.order.remove(at);
        }
        Some(body)
    }

    pub fn get(&self, handle: StaticBodyHandle) -> Option<&CollisionBody> {
        self.bodies.get(handle.0)
    }

    pub fn contains(&self, handle: StaticBodyHandle) -> bool {
        self.bodies.contains(handle.0)
    }

    /// Candidate bodies whose `left` lies within
    /// `[probe.left - margin, probe.right() + margin]`, in index order.
    ///
    /// Complete as long as no static body is wider or taller than `margin`;
    /// that bound on map content is a documented precondition, not checked
    /// here.
    pub fn query_window<'a>(
        &'a self,
        probe: &Rect,
        margin: f32,
    ) -> impl Iterator<Item = (StaticBodyHandle, &'a CollisionBody)> + 'a {
        let lo = probe.left - margin;
        let hi = probe.right() + margin;
        let start = self.order.partition_point(|e| e.left < lo);
        self.order[start..]
            .iter()
            .take_while(move |e| e.left <= hi)
            .filter_map(move |e| self.bodies.get(e.handle.0).map(|b| (e.handle, b)))
    }

    /// All bodies in index order.
    pub fn iter(&self) -> impl Iterator<Item = (StaticBodyHandle, &CollisionBody)> {
        self.order
            .iter()
            .filter_map(move |e| self.bodies.get(e.handle.0).map(|b| (e.handle, b)))
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
