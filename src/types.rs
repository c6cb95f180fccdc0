use crate::sync::UnsafeCell;
use core::num::NonZeroU32;
use derive_more::{Deref, DerefMut};

/// Unique identifier of a node in the graph.
///
/// Ids are positive, 1-based and assigned in creation order, so `id.get() - 1`
/// is the node's index into the graph arena.
pub type NodeId = NonZeroU32;

/// A minimal `UnsafeCell` wrapper that is `Sync` when `T: Sync`.
///
/// Used internally to give round tasks interior mutability over their own
/// node's adjacency list while correctness is ensured by scheduling (each
/// node is owned by exactly one task of exactly one round).
#[derive(Debug, Deref, DerefMut)]
#[repr(transparent)]
pub(crate) struct SyncUnsafeCell<T>(UnsafeCell<T>);

unsafe impl<T: Sync> Sync for SyncUnsafeCell<T> {}

impl<T> SyncUnsafeCell<T> {
    pub(crate) fn new(val: T) -> Self {
        Self(UnsafeCell::new(val))
    }
}
