#[cfg(feature = "loom")]
mod imp {
    use crate::{graph::Graph, types::NodeId};
    pub(crate) use loom::{
        cell::UnsafeCell,
        sync::Mutex,
        sync::atomic::{AtomicBool, AtomicU32, Ordering},
        thread,
    };
    pub(crate) use std::sync::Arc;

    pub(crate) type GraphRef<'a> = Arc<Graph>;
    pub(crate) type OrderSink<'a> = Arc<Mutex<Vec<NodeId>>>;
    pub(crate) type FrontierSink<'a> = Arc<Mutex<Vec<u32>>>;
    pub(crate) type FaultSlot<'a> = Arc<AtomicU32>;

    pub(crate) fn join(lhs: impl FnOnce() + Send + 'static, rhs: impl FnOnce() + Send + 'static) {
        let lhs = thread::spawn(lhs);
        let rhs = thread::spawn(rhs);
        lhs.join().unwrap();
        rhs.join().unwrap();
    }
}

#[cfg(not(feature = "loom"))]
mod imp {
    use crate::{
        graph::Graph,
        types::{NodeId, SyncUnsafeCell},
    };
    pub(crate) use core::{
        cell::UnsafeCell,
        sync::atomic::{AtomicBool, AtomicU32, Ordering},
    };
    pub(crate) use std::sync::Mutex;

    pub(crate) type GraphRef<'a> = &'a Graph;
    pub(crate) type OrderSink<'a> = &'a Mutex<Vec<NodeId>>;
    pub(crate) type FrontierSink<'a> = &'a Mutex<Vec<u32>>;
    pub(crate) type FaultSlot<'a> = &'a AtomicU32;

    pub(crate) fn join(lhs: impl FnOnce() + Send, rhs: impl FnOnce() + Send) {
        rayon::join(lhs, rhs);
    }

    pub(crate) trait LoomPtrCompat: Sized {
        type Ptr;
        fn with<R>(self, f: impl FnOnce(Self::Ptr) -> R) -> R;
    }

    impl<T> LoomPtrCompat for *const T {
        type Ptr = *const T;
        fn with<R>(self, f: impl FnOnce(Self::Ptr) -> R) -> R {
            f(self)
        }
    }

    impl<T> LoomPtrCompat for *mut T {
        type Ptr = *mut T;
        fn with<R>(self, f: impl FnOnce(Self::Ptr) -> R) -> R {
            f(self)
        }
    }

    pub(crate) trait LoomUnsafeCellCompat<T> {
        fn get_mut(&self) -> impl LoomPtrCompat<Ptr = *mut T>;
    }

    impl<T> LoomUnsafeCellCompat<T> for SyncUnsafeCell<T> {
        fn get_mut(&self) -> impl LoomPtrCompat<Ptr = *mut T> {
            self.get()
        }
    }
}

pub(crate) use imp::*;
