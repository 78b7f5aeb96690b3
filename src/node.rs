//! List node: payload plus atomic forward link.
//!
//! A [`Node`] is created unlinked, published into the list by exactly one
//! successful CAS, and from then on mutated only through its `next` pointer.
//! The payload is immutable after construction; concurrent reads of it are
//! safe because no write path exists.

use std::sync::atomic::{AtomicPtr, Ordering};

use crate::ordering::{CAS_FAILURE, CAS_SUCCESS};

/// A single list node.
///
/// The node does not know which allocator produced it; the list releases
/// nodes through the same [`NodeAllocator`](crate::alloc::NodeAllocator)
/// that allocated them.
#[derive(Debug)]
pub struct Node<T> {
    /// The payload. Immutable after construction.
    value: T,

    /// Forward link. Null terminates the chain.
    next: AtomicPtr<Node<T>>,
}

impl<T> Node<T> {
    /// Create an unlinked node holding `value`.
    pub fn new(value: T) -> Self {
        Self {
            value,
            next: AtomicPtr::new(std::ptr::null_mut()),
        }
    }

    /// Create an unlinked node on the heap, ready for a
    /// [`NodeAllocator`](crate::alloc::NodeAllocator).
    pub fn boxed(value: T) -> Box<Self> {
        Box::new(Self::new(value))
    }

    /// Borrow the payload.
    #[inline]
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Load the forward link.
    #[inline]
    pub(crate) fn load_next(&self, order: Ordering) -> *mut Self {
        self.next.load(order)
    }

    /// Store the forward link.
    ///
    /// Callers must only use this on a node they have not yet published.
    #[inline]
    pub(crate) fn store_next(&self, ptr: *mut Self, order: Ordering) {
        self.next.store(ptr, order);
    }

    /// Attempt to swing the forward link from `expected` to `new`.
    ///
    /// Uses `compare_exchange_weak`: a spurious failure just takes the same
    /// retry path as a genuine conflict. On failure the currently stored
    /// pointer is returned with Acquire semantics, ready to be re-used as
    /// the retry's expected value.
    #[inline]
    pub(crate) fn cas_next(
        &self,
        expected: *mut Self,
        new: *mut Self,
    ) -> Result<*mut Self, *mut Self> {
        self.next
            .compare_exchange_weak(expected, new, CAS_SUCCESS, CAS_FAILURE)
    }
}
