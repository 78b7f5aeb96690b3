//! Node allocation abstraction for [`LockFreeList`](crate::LockFreeList).
//!
//! This module provides the [`NodeAllocator`] trait that abstracts how nodes
//! are allocated and released. The list only ever consumes the allocation
//! half during operation; `dealloc` is called exclusively from `Drop`
//! teardown, where `&mut` access proves no other thread can hold a node.
//!
//! A concurrent reclamation scheme (epoch-based, hazard pointers) would plug
//! in at the `dealloc` seam. None ships here: the list has no removal
//! operation, so nodes are live until the list itself goes away.

use parking_lot::Mutex;

use crate::node::Node;

/// Trait for allocating and releasing list nodes.
///
/// Implementations must guarantee:
///
/// 1. **Pointer stability**: returned pointers remain valid until `dealloc`
///    is called or the allocator is dropped.
///
/// 2. **Concurrent allocation**: `alloc` takes `&self` and must be safe to
///    call from many threads at once; every insertion path allocates.
///
/// # Safety
///
/// Implementors must ensure that pointers returned by `alloc` stay valid and
/// never move while the allocator is alive. The list publishes these raw
/// pointers to other threads and dereferences them without further checks.
pub trait NodeAllocator<T> {
    /// Allocate a node and return a stable raw pointer.
    ///
    /// The returned pointer is valid for reads (and for atomic writes to the
    /// node's `next` field) until `dealloc` is called with it or the
    /// allocator is dropped.
    fn alloc(&self, node: Box<Node<T>>) -> *mut Node<T>;

    /// Release a node.
    ///
    /// For arena-style allocators this is a no-op (nodes are freed when the
    /// arena drops). For the heap allocator it returns the node to the heap.
    ///
    /// # Safety
    ///
    /// The pointer must have come from `alloc` on this allocator, must not
    /// have been released already, and no thread may still hold a reference
    /// into the node. The list upholds this by calling `dealloc` only from
    /// `Drop`.
    #[allow(unused_variables)]
    unsafe fn dealloc(&self, ptr: *mut Node<T>) {
        // Default: no-op for arena-style allocators
    }
}

/// Plain heap allocator; the default.
///
/// Every node is an individual heap allocation, released one by one at list
/// teardown. Allocation failure propagates whatever the global allocator
/// does; this crate never retries.
#[derive(Debug, Default, Clone, Copy)]
pub struct HeapAllocator;

impl<T> NodeAllocator<T> for HeapAllocator {
    fn alloc(&self, node: Box<Node<T>>) -> *mut Node<T> {
        Box::into_raw(node)
    }

    unsafe fn dealloc(&self, ptr: *mut Node<T>) {
        // SAFETY: ptr came from Box::into_raw in alloc, and the caller
        // guarantees exclusivity and no double release.
        unsafe { drop(Box::from_raw(ptr)) };
    }
}

/// Arena-based node allocator.
///
/// Nodes are stored in a `Vec<Box<Node<T>>>` behind a mutex. The `Box`
/// provides a stable heap address for the node contents; when the `Vec`
/// reallocates, only the box pointers (8 bytes each) move. All nodes are
/// freed together when the arena drops, so list teardown is a no-op walk.
///
/// The mutex only guards the arena bookkeeping. List operations stay
/// lock-free with respect to each other; contended `alloc` calls serialize
/// briefly on the arena push.
#[derive(Debug, Default)]
pub struct ArenaAllocator<T> {
    arena: Mutex<Vec<Box<Node<T>>>>,
}

impl<T> ArenaAllocator<T> {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            arena: Mutex::new(Vec::new()),
        }
    }

    /// Create an arena with pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Number of nodes the arena currently owns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.arena.lock().len()
    }

    /// Whether the arena owns no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.arena.lock().is_empty()
    }
}

impl<T> NodeAllocator<T> for ArenaAllocator<T> {
    fn alloc(&self, node: Box<Node<T>>) -> *mut Node<T> {
        let mut arena = self.arena.lock();
        arena.push(node);
        let idx: usize = arena.len() - 1;

        // SAFETY: we just pushed, so idx is valid. The pointer is derived
        // after storing to keep Stacked Borrows provenance, and the Box
        // gives a stable heap address even if the Vec reallocates.
        unsafe { std::ptr::from_mut::<Node<T>>(arena.get_unchecked_mut(idx).as_mut()) }
    }

    // dealloc uses the default no-op implementation
}

// ============================================================================
//  Tests
// ============================================================================
