//! `LockFreeList` - concurrent, singly-linked, lock-free push list.
//!
//! All concurrency logic lives here: the two CAS retry loops
//! ([`push_front`](LockFreeList::push_front) on `head`,
//! [`push_after`](LockFreeList::push_after) on an anchor's `next`) and the
//! ownership contract for published nodes.
//!
//! # Ownership contract
//!
//! The list exclusively owns every node reachable from `head` once linked.
//! A published node is never mutated except through its `next` pointer,
//! never relocated, and never freed while the list is alive. There is no
//! removal operation and no concurrent reclamation; all nodes are released
//! in `Drop`, whose `&mut self` receiver proves no operation is in flight.

use std::fmt;
use std::sync::atomic::AtomicPtr;

use crate::alloc::{HeapAllocator, NodeAllocator};
use crate::iter::{Cursor, Iter};
use crate::node::Node;
use crate::ordering::{CAS_FAILURE, CAS_SUCCESS, INIT_ORD, READ_ORD, TEARDOWN_ORD};
use crate::tracing_helpers::{debug_log, trace_log};


#[cfg(loom)]
mod loom_tests;

/// A concurrent, singly-linked, lock-free push list.
///
/// Many threads may insert through a shared reference without external
/// locking; readers traverse without blocking writers. Insertion is
/// lock-free: a CAS retry loop with no bound on retries, but at least one
/// contending thread succeeds per round. The loops are plain backoff-free
/// spins.
///
/// # Caller obligations
///
/// - The payload is treated as read-only shared state once published.
///   Mutating it through interior mutability from several threads is outside
///   the contract of [`push_after`]'s unsynchronized comparisons.
/// - Nodes are never freed while the list exists. Under continuous use this
///   is an acknowledged resource growth; a reclamation scheme layered on the
///   [`NodeAllocator::dealloc`] seam is required for unbounded production
///   workloads.
///
/// [`push_after`]: LockFreeList::push_after
pub struct LockFreeList<T, A: NodeAllocator<T> = HeapAllocator> {
    /// Entry point of the chain; null when empty.
    head: AtomicPtr<Node<T>>,

    /// Allocation collaborator. Only the allocation half is used during
    /// operation; `dealloc` runs solely in `Drop`.
    allocator: A,
}

impl<T> LockFreeList<T> {
    /// Create an empty list using the default heap allocator.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_allocator(HeapAllocator)
    }
}

impl<T, A: NodeAllocator<T>> LockFreeList<T, A> {
    /// Create an empty list that allocates through `allocator`.
    #[must_use]
    pub const fn with_allocator(allocator: A) -> Self {
        Self {
            head: AtomicPtr::new(std::ptr::null_mut()),
            allocator,
        }
    }

    /// Insert `value` as the new logical head.
    ///
    /// Allocates one node, links it to the observed head, and publishes it
    /// with a Release CAS. On contention the node's `next` is re-linked to
    /// the freshly observed head and the CAS retried; the winning CAS is the
    /// linearization point. Always succeeds.
    pub fn push_front(&self, value: T) {
        let node: *mut Node<T> = self.allocator.alloc(Node::boxed(value));

        // SAFETY: alloc returns a valid, stable pointer; the node is ours
        // alone until the CAS below publishes it.
        let node_ref: &Node<T> = unsafe { &*node };

        let mut observed: *mut Node<T> = self.head.load(READ_ORD);
        loop {
            node_ref.store_next(observed, INIT_ORD);

            match self
                .head
                .compare_exchange_weak(observed, node, CAS_SUCCESS, CAS_FAILURE)
            {
                Ok(_) => {
                    debug_log!(node = ?node, "push_front published");
                    return;
                }
                Err(actual) => {
                    trace_log!(expected = ?observed, actual = ?actual, "push_front retry");
                    observed = actual;
                }
            }
        }
    }

    /// Insert `value` immediately after the first node (in head-to-tail
    /// order) whose payload equals `anchor`.
    ///
    /// Returns `false` without allocating or mutating anything when no node
    /// matches - a normal outcome, not a fault. Ties among duplicate values
    /// are broken by list order.
    ///
    /// The traversal and the linking CAS are not atomic as a whole: between
    /// locating the anchor and publishing, another insert may land at the
    /// same anchor. The CAS loop retries against the anchor's latest `next`,
    /// so the node still ends up immediately after the anchor, but the order
    /// among concurrent inserts at one anchor is last-CAS-wins, not request
    /// order.
    pub fn push_after(&self, anchor: &T, value: T) -> bool
    where
        T: PartialEq,
    {
        let mut curr: *mut Node<T> = self.head.load(READ_ORD);
        let anchor_node: &Node<T> = loop {
            // SAFETY: curr is either null or a published node, and published
            // nodes stay valid for the lifetime of the list.
            match unsafe { curr.as_ref() } {
                None => return false,
                Some(node) if *node.value() == *anchor => break node,
                Some(node) => curr = node.load_next(READ_ORD),
            }
        };

        let node: *mut Node<T> = self.allocator.alloc(Node::boxed(value));

        // SAFETY: as in push_front, the node is unpublished until the CAS.
        let node_ref: &Node<T> = unsafe { &*node };

        // The anchor's identity never changes across retries; only its
        // forward link is re-read.
        let mut observed: *mut Node<T> = anchor_node.load_next(READ_ORD);
        loop {
            node_ref.store_next(observed, INIT_ORD);

            match anchor_node.cas_next(observed, node) {
                Ok(_) => {
                    debug_log!(anchor = ?curr, node = ?node, "push_after published");
                    return true;
                }
                Err(actual) => {
                    trace_log!(anchor = ?curr, "push_after retry");
                    observed = actual;
                }
            }
        }
    }

    /// Borrow the payload at the current head, if any.
    ///
    /// A snapshot of one instant: a concurrent `push_front` may make the
    /// returned reference point at the second element by the time the caller
    /// looks at it. The reference itself stays valid for the borrow.
    #[must_use]
    pub fn front(&self) -> Option<&T> {
        let head: *mut Node<T> = self.head.load(READ_ORD);

        // SAFETY: a non-null head is a published node, valid while the list
        // is borrowed (nodes are only freed in Drop, which needs &mut).
        unsafe { head.as_ref() }.map(Node::value)
    }

    /// Whether the list was empty at the moment of the check.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.head.load(READ_ORD).is_null()
    }

    /// A cursor positioned at whatever `head` is right now.
    ///
    /// The traversal is a live view of the possibly-mutating chain, not a
    /// snapshot; see [`Cursor`] for the exact visibility contract.
    #[must_use]
    pub fn cursor(&self) -> Cursor<'_, T> {
        Cursor::from_raw(self.head.load(READ_ORD))
    }

    /// The terminal cursor (past the last node).
    ///
    /// Useful as the sentinel for identity comparisons; equal to any cursor
    /// that has walked off the end.
    #[must_use]
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::from_raw(std::ptr::null())
    }

    /// Iterate over the payloads from the current head.
    ///
    /// Lazy and single-pass: each advance chases one `next` pointer with an
    /// Acquire load, so inserts at not-yet-visited positions become visible
    /// mid-traversal.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.cursor())
    }
}

impl<T, A: NodeAllocator<T>> Drop for LockFreeList<T, A> {
    fn drop(&mut self) {
        // &mut self: the borrow checker guarantees no concurrent operation
        // and no live cursor, so plain loads and eager release are sound.
        let mut curr: *mut Node<T> = self.head.load(TEARDOWN_ORD);
        while !curr.is_null() {
            // SAFETY: curr is a published node; we are the only accessor.
            let next: *mut Node<T> = unsafe { (*curr).load_next(TEARDOWN_ORD) };

            // SAFETY: curr came from self.allocator.alloc and is released
            // exactly once; the chain is walked front to back.
            unsafe { self.allocator.dealloc(curr) };
            curr = next;
        }
    }
}

// Send: moving the list moves ownership of all nodes (and the allocator).
// Sync: &self allows pushes (T moves in from other threads) and traversal
// (&T observed from other threads), so both T: Send and T: Sync are needed.
// The raw node pointers are what suppress the auto impls; the reasoning
// above is exactly the single-owner contract documented on the type.
unsafe impl<T: Send, A: NodeAllocator<T> + Send> Send for LockFreeList<T, A> {}
unsafe impl<T: Send + Sync, A: NodeAllocator<T> + Sync> Sync for LockFreeList<T, A> {}

impl<T> Default for LockFreeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, A: NodeAllocator<T>> fmt::Debug for LockFreeList<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockFreeList")
            .field("head", &self.head.load(READ_ORD))
            .finish_non_exhaustive()
    }
}

impl<T> FromIterator<T> for LockFreeList<T> {
    /// Build a list by pushing each item to the front; the resulting
    /// traversal order is the reverse of the source order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let list = Self::new();
        for value in iter {
            list.push_front(value);
        }
        list
    }
}

impl<T, A: NodeAllocator<T>> Extend<T> for LockFreeList<T, A> {
    /// Push each item to the front, reversing the source order.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_front(value);
        }
    }
}

// ============================================================================
//  Tests
// ============================================================================
