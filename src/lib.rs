//! # `pushlist`
//!
//! A concurrent, singly-linked, lock-free push list.
//!
//! Many threads append through a shared reference without external locking;
//! readers traverse without blocking writers. The building block for
//! higher-level concurrent containers (queues, sets, work lists) where
//! insertion dominates and removal is handled elsewhere or not at all.
//!
//! ## Status
//!
//! | Feature | Status |
//! |---------|--------|
//! | Concurrent `push_front` | Works (lock-free CAS retry on `head`) |
//! | Concurrent `push_after` | Works (traversal + CAS retry on the anchor's `next`) |
//! | Live-view iteration | Works (re-reads `next` per advance, never a snapshot) |
//! | Node removal | Not implemented (by design) |
//! | Memory reclamation | None (nodes live until the list drops) |
//!
//! ## Thread Safety
//!
//! `LockFreeList<T>` is `Send + Sync` when `T: Send + Sync`. All insertion
//! methods take `&self`:
//!
//! ```rust
//! use pushlist::LockFreeList;
//! use std::sync::Arc;
//!
//! let list: Arc<LockFreeList<u64>> = Arc::new(LockFreeList::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let list = Arc::clone(&list);
//!         std::thread::spawn(move || {
//!             for i in 0..100 {
//!                 list.push_front(t * 100 + i);
//!             }
//!         })
//!     })
//!     .collect();
//! for h in handles {
//!     h.join().unwrap();
//! }
//!
//! assert_eq!(list.iter().count(), 400);
//! ```
//!
//! ## Limitations
//!
//! - **No removal, no reclamation.** Every published node stays allocated
//!   until the list drops. Under continuous use that is unbounded growth;
//!   production deployments need a reclamation scheme (epoch-based,
//!   hazard pointers) layered on the [`NodeAllocator`] `dealloc` seam.
//! - **No FIFO fairness.** CAS retry order is not request-arrival order;
//!   concurrent inserts at one anchor are last-CAS-wins.
//! - **No backoff.** The retry loops are unbounded backoff-free spins;
//!   lock-freedom guarantees system-wide progress, not per-thread bounds.
//! - **Payloads are read-only once published.** Mutating a payload through
//!   interior mutability while other threads compare against it is outside
//!   the contract of `push_after`.
//!
//! ## Ordering contract
//!
//! The publishing CAS is a Release; every traversal load of `head` or a
//! `next` pointer is an Acquire (see [`ordering`]). A thread that observes a
//! node pointer therefore observes the node's fully initialized payload and
//! link. Reader loads must not be weakened to Relaxed.

#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod alloc;
pub mod iter;
pub mod list;
pub mod node;
pub mod ordering;

mod tracing_helpers;

// Re-export main types for convenience
pub use alloc::{ArenaAllocator, HeapAllocator, NodeAllocator};
pub use iter::{Cursor, Iter};
pub use list::LockFreeList;
pub use node::Node;
