//! Standard memory orderings for list pointer access.
//!
//! These constants ensure consistent ordering usage across the codebase
//! and make the intent clear at each access point.

use std::sync::atomic::Ordering;

/// Ordering for reading `head` or a node's `next` during traversal.
/// Pairs with the publishing CAS's Release, so a thread that observes a
/// node pointer also observes the node's initialized contents.
pub const READ_ORD: Ordering = Ordering::Acquire;

/// Ordering for a successful publishing CAS (`head` or an anchor's `next`).
/// Releases the new node's `value` and `next` to subsequent Acquire readers.
pub const CAS_SUCCESS: Ordering = Ordering::Release;

/// Ordering for a failed publishing CAS.
/// The returned pointer becomes the node's fresh `next` on retry, so it must
/// be an Acquire observation.
pub const CAS_FAILURE: Ordering = Ordering::Acquire;

/// Ordering for stores to an unpublished node's `next`.
/// No other thread can reach the node before the Release CAS publishes it.
pub const INIT_ORD: Ordering = Ordering::Relaxed;

/// Ordering for teardown loads in `Drop`.
/// `Drop` takes `&mut self`, which rules out concurrent access.
pub const TEARDOWN_ORD: Ordering = Ordering::Relaxed;
