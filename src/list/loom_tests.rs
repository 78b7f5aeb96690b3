//! Loom tests for the list's CAS loops.
//!
//! Loom provides deterministic concurrency testing by exploring all possible
//! thread interleavings. This catches subtle ordering bugs that random
//! stress testing might miss.
//!
//! Run with: `RUSTFLAGS="--cfg loom" cargo test --lib list::loom_tests`
//!
//! NOTE: Loom tests use loom's own atomic types, so these models re-build
//! the two insertion loops on a simplified node with loom atomics, using the
//! same ordering constants as the real code.

use loom::sync::Arc;
use loom::sync::atomic::AtomicPtr;
use loom::thread;

use crate::ordering::{CAS_FAILURE, CAS_SUCCESS, INIT_ORD, READ_ORD, TEARDOWN_ORD};

/// Simplified node for loom modeling.
struct LoomNode {
    value: usize,
    next: AtomicPtr<LoomNode>,
}

/// Simplified list mirroring the real push loops with loom atomics.
struct LoomList {
    head: AtomicPtr<LoomNode>,
}

impl LoomList {
    fn new() -> Self {
        Self {
            head: AtomicPtr::new(std::ptr::null_mut()),
        }
    }

    fn push_front(&self, value: usize) {
        let node = Box::into_raw(Box::new(LoomNode {
            value,
            next: AtomicPtr::new(std::ptr::null_mut()),
        }));

        let mut observed = self.head.load(READ_ORD);
        loop {
            unsafe { (*node).next.store(observed, INIT_ORD) };
            match self
                .head
                .compare_exchange_weak(observed, node, CAS_SUCCESS, CAS_FAILURE)
            {
                Ok(_) => return,
                Err(actual) => observed = actual,
            }
        }
    }

    fn push_after(&self, anchor: usize, value: usize) -> bool {
        let mut curr = self.head.load(READ_ORD);
        let anchor_node = loop {
            match unsafe { curr.as_ref() } {
                None => return false,
                Some(node) if node.value == anchor => break node,
                Some(node) => curr = node.next.load(READ_ORD),
            }
        };

        let node = Box::into_raw(Box::new(LoomNode {
            value,
            next: AtomicPtr::new(std::ptr::null_mut()),
        }));

        let mut observed = anchor_node.next.load(READ_ORD);
        loop {
            unsafe { (*node).next.store(observed, INIT_ORD) };
            match anchor_node
                .next
                .compare_exchange_weak(observed, node, CAS_SUCCESS, CAS_FAILURE)
            {
                Ok(_) => return true,
                Err(actual) => observed = actual,
            }
        }
    }

    /// Collect all values head-to-tail.
    fn collect(&self) -> Vec<usize> {
        let mut values = Vec::new();
        let mut curr = self.head.load(READ_ORD);
        while let Some(node) = unsafe { curr.as_ref() } {
            values.push(node.value);
            curr = node.next.load(READ_ORD);
        }
        values
    }
}

impl Drop for LoomList {
    fn drop(&mut self) {
        let mut curr = self.head.load(TEARDOWN_ORD);
        while !curr.is_null() {
            let next = unsafe { (*curr).next.load(TEARDOWN_ORD) };
            drop(unsafe { Box::from_raw(curr) });
            curr = next;
        }
    }
}

/// Two contending `push_front` calls: neither insert is ever lost.
#[test]
fn test_loom_push_front_no_lost_update() {
    loom::model(|| {
        let list = Arc::new(LoomList::new());

        let l1 = Arc::clone(&list);
        let t1 = thread::spawn(move || l1.push_front(1));

        let l2 = Arc::clone(&list);
        let t2 = thread::spawn(move || l2.push_front(2));

        t1.join().unwrap();
        t2.join().unwrap();

        let mut values = list.collect();
        values.sort_unstable();
        assert_eq!(values, vec![1, 2]);
    });
}

/// A reader that observes the new head must observe the node's value and
/// link as initialized (Release publish / Acquire read pairing).
#[test]
fn test_loom_publish_visibility() {
    loom::model(|| {
        let list = Arc::new(LoomList::new());
        list.push_front(7);

        let l1 = Arc::clone(&list);
        let writer = thread::spawn(move || l1.push_front(8));

        let l2 = Arc::clone(&list);
        let reader = thread::spawn(move || {
            // Whatever prefix of {8} has been published, the traversal must
            // see fully initialized nodes and terminate at 7.
            let values = l2.collect();
            assert!(values == vec![7] || values == vec![8, 7]);
        });

        writer.join().unwrap();
        reader.join().unwrap();
    });
}

/// `push_front` racing `push_after` on the old head: both land, and the
/// after-node stays immediately behind its anchor.
#[test]
fn test_loom_push_front_vs_push_after() {
    loom::model(|| {
        let list = Arc::new(LoomList::new());
        list.push_front(0);

        let l1 = Arc::clone(&list);
        let t1 = thread::spawn(move || l1.push_front(1));

        let l2 = Arc::clone(&list);
        let t2 = thread::spawn(move || assert!(l2.push_after(0, 2)));

        t1.join().unwrap();
        t2.join().unwrap();

        let values = list.collect();
        assert_eq!(values.len(), 3);

        // The anchor 0 is directly followed by 2 regardless of interleaving.
        let anchor_pos = values.iter().position(|v| *v == 0).unwrap();
        assert_eq!(values.get(anchor_pos + 1), Some(&2));
    });
}

/// Two `push_after` calls contending on one anchor slot: both inserts land
/// behind the anchor, order unspecified.
#[test]
fn test_loom_push_after_same_anchor() {
    loom::model(|| {
        let list = Arc::new(LoomList::new());
        list.push_front(0);

        let l1 = Arc::clone(&list);
        let t1 = thread::spawn(move || assert!(l1.push_after(0, 1)));

        let l2 = Arc::clone(&list);
        let t2 = thread::spawn(move || assert!(l2.push_after(0, 2)));

        t1.join().unwrap();
        t2.join().unwrap();

        let values = list.collect();
        assert_eq!(values[0], 0);

        let mut rest = values[1..].to_vec();
        rest.sort_unstable();
        assert_eq!(rest, vec![1, 2]);
    });
}
