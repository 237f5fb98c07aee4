//! Integration test: handle lifecycle through the public API.
//!
//! Covers the capacity-4 insert/erase/reinsert walkthrough, value
//! destruction accounting, and copy/move/assignment semantics using
//! drop-tracked values.

use densepool::{DensePool, Handle, PoolError};
use densepool_test_utils::{DropCounter, Tracked};

#[test]
fn capacity_four_walkthrough() {
    let mut pool = DensePool::new(4);
    let h_a = pool.insert("A");
    let h_b = pool.insert("B");
    let h_c = pool.insert("C");
    assert_eq!(pool.len(), 3);

    pool.erase(h_a);
    assert_eq!(pool.len(), 2);
    assert!(!pool.contains(h_a));
    assert!(pool.contains(h_b));
    assert!(pool.contains(h_c));
    assert_eq!(pool[h_b], "B");
    assert_eq!(pool[h_c], "C");

    let h_d = pool.insert("D");
    assert_eq!(h_d.slot(), h_a.slot(), "freed slot is reused first");
    assert_ne!(h_d.generation(), h_a.generation());
    assert_eq!(pool.len(), 3);
    assert!(!pool.contains(h_a));
    assert_eq!(pool[h_d], "D");
    pool.validate().unwrap();
}

#[test]
fn packed_handles_survive_round_trip_through_u32() {
    let mut pool = DensePool::new(8);
    let h = pool.insert(11u64);
    let bits: u32 = h.into();
    assert!(pool.contains(Handle::from_bits(bits)));
    pool.erase(h);
    assert!(!pool.contains(Handle::from_bits(bits)));
    assert!(!pool.contains(Handle::from_bits(bits + Handle::GENERATION_STEP)));
}

#[test]
fn erased_values_are_dropped_exactly_once() {
    let counter = DropCounter::new();
    let mut pool = DensePool::new(8);
    let hs: Vec<_> = (0..5).map(|i| pool.insert(counter.track(i))).collect();

    drop(pool.erase(hs[1]));
    assert_eq!(counter.drops(), 1);
    assert!(pool.remove(hs[3]).is_some());
    assert_eq!(counter.drops(), 2);
    assert_eq!(counter.alive(), 3);

    pool.clear();
    assert_eq!(counter.drops(), 5);
    assert_eq!(counter.alive(), 0);
}

#[test]
fn dropping_pool_drops_live_values() {
    let counter = DropCounter::new();
    {
        let mut pool = DensePool::new(4);
        for i in 0..3 {
            pool.insert(counter.track(i));
        }
        assert_eq!(counter.alive(), 3);
    }
    assert_eq!(counter.alive(), 0);
}

#[test]
fn rejected_insert_drops_value() {
    let counter = DropCounter::new();
    let mut pool = DensePool::new(1);
    pool.insert(counter.track(0));
    let err = pool.try_insert(counter.track(1)).unwrap_err();
    assert_eq!(err, PoolError::CapacityExceeded { capacity: 1 });
    assert_eq!(counter.drops(), 1);
    assert_eq!(pool.len(), 1);
}

#[test]
fn clone_copies_every_live_value() {
    let counter = DropCounter::new();
    let mut pool = DensePool::new(4);
    let a = pool.insert(counter.track('a'));
    let b = pool.insert(counter.track('b'));
    pool.erase(a);

    let copy = pool.clone();
    assert_eq!(counter.clones(), 1);
    assert_eq!(copy[b].value, 'b');
    assert!(!copy.contains(a));

    drop(pool);
    assert_eq!(copy[b].value, 'b');
    drop(copy);
    assert_eq!(counter.alive(), 0);
}

#[test]
fn clone_from_into_roomy_pool_keeps_allocation() {
    let counter = DropCounter::new();
    let mut src = DensePool::new(3);
    let hs: Vec<_> = (0..3).map(|i| src.insert(counter.track(i))).collect();

    let mut dst: DensePool<Tracked<i32>> = DensePool::new(10);
    for i in 10..15 {
        dst.insert(counter.track(i));
    }
    let before = dst.values().as_ptr();
    dst.clone_from(&src);

    assert_eq!(dst.values().as_ptr(), before);
    assert_eq!(dst.capacity(), 3);
    assert_eq!(dst.len(), 3);
    for (i, &h) in hs.iter().enumerate() {
        assert_eq!(dst[h].value, i as i32);
    }
    // Two surplus destination values were dropped; src + dst now hold six.
    assert_eq!(counter.alive(), 6);
    dst.validate().unwrap();
}

#[test]
fn clone_from_into_small_pool_replaces_storage() {
    let mut src = DensePool::new(64);
    let hs: Vec<_> = (0..40).map(|i| src.insert(i)).collect();
    let mut dst = DensePool::new(4);
    dst.insert(-1);

    dst.clone_from(&src);
    assert_eq!(dst.capacity(), 64);
    assert!(hs.iter().all(|&h| dst.contains(h)));
    assert_eq!(dst.stats(), src.stats());
}

#[test]
fn move_leaves_empty_source() {
    let mut pool = DensePool::new(4);
    let h = pool.insert(String::from("moved"));
    let taken = std::mem::take(&mut pool);
    assert_eq!(pool.capacity(), 0);
    assert_eq!(pool.handles().count(), 0);
    assert_eq!(taken[h], "moved");

    let mut other = DensePool::new(2);
    let mut taken = taken;
    std::mem::swap(&mut taken, &mut other);
    assert!(other.contains(h));
    assert!(taken.is_empty());
}
