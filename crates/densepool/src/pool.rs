//! The dense, handle-indexed object pool.
//!
//! [`DensePool`] keeps three parallel structures sized to one fixed capacity:
//!
//! ```text
//! SlotTable      [ s0 | s1 | s2 | s3 ]   fixed positions, free list threaded through
//!                   │         │    │
//!                   ▼         ▼    ▼
//! values         [ B  | D  | C  ]         dense, always [0, len)
//! handles        [ h1 | h3 | h2 ]         which handle owns each dense position
//! ```
//!
//! Removal is swap-and-pop: the last value moves into the hole, its slot is
//! pointed at the new position, and the removed slot goes back on the free
//! list with its generation preserved so the next occupant gets a new handle.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::handle::Handle;
use crate::iter::{Handles, IntoIter, Iter, IterMut};
use crate::slot::SlotTable;
use crate::stats::{Counters, PoolStats};

/// Fixed-capacity object pool addressed by generation-checked [`Handle`]s.
///
/// Insertion, removal, lookup and validity checks are O(1). Live values are
/// stored contiguously, so [`values`](Self::values) and the iterators touch
/// only live data.
///
/// Storage for the full capacity is reserved at construction and never
/// grows. Inserting into a full pool, looking up or erasing through a stale
/// handle are contract violations and panic; the `try_*`, `get*` and
/// [`remove`](Self::remove) variants report the same conditions without
/// panicking.
///
/// `Default` is the capacity-zero pool. `std::mem::take` on a pool moves its
/// storage out in O(1) and leaves that empty pool behind.
pub struct DensePool<T> {
    slots: SlotTable,
    values: Vec<T>,
    /// Mirror of `values`: `handles[p]` owns dense position `p`.
    handles: Vec<Handle>,
    /// Logical capacity. Equal to `slots.capacity()`.
    capacity: usize,
    /// Capacity the backing storage was reserved for. Only differs from
    /// `capacity` after `clone_from` a smaller pool.
    reserved: usize,
    counters: Counters,
}

impl<T> DensePool<T> {
    /// Create a pool with room for `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= capacity <= PoolConfig::MAX_CAPACITY`.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(pool) => pool,
            Err(e) => panic!("{e}"),
        }
    }

    /// Create a pool, reporting an out-of-range capacity as an error.
    pub fn try_new(capacity: usize) -> Result<Self, PoolError> {
        Self::with_config(PoolConfig::new(capacity))
    }

    /// Create a pool from a [`PoolConfig`].
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        let capacity = config.capacity;
        tracing::debug!(capacity, "dense pool created");
        Ok(Self {
            slots: SlotTable::new(capacity),
            values: Vec::with_capacity(capacity),
            handles: Vec::with_capacity(capacity),
            capacity,
            reserved: capacity,
            counters: Counters::default(),
        })
    }

    /// Maximum number of live values.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the pool holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Whether every slot is occupied.
    pub fn is_full(&self) -> bool {
        self.values.len() >= self.capacity
    }

    /// Whether `handle` names a live value in this pool.
    ///
    /// Never panics. Stale handles, handles whose slot index is out of range,
    /// and arbitrary bit patterns all return `false`.
    pub fn contains(&self, handle: Handle) -> bool {
        self.slots.contains(handle)
    }

    /// Insert `value` and return its handle.
    ///
    /// # Panics
    ///
    /// Panics if the pool is full.
    pub fn insert(&mut self, value: T) -> Handle {
        match self.try_insert(value) {
            Ok(handle) => handle,
            Err(e) => panic!("{e}"),
        }
    }

    /// Insert `value`, or report [`PoolError::CapacityExceeded`] without
    /// modifying the pool. The value is dropped on failure.
    pub fn try_insert(&mut self, value: T) -> Result<Handle, PoolError> {
        self.try_emplace(|_| value)
    }

    /// Construct a value in the next free slot. `make` receives the handle
    /// the value will be stored under, so the value may record it.
    ///
    /// # Panics
    ///
    /// Panics if the pool is full. `make` is not called in that case.
    pub fn emplace(&mut self, make: impl FnOnce(Handle) -> T) -> Handle {
        match self.try_emplace(make) {
            Ok(handle) => handle,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible [`emplace`](Self::emplace).
    ///
    /// If `make` panics the pool is left unchanged.
    pub fn try_emplace(&mut self, make: impl FnOnce(Handle) -> T) -> Result<Handle, PoolError> {
        let next = match self.slots.peek() {
            Some(next) if !self.is_full() => next,
            _ => {
                return Err(PoolError::CapacityExceeded {
                    capacity: self.capacity,
                })
            }
        };
        // Nothing is mutated until the value exists.
        let value = make(next);

        let Some(handle) = self.slots.claim(self.values.len()) else {
            return Err(PoolError::CapacityExceeded {
                capacity: self.capacity,
            });
        };
        debug_assert_eq!(handle, next);
        self.values.push(value);
        self.handles.push(handle);
        self.counters.record_insert(self.values.len());
        Ok(handle)
    }

    /// Remove the value named by `handle` and return it.
    ///
    /// The last dense value moves into the vacated position; every other
    /// value stays where it is. All handles other than `handle` remain valid.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is not [`contain`](Self::contains)ed. Nothing is
    /// modified in that case.
    pub fn erase(&mut self, handle: Handle) -> T {
        match self.remove(handle) {
            Some(value) => value,
            None => panic!("{}", PoolError::StaleHandle { handle }),
        }
    }

    /// Remove the value named by `handle`, or return `None` if the handle
    /// is stale.
    pub fn remove(&mut self, handle: Handle) -> Option<T> {
        let dense = self.slots.dense_of(handle)?;

        let value = self.values.swap_remove(dense);
        self.handles.swap_remove(dense);
        if let Some(&moved) = self.handles.get(dense) {
            self.slots.relocate(moved.slot, dense);
        }
        self.slots.release(handle.slot);
        self.counters.erases += 1;
        Some(value)
    }

    /// Drop every live value. All outstanding handles become invalid.
    pub fn clear(&mut self) {
        tracing::trace!(live = self.values.len(), "clearing dense pool");
        for handle in self.handles.drain(..) {
            self.slots.release(handle.slot);
        }
        self.values.clear();
        self.counters.clears += 1;
    }

    /// Reference to the value named by `handle`, if it is live.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        let dense = self.slots.dense_of(handle)?;
        Some(&self.values[dense])
    }

    /// Mutable reference to the value named by `handle`, if it is live.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        let dense = self.slots.dense_of(handle)?;
        Some(&mut self.values[dense])
    }

    /// Reference to the value named by `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale. Use [`get`](Self::get) when validity is
    /// not already known.
    pub fn lookup(&self, handle: Handle) -> &T {
        match self.get(handle) {
            Some(value) => value,
            None => panic!("{}", PoolError::StaleHandle { handle }),
        }
    }

    /// Mutable reference to the value named by `handle`.
    ///
    /// # Panics
    ///
    /// Panics if `handle` is stale.
    pub fn lookup_mut(&mut self, handle: Handle) -> &mut T {
        match self.get_mut(handle) {
            Some(value) => value,
            None => panic!("{}", PoolError::StaleHandle { handle }),
        }
    }

    /// Live handles in dense order.
    pub fn handles(&self) -> Handles<'_> {
        Handles {
            inner: self.handles.iter(),
        }
    }

    /// `(handle, &value)` pairs in dense order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            handles: self.handles.iter(),
            values: self.values.iter(),
        }
    }

    /// `(handle, &mut value)` pairs in dense order.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            handles: self.handles.iter(),
            values: self.values.iter_mut(),
        }
    }

    /// Live values as one contiguous slice, in dense order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Live values as one contiguous mutable slice, in dense order.
    pub fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    /// Occupancy and lifetime counters.
    pub fn stats(&self) -> PoolStats {
        self.counters
            .snapshot(self.capacity, self.values.len(), self.slots.free_len())
    }

    /// Check every structural invariant, reporting the first one that fails.
    ///
    /// - `len <= capacity` and the handle mirror is as long as dense storage.
    /// - Each dense position is owned by a live handle whose slot points back
    ///   at that position.
    /// - Every free slot is tombstoned and reachable exactly once from the
    ///   free-list head, and no occupied slot is.
    ///
    /// O(capacity). Intended for tests and debug checks.
    pub fn validate(&self) -> Result<(), PoolError> {
        let corrupted = |reason: String| Err(PoolError::Corrupted { reason });

        if self.slots.capacity() != self.capacity {
            return corrupted(format!(
                "slot table has {} slots, capacity is {}",
                self.slots.capacity(),
                self.capacity
            ));
        }
        if self.values.len() > self.capacity {
            return corrupted(format!(
                "{} live values exceed capacity {}",
                self.values.len(),
                self.capacity
            ));
        }
        if self.handles.len() != self.values.len() {
            return corrupted(format!(
                "handle mirror has {} entries, dense storage has {}",
                self.handles.len(),
                self.values.len()
            ));
        }
        for (pos, &handle) in self.handles.iter().enumerate() {
            match self.slots.dense_of(handle) {
                Some(dense) if dense == pos => {}
                Some(dense) => {
                    return corrupted(format!(
                        "dense position {pos} owned by {handle}, whose slot points at {dense}"
                    ));
                }
                None => {
                    return corrupted(format!(
                        "dense position {pos} owned by stale handle {handle}"
                    ));
                }
            }
        }
        self.slots.validate(self.values.len())
    }
}

impl<T> Default for DensePool<T> {
    fn default() -> Self {
        Self {
            slots: SlotTable::default(),
            values: Vec::new(),
            handles: Vec::new(),
            capacity: 0,
            reserved: 0,
            counters: Counters::default(),
        }
    }
}

impl<T: Clone> Clone for DensePool<T> {
    /// Independent copy with identical handles: every live value, every slot
    /// record (free ones included) and the free-list order are replicated.
    fn clone(&self) -> Self {
        let mut values = Vec::with_capacity(self.capacity);
        values.extend(self.values.iter().cloned());
        let mut handles = Vec::with_capacity(self.capacity);
        handles.extend_from_slice(&self.handles);
        Self {
            slots: self.slots.clone(),
            values,
            handles,
            capacity: self.capacity,
            reserved: self.capacity,
            counters: self.counters.clone(),
        }
    }

    /// Assign a copy of `source`, reusing this pool's storage when it was
    /// reserved for at least `source.capacity()` values. Overlapping values
    /// are assigned with `T::clone_from`. Otherwise the storage is replaced
    /// by a fresh copy.
    ///
    /// If `T::clone` panics while values are being copied, this pool is
    /// left empty and valid, with every handle it had issued invalidated.
    fn clone_from(&mut self, source: &Self) {
        if self.reserved < source.capacity {
            tracing::debug!(
                reserved = self.reserved,
                required = source.capacity,
                "replacing dense pool storage"
            );
            *self = source.clone();
            return;
        }
        // Values first: until they are copied, the slots and mirror still
        // describe this pool's own handles, which `clear` can release.
        let mut guard = ClearOnUnwind(self);
        guard.0.values.clone_from(&source.values);
        std::mem::forget(guard);

        self.handles.clone_from(&source.handles);
        self.slots.clone_from(&source.slots);
        self.capacity = source.capacity;
        self.counters.clone_from(&source.counters);
    }
}

/// Clears the pool if dropped, i.e. when a value clone unwinds.
struct ClearOnUnwind<'a, T>(&'a mut DensePool<T>);

impl<T> Drop for ClearOnUnwind<'_, T> {
    fn drop(&mut self) {
        self.0.clear();
    }
}

impl<T: fmt::Debug> fmt::Debug for DensePool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(h, v)| (h.to_string(), v)))
            .finish()
    }
}

impl<T> Index<Handle> for DensePool<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &T {
        self.lookup(handle)
    }
}

impl<T> IndexMut<Handle> for DensePool<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut T {
        self.lookup_mut(handle)
    }
}

impl<'a, T> IntoIterator for &'a DensePool<T> {
    type Item = Handle;
    type IntoIter = Handles<'a>;

    fn into_iter(self) -> Handles<'a> {
        self.handles()
    }
}

impl<T> IntoIterator for DensePool<T> {
    type Item = (Handle, T);
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter {
            handles: self.handles.into_iter(),
            values: self.values.into_iter(),
        }
    }
}
