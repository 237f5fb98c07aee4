//! Slot table and index-threaded free list.
//!
//! Every slot has a fixed position for the lifetime of the table. A slot is
//! either occupied, in which case `dense` is the position of its value in the
//! pool's dense storage, or free, in which case `dense` is [`TOMBSTONE`] and
//! `next_free` links it into the free list.
//!
//! ```text
//! free_head ─▶ slot 4 ─▶ slot 0 ─▶ slot 5 ─▶ … ─▶ FREE_LIST_END
//! ```

use crate::error::PoolError;
use crate::handle::Handle;

/// `dense` value marking a free slot.
pub(crate) const TOMBSTONE: u16 = u16::MAX;

/// `next_free` / `free_head` value terminating the free list.
pub(crate) const FREE_LIST_END: u16 = u16::MAX;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Slot {
    /// Current generation. Bumped on claim, left alone on release.
    generation: u16,
    /// Dense position, or `TOMBSTONE` when free.
    dense: u16,
    /// Next free slot. Only meaningful while free.
    next_free: u16,
}

/// Fixed-size table of slot records with an intrusive free list.
#[derive(Debug)]
pub(crate) struct SlotTable {
    slots: Vec<Slot>,
    free_head: u16,
    free_len: usize,
}

impl SlotTable {
    /// Build a table of `capacity` free slots threaded `0 → 1 → … → capacity-1`.
    ///
    /// `capacity` must already be validated against
    /// [`PoolConfig::MAX_CAPACITY`](crate::PoolConfig::MAX_CAPACITY).
    pub(crate) fn new(capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|i| Slot {
                generation: 0,
                dense: TOMBSTONE,
                next_free: if i + 1 < capacity {
                    (i + 1) as u16
                } else {
                    FREE_LIST_END
                },
            })
            .collect();
        Self {
            slots,
            free_head: if capacity > 0 { 0 } else { FREE_LIST_END },
            free_len: capacity,
        }
    }

    /// Number of slots.
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of free slots.
    pub(crate) fn free_len(&self) -> usize {
        self.free_len
    }

    /// Pop the free-list head, bump its generation and point it at `dense`.
    ///
    /// Returns `None` when no slot is free.
    pub(crate) fn claim(&mut self, dense: usize) -> Option<Handle> {
        if self.free_head == FREE_LIST_END {
            return None;
        }
        let index = self.free_head;
        let slot = &mut self.slots[index as usize];
        self.free_head = slot.next_free;
        self.free_len -= 1;

        slot.generation = slot.generation.wrapping_add(1);
        if slot.generation == 0 {
            tracing::warn!(
                slot = index,
                "slot generation wrapped; handles from 65536 occupancies ago alias again"
            );
        }
        slot.dense = dense as u16;
        Some(Handle::new(index, slot.generation))
    }

    /// Mark `slot` free and push it onto the free-list head.
    ///
    /// The generation is kept so the next claim moves past it.
    pub(crate) fn release(&mut self, slot: u16) {
        let record = &mut self.slots[slot as usize];
        debug_assert_ne!(record.dense, TOMBSTONE, "slot {slot} released twice");
        record.dense = TOMBSTONE;
        record.next_free = self.free_head;
        self.free_head = slot;
        self.free_len += 1;
    }

    /// Whether `handle` names the current occupant of its slot.
    ///
    /// Slot indices outside the table are simply not contained.
    pub(crate) fn contains(&self, handle: Handle) -> bool {
        self.slots
            .get(handle.slot as usize)
            .is_some_and(|s| s.generation == handle.generation && s.dense != TOMBSTONE)
    }

    /// Dense position of `handle`'s value, if the handle is valid.
    pub(crate) fn dense_of(&self, handle: Handle) -> Option<usize> {
        if self.contains(handle) {
            Some(self.slots[handle.slot as usize].dense as usize)
        } else {
            None
        }
    }

    /// Point an occupied slot at a new dense position after compaction.
    pub(crate) fn relocate(&mut self, slot: u16, dense: usize) {
        let record = &mut self.slots[slot as usize];
        debug_assert_ne!(record.dense, TOMBSTONE, "relocating free slot {slot}");
        record.dense = dense as u16;
    }

    /// The handle the next [`claim`](Self::claim) will return, without
    /// claiming it.
    pub(crate) fn peek(&self) -> Option<Handle> {
        if self.free_head == FREE_LIST_END {
            return None;
        }
        let slot = &self.slots[self.free_head as usize];
        Some(Handle::new(self.free_head, slot.generation.wrapping_add(1)))
    }

    /// Slot indices on the free list, head first.
    ///
    /// Stops at the terminator or at the first out-of-range link, and never
    /// yields more than `capacity + 1` items, so a corrupted cycle still ends.
    pub(crate) fn free_slots(&self) -> impl Iterator<Item = u16> + '_ {
        let first = (self.free_head != FREE_LIST_END).then_some(self.free_head);
        std::iter::successors(first, move |&cursor| {
            let next = self.slots.get(cursor as usize)?.next_free;
            (next != FREE_LIST_END).then_some(next)
        })
        .take(self.slots.len() + 1)
    }

    /// Check slot-local invariants: tombstones and free-list coverage.
    ///
    /// `live` is the number of values in dense storage. Occupied-slot
    /// consistency with the dense mirror is checked by the pool.
    pub(crate) fn validate(&self, live: usize) -> Result<(), PoolError> {
        let corrupted = |reason: String| Err(PoolError::Corrupted { reason });

        let mut visited = vec![false; self.slots.len()];
        let mut steps = 0usize;
        for cursor in self.free_slots() {
            let Some(slot) = self.slots.get(cursor as usize) else {
                return corrupted(format!("free list links to out-of-range slot {cursor}"));
            };
            if visited[cursor as usize] {
                return corrupted(format!("free list visits slot {cursor} twice"));
            }
            if slot.dense != TOMBSTONE {
                return corrupted(format!("occupied slot {cursor} is on the free list"));
            }
            visited[cursor as usize] = true;
            steps += 1;
        }

        if steps != self.free_len {
            return corrupted(format!(
                "free list has {steps} entries, expected {}",
                self.free_len
            ));
        }
        for (i, slot) in self.slots.iter().enumerate() {
            if slot.dense == TOMBSTONE && !visited[i] {
                return corrupted(format!("free slot {i} is not on the free list"));
            }
        }
        if self.free_len + live != self.slots.len() {
            return corrupted(format!(
                "{} free + {live} live != {} slots",
                self.free_len,
                self.slots.len()
            ));
        }
        Ok(())
    }
}

impl Clone for SlotTable {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            free_head: self.free_head,
            free_len: self.free_len,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.slots.clone_from(&source.slots);
        self.free_head = source.free_head;
        self.free_len = source.free_len;
    }
}

impl Default for SlotTable {
    fn default() -> Self {
        Self::new(0)
    }
}
