//! Occupancy and lifetime counters for a pool.
//!
//! [`PoolStats`] is a point-in-time snapshot returned by
//! [`DensePool::stats`](crate::DensePool::stats). The pool only maintains
//! plain integer counters; nothing here touches the hot path beyond an
//! increment.

/// Snapshot of a pool's occupancy and lifetime activity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Fixed number of slots.
    pub capacity: usize,
    /// Number of live values.
    pub live: usize,
    /// Number of free slots.
    pub free: usize,
    /// Largest `live` ever observed.
    pub high_water: usize,
    /// Cumulative successful insertions.
    pub inserts: u64,
    /// Cumulative removals (`erase` and successful `remove`).
    pub erases: u64,
    /// Cumulative `clear` calls.
    pub clears: u64,
}

/// Counters carried by the pool between snapshots.
#[derive(Clone, Debug, Default)]
pub(crate) struct Counters {
    pub(crate) high_water: usize,
    pub(crate) inserts: u64,
    pub(crate) erases: u64,
    pub(crate) clears: u64,
}

impl Counters {
    pub(crate) fn record_insert(&mut self, live: usize) {
        self.inserts += 1;
        self.high_water = self.high_water.max(live);
    }

    pub(crate) fn snapshot(&self, capacity: usize, live: usize, free: usize) -> PoolStats {
        PoolStats {
            capacity,
            live,
            free,
            high_water: self.high_water,
            inserts: self.inserts,
            erases: self.erases,
            clears: self.clears,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stats_are_zero() {
        let s = PoolStats::default();
        assert_eq!(s.capacity, 0);
        assert_eq!(s.live, 0);
        assert_eq!(s.high_water, 0);
        assert_eq!(s.inserts, 0);
    }

    #[test]
    fn high_water_only_rises() {
        let mut c = Counters::default();
        c.record_insert(3);
        c.record_insert(1);
        let s = c.snapshot(8, 1, 7);
        assert_eq!(s.high_water, 3);
        assert_eq!(s.inserts, 2);
    }
}
