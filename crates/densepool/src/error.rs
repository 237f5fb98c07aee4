//! Pool error types.

use std::error::Error;
use std::fmt;

use crate::handle::Handle;

/// Errors reported by the fallible pool operations.
///
/// The panicking entry points (`new`, `insert`, `erase`, `lookup`, indexing)
/// treat the same conditions as contract violations and panic with this
/// type's `Display` text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// Requested capacity is zero or does not fit a 16-bit slot index.
    InvalidCapacity {
        /// Capacity passed by the caller.
        requested: usize,
        /// Largest accepted capacity.
        max: usize,
    },
    /// Every slot is occupied.
    CapacityExceeded {
        /// Fixed capacity of the pool.
        capacity: usize,
    },
    /// The handle does not name a live value in this pool.
    StaleHandle {
        /// The rejected handle.
        handle: Handle,
    },
    /// An internal invariant does not hold. Only produced by
    /// [`DensePool::validate`](crate::DensePool::validate).
    Corrupted {
        /// Which invariant failed.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCapacity { requested, max } => {
                write!(f, "invalid pool capacity {requested}: must be in 1..={max}")
            }
            Self::CapacityExceeded { capacity } => {
                write!(f, "pool capacity exceeded: all {capacity} slots occupied")
            }
            Self::StaleHandle { handle } => {
                write!(f, "stale handle: {handle} does not name a live value")
            }
            Self::Corrupted { reason } => {
                write!(f, "pool invariant violated: {reason}")
            }
        }
    }
}

impl Error for PoolError {}
