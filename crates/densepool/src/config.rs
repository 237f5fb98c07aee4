//! Pool configuration parameters.

use crate::error::PoolError;

/// Configuration for a [`DensePool`](crate::DensePool).
///
/// Validated at construction; the pool's capacity is immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of slots, and the maximum number of live values.
    ///
    /// Must be in `1..=MAX_CAPACITY` so every slot index fits in the low
    /// 16 bits of a handle and every dense position stays below the
    /// free-slot tombstone.
    pub capacity: usize,
}

impl PoolConfig {
    /// Largest capacity whose slot indices and dense positions fit in `u16`
    /// without colliding with the reserved `0xFFFF` sentinel.
    pub const MAX_CAPACITY: usize = u16::MAX as usize;

    /// Create a config for the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the capacity bounds.
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.capacity == 0 || self.capacity > Self::MAX_CAPACITY {
            return Err(PoolError::InvalidCapacity {
                requested: self.capacity,
                max: Self::MAX_CAPACITY,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        assert!(PoolConfig::new(1).validate().is_ok());
        assert!(PoolConfig::new(PoolConfig::MAX_CAPACITY).validate().is_ok());
        assert_eq!(
            PoolConfig::new(0).validate(),
            Err(PoolError::InvalidCapacity {
                requested: 0,
                max: 65_535
            })
        );
        assert!(PoolConfig::new(65_536).validate().is_err());
    }
}
