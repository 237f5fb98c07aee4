//! Shared fixtures for densepool benchmarks.

#![forbid(unsafe_code)]

use densepool::{DensePool, Handle};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Payload roughly the size of a small game entity.
#[derive(Clone, Copy, Debug, Default)]
pub struct Particle {
    /// Position.
    pub pos: [f32; 3],
    /// Velocity.
    pub vel: [f32; 3],
}

/// A full pool of `capacity` particles plus the handles in insertion order.
pub fn filled_pool(capacity: usize) -> (DensePool<Particle>, Vec<Handle>) {
    let mut pool = DensePool::new(capacity);
    let handles = (0..capacity)
        .map(|i| {
            pool.insert(Particle {
                pos: [i as f32, 0.0, 0.0],
                vel: [1.0, 0.0, 0.0],
            })
        })
        .collect();
    (pool, handles)
}

/// Fill a pool, then erase a seeded random half of it so dense order no
/// longer matches slot order. Returns the surviving handles.
pub fn fragmented_pool(capacity: usize, seed: u64) -> (DensePool<Particle>, Vec<Handle>) {
    let (mut pool, mut handles) = filled_pool(capacity);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    handles.shuffle(&mut rng);
    for handle in handles.drain(capacity / 2..) {
        pool.erase(handle);
    }
    (pool, handles)
}
