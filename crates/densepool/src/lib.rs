//! Fixed-capacity, handle-indexed object pool with dense storage.
//!
//! A [`DensePool`] hands out generation-checked [`Handle`]s for the values
//! it stores. Lookup, insertion and removal are O(1), and live values sit
//! contiguously in memory so iteration touches nothing else. A handle to a
//! removed value is detectably stale: [`DensePool::contains`] returns
//! `false` for it even after its slot has been reused.
//!
//! # Architecture
//!
//! ```text
//! DensePool<T>
//! ├── SlotTable (capacity fixed records: generation, dense position, free link)
//! │   └── intrusive free list, LIFO
//! ├── values: Vec<T>       (dense, swap-and-pop on removal)
//! └── handles: Vec<Handle> (mirror of values, patches slots after compaction)
//! ```
//!
//! # Contract violations
//!
//! Inserting into a full pool, constructing with a capacity outside
//! `1..=65535`, and erasing or looking up through a stale handle are
//! programmer errors and panic before anything is modified. Each has a
//! non-panicking counterpart (`try_insert`, `try_new`, `remove`, `get`)
//! returning [`PoolError`] or `Option`.
//!
//! # Threading
//!
//! The pool has no interior synchronisation. `&mut self` on every mutating
//! method is the single-writer guarantee; share across threads behind a
//! lock if needed.
//!
//! ```rust
//! use densepool::DensePool;
//!
//! let mut pool = DensePool::new(4);
//! let a = pool.insert("A");
//! let b = pool.insert("B");
//! pool.erase(a);
//! assert!(!pool.contains(a));
//! assert_eq!(pool[b], "B");
//! let d = pool.insert("D");
//! assert_eq!(d.slot(), a.slot());
//! assert_ne!(d, a);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod config;
pub mod error;
pub mod handle;
pub mod iter;
pub mod pool;
mod slot;
pub mod stats;

// Public re-exports for the primary API surface.
pub use config::PoolConfig;
pub use error::PoolError;
pub use handle::Handle;
pub use pool::DensePool;
pub use stats::PoolStats;
