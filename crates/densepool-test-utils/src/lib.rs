//! Test utilities for densepool development.
//!
//! - [`DropCounter`] / [`Tracked`]: a value wrapper that records clones and
//!   drops, for checking that the pool destroys exactly what it should.
//! - [`ModelChecker`]: drives a [`DensePool`] and a `HashMap` reference
//!   model with the same [`PoolOp`] sequence and reports the first
//!   divergence.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod model;

use std::cell::Cell;
use std::rc::Rc;

pub use model::{apply_ops, ModelChecker, PoolOp};

#[derive(Default, Debug)]
struct Tally {
    created: Cell<usize>,
    clones: Cell<usize>,
    drops: Cell<usize>,
}

/// Shared tally of [`Tracked`] values created, cloned and dropped.
#[derive(Clone, Default, Debug)]
pub struct DropCounter {
    tally: Rc<Tally>,
}

impl DropCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap `value` so its clones and drops are counted here.
    pub fn track<T>(&self, value: T) -> Tracked<T> {
        self.tally.created.set(self.tally.created.get() + 1);
        Tracked {
            value,
            tally: Rc::clone(&self.tally),
        }
    }

    /// Number of tracked values dropped so far.
    pub fn drops(&self) -> usize {
        self.tally.drops.get()
    }

    /// Number of `clone` calls on tracked values.
    pub fn clones(&self) -> usize {
        self.tally.clones.get()
    }

    /// Tracked values currently alive (created + cloned - dropped).
    pub fn alive(&self) -> usize {
        self.tally.created.get() + self.tally.clones.get() - self.tally.drops.get()
    }
}

/// A value whose clones and drops are recorded by a [`DropCounter`].
#[derive(Debug)]
pub struct Tracked<T> {
    pub value: T,
    tally: Rc<Tally>,
}

impl<T: Clone> Clone for Tracked<T> {
    fn clone(&self) -> Self {
        self.tally.clones.set(self.tally.clones.get() + 1);
        Self {
            value: self.value.clone(),
            tally: Rc::clone(&self.tally),
        }
    }
}

impl<T> Drop for Tracked<T> {
    fn drop(&mut self) {
        self.tally.drops.set(self.tally.drops.get() + 1);
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
