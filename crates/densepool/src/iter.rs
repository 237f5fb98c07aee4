//! Iterators over a pool's live contents.
//!
//! All iterators walk dense storage in position order. That is storage
//! order, not insertion order: every removal moves the last value into the
//! hole it leaves.

use std::iter::FusedIterator;
use std::slice;
use std::vec;

use crate::handle::Handle;

/// Live handles in dense order. Returned by
/// [`DensePool::handles`](crate::DensePool::handles).
///
/// Cloning forks the iterator at its current position. Call `handles()`
/// again for a fresh pass.
#[derive(Clone, Debug)]
pub struct Handles<'a> {
    pub(crate) inner: slice::Iter<'a, Handle>,
}

impl Iterator for Handles<'_> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        self.inner.next().copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Handles<'_> {
    fn next_back(&mut self) -> Option<Handle> {
        self.inner.next_back().copied()
    }
}

impl ExactSizeIterator for Handles<'_> {}
impl FusedIterator for Handles<'_> {}

/// `(handle, &value)` pairs in dense order.
#[derive(Clone, Debug)]
pub struct Iter<'a, T> {
    pub(crate) handles: slice::Iter<'a, Handle>,
    pub(crate) values: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (Handle, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.handles.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((*self.handles.next_back()?, self.values.next_back()?))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

/// `(handle, &mut value)` pairs in dense order.
#[derive(Debug)]
pub struct IterMut<'a, T> {
    pub(crate) handles: slice::Iter<'a, Handle>,
    pub(crate) values: slice::IterMut<'a, T>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = (Handle, &'a mut T);

    fn next(&mut self) -> Option<Self::Item> {
        Some((*self.handles.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((*self.handles.next_back()?, self.values.next_back()?))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}
impl<T> FusedIterator for IterMut<'_, T> {}

/// Owning `(handle, value)` iterator. Consumes the pool.
#[derive(Debug)]
pub struct IntoIter<T> {
    pub(crate) handles: vec::IntoIter<Handle>,
    pub(crate) values: vec::IntoIter<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = (Handle, T);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.handles.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.handles.next_back()?, self.values.next_back()?))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}
