//! Iteration views over a `LinearHashMap`.
//!
//! All views walk the slots from index 0 upwards and skip empty slots, so entries come out in
//! the order they are laid out in the table. Views borrow the map, so the map cannot grow or
//! rebuild while one is alive.

use std::{fmt, iter::FusedIterator, ptr, slice, vec};

use crate::linear_map::{Bucket, LinearHashMap};

/// A position in a `LinearHashMap`, either on an occupied slot or at the end.
///
/// Two cursors are equal when they point into the same map at the same slot index. For
/// mutable access to values use [`CursorMut`].
pub struct Cursor<'a, K, V, S> {
    /// The map the cursor walks over
    map: &'a LinearHashMap<K, V, S>,
    /// Slot index, equal to the map's capacity at the end
    index: usize,
}

impl<'a, K, V, S> Cursor<'a, K, V, S> {
    /// Creates a cursor on the first occupied slot at or after `index`
    pub(crate) fn first_from(map: &'a LinearHashMap<K, V, S>, index: usize) -> Self {
        Self { map, index: first_occupied(map.slots(), index) }
    }

    /// Returns the slot index the cursor points at
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the cursor is past the last occupied slot
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index >= self.map.capacity()
    }

    /// Returns the entry under the cursor, or `None` at the end
    #[must_use]
    pub fn key_value(&self) -> Option<(&'a K, &'a V)> {
        self.map.slot(self.index)
    }

    /// Returns the key under the cursor, or `None` at the end
    #[must_use]
    pub fn key(&self) -> Option<&'a K> {
        self.key_value().map(|(key, _)| key)
    }

    /// Returns the value under the cursor, or `None` at the end
    #[must_use]
    pub fn value(&self) -> Option<&'a V> {
        self.key_value().map(|(_, value)| value)
    }

    /// Advances to the next occupied slot. Does nothing at the end.
    pub fn move_next(&mut self) {
        if !self.is_end() {
            self.index = first_occupied(self.map.slots(), self.index.saturating_add(1));
        }
    }
}

impl<K, V, S> Clone for Cursor<'_, K, V, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S> Copy for Cursor<'_, K, V, S> {}

impl<K, V, S> PartialEq for Cursor<'_, K, V, S> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.index == other.index
    }
}

impl<K, V, S> Eq for Cursor<'_, K, V, S> {}

impl<K, V, S> fmt::Debug for Cursor<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish_non_exhaustive()
    }
}

/// A position in a `LinearHashMap` with mutable access to the value under it.
///
/// Keys stay immutable, like in [`IterMut`]. The cursor holds the map's slots exclusively, so
/// there is no end cursor to compare against; use [`is_end`](Self::is_end) instead.
pub struct CursorMut<'a, K, V> {
    /// Slots of the map the cursor walks over
    slots: &'a mut [Option<Bucket<K, V>>],
    /// Slot index, equal to the number of slots at the end
    index: usize,
}

impl<'a, K, V> CursorMut<'a, K, V> {
    /// Creates a cursor on the first occupied slot at or after `index`
    pub(crate) fn first_from(slots: &'a mut [Option<Bucket<K, V>>], index: usize) -> Self {
        let index = first_occupied(slots, index);
        Self { slots, index }
    }

    /// Returns the slot index the cursor points at
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Returns true if the cursor is past the last occupied slot
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.index >= self.slots.len()
    }

    /// Returns the entry under the cursor, or `None` at the end
    #[must_use]
    pub fn key_value(&self) -> Option<(&K, &V)> {
        self.slots.get(self.index)?.as_ref().map(|bucket| (&bucket.key, &bucket.value))
    }

    /// Returns the entry under the cursor with a mutable value, or `None` at the end
    pub fn key_value_mut(&mut self) -> Option<(&K, &mut V)> {
        self.slots.get_mut(self.index)?.as_mut().map(|bucket| (&bucket.key, &mut bucket.value))
    }

    /// Returns the key under the cursor, or `None` at the end
    #[must_use]
    pub fn key(&self) -> Option<&K> {
        self.key_value().map(|(key, _)| key)
    }

    /// Returns the value under the cursor, or `None` at the end
    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.key_value_mut().map(|(_, value)| value)
    }

    /// Advances to the next occupied slot. Does nothing at the end.
    pub fn move_next(&mut self) {
        if !self.is_end() {
            self.index = first_occupied(self.slots, self.index.saturating_add(1));
        }
    }
}

impl<K, V> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("index", &self.index).finish_non_exhaustive()
    }
}

/// Index of the first occupied slot at or after `from`, or `slots.len()` if there is none
fn first_occupied<K, V>(slots: &[Option<Bucket<K, V>>], from: usize) -> usize {
    slots
        .get(from..)
        .and_then(|rest| rest.iter().position(Option::is_some))
        .map_or(slots.len(), |offset| from.saturating_add(offset))
}

/// Iterator over the key-value pairs of the hash table
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    /// Remaining slots
    slots: slice::Iter<'a, Option<Bucket<K, V>>>,
    /// Occupied slots not yet yielded
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    /// Creates an iterator over `slots`, `len` of which are occupied
    pub(crate) fn new(slots: &'a [Option<Bucket<K, V>>], len: usize) -> Self {
        Self { slots: slots.iter(), remaining: len }
    }
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { slots: self.slots.clone(), remaining: self.remaining }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.slots.find_map(Option::as_ref)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&bucket.key, &bucket.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over the key-value pairs of the hash table with mutable values.
///
/// Keys stay immutable so an entry can never move away from its probe chain.
#[derive(Debug)]
pub struct IterMut<'a, K, V> {
    /// Remaining slots
    slots: slice::IterMut<'a, Option<Bucket<K, V>>>,
    /// Occupied slots not yet yielded
    remaining: usize,
}

impl<'a, K, V> IterMut<'a, K, V> {
    /// Creates an iterator over `slots`, `len` of which are occupied
    pub(crate) fn new(slots: &'a mut [Option<Bucket<K, V>>], len: usize) -> Self {
        Self { slots: slots.iter_mut(), remaining: len }
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.slots.find_map(Option::as_mut)?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((&bucket.key, &mut bucket.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator over the key-value pairs of the hash table
#[derive(Debug)]
pub struct IntoIter<K, V> {
    /// Remaining slots
    slots: vec::IntoIter<Option<Bucket<K, V>>>,
    /// Occupied slots not yet yielded
    remaining: usize,
}

impl<K, V> IntoIter<K, V> {
    /// Creates an iterator consuming `slots`, `len` of which are occupied
    pub(crate) fn new(slots: Vec<Option<Bucket<K, V>>>, len: usize) -> Self {
        Self { slots: slots.into_iter(), remaining: len }
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let bucket = self.slots.by_ref().flatten().next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some((bucket.key, bucket.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// Iterator over the keys of the hash table
#[derive(Debug)]
pub struct Keys<'a, K, V> {
    /// Underlying entry iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Keys<'a, K, V> {
    /// Wraps an entry iterator
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Iterator over the values of the hash table
#[derive(Debug)]
pub struct Values<'a, K, V> {
    /// Underlying entry iterator
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Values<'a, K, V> {
    /// Wraps an entry iterator
    pub(crate) const fn new(inner: Iter<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// Iterator over mutable references to the values of the hash table
#[derive(Debug)]
pub struct ValuesMut<'a, K, V> {
    /// Underlying entry iterator
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> ValuesMut<'a, K, V> {
    /// Wraps an entry iterator
    pub(crate) const fn new(inner: IterMut<'a, K, V>) -> Self {
        Self { inner }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
