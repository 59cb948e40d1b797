//! An ordered map built on [`Tree`]. Entries are ordered by key alone; values never take part in
//! comparisons, so a value can be changed in place while a key cannot.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Error, Map};
//!
//! let mut map = Map::new();
//!
//! // Nothing in here yet.
//! assert_eq!(map.get(&1), None);
//!
//! map.insert(1, 2);
//! assert_eq!(map.get(&1), Some(&2));
//!
//! // Inserting a new value for the same key overwrites the value.
//! assert_eq!(map.insert(1, 3), Some(2));
//! assert_eq!(map.at(&1), Ok(&3));
//!
//! // Keyed access to a missing key is an error.
//! assert_eq!(map.at(&42), Err(Error::OutOfRange));
//!
//! // Removing a key returns its value.
//! assert_eq!(map.remove(&1), Some(3));
//! assert!(map.is_empty());
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::Index;

use crate::cursor::{self, Position};
use crate::error::{Error, Result};
use crate::tree::{Duplicates, Tree};

/// A key and its value as stored in the tree. Compares by key only.
#[derive(Clone)]
struct KeyValue<K, V> {
    key: K,
    value: V,
}

impl<K, V> PartialEq for KeyValue<K, V>
where
    K: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K, V> Eq for KeyValue<K, V> where K: Eq {}

impl<K, V> PartialOrd for KeyValue<K, V>
where
    K: Ord,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, V> Ord for KeyValue<K, V>
where
    K: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<K, V> KeyValue<K, V> {
    fn pair(&self) -> (&K, &V) {
        (&self.key, &self.value)
    }
}

/// An ordered map from unique keys to values.
pub struct Map<K, V> {
    tree: Tree<KeyValue<K, V>>,
}

impl<K, V> Default for Map<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for Map<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self {
            tree: self.tree.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.tree.clone_from(&source.tree);
    }
}

impl<K, V> fmt::Debug for Map<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Maps are equal when they hold equal keys mapped to equal values.
impl<K, V> PartialEq for Map<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for Map<K, V>
where
    K: Eq,
    V: Eq,
{
}

impl<K, V> Map<K, V> {
    /// Generate a new, empty `Map`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// The number of entries in the map.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The position of the entry with the smallest key.
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// The end sentinel.
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// The position after `position` in key order.
    pub fn advance(&self, position: Position) -> Position {
        self.tree.advance(position)
    }

    /// The position before `position` in key order.
    pub fn retreat(&self, position: Position) -> Position {
        self.tree.retreat(position)
    }

    /// The entry at `position`.
    pub fn get_at(&self, position: Position) -> Option<(&K, &V)> {
        self.tree.get(position).map(KeyValue::pair)
    }

    /// The value of the entry at `position`, mutably.
    pub fn value_at_mut(&mut self, position: Position) -> Option<&mut V> {
        self.tree.value_mut(position).map(|entry| &mut entry.value)
    }

    /// The entry with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        self.tree.first().map(KeyValue::pair)
    }

    /// The entry with the greatest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        self.tree.last().map(KeyValue::pair)
    }

    /// An iterator over the entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.tree.iter(),
        }
    }

    /// An iterator over the keys in order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator over the values in key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// The position of the entry for `key`, or the end sentinel.
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find_by(|entry| key.cmp(entry.key.borrow()))
    }

    /// Whether the map has an entry for `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(key).is_end()
    }

    /// The value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(self.find(key)).map(|entry| &entry.value)
    }

    /// The value for `key`, mutably.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.find(key);
        self.value_at_mut(position)
    }

    /// The value for `key`, which must be present.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when the map has no entry for `key`.
    pub fn at<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get(key).ok_or(Error::OutOfRange)
    }

    /// The value for `key`, mutably, which must be present.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfRange`] when the map has no entry for `key`.
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.get_mut(key).ok_or(Error::OutOfRange)
    }

    /// Removes the entry for `key` and returns its value.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.find(key);
        self.tree.take(position).map(|entry| entry.value)
    }

    /// Erases the entry at `position` and returns the position of the next one.
    pub fn erase(&mut self, position: Position) -> Position {
        self.tree.erase(position)
    }

    /// Erases every entry from `first` up to, but not including, `last`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.tree.erase_range(first, last)
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }
}

impl<K, V> Map<K, V>
where
    K: Ord,
{
    /// Maps `key` to `value`. If `key` already had a value, its entry is kept and the old value is
    /// replaced and returned.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self
            .tree
            .insert_or_return(KeyValue { key, value }, Duplicates::Reject)
        {
            Ok(_) => None,
            Err((existing, rejected)) => Some(mem::replace(
                &mut self.tree.element_mut(existing).value,
                rejected.value,
            )),
        }
    }

    /// The value for `key`, inserting the result of `default` first if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Map;
    ///
    /// let mut counts = Map::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_with(word, || 0) += 1;
    /// }
    ///
    /// assert_eq!(counts.get("a"), Some(&2));
    /// assert_eq!(counts.get("b"), Some(&1));
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let id = match self.find(&key).node() {
            Some(id) => id,
            None => {
                let entry = KeyValue {
                    key,
                    value: default(),
                };
                match self.tree.insert_or_return(entry, Duplicates::Reject) {
                    Ok(id) | Err((id, _)) => id,
                }
            }
        };
        &mut self.tree.element_mut(id).value
    }

    /// The value for `key`, inserting `V::default()` first if there is none.
    pub fn get_or_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }
}

impl<K, Q, V> Index<&Q> for Map<K, V>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    type Output = V;

    /// # Panics
    ///
    /// When the map has no entry for `key`.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V> FromIterator<(K, V)> for Map<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Map::new();
        map.extend(iter);
        map
    }
}

impl<K, V> Extend<(K, V)> for Map<K, V>
where
    K: Ord,
{
    /// Inserts every pair; later values for a key replace earlier ones.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for Map<K, V>
where
    K: Ord,
{
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K, V> IntoIterator for Map<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.tree.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a Map<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

/// An iterator over the entries of a [`Map`] in key order.
pub struct Iter<'a, K, V> {
    inner: cursor::Iter<'a, KeyValue<K, V>>,
}

impl<'a, K, V> Clone for Iter<'a, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(KeyValue::pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(KeyValue::pair)
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}

/// An iterator over the keys of a [`Map`] in order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Keys<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a K> {
        self.inner.next_back().map(|(key, _)| key)
    }
}

impl<'a, K, V> ExactSizeIterator for Keys<'a, K, V> {}

/// An iterator over the values of a [`Map`] in key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Values<'a, K, V> {
    fn next_back(&mut self) -> Option<&'a V> {
        self.inner.next_back().map(|(_, value)| value)
    }
}

impl<'a, K, V> ExactSizeIterator for Values<'a, K, V> {}

/// An owning iterator over the entries of a [`Map`] in key order.
pub struct IntoIter<K, V> {
    inner: cursor::IntoIter<KeyValue<K, V>>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next().map(|entry| (entry.key, entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back().map(|entry| (entry.key, entry.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
