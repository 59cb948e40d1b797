//! An ordered set built on [`Tree`]. Every insertion rejects duplicates, so each element is stored
//! at most once.
//!
//! # Examples
//!
//! ```
//! use ordtree::Set;
//!
//! let mut set = Set::new();
//!
//! assert!(set.insert(3));
//! assert!(set.insert(1));
//! // Already there.
//! assert!(!set.insert(3));
//!
//! assert_eq!(set.iter().collect::<Vec<_>>(), [&1, &3]);
//!
//! assert!(set.remove(&3));
//! assert!(!set.contains(&3));
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::cursor::{Cursor, IntoIter, Iter, Position};
use crate::tree::{Duplicates, Tree};

/// An ordered set of unique elements.
pub struct Set<T> {
    tree: Tree<T>,
}

impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Set<T>
where
    T: Clone,
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

impl<T> fmt::Debug for Set<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for Set<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.tree == other.tree
    }
}

impl<T> Eq for Set<T> where T: Eq {}

/// Sets compare lexicographically by their elements in ascending order.
impl<T> PartialOrd for Set<T>
where
    T: PartialOrd,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T> Ord for Set<T>
where
    T: Ord,
{
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T> Set<T> {
    /// Generate a new, empty `Set`.
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// The number of elements in the set.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Whether the set holds no elements.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// The greatest element.
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// The position of the smallest element.
    pub fn begin(&self) -> Position {
        self.tree.begin()
    }

    /// The end sentinel.
    pub fn end(&self) -> Position {
        self.tree.end()
    }

    /// The element at `position`.
    pub fn get_at(&self, position: Position) -> Option<&T> {
        self.tree.get(position)
    }

    /// An iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }

    /// A cursor pointing at `position`.
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, T> {
        self.tree.cursor_at(position)
    }

    /// The position of the element equal to `value`, or the end sentinel.
    pub fn find<Q>(&self, value: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.find(value)
    }

    /// Whether an element equal to `value` is stored.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.contains(value)
    }

    /// The stored element equal to `value`.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.tree.get(self.tree.find(value))
    }

    /// Removes the element equal to `value`. Returns whether there was one.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(value).is_some()
    }

    /// Removes and returns the element equal to `value`.
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let position = self.tree.find(value);
        self.tree.take(position)
    }

    /// Erases the element at `position` and returns the position of the next one.
    pub fn erase(&mut self, position: Position) -> Position {
        self.tree.erase(position)
    }

    /// Erases every element from `first` up to, but not including, `last`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.tree.erase_range(first, last)
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets.
    pub fn swap(&mut self, other: &mut Self) {
        self.tree.swap(&mut other.tree);
    }
}

impl<T> Set<T>
where
    T: Ord,
{
    /// Adds `value` to the set. Returns whether it was added; an equal element already in the set
    /// is kept and `value` is dropped.
    pub fn insert(&mut self, value: T) -> bool {
        self.insert_at(value).1
    }

    /// Like [`insert`](Self::insert) but also returns the position of the element equal to
    /// `value`, whether it was just added or already there.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Set;
    ///
    /// let mut set = Set::new();
    /// let (position, inserted) = set.insert_at("a");
    /// assert!(inserted);
    ///
    /// assert_eq!(set.insert_at("a"), (position, false));
    /// assert_eq!(set.get_at(position), Some(&"a"));
    /// ```
    pub fn insert_at(&mut self, value: T) -> (Position, bool) {
        self.tree.insert(value, Duplicates::Reject)
    }
}

impl<T> FromIterator<T> for Set<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Set::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for Set<T>
where
    T: Ord,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Set<T>
where
    T: Ord,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Set<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}
