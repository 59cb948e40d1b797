//! Positions, cursors and iterators over a [`Tree`]. All of them walk the tree purely through its
//! parent and child links: stepping to the next element is the in-order successor of the current
//! node, found by going down the right subtree or climbing out of it.
//!
//! # Examples
//!
//! ```
//! use ordtree::Tree;
//!
//! let tree = Tree::from([4, 2, 6, 1, 3]);
//! let mut cursor = tree.cursor_at(tree.find(&3));
//!
//! cursor.move_next();
//! assert_eq!(cursor.current(), Some(&4));
//!
//! cursor.move_prev();
//! cursor.move_prev();
//! assert_eq!(cursor.current(), Some(&2));
//!
//! assert_eq!(tree.iter().rev().collect::<Vec<_>>(), [&6, &4, &3, &2, &1]);
//! ```

use std::fmt;
use std::iter::FusedIterator;
use std::ptr;

use crate::node::NodeId;
use crate::tree::Tree;

/// A location in a [`Tree`]: either an element or the end sentinel, one past the greatest
/// element.
///
/// A `Position` does not borrow its tree so it can be handed back to mutating operations such as
/// [`Tree::erase`]. It stays valid until the element it refers to is erased; after that the tree
/// treats it like the end sentinel until a later insertion reuses its slot. Using a position past
/// that point is a logic error: it may refer to the new element, but it is never unsafe.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position(Option<NodeId>);

impl Position {
    pub(crate) const END: Position = Position(None);

    pub(crate) fn at(id: NodeId) -> Self {
        Position(Some(id))
    }

    pub(crate) fn from_node(node: Option<NodeId>) -> Self {
        Position(node)
    }

    pub(crate) fn node(self) -> Option<NodeId> {
        self.0
    }

    /// Whether this is the end sentinel.
    pub fn is_end(self) -> bool {
        self.0.is_none()
    }
}

/// A read-only cursor over a [`Tree`]. It points at an element or at the end sentinel and can be
/// moved in either direction. Moving forward from the end sentinel keeps it there; moving back from
/// the end sentinel goes to the greatest element and moving back from the smallest element goes to
/// the end sentinel.
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    node: Option<NodeId>,
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

/// Two cursors are equal when they point at the same element of the same tree, or are both at the
/// end sentinel of the same tree.
impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.node == other.node
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

impl<'a, T> fmt::Debug for Cursor<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.current()).finish()
    }
}

impl<'a, T> Cursor<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>, node: Option<NodeId>) -> Self {
        Self { tree, node }
    }

    /// The element under the cursor, or `None` at the end sentinel.
    pub fn current(&self) -> Option<&'a T> {
        self.node.map(|id| &self.tree.node(id).value)
    }

    /// Whether the cursor is at the end sentinel.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    /// The position the cursor points at, usable with the tree's mutating operations once the
    /// cursor is dropped.
    pub fn position(&self) -> Position {
        Position(self.node)
    }

    /// Moves to the next greater element, or to the end sentinel after the greatest one.
    pub fn move_next(&mut self) {
        if let Some(id) = self.node {
            self.node = self.tree.successor(id);
        }
    }

    /// Moves to the next smaller element.
    pub fn move_prev(&mut self) {
        self.node = match self.node {
            Some(id) => self.tree.predecessor(id),
            None => self.tree.last_id(),
        };
    }

    /// The element [`move_next`](Self::move_next) would move to.
    pub fn peek_next(&self) -> Option<&'a T> {
        let mut next = *self;
        next.move_next();
        next.current()
    }

    /// The element [`move_prev`](Self::move_prev) would move to.
    pub fn peek_prev(&self) -> Option<&'a T> {
        let mut prev = *self;
        prev.move_prev();
        prev.current()
    }
}

/// An iterator over the elements of a [`Tree`] in ascending order.
///
/// This `struct` is created by [`Tree::iter`].
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    // Elements not yet yielded from either end; stops the ends from crossing.
    remaining: usize,
}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<'a, T> fmt::Debug for Iter<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            front: tree.begin().node(),
            back: tree.last_id(),
            remaining: tree.len(),
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.front = self.tree.successor(id);
        self.remaining -= 1;
        Some(&self.tree.node(id).value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.back = self.tree.predecessor(id);
        self.remaining -= 1;
        Some(&self.tree.node(id).value)
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> {}

impl<'a, T> FusedIterator for Iter<'a, T> {}

/// An owning iterator over the elements of a [`Tree`] in ascending order. Each step erases the
/// smallest (or greatest) remaining node.
///
/// This `struct` is created by the `into_iter` method on [`Tree`].
pub struct IntoIter<T> {
    tree: Tree<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
}

impl<T> fmt::Debug for IntoIter<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.tree).finish()
    }
}

impl<T> IntoIter<T> {
    pub(crate) fn new(tree: Tree<T>) -> Self {
        let front = tree.begin().node();
        let back = tree.last_id();
        Self { tree, front, back }
    }

    fn forget_ends_if_empty(&mut self) {
        if self.tree.is_empty() {
            self.front = None;
            self.back = None;
        }
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let id = self.front?;
        let (value, next) = self.tree.detach(id);
        self.front = next;
        self.forget_ends_if_empty();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        let id = self.back?;
        self.back = self.tree.predecessor(id);
        let (value, _) = self.tree.detach(id);
        self.forget_ends_if_empty();
        Some(value)
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}
