//! The BST engine. Nodes are kept in an index arena and linked to their children and their parent
//! by index, so the tree can be walked in both directions without an external stack and without
//! any aliasing references.
//!
//! The tree is not self-balancing: its shape is entirely determined by insertion order.
//!
//! # Examples
//!
//! ```
//! use ordtree::{Duplicates, Tree};
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.get(tree.find(&1)), None);
//!
//! let (position, inserted) = tree.insert(1, Duplicates::Reject);
//! assert!(inserted);
//! assert_eq!(tree.get(position), Some(&1));
//!
//! // Inserting an equal value is refused when duplicates are rejected...
//! let (existing, inserted) = tree.insert(1, Duplicates::Reject);
//! assert!(!inserted);
//! assert_eq!(existing, position);
//!
//! // ...and stored next to the first one when they are allowed.
//! tree.insert(1, Duplicates::Allow);
//! assert_eq!(tree.len(), 2);
//!
//! // Erasing a position hands back the position of the next element.
//! let next = tree.erase(tree.begin());
//! assert_eq!(tree.get(next), Some(&1));
//! assert_eq!(tree.len(), 1);
//! ```

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::mem;

use slab::Slab;
use tracing::{debug, trace};

use crate::cursor::{Cursor, IntoIter, Iter, Position};
use crate::error::{Error, Result};
use crate::node::{Node, NodeId, Side};

/// Whether [`Tree::insert`] may store an element equal to one already in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Duplicates {
    /// An equal element stops the insertion and the tree is left unchanged.
    Reject,
    /// Equal elements are stored after the existing ones, giving multiset semantics.
    Allow,
}

/// Where a node hangs in the tree.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Slot {
    Root,
    Child(NodeId, Side),
}

/// An unbalanced Binary Search Tree. This can be used for inserting, finding, and erasing
/// elements and for walking them in ascending order from either end.
pub struct Tree<T> {
    // Every live node of the tree and nothing else, so the slab's length is the element count.
    nodes: Slab<Node<T>>,
    root: Option<NodeId>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Tree<T>
where
    T: Clone,
{
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.len());
        tree.assign(self);
        tree
    }

    /// Makes `self` a copy of `source`, reusing the nodes `self` already has wherever both trees
    /// have a node in the same place.
    fn clone_from(&mut self, source: &Self) {
        self.assign(source);
    }
}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> Tree<T> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Slab::new(),
            root: None,
        }
    }

    /// Generate a new, empty `Tree` with room for `capacity` elements before it allocates.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Slab::with_capacity(capacity),
            root: None,
        }
    }

    /// The number of elements in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The position of the smallest element, or [`end`](Self::end) when the tree is empty.
    pub fn begin(&self) -> Position {
        Position::from_node(self.root.map(|root| self.leftmost(root)))
    }

    /// The end sentinel: the position one past the greatest element.
    pub fn end(&self) -> Position {
        Position::END
    }

    /// The smallest element.
    pub fn first(&self) -> Option<&T> {
        self.root.map(|root| &self.node(self.leftmost(root)).value)
    }

    /// The greatest element.
    pub fn last(&self) -> Option<&T> {
        self.last_id().map(|id| &self.node(id).value)
    }

    /// The element at `position`. Returns `None` for the end sentinel and for positions whose
    /// element has been erased.
    pub fn get(&self, position: Position) -> Option<&T> {
        self.live(position).map(|id| &self.node(id).value)
    }

    /// The position following `position` in ascending order. Advancing the end sentinel leaves it
    /// where it is.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let tree = Tree::from([2, 1]);
    /// let second = tree.advance(tree.begin());
    ///
    /// assert_eq!(tree.get(second), Some(&2));
    /// assert_eq!(tree.advance(second), tree.end());
    /// assert_eq!(tree.advance(tree.end()), tree.end());
    /// ```
    pub fn advance(&self, position: Position) -> Position {
        Position::from_node(self.live(position).and_then(|id| self.successor(id)))
    }

    /// The position preceding `position` in ascending order. Retreating from the smallest element
    /// yields the end sentinel and retreating from the end sentinel yields the greatest element.
    pub fn retreat(&self, position: Position) -> Position {
        match position.node() {
            None => Position::from_node(self.last_id()),
            Some(_) => {
                Position::from_node(self.live(position).and_then(|id| self.predecessor(id)))
            }
        }
    }

    /// An iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// A cursor pointing at `position`. A position whose element has been erased gives a cursor
    /// at the end sentinel.
    pub fn cursor_at(&self, position: Position) -> Cursor<'_, T> {
        Cursor::new(self, self.live(position))
    }

    /// A cursor pointing at the smallest element.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.begin().node())
    }

    /// A cursor pointing at the greatest element.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        Cursor::new(self, self.last_id())
    }

    /// Finds an element comparing equal to `key`. Returns the end sentinel if there is none. When
    /// several equal elements are stored, the one closest to the root is found.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let tree = Tree::from([5, 3, 8]);
    ///
    /// assert_eq!(tree.get(tree.find(&3)), Some(&3));
    /// assert_eq!(tree.find(&42), tree.end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Position
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find_by(|value| key.cmp(value.borrow()))
    }

    /// Descends by `compare`, which orders the sought element against the element of each node it
    /// is given.
    pub(crate) fn find_by<F>(&self, mut compare: F) -> Position
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            current = match compare(&node.value) {
                Ordering::Less => node.left,
                Ordering::Equal => return Position::at(id),
                Ordering::Greater => node.right,
            };
        }

        Position::END
    }

    /// Whether an element comparing equal to `key` is stored.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(key).is_end()
    }

    /// Erases the element at `position` and returns the position of the element that followed
    /// it. Erasing the end sentinel, or a position that was already erased, does nothing and
    /// returns the end sentinel.
    ///
    /// Only positions of the erased element are invalidated; the returned position and every
    /// other position stay valid.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::from([1, 2, 3]);
    /// let next = tree.erase(tree.find(&2));
    ///
    /// assert_eq!(tree.get(next), Some(&3));
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn erase(&mut self, position: Position) -> Position {
        match self.live(position) {
            Some(id) => Position::from_node(self.detach(id).1),
            None => Position::END,
        }
    }

    /// Erases the element at `position` and returns it.
    pub fn take(&mut self, position: Position) -> Option<T> {
        self.live(position).map(|id| self.detach(id).0)
    }

    /// Erases every element from `first` up to, but not including, `last`, and returns `last`.
    /// Stops early at the end sentinel if `last` is never reached.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        let mut current = first;
        while current != last {
            match self.live(current) {
                Some(id) => current = Position::from_node(self.detach(id).1),
                None => break,
            }
        }

        last
    }

    /// Erases every element.
    pub fn clear(&mut self) {
        if !self.is_empty() {
            debug!(released = self.len(), "clearing tree");
        }
        self.nodes.clear();
        self.root = None;
    }

    /// Exchanges the contents of two trees without touching any node.
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id.0]
    }

    /// Mutable access to an element. Callers must not change how it orders.
    pub(crate) fn value_mut(&mut self, position: Position) -> Option<&mut T> {
        let id = self.live(position)?;
        Some(self.element_mut(id))
    }

    /// Same as [`value_mut`](Self::value_mut) for a node known to be live.
    pub(crate) fn element_mut(&mut self, id: NodeId) -> &mut T {
        &mut self.node_mut(id).value
    }

    /// The node `position` refers to, if it is still in the tree.
    pub(crate) fn live(&self, position: Position) -> Option<NodeId> {
        position.node().filter(|id| self.nodes.contains(id.0))
    }

    pub(crate) fn last_id(&self) -> Option<NodeId> {
        self.root.map(|root| self.rightmost(root))
    }

    pub(crate) fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.node(id).left {
            id = left;
        }
        id
    }

    pub(crate) fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.node(id).right {
            id = right;
        }
        id
    }

    /// The in-order successor: the leftmost node of the right subtree, or else the first ancestor
    /// reached from its left side.
    pub(crate) fn successor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.node(id).right {
            return Some(self.leftmost(right));
        }

        let mut child = id;
        while let Some(parent) = self.node(child).parent {
            if self.node(parent).left == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    /// Mirror image of [`successor`](Self::successor).
    pub(crate) fn predecessor(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.node(id).left {
            return Some(self.rightmost(left));
        }

        let mut child = id;
        while let Some(parent) = self.node(child).parent {
            if self.node(parent).right == Some(child) {
                return Some(parent);
            }
            child = parent;
        }
        None
    }

    fn slot_of(&self, id: NodeId) -> Slot {
        match self.node(id).parent {
            None => Slot::Root,
            Some(parent) => {
                let side = self
                    .node(parent)
                    .side_of(id)
                    .expect("A parent always holds its child in one of its slots");
                Slot::Child(parent, side)
            }
        }
    }

    /// Hangs `child` (or nothing) in `slot` and points the child's parent link back at the slot's
    /// owner.
    fn attach(&mut self, slot: Slot, child: Option<NodeId>) {
        let parent = match slot {
            Slot::Root => {
                self.root = child;
                None
            }
            Slot::Child(parent, side) => {
                self.node_mut(parent).set_child(side, child);
                Some(parent)
            }
        };
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
    }

    /// Removes `id` from the tree and returns its element together with its successor. The
    /// successor is found before any link changes and is never moved, so it stays valid.
    pub(crate) fn detach(&mut self, id: NodeId) -> (T, Option<NodeId>) {
        let next = self.successor(id);
        self.unlink(id);
        (self.nodes.remove(id.0).value, next)
    }

    /// Takes `id` out of the link graph. Its own links are left stale; the caller frees it.
    fn unlink(&mut self, id: NodeId) {
        let slot = self.slot_of(id);
        let node = self.node(id);
        match (node.left, node.right) {
            (None, None) => {
                trace!(node = ?id, "erasing leaf");
                self.attach(slot, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!(node = ?id, child = ?child, "erasing node with one child");
                self.attach(slot, Some(child));
            }
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                trace!(node = ?id, successor = ?successor, "erasing node with two children");

                // The successor has no left child. When it sits deeper than `right`, its parent
                // adopts its right subtree and it takes over `right` itself.
                if successor != right {
                    let successor_slot = self.slot_of(successor);
                    let orphan = self.node(successor).right;
                    self.attach(successor_slot, orphan);
                    self.attach(Slot::Child(successor, Side::Right), Some(right));
                }
                self.attach(Slot::Child(successor, Side::Left), Some(left));
                self.attach(slot, Some(successor));
            }
        }
    }

    /// Frees the subtree rooted at `id`, which must already be unhooked from its parent. Returns
    /// how many nodes were freed.
    fn release(&mut self, id: NodeId) -> usize {
        let mut stack = vec![id];
        let mut released = 0;
        while let Some(id) = stack.pop() {
            let node = self.nodes.remove(id.0);
            stack.extend(node.left);
            stack.extend(node.right);
            released += 1;
        }
        released
    }
}

impl<T> Tree<T>
where
    T: Clone,
{
    /// Synchronises `self` with `source` by walking both trees in lock step. Nodes present in both
    /// are overwritten in place, nodes only in `source` are created and subtrees only in `self` are
    /// freed.
    fn assign(&mut self, source: &Self) {
        let Some(source_root) = source.root else {
            self.clear();
            return;
        };

        let (mut reused, mut created, mut released) = (0usize, 0usize, 0usize);
        // (node in `source`, node in the same place in `self` if there is one, where it hangs)
        let mut stack = vec![(source_root, self.root, Slot::Root)];
        while let Some((from, into, slot)) = stack.pop() {
            let value = &source.node(from).value;
            let into = match into {
                Some(into) => {
                    self.node_mut(into).value.clone_from(value);
                    reused += 1;
                    into
                }
                None => {
                    created += 1;
                    NodeId(self.nodes.insert(Node::leaf(value.clone(), None)))
                }
            };
            self.attach(slot, Some(into));

            for side in Side::BOTH {
                match (source.node(from).child(side), self.node(into).child(side)) {
                    (Some(from_child), into_child) => {
                        stack.push((from_child, into_child, Slot::Child(into, side)));
                    }
                    (None, Some(into_child)) => {
                        self.node_mut(into).set_child(side, None);
                        released += self.release(into_child);
                    }
                    (None, None) => {}
                }
            }
        }

        debug!(reused, created, released, len = self.len(), "assigned tree");
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Inserts `value`. Returns the position of the new element and `true`, or, when `duplicates`
    /// is [`Duplicates::Reject`] and an equal element is already stored, the position of that
    /// element and `false`. In the latter case `value` is dropped and the tree is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::{Duplicates, Tree};
    ///
    /// let mut tree = Tree::new();
    /// for x in [5, 3, 8, 1, 4] {
    ///     tree.insert(x, Duplicates::Reject);
    /// }
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
    /// ```
    pub fn insert(&mut self, value: T, duplicates: Duplicates) -> (Position, bool) {
        match self.insert_or_return(value, duplicates) {
            Ok(id) => (Position::at(id), true),
            Err((existing, _)) => (Position::at(existing), false),
        }
    }

    /// Same as [`insert`](Self::insert) but hands a rejected value back to the caller along with
    /// the node that refused it.
    pub(crate) fn insert_or_return(
        &mut self,
        value: T,
        duplicates: Duplicates,
    ) -> std::result::Result<NodeId, (NodeId, T)> {
        // Descend without touching anything so the tree is unchanged if we bail out.
        let mut slot = Slot::Root;
        let mut current = self.root;
        while let Some(id) = current {
            let node = self.node(id);
            let side = match value.cmp(&node.value) {
                Ordering::Less => Side::Left,
                Ordering::Equal if duplicates == Duplicates::Reject => return Err((id, value)),
                Ordering::Equal | Ordering::Greater => Side::Right,
            };
            slot = Slot::Child(id, side);
            current = node.child(side);
        }

        let parent = match slot {
            Slot::Root => None,
            Slot::Child(parent, _) => Some(parent),
        };
        let id = NodeId(self.nodes.insert(Node::leaf(value, parent)));
        self.attach(slot, Some(id));

        if cfg!(debug_assertions) {
            if let Slot::Child(parent, side) = slot {
                let (value, parent) = (&self.node(id).value, &self.node(parent).value);
                match side {
                    Side::Left => assert!(value < parent),
                    Side::Right => assert!(value >= parent),
                }
            }
        }

        Ok(id)
    }

    /// Checks the ordering, parent link and count invariants of the whole tree and reports the
    /// first one found broken.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordtree::Tree;
    ///
    /// let mut tree = Tree::from([5, 3, 8, 1, 4, 7, 9]);
    /// tree.erase(tree.find(&5));
    ///
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<()> {
        let Some(root) = self.root else {
            return match self.len() {
                0 => Ok(()),
                n => Err(Error::invariant(format!("empty tree holds {n} unreachable nodes"))),
            };
        };
        let root_node = self
            .nodes
            .get(root.0)
            .ok_or_else(|| Error::invariant(format!("root {root:?} is not a live node")))?;
        if let Some(parent) = root_node.parent {
            return Err(Error::invariant(format!("root {root:?} has parent {parent:?}")));
        }

        // (node, inclusive lower bound, exclusive upper bound)
        let mut stack: Vec<(NodeId, Option<&T>, Option<&T>)> = vec![(root, None, None)];
        let mut reached = 0;
        while let Some((id, lower, upper)) = stack.pop() {
            reached += 1;
            if reached > self.len() {
                return Err(Error::invariant("child links form a cycle or share a node"));
            }

            let node = self.node(id);
            let below_lower = lower.map_or(false, |lower| node.value < *lower);
            let above_upper = upper.map_or(false, |upper| node.value >= *upper);
            if below_lower || above_upper {
                return Err(Error::invariant(format!("node {id:?} is out of order")));
            }

            for side in Side::BOTH {
                let Some(child) = node.child(side) else {
                    continue;
                };
                let child_node = self.nodes.get(child.0).ok_or_else(|| {
                    Error::invariant(format!("node {id:?} links to vacant slot {child:?}"))
                })?;
                if child_node.parent != Some(id) {
                    return Err(Error::invariant(format!(
                        "node {child:?} is a child of {id:?} but points at {:?}",
                        child_node.parent
                    )));
                }
                stack.push(match side {
                    Side::Left => (child, lower, Some(&node.value)),
                    Side::Right => (child, Some(&node.value), upper),
                });
            }
        }

        if reached != self.len() {
            return Err(Error::invariant(format!(
                "{} nodes stored but {reached} reachable",
                self.len()
            )));
        }
        Ok(())
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    /// Inserts every element, keeping duplicates.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value, Duplicates::Allow);
        }
    }
}

impl<T, const N: usize> From<[T; N]> for Tree<T>
where
    T: Ord,
{
    fn from(values: [T; N]) -> Self {
        values.into_iter().collect()
    }
}

impl<T> IntoIterator for Tree<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a Tree<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}


#[cfg(test)]
mod quicktests {
    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a sorted `Vec` kept as a model of the same
    /// multiset, checking the invariants as it goes.
    fn do_ops<K>(ops: &[Op<K, ()>], tree: &mut Tree<K>, model: &mut Vec<K>)
    where
        K: Ord + Clone + std::fmt::Debug,
    {
        for op in ops {
            match op {
                Op::Insert(k, ()) => {
                    tree.insert(k.clone(), Duplicates::Allow);
                    let at = model.partition_point(|x| x <= k);
                    model.insert(at, k.clone());
                }
                Op::Remove(k) => {
                    let erased = tree.take(tree.find(k));
                    let at = model.binary_search(k).ok();
                    assert_eq!(erased, at.map(|at| model.remove(at)));
                }
                Op::Iter => assert!(tree.iter().eq(model.iter())),
            }
            assert_eq!(tree.validate(), Ok(()));
        }
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, ()>>) -> bool {
            let mut tree = Tree::new();
            let mut model = Vec::new();

            do_ops(&ops, &mut tree, &mut model);
            tree.len() == model.len() && tree.iter().eq(model.iter())
        }
    }

    quickcheck::quickcheck! {
        fn erase_returns_successor(xs: Vec<i8>, pick: usize) -> bool {
            let mut tree: Tree<i8> = xs.iter().copied().collect();
            if tree.is_empty() {
                return true;
            }

            let mut sorted = xs;
            sorted.sort();
            let target = sorted[pick % sorted.len()];
            let position = tree.find(&target);
            let expected = tree.get(tree.advance(position)).copied();

            let next = tree.erase(position);
            tree.get(next).copied() == expected && tree.validate().is_ok()
        }
    }

    quickcheck::quickcheck! {
        fn clone_from_matches_source(destination: Vec<i8>, source: Vec<i8>) -> bool {
            let source: Tree<i8> = source.into_iter().collect();
            let mut destination: Tree<i8> = destination.into_iter().collect();

            destination.clone_from(&source);
            destination == source && destination.validate().is_ok()
        }
    }
}
