//! This crate exposes an ordered container engine built on a Binary Search Tree (BST), together
//! with the [`Set`] and [`Map`] built on top of it.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of value (the value that was inserted, for example) and will
//! sometimes have child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    value less than its own value.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    value not less than its own value (equal values go right when the tree
//!    keeps duplicates).
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for values in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree does no rebalancing, so inserting
//! sorted input produces a tree as tall as it is long; every operation here is iterative so
//! such trees are slow but never overflow the stack.
//!
//! ## Walking the tree
//!
//! Every `Node` also knows its parent. That lets a [`Cursor`] or an [`Iter`] step to the next
//! element from any `Node` without keeping a stack of ancestors: the next element is either the
//! leftmost `Node` of the right subtree or the first ancestor whose left subtree we are leaving.
//!
//! ```
//! use ordtree::{Duplicates, Tree};
//!
//! let mut tree = Tree::new();
//! for x in [5, 3, 8, 1, 4] {
//!     tree.insert(x, Duplicates::Reject);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 8]);
//!
//! // Erasing hands back the position of the next element.
//! let next = tree.erase(tree.find(&4));
//! assert_eq!(tree.get(next), Some(&5));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod cursor;
pub mod error;
pub mod map;
mod node;
pub mod set;
pub mod tree;

pub use cursor::{Cursor, IntoIter, Iter, Position};
pub use error::{Error, Result};
pub use map::Map;
pub use set::Set;
pub use tree::{Duplicates, Tree};
