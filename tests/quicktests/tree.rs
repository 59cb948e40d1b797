use ordtree::{Duplicates, Tree};

use crate::Op;

/// Applies a set of operations to a tree and a sorted `Vec`.
/// This way we can ensure that after a random smattering of inserts
/// and erases we hold the same multiset of elements.
fn do_ops(ops: &[Op<i8, bool>], tree: &mut Tree<i8>, model: &mut Vec<i8>) {
    for op in ops {
        match op {
            Op::Insert(k, unique) => {
                let duplicates = if *unique {
                    Duplicates::Reject
                } else {
                    Duplicates::Allow
                };
                let (position, inserted) = tree.insert(*k, duplicates);
                assert_eq!(tree.get(position), Some(k));
                assert_eq!(inserted, !*unique || !model.contains(k));
                if inserted {
                    let at = model.partition_point(|x| x <= k);
                    model.insert(at, *k);
                }
            }
            Op::Remove(k) => {
                let next = tree.erase(tree.find(k));
                if let Ok(at) = model.binary_search(k) {
                    model.remove(at);
                    // Everything after the erased element is not less than it.
                    assert!(tree.get(next).map_or(true, |next| next >= k));
                } else {
                    assert!(next.is_end());
                }
            }
            Op::Iter => assert!(tree.iter().eq(model.iter())),
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, bool>>) -> bool {
    let mut tree = Tree::new();
    let mut model = Vec::new();

    do_ops(&ops, &mut tree, &mut model);
    tree.validate().is_ok() && tree.len() == model.len() && tree.iter().eq(model.iter())
}

#[quickcheck]
fn traversal_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    tree.len() == tree.iter().count() && tree.iter().eq(sorted.iter())
}

#[quickcheck]
fn reverse_traversal_is_reverse_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    tree.iter().rev().eq(sorted.iter().rev())
}

#[quickcheck]
fn unique_insert_keeps_one_of_each(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, Duplicates::Reject);
    }
    let mut deduped = xs;
    deduped.sort();
    deduped.dedup();

    tree.iter().eq(deduped.iter())
}

#[quickcheck]
fn every_erase_keeps_invariants(xs: Vec<i8>, erases: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.iter().copied().collect();
    for x in &erases {
        tree.erase(tree.find(x));
        if tree.validate().is_err() {
            return false;
        }
    }

    let mut still_present = xs;
    for x in &erases {
        if let Some(at) = still_present.iter().position(|y| y == x) {
            still_present.swap_remove(at);
        }
    }
    still_present.sort();

    tree.iter().eq(still_present.iter())
}

#[quickcheck]
fn erasing_begin_empties(xs: Vec<i8>) -> bool {
    let mut tree: Tree<i8> = xs.into_iter().collect();

    let mut position = tree.begin();
    while !position.is_end() {
        position = tree.erase(position);
    }

    tree.is_empty() && tree.len() == 0 && tree.iter().next().is_none()
}

#[quickcheck]
fn clone_is_independent(xs: Vec<i8>, extra: Vec<i8>) -> bool {
    let original: Tree<i8> = xs.iter().copied().collect();
    let mut copy = original.clone();
    copy.extend(extra.iter().copied());
    copy.erase(copy.begin());

    let mut sorted = xs;
    sorted.sort();
    original.len() == sorted.len() && original.iter().eq(sorted.iter())
}

#[quickcheck]
fn into_iter_is_sorted(xs: Vec<i8>) -> bool {
    let tree: Tree<i8> = xs.iter().copied().collect();
    let mut sorted = xs;
    sorted.sort();

    tree.into_iter().eq(sorted)
}
