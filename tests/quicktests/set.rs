use std::collections::BTreeSet;

use ordtree::Set;

use crate::Op;

/// Applies a set of operations to a `Set` and a `BTreeSet`.
fn do_ops(ops: &[Op<i8, ()>], set: &mut Set<i8>, model: &mut BTreeSet<i8>) {
    for op in ops {
        match op {
            Op::Insert(k, ()) => assert_eq!(set.insert(*k), model.insert(*k)),
            Op::Remove(k) => assert_eq!(set.remove(k), model.remove(k)),
            Op::Iter => assert!(set.iter().eq(model.iter())),
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, ()>>) -> bool {
    let mut set = Set::new();
    let mut model = BTreeSet::new();

    do_ops(&ops, &mut set, &mut model);
    set.len() == model.len() && set.iter().eq(model.iter())
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let set: Set<i8> = xs.iter().copied().collect();

    xs.iter().all(|x| set.contains(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let set: Set<i8> = xs.iter().copied().collect();
    let added: BTreeSet<_> = xs.into_iter().collect();

    nots.iter()
        .filter(|x| !added.contains(*x))
        .all(|x| !set.contains(x))
}

#[quickcheck]
fn ordering_matches_btree_set(xs: Vec<i8>, ys: Vec<i8>) -> bool {
    let left: Set<i8> = xs.iter().copied().collect();
    let right: Set<i8> = ys.iter().copied().collect();
    let model_left: BTreeSet<i8> = xs.into_iter().collect();
    let model_right: BTreeSet<i8> = ys.into_iter().collect();

    left.cmp(&right) == model_left.cmp(&model_right)
        && (left == right) == (model_left == model_right)
}

#[quickcheck]
fn clone_from_matches_source(destination: Vec<i8>, source: Vec<i8>) -> bool {
    let source: Set<i8> = source.into_iter().collect();
    let mut destination: Set<i8> = destination.into_iter().collect();

    destination.clone_from(&source);
    destination == source
}
