use std::collections::BTreeMap;

use ordtree::{Error, Map};

use crate::Op;

/// Applies a set of operations to a map and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same entries in both.
fn do_ops<K, V>(ops: &[Op<K, V>], map: &mut Map<K, V>, model: &mut BTreeMap<K, V>)
where
    K: Ord + Clone + std::fmt::Debug,
    V: PartialEq + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(k, v) => {
                let replaced = map.insert(k.clone(), v.clone());
                assert_eq!(replaced, model.insert(k.clone(), v.clone()));
            }
            Op::Remove(k) => {
                assert_eq!(map.remove(k), model.remove(k));
            }
            Op::Iter => assert!(map.iter().eq(model.iter())),
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    let mut map = Map::new();
    let mut model = BTreeMap::new();

    do_ops(&ops, &mut map, &mut model);
    model.keys().all(|key| map.get(key) == model.get(key)) && map.iter().eq(model.iter())
}

#[quickcheck]
fn at_matches_get(pairs: Vec<(i8, i8)>, probes: Vec<i8>) -> bool {
    let map: Map<i8, i8> = pairs.into_iter().collect();

    probes.iter().all(|key| match map.get(key) {
        Some(value) => map.at(key) == Ok(value),
        None => map.at(key) == Err(Error::OutOfRange),
    })
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    let mut map = Map::new();
    for x in &xs {
        map.insert(*x, *x);
    }
    for delete in &deletes {
        map.remove(delete);
    }

    deletes.iter().all(|x| map.get(x).is_none())
        && xs
            .iter()
            .filter(|x| !deletes.contains(*x))
            .all(|x| map.get(x) == Some(x))
}
