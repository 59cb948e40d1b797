use std::collections::BTreeSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use ordtree::{Duplicates, Set, Tree};

#[derive(Clone)]
enum Container<T> {
    Tree(Tree<T>),
    Set(Set<T>),
    Std(BTreeSet<T>),
}

impl<T> Container<T>
where
    T: Ord,
{
    fn contains(&self, x: &T) -> bool {
        match self {
            Self::Tree(t) => t.contains(x),
            Self::Set(s) => s.contains(x),
            Self::Std(s) => s.contains(x),
        }
    }

    fn insert(&mut self, x: T) {
        match self {
            Self::Tree(t) => {
                t.insert(x, Duplicates::Allow);
            }
            Self::Set(s) => {
                s.insert(x);
            }
            Self::Std(s) => {
                s.insert(x);
            }
        }
    }

    fn remove(&mut self, x: &T) {
        match self {
            Self::Tree(t) => {
                t.erase(t.find(x));
            }
            Self::Set(s) => {
                s.remove(x);
            }
            Self::Std(s) => {
                s.remove(x);
            }
        }
    }
}

impl Container<i32> {
    fn sum(&self) -> i64 {
        match self {
            Self::Tree(t) => t.iter().map(|&x| i64::from(x)).sum(),
            Self::Set(s) => s.iter().map(|&x| i64::from(x)).sum(),
            Self::Std(s) => s.iter().map(|&x| i64::from(x)).sum(),
        }
    }
}

/// Inserts the middle of `xs` first, then each half, so the tree comes out full without
/// any rebalancing.
fn balanced_order(xs: &[i32], out: &mut Vec<i32>) {
    if !xs.is_empty() {
        let mid = xs.len() / 2;
        out.push(xs[mid]);
        balanced_order(&xs[..mid], out);
        balanced_order(&xs[mid + 1..], out);
    }
}

/// Helper to bench a function on a container.
/// It creates a group for the given name and closure and runs tests for various sizes and
/// containers before finishing the group.
fn bench_helper(c: &mut Criterion, name: &str, f: impl Fn(&mut Container<i32>, i32)) {
    let mut group = c.benchmark_group(name);

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let largest_element = num_nodes as i32 - 1;

        let mut order = Vec::with_capacity(num_nodes);
        balanced_order(&(0..num_nodes as i32).collect::<Vec<_>>(), &mut order);

        let containers = [
            ("tree", Container::Tree(order.iter().copied().collect())),
            ("set", Container::Set(order.iter().copied().collect())),
            ("btreeset", Container::Std(order.iter().copied().collect())),
        ];
        for (name, container) in containers {
            let id = BenchmarkId::new(name, largest_element);

            group.bench_function(id, |b| {
                b.iter_custom(|iters| {
                    let mut time = std::time::Duration::ZERO;
                    for _ in 0..iters {
                        let mut container = black_box(container.clone());
                        let instant = std::time::Instant::now();
                        f(&mut container, black_box(largest_element));
                        let elapsed = instant.elapsed();
                        time += elapsed;
                    }
                    time
                })
            });
        }
    }

    group.finish();
}

/// Copying into an existing tree reuses its nodes, so `clone_from` into a tree of the same size
/// should beat a fresh `clone`.
fn bench_clone(c: &mut Criterion) {
    let mut group = c.benchmark_group("clone");

    for num_levels in [3, 7, 11, 15] {
        let num_nodes = 2usize.pow(num_levels as u32) - 1;
        let mut order = Vec::with_capacity(num_nodes);
        balanced_order(&(0..num_nodes as i32).collect::<Vec<_>>(), &mut order);
        let source: Tree<i32> = order.into_iter().collect();

        group.bench_with_input(BenchmarkId::new("clone", num_nodes), &source, |b, source| {
            b.iter(|| black_box(source.clone()))
        });

        let mut destination = source.clone();
        group.bench_with_input(BenchmarkId::new("clone_from", num_nodes), &source, |b, source| {
            b.iter(|| destination.clone_from(black_box(source)))
        });
    }

    group.finish();
}

pub fn criterion_benchmark(c: &mut Criterion) {
    bench_helper(c, "find", |container, i| {
        let _value = black_box(container.contains(&i));
    });
    bench_helper(c, "remove", |container, i| {
        container.remove(&i);
    });

    bench_helper(c, "insert", |container, i| {
        container.insert(i + 1);
    });

    bench_helper(c, "find-miss", |container, i| {
        let _value = black_box(container.contains(&(i + 1)));
    });
    bench_helper(c, "remove-miss", |container, i| {
        container.remove(&(i + 1));
    });

    bench_helper(c, "iterate", |container, _| {
        let _sum = black_box(container.sum());
    });

    bench_clone(c);
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
