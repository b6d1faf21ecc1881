//! Benchmarks for depth-first id lookup.
//!
//! Run with: cargo bench -p viewbind-tree --bench find_bench

use std::hint::black_box;
use std::rc::Rc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use viewbind_tree::{Label, Panel, ViewHandle, ViewId, find_view_by_id};

/// Build a tree of `depth` nested panels, each holding `width` labels.
/// The highest label id is placed in the deepest panel (worst case hit).
fn make_tree(depth: u32, width: u32) -> (ViewHandle, ViewId) {
    let mut next_id = 1u32;
    let root = Rc::new(Panel::new());
    let mut current = root.clone();
    for _ in 0..depth {
        for _ in 0..width {
            current.add_child(Rc::new(Label::with_id(ViewId(next_id), "")));
            next_id += 1;
        }
        let nested = Rc::new(Panel::new());
        current.add_child(nested.clone());
        current = nested;
    }
    let last = ViewId(next_id - 1);
    let handle: ViewHandle = root;
    (handle, last)
}

fn bench_find_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("find/deep_hit");

    for (depth, width) in [(4, 8), (8, 16), (16, 32)] {
        let nodes = u64::from(depth) * u64::from(width);
        group.throughput(Throughput::Elements(nodes));
        let (root, target) = make_tree(depth, width);
        group.bench_with_input(
            BenchmarkId::new("lookup", format!("{depth}x{width}")),
            &(),
            |b, _| b.iter(|| black_box(find_view_by_id(&root, target))),
        );
    }

    group.finish();
}

fn bench_find_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("find/full_scan_miss");

    for (depth, width) in [(4, 8), (8, 16), (16, 32)] {
        let nodes = u64::from(depth) * u64::from(width);
        group.throughput(Throughput::Elements(nodes));
        let (root, _) = make_tree(depth, width);
        group.bench_with_input(
            BenchmarkId::new("lookup", format!("{depth}x{width}")),
            &(),
            |b, _| b.iter(|| black_box(find_view_by_id(&root, ViewId(u32::MAX)))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_find_hit, bench_find_miss);
criterion_main!(benches);
